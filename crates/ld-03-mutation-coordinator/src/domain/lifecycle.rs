//! # Mutation Lifecycle
//!
//! ```text
//! Idle ──submit──→ Building ──built──→ AwaitingSignature ──signed──→ Submitted
//!                     │                       │                         │
//!                     ↓                       ↓                         ↓
//!              Failed(BuildError)   Failed(UserRejected |          Confirming
//!                                          WalletError |             │    │
//!                                          SubmissionError)          │    ↓
//!                                                                    │  Failed(ConfirmationTimeout |
//!                                                                    │         ConfirmationError |
//!                                                                    ↓         LedgerRejected)
//!                                                                Confirmed
//! ```
//!
//! `reset` returns to `Idle` from anywhere.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a mutation ended in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// The user declined to sign.
    UserRejected,
    /// The wallet could not sign.
    WalletError,
    /// The signed transaction was not delivered.
    SubmissionError,
    /// The request could not be turned into a transaction.
    BuildError,
    /// No confirmation within the bounded wait. The transaction may still land.
    ConfirmationTimeout,
    /// Confirmation polling failed. The transaction may still land.
    ConfirmationError,
    /// The ledger executed and aborted the transaction.
    LedgerRejected,
}

impl FailureKind {
    /// Stable label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::UserRejected => "user_rejected",
            FailureKind::WalletError => "wallet_error",
            FailureKind::SubmissionError => "submission_error",
            FailureKind::BuildError => "build_error",
            FailureKind::ConfirmationTimeout => "confirmation_timeout",
            FailureKind::ConfirmationError => "confirmation_error",
            FailureKind::LedgerRejected => "ledger_rejected",
        }
    }

    /// Whether the transaction may have executed despite the failure.
    pub fn outcome_unknown(self) -> bool {
        matches!(
            self,
            FailureKind::ConfirmationTimeout | FailureKind::ConfirmationError
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of the single mutation a coordinator tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Validated; building the payload.
    Building,
    /// Waiting for the wallet.
    AwaitingSignature,
    /// Broadcast; digest known.
    Submitted,
    /// Waiting for the ledger to confirm.
    Confirming,
    /// Executed successfully.
    Confirmed,
    /// Ended without confirmation.
    Failed(FailureKind),
}

impl LifecycleState {
    /// States in which a new submission is refused.
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            LifecycleState::Building
                | LifecycleState::AwaitingSignature
                | LifecycleState::Submitted
                | LifecycleState::Confirming
        )
    }

    /// `Confirmed` or `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, LifecycleState::Confirmed | LifecycleState::Failed(_))
    }

    /// Whether the lifecycle may move from `self` to `next`. `Idle` is always
    /// reachable through reset.
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;
        match (self, next) {
            (_, Idle) => true,
            (Idle | Confirmed | Failed(_), Building) => true,
            (Building, AwaitingSignature) => true,
            (Building, Failed(FailureKind::BuildError)) => true,
            (AwaitingSignature, Submitted) => true,
            (
                AwaitingSignature,
                Failed(
                    FailureKind::UserRejected
                    | FailureKind::WalletError
                    | FailureKind::SubmissionError,
                ),
            ) => true,
            (Submitted, Confirming) => true,
            (Confirming, Confirmed) => true,
            (
                Confirming,
                Failed(
                    FailureKind::ConfirmationTimeout
                    | FailureKind::ConfirmationError
                    | FailureKind::LedgerRejected,
                ),
            ) => true,
            _ => false,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Idle => f.write_str("idle"),
            LifecycleState::Building => f.write_str("building"),
            LifecycleState::AwaitingSignature => f.write_str("awaiting_signature"),
            LifecycleState::Submitted => f.write_str("submitted"),
            LifecycleState::Confirming => f.write_str("confirming"),
            LifecycleState::Confirmed => f.write_str("confirmed"),
            LifecycleState::Failed(kind) => write!(f, "failed({})", kind),
        }
    }
}

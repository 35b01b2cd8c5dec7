//! # Coordinator Errors

use ld_01_transaction_builder::{BuildError, ValidationError};
use shared_types::{ConfirmationError, Digest, SubmissionError};
use thiserror::Error;

use super::lifecycle::{FailureKind, LifecycleState};

/// A submission was refused before anything ran.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The request failed validation; nothing was built or sent.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Another mutation is in flight.
    #[error("a mutation is already {state}")]
    Busy {
        /// State of the in-flight mutation.
        state: LifecycleState,
    },
}

/// Observable error of the current or last mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// Input rejected before building.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The payload could not be built.
    #[error("could not build transaction: {0}")]
    Build(#[from] BuildError),

    /// Signing or broadcast failed.
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// Confirmation did not arrive in time.
    #[error("transaction {digest} was not confirmed within {timeout_ms} ms; it may still be executed")]
    ConfirmationTimeout {
        /// Broadcast transaction.
        digest: Digest,
        /// Bound that elapsed.
        timeout_ms: u64,
    },

    /// Confirmation polling failed.
    #[error("could not confirm transaction {digest}: {source}")]
    Confirmation {
        /// Broadcast transaction.
        digest: Digest,
        /// Transport failure.
        #[source]
        source: ConfirmationError,
    },

    /// The ledger aborted the transaction.
    #[error("transaction {digest} was rejected by the ledger: {reason}")]
    LedgerRejected {
        /// Rejected transaction.
        digest: Digest,
        /// Abort reason.
        reason: String,
    },
}

impl MutationError {
    /// Lifecycle failure this error ends in. Validation errors leave the
    /// lifecycle `Idle`.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        Some(match self {
            MutationError::Validation(_) => return None,
            MutationError::Build(_) => FailureKind::BuildError,
            MutationError::Submission(SubmissionError::UserRejected) => FailureKind::UserRejected,
            MutationError::Submission(SubmissionError::Wallet(_)) => FailureKind::WalletError,
            MutationError::Submission(SubmissionError::Transport(_)) => {
                FailureKind::SubmissionError
            }
            MutationError::ConfirmationTimeout { .. } => FailureKind::ConfirmationTimeout,
            MutationError::Confirmation { .. } => FailureKind::ConfirmationError,
            MutationError::LedgerRejected { .. } => FailureKind::LedgerRejected,
        })
    }

    /// Digest of the transaction involved, once broadcast.
    pub fn digest(&self) -> Option<&Digest> {
        match self {
            MutationError::ConfirmationTimeout { digest, .. }
            | MutationError::Confirmation { digest, .. }
            | MutationError::LedgerRejected { digest, .. } => Some(digest),
            _ => None,
        }
    }
}

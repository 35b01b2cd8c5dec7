//! Scripted failures for the in-memory ledger.

use std::fmt;

/// A one-shot failure consumed by the next submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// The user declines to sign.
    RejectSignature,
    /// The wallet fails to sign.
    WalletError(String),
    /// The signed transaction never reaches the ledger.
    SubmitTransport(String),
    /// The transaction executes but its confirmation never arrives.
    HangConfirmation,
    /// The transaction executes but confirmation polling fails.
    ConfirmTransport(String),
    /// The ledger aborts the transaction with the given reason.
    Abort(String),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::RejectSignature => f.write_str("reject-signature"),
            Fault::WalletError(m) => write!(f, "wallet-error({})", m),
            Fault::SubmitTransport(m) => write!(f, "submit-transport({})", m),
            Fault::HangConfirmation => f.write_str("hang-confirmation"),
            Fault::ConfirmTransport(m) => write!(f, "confirm-transport({})", m),
            Fault::Abort(m) => write!(f, "abort({})", m),
        }
    }
}

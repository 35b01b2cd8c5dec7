//! # Error Types
//!
//! Errors raised at the Ledger Gateway boundary, shared by every subsystem.

use thiserror::Error;

/// Identifier text could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    /// Identifiers are written as `0x…`.
    #[error("identifier must start with 0x: {0:?}")]
    MissingPrefix(String),

    /// Zero digits, or more than 32 bytes worth of hex.
    #[error("identifier has {0} hex digits, expected 1..=64")]
    InvalidLength(usize),

    /// Non-hex character.
    #[error("identifier contains non-hex character {0:?}")]
    InvalidCharacter(char),

    /// Gateways never return empty digests.
    #[error("transaction digest is empty")]
    EmptyDigest,
}

/// Failure while signing or broadcasting a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The user declined the signature request in the wallet.
    #[error("signature request was rejected in the wallet")]
    UserRejected,

    /// The wallet failed (locked, disconnected, internal error).
    #[error("wallet error: {0}")]
    Wallet(String),

    /// The signed payload could not be delivered to the ledger.
    #[error("transaction submission failed: {0}")]
    Transport(String),
}

/// Failure while waiting for a transaction to be confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfirmationError {
    /// The ledger reported the transaction as rejected.
    #[error("ledger rejected transaction: {0}")]
    Rejected(String),

    /// Confirmation polling failed at the transport level.
    #[error("confirmation check failed: {0}")]
    Transport(String),
}

/// Network failure on a read path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ledger transport error: {0}")]
pub struct TransportError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_rejected_message() {
        let err = SubmissionError::UserRejected;
        assert!(err.to_string().contains("rejected"));
    }

    #[test]
    fn test_transport_error_message() {
        let err = TransportError("connection reset".to_string());
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_invalid_length_message() {
        let err = IdParseError::InvalidLength(70);
        assert!(err.to_string().contains("70"));
    }
}

//! # Read Model Errors

use shared_types::{ObjectId, TransportError};
use thiserror::Error;

/// A fetched object could not be projected into a view model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Packages and other non-struct objects have no fields.
    #[error("object is not a contract struct")]
    NotAMoveObject,

    /// The object is an instance of some other struct.
    #[error("expected struct {expected}, found {found}")]
    UnexpectedType {
        /// Configured struct type.
        expected: String,
        /// Type reported by the ledger.
        found: String,
    },

    /// A present field has the wrong shape.
    #[error("field '{field}' is invalid: {reason}")]
    InvalidField {
        /// Field name.
        field: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl SchemaError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Refresh of the tracked object failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// Nothing exists under the tracked id.
    #[error("object {0} not found")]
    NotFound(ObjectId),

    /// The object exists but does not decode.
    #[error("object {object_id} has an unexpected shape: {source}")]
    Schema {
        /// Object that failed to decode.
        object_id: ObjectId,
        /// Decode failure.
        #[source]
        source: SchemaError,
    },

    /// The fetch itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ReconcileError {
    /// Whether a later poll may succeed without user action.
    pub fn is_transient(&self) -> bool {
        matches!(self, ReconcileError::Transport(_))
    }

    /// Label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ReconcileError::NotFound(_) => "not_found",
            ReconcileError::Schema { .. } => "schema",
            ReconcileError::Transport(_) => "transport",
        }
    }
}

//! # Ledger Gateway Port
//!
//! The one outbound dependency of every subsystem: wallet signing, transaction
//! submission, confirmation and object reads. Implemented outside this
//! workspace by the wallet/RPC client; `shared-ledger` provides an in-memory
//! implementation for tests and demos.

use async_trait::async_trait;

use crate::entities::{Address, Digest, LedgerObject, ObjectId, TransactionEffects};
use crate::errors::{ConfirmationError, SubmissionError, TransportError};
use crate::transactions::TransactionPayload;

/// Ledger Gateway - outbound port.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Ask the wallet to sign `payload` and broadcast it.
    ///
    /// Resolves once the ledger accepted the signed transaction and its digest
    /// is known. Rejection in the wallet is `SubmissionError::UserRejected`.
    async fn submit(&self, payload: &TransactionPayload) -> Result<Digest, SubmissionError>;

    /// Wait until the transaction behind `digest` is executed.
    ///
    /// Implementations may wait indefinitely; callers bound the wait.
    async fn await_confirmation(
        &self,
        digest: &Digest,
    ) -> Result<TransactionEffects, ConfirmationError>;

    /// Fetch the current snapshot of an object. `Ok(None)` if it does not exist.
    async fn fetch_object(&self, id: &ObjectId) -> Result<Option<LedgerObject>, TransportError>;

    /// Objects of `struct_type` owned by `owner`.
    async fn owned_objects(
        &self,
        owner: &Address,
        struct_type: &str,
    ) -> Result<Vec<LedgerObject>, TransportError>;
}

//! # Outbound Ports
//!
//! The ledger itself is reached through `shared_types::LedgerGateway`; the
//! coordinator's only other dependency is whoever reacts to confirmations.

use async_trait::async_trait;
use ld_01_transaction_builder::ValidatedRequest;
use shared_types::TransactionEffects;

/// Reacts to a confirmed mutation, typically by patching and refreshing a
/// read model.
#[async_trait]
pub trait ConfirmationHandler: Send + Sync {
    /// Called once per confirmed mutation, after the lifecycle reached
    /// `Confirmed`.
    async fn on_confirmed(&self, request: &ValidatedRequest, effects: &TransactionEffects);
}

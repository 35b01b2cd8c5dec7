//! Observable coordinator state.

use ld_01_transaction_builder::ActionKind;
use shared_types::Digest;
use uuid::Uuid;

use super::errors::MutationError;
use super::lifecycle::LifecycleState;

/// What the UI renders for a coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoordinatorSnapshot {
    /// Lifecycle state.
    pub state: LifecycleState,
    /// Error of the current or last mutation.
    pub error: Option<MutationError>,
    /// Digest once the transaction has been broadcast.
    pub digest: Option<Digest>,
    /// Correlation id of the current or last request.
    pub request_id: Option<Uuid>,
    /// Action of the current or last request.
    pub action: Option<ActionKind>,
}

impl CoordinatorSnapshot {
    /// Whether a mutation is in flight.
    pub fn is_busy(&self) -> bool {
        self.state.is_in_flight()
    }
}

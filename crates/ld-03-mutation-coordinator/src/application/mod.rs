//! Application layer: the coordinator service.

pub mod coordinator;

pub use coordinator::{MutationCoordinator, MutationOutcome};

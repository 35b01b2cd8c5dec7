//! Runtime errors.

use ld_02_read_model::ReconcileError;
use ld_03_mutation_coordinator::SubmitError;
use shared_types::TransportError;
use thiserror::Error;

use crate::container::ConfigError;
use crate::ports::LocatorError;

/// Session and context failures.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// No contract package is configured, so objects cannot be typed.
    #[error("contract package is not configured")]
    ContractNotConfigured,

    /// The action needs a business and none is being shown.
    #[error("no business is registered in this session")]
    NoBusiness,

    /// The coordinator refused the request.
    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// The tracked object could not be read.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// An owned-object lookup failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The remembered object id could not be read or written.
    #[error(transparent)]
    Locator(#[from] LocatorError),

    /// Bad configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

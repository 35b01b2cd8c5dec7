//! Application layer: the reconciler service.

pub mod reconciler;

pub use reconciler::{Provenance, Reconciler, RefreshOutcome, ViewState};

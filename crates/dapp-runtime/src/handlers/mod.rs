//! # Handlers
//!
//! - `confirmation` - coordinator callbacks feeding the read models
//! - `metrics` - outcome and error counters

pub mod confirmation;
pub mod metrics;

pub use confirmation::{PizzaConfirmation, ReputationConfirmation};
pub use metrics::{record_submission, spawn_error_counter};

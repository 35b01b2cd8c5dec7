//! # Sessions
//!
//! One coordinator, one reconciler and one locator per app surface.

pub mod pizza;
pub mod reputation;

pub use pizza::PizzaSession;
pub use reputation::ReputationSession;

//! # Domain Module
//!
//! Requests, their invariants and the errors they produce.

pub mod errors;
pub mod invariants;
pub mod requests;

pub use errors::*;
pub use invariants::*;
pub use requests::*;

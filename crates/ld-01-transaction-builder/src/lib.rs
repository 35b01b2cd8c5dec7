//! # LD-01 Transaction Builder
//!
//! Validates user intents and maps them to contract calls.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Pure domain (no ports, no I/O)
//!
//! ## Purpose
//!
//! Every contract call the dApps make goes through here:
//!
//! | Action | Call | Arguments |
//! |--------|------|-----------|
//! | `register` | `umkm_reputation::register` | `string name`, `string category` |
//! | `record_revenue` | `umkm_reputation::record_revenue` | `object score`, `u64 amount` |
//! | `cook` | `pizza::cook` | `u16` × 5 (pepperoni, sausage, cheese, onion, chives) |
//!
//! ## Module Structure
//!
//! ```text
//! ld-01-transaction-builder/
//! ├── domain/      # MutationRequest, ValidatedRequest, invariants, errors
//! ├── builder.rs   # build(ValidatedRequest, ContractConfig) -> TransactionPayload
//! └── config.rs    # ContractConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod config;
pub mod domain;

// Re-exports
pub use builder::{build, MAX_PURE_ARG_BYTES};
pub use config::{ContractConfig, DEMO_PACKAGE_ID};
pub use domain::{
    Action, ActionKind, BuildError, MutationRequest, Topping, ToppingCounts, ValidatedAction,
    ValidatedRequest, ValidationError, MAX_TOPPING_COUNT,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

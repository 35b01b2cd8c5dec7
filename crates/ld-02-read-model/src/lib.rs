//! # LD-02 Read Model
//!
//! Turns ledger objects into typed view models and keeps them current.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Domain + application service over the `LedgerGateway` port
//!
//! ## Purpose
//!
//! - Decode `KredithScore` and `PizzaBox` objects into `BusinessView` and
//!   `PizzaBoxView`, filling documented defaults for missing fields.
//! - Derive tier, trust score, milestones and lender eligibility from revenue.
//! - Lay out pizza toppings deterministically.
//! - Reconcile optimistic patches with authoritative snapshots, refusing to
//!   display anything older than what is already shown.
//!
//! ## Module Structure
//!
//! ```text
//! ld-02-read-model/
//! ├── domain/
//! │   ├── view_models.rs  # BusinessView, PizzaBoxView
//! │   ├── projection.rs   # Projection trait, field decoding
//! │   ├── patches.rs      # OptimisticPatch and its three implementations
//! │   ├── history.rs      # Session-local revenue log
//! │   └── errors.rs       # SchemaError, ReconcileError
//! ├── algorithms/
//! │   ├── tier.rs         # Tier, milestones, progress
//! │   ├── lenders.rs      # Partner catalog
//! │   └── topping_layout.rs
//! ├── application/
//! │   └── reconciler.rs   # Version-gated view state + polling
//! └── config.rs           # ReconcilerConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;

// Re-exports
pub use algorithms::{
    eligible_lenders, format_idr, next_milestone, pizza_layout, progress_percent,
    topping_positions, Lender, Milestone, Tier, ToppingPosition, GOLD_THRESHOLD, LENDERS,
    MAX_LAYOUT_TOPPINGS, SILVER_THRESHOLD,
};
pub use application::{Provenance, Reconciler, RefreshOutcome, ViewState};
pub use config::ReconcilerConfig;
pub use domain::{
    BusinessView, CookPatch, HistoryEntry, OptimisticPatch, PizzaBoxView, Projection,
    ReconcileError, RegistrationPatch, RevenueHistory, RevenuePatch, SchemaError,
    DEFAULT_REVENUE_LABEL,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

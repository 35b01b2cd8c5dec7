//! # LD-03 Mutation Coordinator
//!
//! Single-flight state machine for ledger mutations.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (domain, ports, application service)
//!
//! ## Purpose
//!
//! Each UI surface owns one coordinator. It validates the request, builds
//! the payload through LD-01, asks the wallet to sign, waits a bounded time
//! for confirmation and then hands the effects to a `ConfirmationHandler`
//! (which patches and refreshes the LD-02 read model).
//!
//! ## Module Structure
//!
//! ```text
//! ld-03-mutation-coordinator/
//! ├── domain/
//! │   ├── lifecycle.rs    # LifecycleState, FailureKind, legal transitions
//! │   ├── errors.rs       # SubmitError, MutationError
//! │   └── snapshot.rs     # CoordinatorSnapshot
//! ├── ports/
//! │   └── outbound.rs     # ConfirmationHandler
//! ├── application/
//! │   └── coordinator.rs  # MutationCoordinator
//! └── config.rs           # CoordinatorConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::{MutationCoordinator, MutationOutcome};
pub use config::CoordinatorConfig;
pub use domain::{CoordinatorSnapshot, FailureKind, LifecycleState, MutationError, SubmitError};
pub use ports::ConfirmationHandler;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

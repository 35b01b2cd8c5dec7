//! # Dapp Runtime Library
//!
//! Wires the transaction builder, mutation coordinator and read model into
//! one context per connected account, for both apps.
//!
//! ## Flow
//!
//! ```text
//! view ──► ReputationSession / PizzaSession
//!              │ MutationRequest
//!              ▼
//!        MutationCoordinator ──build──► TransactionPayload
//!              │ submit / await_confirmation
//!              ▼
//!          LedgerGateway
//!              │ Confirmed
//!              ▼
//!   handlers::confirmation ──► ObjectLocator.save
//!              │                 Reconciler.apply_patch
//!              ▼                 Reconciler.refresh
//!        Reconciler ──watch──► view
//! ```
//!
//! ## Modules
//!
//! - `container/` - `RuntimeConfig` and `DappContext`
//! - `sessions/` - reputation and pizza app surfaces
//! - `handlers/` - confirmation callbacks and metric bridges
//! - `ports` / `adapters/` - where the shown object id is remembered

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod container;
pub mod errors;
pub mod handlers;
pub mod ports;
pub mod sessions;

pub use adapters::{FileLocator, FragmentLocator, MemoryLocator};
pub use container::{ConfigError, DappContext, RuntimeConfig};
pub use errors::RuntimeError;
pub use ports::{LocatorError, ObjectLocator};
pub use sessions::{PizzaSession, ReputationSession};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

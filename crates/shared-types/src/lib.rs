//! # Shared Types Crate
//!
//! Ledger-facing entities shared by every subsystem of the dApp client:
//! identifiers, object snapshots, transaction payloads and effects, and the
//! `LedgerGateway` port.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem types are defined here only.
//! - **Normalized identity**: ids and addresses are parsed once at the edge
//!   and compared in normalized form afterwards.
//! - **Opaque payloads**: subsystems build `TransactionPayload`s; only the
//!   gateway knows how to sign and execute them.

pub mod entities;
pub mod errors;
pub mod gateway;
pub mod transactions;

pub use entities::*;
pub use errors::*;
pub use gateway::LedgerGateway;
pub use transactions::*;

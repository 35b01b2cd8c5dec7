//! # Shared Ledger
//!
//! In-memory `LedgerGateway` for tests, local development and the demo
//! binary. It plays the wallet (signing as one fixed account), the RPC node
//! and the two deployed contracts.
//!
//! ```text
//! MutationCoordinator ── submit, await_confirmation ──┐
//!                                                      ├──→ InMemoryLedger
//! Reconciler ─────────── fetch_object, owned_objects ─┘
//! ```
//!
//! Failures are scripted with [`Fault`] so every lifecycle branch can be
//! driven deterministically.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod contracts;
pub mod faults;
pub mod ledger;

// Re-export main types
pub use contracts::{PIZZA_BOX_STRUCT, PIZZA_MODULE, REPUTATION_MODULE, REPUTATION_STRUCT};
pub use faults::Fault;
pub use ledger::InMemoryLedger;

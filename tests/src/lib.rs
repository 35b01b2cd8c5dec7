//! # Ledger dApp Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs        # Ledger, config and context builders
//! └── integration/       # End-to-end flows through DappContext
//!     ├── reputation_flow.rs
//!     ├── pizza_flow.rs
//!     ├── locator_flow.rs
//!     └── failure_modes.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ld-tests
//!
//! # By flow
//! cargo test -p ld-tests integration::reputation_flow
//! cargo test -p ld-tests integration::failure_modes
//!
//! # Benchmarks
//! cargo bench -p ld-tests
//! ```

pub mod fixtures;
pub mod integration;

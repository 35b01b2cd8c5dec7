//! # Runtime Container
//!
//! Configuration and the `DappContext` that wires gateway, sessions and
//! background tasks.

pub mod config;
pub mod context;

pub use config::{ConfigError, RuntimeConfig};
pub use context::DappContext;

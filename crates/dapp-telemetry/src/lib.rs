//! # Dapp Telemetry
//!
//! Logging and metrics shared by the dApp runtime.
//!
//! ## Components
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 dapp-runtime                 │
//! │  sessions ──► metrics::MUTATIONS_*           │
//! │  watchers ──► metrics::RECONCILE_ERRORS      │
//! └──────────────────────┬───────────────────────┘
//!                        │ init_telemetry()
//!          ┌─────────────┴─────────────┐
//!          ▼                           ▼
//!   tracing_subscriber          prometheus::Registry
//!   (EnvFilter + fmt/json)      (text exposition)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dapp_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! tracing::info!("started");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod metrics;
pub mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{encode_metrics, register_metrics, MetricsHandle};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize tracing: {0}")]
    TracingInit(String),

    /// A collector could not be registered or encoded.
    #[error("Failed to initialize metrics: {0}")]
    MetricsInit(String),

    /// Bad configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Keeps telemetry alive for the lifetime of the process.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
    _metrics: MetricsHandle,
}

impl TelemetryGuard {
    /// Service name the guard was created for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!(service = %self.service_name, "Telemetry shut down");
    }
}

/// Install logging and register metrics.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    init_tracing(&config)?;
    let metrics = register_metrics()?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
        _metrics: metrics,
    })
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

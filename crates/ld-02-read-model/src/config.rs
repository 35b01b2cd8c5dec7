//! # Read Model Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default background refresh period.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;

/// Reconciler configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Background refresh period in milliseconds. Zero disables polling.
    pub poll_interval_ms: u64,

    /// Refresh once, immediately, when a new object starts being watched.
    pub refresh_on_watch: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            refresh_on_watch: true,
        }
    }
}

impl ReconcilerConfig {
    /// Create a config for testing (fast polling).
    pub fn for_testing() -> Self {
        Self {
            poll_interval_ms: 20,
            refresh_on_watch: true,
        }
    }

    /// Poll period, or `None` when polling is disabled.
    pub fn poll_interval(&self) -> Option<Duration> {
        (self.poll_interval_ms > 0).then(|| Duration::from_millis(self.poll_interval_ms))
    }
}

//! # Coordinator Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default bound on the confirmation wait.
pub const DEFAULT_CONFIRMATION_TIMEOUT_MS: u64 = 60_000;

/// Coordinator configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// How long to wait for a broadcast transaction to be confirmed.
    pub confirmation_timeout_ms: u64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout_ms: DEFAULT_CONFIRMATION_TIMEOUT_MS,
        }
    }
}

impl CoordinatorConfig {
    /// Create a config for testing (short timeout).
    pub fn for_testing() -> Self {
        Self {
            confirmation_timeout_ms: 200,
        }
    }

    /// Confirmation bound as a `Duration`.
    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_millis(self.confirmation_timeout_ms)
    }
}

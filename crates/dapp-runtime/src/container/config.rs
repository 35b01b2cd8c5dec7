//! # Runtime Configuration
//!
//! Contract, coordinator and read-model settings for one dApp process.
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `LD_PACKAGE_ID` | `contract.package_id` |
//! | `LD_CONFIRMATION_TIMEOUT_SECS` | `coordinator.confirmation_timeout_ms` |
//! | `LD_POLL_INTERVAL_MS` | `reconciler.poll_interval_ms` (0 disables) |
//! | `LD_LOCATOR_FILE` | `locator_file` |

use std::path::PathBuf;

use ld_01_transaction_builder::ContractConfig;
use ld_02_read_model::ReconcilerConfig;
use ld_03_mutation_coordinator::CoordinatorConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Environment variable holding the package id.
pub const ENV_PACKAGE_ID: &str = "LD_PACKAGE_ID";
/// Environment variable holding the confirmation timeout in seconds.
pub const ENV_CONFIRMATION_TIMEOUT_SECS: &str = "LD_CONFIRMATION_TIMEOUT_SECS";
/// Environment variable holding the poll interval in milliseconds.
pub const ENV_POLL_INTERVAL_MS: &str = "LD_POLL_INTERVAL_MS";
/// Environment variable holding the locator file path.
pub const ENV_LOCATOR_FILE: &str = "LD_LOCATOR_FILE";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An override could not be parsed.
    #[error("{name}={value:?} is invalid: {reason}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Deployed contracts.
    pub contract: ContractConfig,
    /// Mutation lifecycle settings.
    pub coordinator: CoordinatorConfig,
    /// Read-model settings.
    pub reconciler: ReconcilerConfig,
    /// File remembering the business id; in-memory when unset.
    pub locator_file: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Create a config for testing (package `0x1`, short timeouts).
    pub fn for_testing() -> Self {
        Self {
            contract: ContractConfig::for_testing(),
            coordinator: CoordinatorConfig::for_testing(),
            reconciler: ReconcilerConfig::for_testing(),
            locator_file: None,
        }
    }

    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply overrides read through `lookup`. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (name, v))
        };

        if let Some((name, value)) = get(ENV_PACKAGE_ID) {
            let package = value.parse().map_err(|e: shared_types::IdParseError| {
                invalid(name, &value, e.to_string())
            })?;
            self.contract.package_id = Some(package);
            info!(package_id = %value, "Loaded package id from environment");
        }

        if let Some((name, value)) = get(ENV_CONFIRMATION_TIMEOUT_SECS) {
            let secs: u64 = value
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid(name, &value, e.to_string()))?;
            if secs == 0 {
                return Err(invalid(name, &value, "must be at least 1".to_string()));
            }
            self.coordinator.confirmation_timeout_ms = secs.saturating_mul(1_000);
        }

        if let Some((name, value)) = get(ENV_POLL_INTERVAL_MS) {
            self.reconciler.poll_interval_ms = value
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid(name, &value, e.to_string()))?;
        }

        if let Some((_, value)) = get(ENV_LOCATOR_FILE) {
            self.locator_file = Some(PathBuf::from(value));
        }

        Ok(())
    }
}

fn invalid(name: &'static str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidVar {
        name,
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert!(config.contract.package_id.is_some());
        assert_eq!(config.coordinator.confirmation_timeout_ms, 60_000);
        assert_eq!(config.reconciler.poll_interval_ms, 5_000);
        assert!(config.locator_file.is_none());
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = RuntimeConfig::default();
        config
            .apply_overrides(overrides(&[
                (ENV_PACKAGE_ID, "0x2"),
                (ENV_CONFIRMATION_TIMEOUT_SECS, "5"),
                (ENV_POLL_INTERVAL_MS, "0"),
                (ENV_LOCATOR_FILE, "/tmp/kredith"),
            ]))
            .unwrap();

        assert_eq!(config.contract.package_id, "0x2".parse().ok());
        assert_eq!(config.coordinator.confirmation_timeout_ms, 5_000);
        assert_eq!(config.reconciler.poll_interval_ms, 0);
        assert_eq!(config.locator_file, Some(PathBuf::from("/tmp/kredith")));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let mut config = RuntimeConfig::default();
        config
            .apply_overrides(overrides(&[(ENV_POLL_INTERVAL_MS, "  ")]))
            .unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = RuntimeConfig::default();
        let err = config
            .apply_overrides(overrides(&[(ENV_CONFIRMATION_TIMEOUT_SECS, "0")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidVar { name: ENV_CONFIRMATION_TIMEOUT_SECS, .. }
        ));

        assert!(config
            .apply_overrides(overrides(&[(ENV_PACKAGE_ID, "package")]))
            .is_err());
    }
}

//! Application configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `depot` invocation works out of the box.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the console application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where CSV/JSON/text exports land.
    pub export_dir: PathBuf,

    /// Where ledger backups land.
    pub backup_dir: PathBuf,

    /// Low-stock threshold for reports and notification sweeps.
    pub low_stock_threshold: i64,

    /// Expiry warning window in days for notification sweeps.
    pub expiry_window_days: i64,

    /// How many backups retention keeps.
    pub backup_keep: usize,

    /// Whether to load the demo catalog on startup.
    pub seed_demo: bool,
}

impl AppConfig {
    /// Load configuration from `DEPOT_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(AppConfig {
            export_dir: env::var("DEPOT_EXPORT_DIR")
                .unwrap_or_else(|_| "exports".to_string())
                .into(),

            backup_dir: env::var("DEPOT_BACKUP_DIR")
                .unwrap_or_else(|_| "backups".to_string())
                .into(),

            low_stock_threshold: env::var("DEPOT_LOW_STOCK_THRESHOLD")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DEPOT_LOW_STOCK_THRESHOLD".to_string()))?,

            expiry_window_days: env::var("DEPOT_EXPIRY_WINDOW_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DEPOT_EXPIRY_WINDOW_DAYS".to_string()))?,

            backup_keep: env::var("DEPOT_BACKUP_KEEP")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DEPOT_BACKUP_KEEP".to_string()))?,

            seed_demo: env::var("DEPOT_SEED_DEMO")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // DEPOT_* variables are not set in the test environment
        let config = AppConfig::load().unwrap();
        assert_eq!(config.export_dir, PathBuf::from("exports"));
        assert_eq!(config.backup_dir, PathBuf::from("backups"));
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.expiry_window_days, 7);
        assert_eq!(config.backup_keep, 10);
        assert!(config.seed_demo);
    }
}

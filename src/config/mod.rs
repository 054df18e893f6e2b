//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DECISION_ENGINE` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment yields a working setup.
//!
//! # Example
//!
//! ```no_run
//! use decision_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("History cap: {}", config.engine.history_cap);
//! ```

mod engine;
mod error;
mod logging;
mod storage;

pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Decision engine tuning (history bounds, seed, clock)
    #[serde(default)]
    pub engine: EngineConfig,

    /// Persistence backend
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log level and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DECISION_ENGINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DECISION_ENGINE__ENGINE__HISTORY_CAP=1000` -> `engine.history_cap = 1000`
    /// - `DECISION_ENGINE__STORAGE__BACKEND=filesystem` -> `storage.backend = filesystem`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DECISION_ENGINE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.engine.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("DECISION_ENGINE__ENGINE__HISTORY_CAP");
        env::remove_var("DECISION_ENGINE__ENGINE__HISTORY_TRIM_TO");
        env::remove_var("DECISION_ENGINE__ENGINE__RANDOM_SEED");
        env::remove_var("DECISION_ENGINE__ENGINE__UTC_OFFSET_MINUTES");
        env::remove_var("DECISION_ENGINE__STORAGE__BACKEND");
        env::remove_var("DECISION_ENGINE__STORAGE__DATA_DIR");
        env::remove_var("DECISION_ENGINE__LOGGING__FORMAT");
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.engine.history_cap, 1000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_engine_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("DECISION_ENGINE__ENGINE__HISTORY_CAP", "50");
        env::set_var("DECISION_ENGINE__ENGINE__HISTORY_TRIM_TO", "20");
        env::set_var("DECISION_ENGINE__ENGINE__RANDOM_SEED", "42");
        env::set_var("DECISION_ENGINE__ENGINE__UTC_OFFSET_MINUTES", "-300");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.engine.history_cap, 50);
        assert_eq!(config.engine.history_trim_to, 20);
        assert_eq!(config.engine.random_seed, Some(42));
        assert_eq!(config.engine.utc_offset_minutes, -300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_storage_and_logging() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("DECISION_ENGINE__STORAGE__BACKEND", "filesystem");
        env::set_var("DECISION_ENGINE__STORAGE__DATA_DIR", "/tmp/decisions");
        env::set_var("DECISION_ENGINE__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Filesystem);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/decisions"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("DECISION_ENGINE__ENGINE__HISTORY_CAP", "10");
        env::set_var("DECISION_ENGINE__ENGINE__HISTORY_TRIM_TO", "500");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidHistoryTrim { cap: 10, trim_to: 500 })
        ));
    }
}

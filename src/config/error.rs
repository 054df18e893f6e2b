//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("History cap must be at least 1")]
    InvalidHistoryCap,

    #[error("History trim target must be between 1 and cap - 1 (cap {cap}, trim_to {trim_to})")]
    InvalidHistoryTrim { cap: usize, trim_to: usize },

    #[error("UTC offset must be within +/-14 hours, got {0} minutes")]
    InvalidUtcOffset(i32),

    #[error("Optimal window hour must be 0-23, got {0}")]
    InvalidWindowHour(u32),

    #[error("Decision timeout must be greater than zero")]
    InvalidTimeout,

    #[error("Data directory required for filesystem storage")]
    MissingDataDir,

    #[error("Log level must not be empty")]
    MissingLogLevel,
}

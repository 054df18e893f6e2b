//! Engine configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::analysis::TemporalProcessor;
use crate::domain::decision::{HistoryLimits, DEFAULT_HISTORY_CAP, DEFAULT_HISTORY_TRIM_TO};
use crate::domain::foundation;

use super::error::ValidationError;

/// Largest accepted UTC offset, in minutes.
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Decision engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Records kept before the history is trimmed
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    /// Records kept after a trim
    #[serde(default = "default_history_trim_to")]
    pub history_trim_to: usize,

    /// Seed for reproducible decisions; entropy when absent
    pub random_seed: Option<u64>,

    /// Offset applied to the wall clock before temporal analysis
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Local hour evaluated by the optimal-window lookahead
    #[serde(default = "default_window_hour")]
    pub optimal_window_hour: u32,

    /// Caller-facing deadline; exceeded requests get the fallback result
    pub decision_timeout_ms: Option<u64>,

    /// Version stamped on every result
    #[serde(default = "default_engine_version")]
    pub engine_version: String,
}

impl EngineConfig {
    pub fn history_limits(&self) -> Result<HistoryLimits, foundation::ValidationError> {
        HistoryLimits::new(self.history_cap, self.history_trim_to)
    }

    pub fn temporal_processor(&self) -> Result<TemporalProcessor, foundation::ValidationError> {
        TemporalProcessor::new(self.utc_offset_minutes, self.optimal_window_hour)
    }

    pub fn decision_timeout(&self) -> Option<Duration> {
        self.decision_timeout_ms.map(Duration::from_millis)
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_cap == 0 {
            return Err(ValidationError::InvalidHistoryCap);
        }
        if self.history_trim_to == 0 || self.history_trim_to >= self.history_cap {
            return Err(ValidationError::InvalidHistoryTrim {
                cap: self.history_cap,
                trim_to: self.history_trim_to,
            });
        }
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ValidationError::InvalidUtcOffset(self.utc_offset_minutes));
        }
        if self.optimal_window_hour >= 24 {
            return Err(ValidationError::InvalidWindowHour(self.optimal_window_hour));
        }
        if self.decision_timeout_ms == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_cap: default_history_cap(),
            history_trim_to: default_history_trim_to(),
            random_seed: None,
            utc_offset_minutes: 0,
            optimal_window_hour: default_window_hour(),
            decision_timeout_ms: None,
            engine_version: default_engine_version(),
        }
    }
}

fn default_history_cap() -> usize {
    DEFAULT_HISTORY_CAP
}

fn default_history_trim_to() -> usize {
    DEFAULT_HISTORY_TRIM_TO
}

fn default_window_hour() -> u32 {
    10
}

fn default_engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.history_cap, 1000);
        assert_eq!(config.history_trim_to, 500);
        assert_eq!(config.random_seed, None);
        assert_eq!(config.optimal_window_hour, 10);
        assert_eq!(config.engine_version, env!("CARGO_PKG_VERSION"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = EngineConfig {
            history_cap: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidHistoryCap));
    }

    #[test]
    fn test_trim_must_be_below_cap() {
        let config = EngineConfig {
            history_cap: 10,
            history_trim_to: 10,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidHistoryTrim { .. })
        ));

        let config = EngineConfig {
            history_trim_to: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_offset_bounds() {
        let config = EngineConfig {
            utc_offset_minutes: -14 * 60,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = EngineConfig {
            utc_offset_minutes: 15 * 60,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidUtcOffset(900)));
    }

    #[test]
    fn test_window_hour_bounds() {
        let config = EngineConfig {
            optimal_window_hour: 24,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidWindowHour(24)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = EngineConfig {
            decision_timeout_ms: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_builds_domain_values() {
        let config = EngineConfig {
            history_cap: 20,
            history_trim_to: 5,
            decision_timeout_ms: Some(250),
            ..Default::default()
        };
        let limits = config.history_limits().unwrap();
        assert_eq!(limits.cap(), 20);
        assert_eq!(limits.trim_to(), 5);
        assert_eq!(config.decision_timeout(), Some(Duration::from_millis(250)));
        assert!(config.temporal_processor().is_ok());
    }
}

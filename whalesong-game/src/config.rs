//! Engine configuration loaded from JSON with per-field defaults.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::economy::{AetherMistConfig, TradeConfig};
use crate::season::{SeasonCalendar, SeasonName};

/// Errors raised when engine configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Parse(String),
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("consumption penalty {penalty:.2} would make production negative")]
    NegativeMultiplier { penalty: f64 },
    #[error("season slot {slot} holds configuration for {found}")]
    SeasonMismatch { slot: SeasonName, found: SeasonName },
    #[error("season {season} must last at least one turn")]
    EmptySeason { season: SeasonName },
}

/// Everything tunable about a voyage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub aether_mist: AetherMistConfig,
    #[serde(default)]
    pub trade: TradeConfig,
    #[serde(default)]
    pub seasons: SeasonCalendar,
}

impl EngineConfig {
    /// Parse and validate configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and any validation
    /// error reported by [`EngineConfig::validate`].
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns the first violated invariant across production, trade pricing
    /// and the season calendar.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aether_mist.validate()?;
        self.trade.validate()?;
        self.seasons.validate()
    }
}

//! Car-park configuration: capacity and the seasonal price table. Loaded once
//! at startup, validated, then injected into the engine — never ambient
//! global state.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// One seasonal pricing window. Months are inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRates {
    pub name: String,
    pub start_month: u32,
    pub end_month: u32,
    /// Minor currency units per weekday.
    pub weekday_price: u32,
    /// Minor currency units per weekend day (Saturday/Sunday).
    pub weekend_price: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarParkConfig {
    /// Maximum simultaneous active bookings on any single day.
    pub total_spaces: u32,
    pub currency: String,
    /// Out-of-season weekday rate, minor units.
    pub weekday_price: u32,
    /// Out-of-season weekend rate, minor units.
    pub weekend_price: u32,
    /// Evaluated in order, first matching month window wins. Keeping summer
    /// ahead of winter here is a configuration responsibility; overlapping
    /// windows are not detected at runtime.
    pub seasons: Vec<SeasonRates>,
}

impl Default for CarParkConfig {
    fn default() -> Self {
        Self {
            total_spaces: 10,
            currency: "GBP".into(),
            weekday_price: 1000,
            weekend_price: 1500,
            seasons: vec![
                SeasonRates {
                    name: "summer".into(),
                    start_month: 6,
                    end_month: 8,
                    weekday_price: 2000,
                    weekend_price: 2500,
                },
                SeasonRates {
                    name: "winter".into(),
                    start_month: 11,
                    end_month: 12,
                    weekday_price: 1500,
                    weekend_price: 2000,
                },
            ],
        }
    }
}

impl CarParkConfig {
    /// Load and validate a JSON config file. Absent fields fall back to the
    /// defaults above.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_spaces == 0 {
            return Err(ConfigError::Invalid("total_spaces must be at least 1"));
        }
        for season in &self.seasons {
            if season.start_month < 1 || season.end_month > 12 {
                return Err(ConfigError::Invalid("season months must be within 1..=12"));
            }
            if season.start_month > season.end_month {
                return Err(ConfigError::Invalid("season start_month is after end_month"));
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config read failed: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse failed: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate_card() {
        let config = CarParkConfig::default();
        assert_eq!(config.total_spaces, 10);
        assert_eq!(config.currency, "GBP");
        assert_eq!(config.weekday_price, 1000);
        assert_eq!(config.seasons.len(), 2);
        assert_eq!(config.seasons[0].name, "summer");
        assert_eq!(config.seasons[1].weekend_price, 2000);
        config.validate().unwrap();
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: CarParkConfig = serde_json::from_str(r#"{"total_spaces": 3}"#).unwrap();
        assert_eq!(config.total_spaces, 3);
        assert_eq!(config.weekday_price, 1000);
        assert_eq!(config.seasons.len(), 2);
    }

    #[test]
    fn zero_spaces_rejected() {
        let config = CarParkConfig {
            total_spaces: 0,
            ..CarParkConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn bad_season_months_rejected() {
        let mut config = CarParkConfig::default();
        config.seasons[0].end_month = 13;
        assert!(config.validate().is_err());

        let mut config = CarParkConfig::default();
        config.seasons[1].start_month = 12;
        config.seasons[1].end_month = 11;
        assert!(config.validate().is_err());
    }
}

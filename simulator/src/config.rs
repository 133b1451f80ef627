//! Configuration management for the vineyard simulator
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides: `VINEYARD_` prefix, `__` between
//!    nested keys (`VINEYARD_SIMULATION__SEED=7`)

use chrono::NaiveDate;
use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::DataConfig;
use validator::Validate;

/// Main simulator configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Output dataset location
    pub data: DataConfig,

    /// Generation parameters
    pub simulation: SimulationConfig,
}

/// Parameters of one generation run
#[derive(Debug, Deserialize, Clone, PartialEq, Validate)]
pub struct SimulationConfig {
    /// First simulated day
    pub start_date: NaiveDate,

    /// Number of simulated days
    #[validate(range(min = 1, max = 36600))]
    pub horizon_days: u32,

    /// Simulated vineyard surface
    #[validate(range(min = 1))]
    pub hectares: u32,

    /// Random seed; drawn from OS entropy when unset
    pub seed: Option<u64>,

    /// Soil moisture (%) on the day before the first simulated day
    #[validate(range(min = 0.0, max = 100.0))]
    pub initial_soil_moisture: f64,

    /// Fraction of soil moisture lost per day
    #[validate(range(min = 0.0, max = 1.0))]
    pub soil_decay: f64,

    /// Soil moisture points gained per mm of rain
    #[validate(range(min = 0.0, max = 1.0))]
    pub infiltration: f64,

    /// Growing degree days that bring the vines to full maturity
    #[validate(range(min = 1.0))]
    pub gdd_target: f64,
}

impl SimulationConfig {
    /// Last simulated day; `None` when the horizon runs past the calendar
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.start_date
            .checked_add_signed(chrono::Duration::days(i64::from(self.horizon_days) - 1))
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            // 2015-08-01 through 2025-09-30
            start_date: NaiveDate::from_ymd_opt(2015, 8, 1).unwrap_or_default(),
            horizon_days: 3714,
            hectares: 600,
            seed: None,
            initial_soil_moisture: 35.0,
            soil_decay: 0.08,
            infiltration: 0.6,
            gdd_target: 1800.0,
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("VINEYARD_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let defaults = SimulationConfig::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("data.path", shared::DEFAULT_DATA_PATH)?
            .set_default("simulation.start_date", defaults.start_date.to_string())?
            .set_default("simulation.horizon_days", i64::from(defaults.horizon_days))?
            .set_default("simulation.hectares", i64::from(defaults.hectares))?
            .set_default(
                "simulation.initial_soil_moisture",
                defaults.initial_soil_moisture,
            )?
            .set_default("simulation.soil_decay", defaults.soil_decay)?
            .set_default("simulation.infiltration", defaults.infiltration)?
            .set_default("simulation.gdd_target", defaults.gdd_target)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables, e.g. VINEYARD_SIMULATION__SEED=7
            .add_source(
                Environment::with_prefix("VINEYARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_horizon_spans_ten_vintages() {
        let config = SimulationConfig::default();
        assert_eq!(config.end_date(), NaiveDate::from_ymd_opt(2025, 9, 30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let config = SimulationConfig {
            horizon_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_decay_out_of_range_rejected() {
        let config = SimulationConfig {
            soil_decay: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_horizon_past_calendar_end() {
        let config = SimulationConfig {
            start_date: NaiveDate::MAX,
            horizon_days: 2,
            ..Default::default()
        };
        assert_eq!(config.end_date(), None);
    }

    #[test]
    fn test_env_override_uses_single_underscore_prefix() {
        std::env::set_var("VINEYARD_SIMULATION__SEED", "7");
        let loaded = Config::load();
        std::env::remove_var("VINEYARD_SIMULATION__SEED");

        let config = loaded.unwrap();
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.horizon_days, 3714);
    }

    #[test]
    fn test_single_day_horizon() {
        let config = SimulationConfig {
            start_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            horizon_days: 1,
            ..Default::default()
        };
        assert_eq!(config.end_date(), Some(config.start_date));
    }
}

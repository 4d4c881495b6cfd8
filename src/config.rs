//! Configuration loading from TOML files.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::{AllocationPolicy, PopulationSpec, ValueRange};
use crate::error::{ConfigError, Result};

/// Config path used when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub generator: PopulationSpec,
    pub allocation: AllocationPolicy,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data.db".into(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicitly given config file, or fall back to the default
    /// path when it exists, or to pure defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    /// Check every field. Called by [`Config::load`]; call again after
    /// applying CLI overrides.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.database.path.is_empty() {
            return Err(invalid("database.path", "cannot be empty"));
        }

        if self.generator.accounts == 0 {
            return Err(invalid("generator.accounts", "must be at least 1"));
        }
        if self.generator.issuers == 0 {
            return Err(invalid("generator.issuers", "must be at least 1"));
        }
        if self.generator.securities == 0 {
            return Err(invalid("generator.securities", "must be at least 1"));
        }

        check_range("generator.market_value", &self.generator.market_value)?;
        check_range("generator.price", &self.generator.price)?;
        check_range("generator.beta", &self.generator.beta)?;
        check_range("generator.duration", &self.generator.duration)?;

        check_fraction(
            "allocation.min_selection_fraction",
            self.allocation.min_selection_fraction,
        )?;
        check_fraction(
            "allocation.max_selection_fraction",
            self.allocation.max_selection_fraction,
        )?;
        if self.allocation.cash_weight <= 0.0 || self.allocation.cash_weight >= 1.0 {
            return Err(invalid(
                "allocation.cash_weight",
                "must be strictly between 0 and 1",
            ));
        }
        if !(1..=8).contains(&self.allocation.weight_precision) {
            return Err(invalid(
                "allocation.weight_precision",
                "must be between 1 and 8",
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

fn check_range(field: &'static str, range: &ValueRange) -> std::result::Result<(), ConfigError> {
    if range.min < 0.0 {
        return Err(invalid(field, format!("min {} is negative", range.min)));
    }
    if range.min > range.max {
        return Err(invalid(
            field,
            format!("min {} exceeds max {}", range.min, range.max),
        ));
    }
    Ok(())
}

fn check_fraction(field: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if value <= 0.0 || value > 1.0 {
        return Err(invalid(field, format!("{value} is not in (0, 1]")));
    }
    Ok(())
}

//! Configuration management for `tripbudget`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripBudgetError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::trip::DEFAULT_FALLBACK_NIGHTS;

/// Root configuration structure for `tripbudget`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripBudgetConfig {
    /// Defaults applied when the itinerary payload leaves something out
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults for incomplete itinerary payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Nights assumed when neither dates nor itinerary days are known
    #[serde(default = "default_fallback_nights")]
    pub fallback_nights: u32,
    /// Currency code for hotels that do not name one
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_fallback_nights() -> u32 {
    DEFAULT_FALLBACK_NIGHTS
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            fallback_nights: default_fallback_nights(),
            currency: default_currency(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TripBudgetConfig {
    /// File that `load_from_path` reads: the given path, else the default location
    #[must_use]
    pub fn resolve_path(config_path: Option<PathBuf>) -> PathBuf {
        config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        })
    }

    /// Load configuration from specified path, or the default location when `None`
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let explicit = config_path.is_some();
        let config_file = Self::resolve_path(config_path);

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        } else if explicit {
            return Err(TripBudgetError::config(format!(
                "Config file not found: {}",
                config_file.display()
            ))
            .into());
        }

        // TRIPBUDGET_DEFAULTS__FALLBACK_NIGHTS=5 overrides defaults.fallback_nights
        builder = builder.add_source(
            Environment::with_prefix("TRIPBUDGET")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripBudgetConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripbudget").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.defaults.currency.is_empty() {
            self.defaults.currency = default_currency();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.defaults.fallback_nights == 0 {
            return Err(TripBudgetError::config("Fallback nights must be at least 1").into());
        }

        if self.defaults.fallback_nights > 365 {
            return Err(
                TripBudgetError::config("Fallback nights cannot exceed 365").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripBudgetError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripBudgetError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let currency = &self.defaults.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(TripBudgetError::config(format!(
                "Invalid currency '{currency}'. Expected a three-letter code such as USD"
            ))
            .into());
        }

        Ok(())
    }
}

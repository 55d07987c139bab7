//! Configuration management for routewise
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. API keys are
//! only ever read from here, never embedded in source.

use crate::AnalysisError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutewiseConfig {
    /// Provider endpoints and credentials
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default analysis settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// External provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_opencage_base_url")]
    pub opencage_base_url: String,
    /// OpenCage geocoding API key
    pub opencage_api_key: Option<String>,
    #[serde(default = "default_openrouteservice_base_url")]
    pub openrouteservice_base_url: String,
    /// OpenRouteService API key
    pub openrouteservice_api_key: Option<String>,
    #[serde(default = "default_open_meteo_base_url")]
    pub open_meteo_base_url: String,
    #[serde(default = "default_rest_countries_base_url")]
    pub rest_countries_base_url: String,
    #[serde(default = "default_nager_base_url")]
    pub nager_base_url: String,
}

/// HTTP transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each further attempt
    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
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

/// Default analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Hourly weather samples per location
    #[serde(default = "default_forecast_hours")]
    pub forecast_hours: u32,
    /// Forecast days requested from the weather provider
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
    /// Holidays shown in the report preview
    #[serde(default = "default_upcoming_holidays")]
    pub upcoming_holidays: usize,
}

// Default value functions
fn default_opencage_base_url() -> String {
    "https://api.opencagedata.com".to_string()
}

fn default_openrouteservice_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_open_meteo_base_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_rest_countries_base_url() -> String {
    "https://restcountries.com".to_string()
}

fn default_nager_base_url() -> String {
    "https://date.nager.at".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_base_delay() -> u64 {
    500
}

fn default_user_agent() -> String {
    format!("routewise/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_forecast_hours() -> u32 {
    24
}

fn default_forecast_days() -> u32 {
    2
}

fn default_upcoming_holidays() -> usize {
    5
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            opencage_base_url: default_opencage_base_url(),
            opencage_api_key: None,
            openrouteservice_base_url: default_openrouteservice_base_url(),
            openrouteservice_api_key: None,
            open_meteo_base_url: default_open_meteo_base_url(),
            rest_countries_base_url: default_rest_countries_base_url(),
            nager_base_url: default_nager_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay(),
            user_agent: default_user_agent(),
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

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            forecast_hours: default_forecast_hours(),
            forecast_days: default_forecast_days(),
            upcoming_holidays: default_upcoming_holidays(),
        }
    }
}

impl RoutewiseConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // An explicit path must exist; the default location is optional
        match config_path {
            Some(path) => {
                builder = builder.add_source(
                    File::from(path)
                        .required(true)
                        .format(config::FileFormat::Toml),
                );
            }
            None => {
                if let Some(path) = Self::get_config_path().filter(|p| p.exists()) {
                    builder = builder.add_source(
                        File::from(path)
                            .required(false)
                            .format(config::FileFormat::Toml),
                    );
                }
            }
        }

        // e.g. ROUTEWISE_PROVIDERS__OPENCAGE_API_KEY
        builder = builder.add_source(
            Environment::with_prefix("ROUTEWISE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: RoutewiseConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("routewise").join("config.toml"))
    }

    /// Apply default values to empty or zero configuration fields
    pub fn apply_defaults(&mut self) {
        let providers = &mut self.providers;
        for (value, default) in [
            (&mut providers.opencage_base_url, default_opencage_base_url()),
            (
                &mut providers.openrouteservice_base_url,
                default_openrouteservice_base_url(),
            ),
            (&mut providers.open_meteo_base_url, default_open_meteo_base_url()),
            (
                &mut providers.rest_countries_base_url,
                default_rest_countries_base_url(),
            ),
            (&mut providers.nager_base_url, default_nager_base_url()),
        ] {
            if value.is_empty() {
                *value = default;
            }
        }

        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_timeout();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.forecast_hours == 0 {
            self.defaults.forecast_hours = default_forecast_hours();
        }
        if self.defaults.forecast_days == 0 {
            self.defaults.forecast_days = default_forecast_days();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Both keyed providers need a non-blank key
    pub fn validate_api_keys(&self) -> Result<()> {
        require_key(
            self.providers.opencage_api_key.as_deref(),
            "OpenCage",
            "ROUTEWISE_PROVIDERS__OPENCAGE_API_KEY",
        )?;
        require_key(
            self.providers.openrouteservice_api_key.as_deref(),
            "OpenRouteService",
            "ROUTEWISE_PROVIDERS__OPENROUTESERVICE_API_KEY",
        )?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds > 300 {
            return Err(AnalysisError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        if self.http.max_retries > 10 {
            return Err(AnalysisError::config("HTTP max retries cannot exceed 10").into());
        }

        if self.http.retry_base_delay_ms > 60_000 {
            return Err(
                AnalysisError::config("Retry base delay cannot exceed 60000 ms").into(),
            );
        }

        if self.defaults.forecast_days > 16 {
            return Err(AnalysisError::config("Forecast days cannot exceed 16").into());
        }

        if self.defaults.forecast_hours > 16 * 24 {
            return Err(AnalysisError::config("Forecast hours cannot exceed 384").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AnalysisError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AnalysisError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("OpenCage", &self.providers.opencage_base_url),
            ("OpenRouteService", &self.providers.openrouteservice_base_url),
            ("Open-Meteo", &self.providers.open_meteo_base_url),
            ("REST Countries", &self.providers.rest_countries_base_url),
            ("Nager.Date", &self.providers.nager_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AnalysisError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

fn require_key(key: Option<&str>, provider: &str, env_var: &str) -> Result<()> {
    match key.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(()),
        _ => Err(AnalysisError::config(format!(
            "Missing {provider} API key. Set it in the config file or via {env_var}."
        ))
        .into()),
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory (also holds the forecast cache slot)
    pub config_dir: PathBuf,

    /// Weather provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Alert threshold defaults, overridable per run from the CLI
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the forecast API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Static API key (optional, can be set via SKYCAST_API_KEY instead)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_api_url() -> String {
    "https://api.openweathermap.org".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: std::env::var("SKYCAST_API_KEY").ok(),
        }
    }
}

impl ProviderConfig {
    /// Resolve the API key, preferring the environment over the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var("SKYCAST_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.is_empty()))
    }
}

/// Default alert thresholds. Each bound is independently settable; there is
/// no cross-field invariant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Temperature above this fires a critical alert (°C)
    #[serde(default = "default_high_temp")]
    pub high_temp: f64,
    /// Temperature below this fires a warning alert (°C)
    #[serde(default = "default_low_temp")]
    pub low_temp: f64,
    /// Wind speed above this fires a warning alert (m/s)
    #[serde(default = "default_high_wind")]
    pub high_wind: f64,
    /// 3h precipitation above this fires a critical alert (mm)
    #[serde(default = "default_high_precip")]
    pub high_precip: f64,
}

fn default_high_temp() -> f64 {
    30.0
}

fn default_low_temp() -> f64 {
    -5.0
}

fn default_high_wind() -> f64 {
    50.0
}

fn default_high_precip() -> f64 {
    5.0
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            high_temp: default_high_temp(),
            low_temp: default_low_temp(),
            high_wind: default_high_wind(),
            high_precip: default_high_precip(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skycast");

        Self {
            config_dir,
            provider: ProviderConfig::default(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path (used by tests)
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Path of the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("skycast");
        Ok(dir.join("config.toml"))
    }

    /// Validate the configuration.
    ///
    /// Thresholds outside the suggested operating ranges produce warnings,
    /// not errors: the bounds are advisory, every field is independently
    /// settable.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.provider.api_url.is_empty() {
            result.add_error("provider.api_url", "API base URL must not be empty");
        }

        if self.provider.resolve_api_key().is_none() {
            result.add_warning(
                "provider.api_key",
                "No API key configured; live fetches will fail (set SKYCAST_API_KEY)",
            );
        }

        let t = &self.thresholds;
        if !(20.0..=40.0).contains(&t.high_temp) {
            result.add_warning(
                "thresholds.high_temp",
                format!("{} is outside the suggested range 20..=40 °C", t.high_temp),
            );
        }
        if !(-20.0..=0.0).contains(&t.low_temp) {
            result.add_warning(
                "thresholds.low_temp",
                format!("{} is outside the suggested range -20..=0 °C", t.low_temp),
            );
        }
        if !(20.0..=100.0).contains(&t.high_wind) {
            result.add_warning(
                "thresholds.high_wind",
                format!("{} is outside the suggested range 20..=100 m/s", t.high_wind),
            );
        }
        if !(0.0..=10.0).contains(&t.high_precip) {
            result.add_warning(
                "thresholds.high_precip",
                format!("{} is outside the suggested range 0..=10 mm", t.high_precip),
            );
        }

        result
    }
}

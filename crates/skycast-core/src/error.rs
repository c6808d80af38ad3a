//! Centralized error types for the Skycast dashboard.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the pipeline
//! - Provides user-friendly messages suitable for terminal display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// All errors in the Skycast pipeline should be convertible to this type.
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for terminal display.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Input(e) => e.user_message(),
            AppError::Fetch(e) => e.user_message(),
            AppError::Cache(e) => e.user_message(),
            AppError::Transform(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }

    /// Message for terminal display.
    ///
    /// Unexpected and malformed-data failures append the underlying error;
    /// the remaining variants already have actionable fixed text.
    pub fn display_message(&self) -> String {
        match self {
            AppError::Other(_) | AppError::Transform(_) => {
                format!("{} ({})", self.user_message(), self)
            }
            _ => self.user_message().to_string(),
        }
    }
}

/// Errors from user-supplied coordinates or thresholds.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{field} `{value}` is not a number")]
    NotNumeric { field: &'static str, value: String },

    #[error("{field} {value} is outside the valid range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl InputError {
    pub fn user_message(&self) -> &'static str {
        match self {
            InputError::NotNumeric { .. } => {
                "Coordinates must be numeric. Check latitude and longitude."
            }
            InputError::OutOfRange { .. } => {
                "Coordinates are out of range. Latitude must be within ±90, longitude within ±180."
            }
        }
    }
}

/// Errors from the weather provider fetch path.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Forecast unavailable: no live data and no cached forecast")]
    Unavailable,
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Network(_) => {
                "Unable to reach the weather service. Check your internet connection."
            }
            FetchError::Api { status, .. } if *status >= 500 => {
                "The weather service is experiencing issues. Please try again later."
            }
            FetchError::Api { .. } => "The weather service rejected the request. Check your API key.",
            FetchError::Unavailable => {
                "Weather data is unavailable and no cached forecast exists."
            }
        }
    }
}

/// Errors from the single-slot forecast cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache file is corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to read cache: {0}")]
    Read(std::io::Error),

    #[error("Failed to write cache: {0}")]
    Write(std::io::Error),
}

impl CacheError {
    pub fn user_message(&self) -> &'static str {
        match self {
            CacheError::Corrupt(_) => "The cached forecast is unreadable and will be replaced.",
            CacheError::Read(_) => "The cached forecast could not be read.",
            CacheError::Write(_) => "The forecast could not be saved for offline use.",
        }
    }
}

/// Errors from raw payload normalization.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Forecast entry {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("Forecast entry {index} has invalid timestamp {value}")]
    InvalidTimestamp { index: usize, value: i64 },
}

impl TransformError {
    pub fn user_message(&self) -> &'static str {
        match self {
            TransformError::MissingField { .. } | TransformError::InvalidTimestamp { .. } => {
                "The weather service returned unexpected data. Please try again later."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::MissingSetting(_) => {
                "A required setting is missing. Set SKYCAST_API_KEY or edit the config file."
            }
        }
    }
}

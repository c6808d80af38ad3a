use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use skycast_core::InputError;

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Geographic coordinate, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate from numeric values, checking ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InputError> {
        if !latitude.is_finite() || !(LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&latitude) {
            return Err(InputError::OutOfRange {
                field: "latitude",
                value: latitude,
                min: LATITUDE_RANGE.0,
                max: LATITUDE_RANGE.1,
            });
        }
        if !longitude.is_finite() || !(LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&longitude) {
            return Err(InputError::OutOfRange {
                field: "longitude",
                value: longitude,
                min: LONGITUDE_RANGE.0,
                max: LONGITUDE_RANGE.1,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a coordinate from text input (e.g. CLI arguments or a form).
    ///
    /// Non-numeric input is a user error, not a system fault.
    pub fn parse(lat_text: &str, lon_text: &str) -> Result<Self, InputError> {
        let latitude = lat_text
            .trim()
            .parse::<f64>()
            .map_err(|_| InputError::NotNumeric {
                field: "latitude",
                value: lat_text.to_string(),
            })?;
        let longitude = lon_text
            .trim()
            .parse::<f64>()
            .map_err(|_| InputError::NotNumeric {
                field: "longitude",
                value: lon_text.to_string(),
            })?;
        Self::new(latitude, longitude)
    }
}

/// Raw forecast payload as returned by the provider (and stored in the cache
/// slot). Unknown fields are preserved so the cached document stays
/// structurally identical to the provider response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastPayload {
    pub list: Vec<RawEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One raw 3-hourly entry from the provider's `list` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    /// Unix timestamp (seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<RawMain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<RawWind>,
    /// Accumulated rain over the preceding 3h, as an opaque object.
    /// Kept as raw JSON: a missing or non-object value means "no rain",
    /// never a parse error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<Value>,
    /// Accumulated snow over the preceding 3h, same semantics as `rain`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawEntry {
    /// Total precipitation (mm) over the preceding 3h: rain + snow, each
    /// defaulting to 0 when absent or malformed.
    pub fn precipitation(&self) -> f64 {
        depth_3h(self.rain.as_ref()) + depth_3h(self.snow.as_ref())
    }
}

/// Extract the `3h` accumulated depth from a rain/snow object.
fn depth_3h(value: Option<&Value>) -> f64 {
    value
        .and_then(|v| v.get("3h"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMain {
    /// Temperature in °C (units=metric)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWind {
    /// Wind speed in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One normalized forecast row with derived columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    /// Temperature in °C
    pub temperature: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// rain_3h + snow_3h in mm, 0 when the provider reports neither
    pub precipitation: f64,
    /// temperature − 0.7 × wind_speed (simplified linear model, not a
    /// standardized wind-chill index)
    pub wind_chill: f64,
}

/// Alert thresholds, passed into the evaluator as an immutable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub high_temp: f64,
    pub low_temp: f64,
    pub high_wind: f64,
    pub high_precip: f64,
}

impl From<skycast_core::ThresholdConfig> for Thresholds {
    fn from(config: skycast_core::ThresholdConfig) -> Self {
        Self {
            high_temp: config.high_temp,
            low_temp: config.low_temp,
            high_wind: config.high_wind,
            high_precip: config.high_precip,
        }
    }
}

/// Alert severity tag. Mapping to presentation (error vs warning styling)
/// is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Warning => "WARNING",
        }
    }
}

/// A single threshold violation, recomputed fresh on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub message: String,
    pub severity: Severity,
}

/// Result of an alert evaluation: either a non-empty list of alerts, or the
/// distinct "no extreme conditions" sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertReport {
    Alerts(Vec<Alert>),
    Calm,
}

impl AlertReport {
    pub fn is_calm(&self) -> bool {
        matches!(self, AlertReport::Calm)
    }

    /// The alerts, empty when calm.
    pub fn alerts(&self) -> &[Alert] {
        match self {
            AlertReport::Alerts(alerts) => alerts,
            AlertReport::Calm => &[],
        }
    }
}

//! Raw payload → tabular forecast rows with derived columns.

use chrono::{DateTime, Duration, Utc};

use skycast_core::TransformError;

use crate::types::{ForecastEntry, RawForecastPayload};

/// Linear wind-chill coefficient. A deliberate simplification of the real
/// wind-chill index: chill = temperature − 0.7 × wind speed.
pub const WIND_CHILL_FACTOR: f64 = 0.7;

/// Length of the retained forecast window, measured from the first entry.
pub const WINDOW_DAYS: i64 = 3;

/// Normalize a raw provider payload into ordered forecast rows.
///
/// Temperature and wind speed are required per entry; their absence is a
/// malformed payload and fatal for the run. Precipitation defaults to 0 when
/// the provider reports neither rain nor snow. Entries are windowed to
/// `first.timestamp + 3 days` inclusive, preserving provider order.
pub fn transform(payload: &RawForecastPayload) -> Result<Vec<ForecastEntry>, TransformError> {
    let mut entries = Vec::with_capacity(payload.list.len());
    let mut window_end: Option<DateTime<Utc>> = None;

    for (index, raw) in payload.list.iter().enumerate() {
        let dt = raw
            .dt
            .ok_or(TransformError::MissingField { index, field: "dt" })?;
        let timestamp = DateTime::<Utc>::from_timestamp(dt, 0)
            .ok_or(TransformError::InvalidTimestamp { index, value: dt })?;

        let temperature = raw
            .main
            .as_ref()
            .and_then(|m| m.temp)
            .ok_or(TransformError::MissingField {
                index,
                field: "main.temp",
            })?;
        let wind_speed = raw
            .wind
            .as_ref()
            .and_then(|w| w.speed)
            .ok_or(TransformError::MissingField {
                index,
                field: "wind.speed",
            })?;

        let end = *window_end.get_or_insert(timestamp + Duration::days(WINDOW_DAYS));
        if timestamp > end {
            continue;
        }

        entries.push(ForecastEntry {
            timestamp,
            temperature,
            wind_speed,
            precipitation: raw.precipitation(),
            wind_chill: temperature - WIND_CHILL_FACTOR * wind_speed,
        });
    }

    tracing::debug!(
        raw = payload.list.len(),
        windowed = entries.len(),
        "Transformed forecast payload"
    );
    Ok(entries)
}

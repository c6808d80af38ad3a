//! Threshold alert evaluation over a windowed forecast.

use crate::types::{Alert, AlertReport, ForecastEntry, Severity, Thresholds};

/// Evaluate the four threshold rules against the windowed forecast.
///
/// Rules run in a fixed order (high temp, low temp, high precip, high wind)
/// over max/min aggregates; each fires at most once regardless of how many
/// entries violate it. When nothing fires, the result is the distinct `Calm`
/// sentinel rather than an empty alert list.
pub fn evaluate(entries: &[ForecastEntry], thresholds: &Thresholds) -> AlertReport {
    let Some(aggregates) = Aggregates::over(entries) else {
        return AlertReport::Calm;
    };

    let mut alerts = Vec::new();

    if aggregates.max_temp > thresholds.high_temp {
        alerts.push(Alert {
            message: format!(
                "High temperature alert: peak {:.2} °C exceeds threshold {:.2} °C",
                aggregates.max_temp, thresholds.high_temp
            ),
            severity: Severity::Critical,
        });
    }

    if aggregates.min_temp < thresholds.low_temp {
        alerts.push(Alert {
            message: format!(
                "Low temperature alert: low {:.2} °C is below threshold {:.2} °C",
                aggregates.min_temp, thresholds.low_temp
            ),
            severity: Severity::Warning,
        });
    }

    if aggregates.max_precip > thresholds.high_precip {
        alerts.push(Alert {
            message: format!(
                "Heavy precipitation alert: peak {:.2} mm/3h exceeds threshold {:.2} mm",
                aggregates.max_precip, thresholds.high_precip
            ),
            severity: Severity::Critical,
        });
    }

    if aggregates.max_wind > thresholds.high_wind {
        alerts.push(Alert {
            message: format!(
                "High wind alert: peak {:.2} m/s exceeds threshold {:.2} m/s",
                aggregates.max_wind, thresholds.high_wind
            ),
            severity: Severity::Warning,
        });
    }

    if alerts.is_empty() {
        AlertReport::Calm
    } else {
        AlertReport::Alerts(alerts)
    }
}

struct Aggregates {
    max_temp: f64,
    min_temp: f64,
    max_wind: f64,
    max_precip: f64,
}

impl Aggregates {
    fn over(entries: &[ForecastEntry]) -> Option<Self> {
        let first = entries.first()?;
        let mut agg = Self {
            max_temp: first.temperature,
            min_temp: first.temperature,
            max_wind: first.wind_speed,
            max_precip: first.precipitation,
        };

        for entry in &entries[1..] {
            agg.max_temp = agg.max_temp.max(entry.temperature);
            agg.min_temp = agg.min_temp.min(entry.temperature);
            agg.max_wind = agg.max_wind.max(entry.wind_speed);
            agg.max_precip = agg.max_precip.max(entry.precipitation);
        }

        Some(agg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn entry(temp: f64, wind: f64, precip: f64) -> ForecastEntry {
        ForecastEntry {
            timestamp: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
            temperature: temp,
            wind_speed: wind,
            precipitation: precip,
            wind_chill: temp - 0.7 * wind,
        }
    }

    fn thresholds() -> Thresholds {
        Thresholds {
            high_temp: 30.0,
            low_temp: -5.0,
            high_wind: 50.0,
            high_precip: 5.0,
        }
    }

    #[test]
    fn test_high_temp_fires_once_citing_max() {
        let entries = vec![entry(31.0, 1.0, 0.0), entry(30.5, 1.0, 0.0)];
        let report = evaluate(&entries, &thresholds());

        let alerts = report.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert!(alerts[0].message.contains("31.00"));
    }

    #[test]
    fn test_calm_when_no_rule_fires() {
        let entries = vec![entry(20.0, 5.0, 1.0), entry(18.0, 8.0, 0.0)];
        let report = evaluate(&entries, &thresholds());

        assert!(report.is_calm());
        assert!(report.alerts().is_empty());
    }

    #[test]
    fn test_boundary_equality_does_not_fire() {
        // Rules are strict comparisons: exactly-at-threshold stays calm.
        let entries = vec![entry(30.0, 50.0, 5.0)];
        let report = evaluate(&entries, &thresholds());
        assert!(report.is_calm());
    }

    #[test]
    fn test_fixed_rule_order() {
        let entries = vec![entry(35.0, 60.0, 7.0), entry(-10.0, 1.0, 0.0)];
        let report = evaluate(&entries, &thresholds());

        let alerts = report.alerts();
        assert_eq!(alerts.len(), 4);
        assert!(alerts[0].message.starts_with("High temperature"));
        assert!(alerts[1].message.starts_with("Low temperature"));
        assert!(alerts[2].message.starts_with("Heavy precipitation"));
        assert!(alerts[3].message.starts_with("High wind"));
    }

    #[test]
    fn test_severity_tags() {
        let entries = vec![entry(35.0, 60.0, 7.0), entry(-10.0, 1.0, 0.0)];
        let report = evaluate(&entries, &thresholds());

        let severities: Vec<Severity> =
            report.alerts().iter().map(|a| a.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Critical,
                Severity::Warning,
                Severity::Critical,
                Severity::Warning,
            ]
        );
    }

    #[test]
    fn test_empty_forecast_is_calm() {
        let report = evaluate(&[], &thresholds());
        assert!(report.is_calm());
    }
}

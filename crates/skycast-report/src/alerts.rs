//! Flat-text alert artifact.

use std::path::Path;

use skycast_forecast::AlertReport;

/// Fixed sentinel written when no rule fired.
pub const NO_ALERTS_SENTINEL: &str = "No alerts found";

/// Flatten a report to newline-joined `[SEVERITY] message` lines, or the
/// sentinel when calm.
pub fn format_alerts(report: &AlertReport) -> String {
    if report.is_calm() {
        return NO_ALERTS_SENTINEL.to_string();
    }

    report
        .alerts()
        .iter()
        .map(|a| format!("[{}] {}", a.severity.label(), a.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the flattened report to disk, overwriting any previous artifact.
pub fn write_alerts(path: &Path, report: &AlertReport) -> std::io::Result<()> {
    std::fs::write(path, format_alerts(report))?;
    tracing::debug!(path = %path.display(), "Wrote alerts artifact");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_forecast::{Alert, Severity};

    fn sample_report() -> AlertReport {
        AlertReport::Alerts(vec![
            Alert {
                message: "High temperature alert: peak 31.00 °C exceeds threshold 30.00 °C"
                    .to_string(),
                severity: Severity::Critical,
            },
            Alert {
                message: "High wind alert: peak 55.00 m/s exceeds threshold 50.00 m/s"
                    .to_string(),
                severity: Severity::Warning,
            },
        ])
    }

    #[test]
    fn test_format_joins_with_severity_prefix() {
        let text = format_alerts(&sample_report());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[CRITICAL] High temperature"));
        assert!(lines[1].starts_with("[WARNING] High wind"));
    }

    #[test]
    fn test_calm_report_writes_sentinel() {
        assert_eq!(format_alerts(&AlertReport::Calm), NO_ALERTS_SENTINEL);
    }

    #[test]
    fn test_write_alerts_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.txt");

        write_alerts(&path, &sample_report()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[CRITICAL]"));

        // A calm run overwrites the previous artifact
        write_alerts(&path, &AlertReport::Calm).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, NO_ALERTS_SENTINEL);
    }
}

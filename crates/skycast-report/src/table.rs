//! Fixed-width text table for the forecast window.

use skycast_forecast::ForecastEntry;

/// Render the forecast as an aligned text table, one row per 3h entry.
pub fn render_table(entries: &[ForecastEntry]) -> String {
    let mut out = String::new();
    out.push_str("time (UTC)         temp °C   wind m/s   precip mm   chill °C\n");
    out.push_str("----------------   -------   --------   ---------   --------\n");

    for entry in entries {
        out.push_str(&format!(
            "{:<16}   {:>7.2}   {:>8.2}   {:>9.2}   {:>8.2}\n",
            entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            entry.temperature,
            entry.wind_speed,
            entry.precipitation,
            entry.wind_chill,
        ));
    }

    if entries.is_empty() {
        out.push_str("(no forecast entries)\n");
    }

    out
}

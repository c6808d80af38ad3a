//! Chart artifacts: temperature/wind-chill lines and precipitation bars.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use plotters::coord::types::RangedDateTime;
use plotters::prelude::*;

use skycast_forecast::ForecastEntry;

pub const TEMPERATURE_CHART: &str = "temperature.png";
pub const PRECIPITATION_CHART: &str = "precipitation.png";

const CHART_SIZE: (u32, u32) = (900, 500);

/// Render both chart artifacts into `dir` and return their paths.
///
/// An empty forecast produces no artifacts.
pub fn render_charts(dir: &Path, entries: &[ForecastEntry]) -> Result<Vec<PathBuf>> {
    if entries.is_empty() {
        tracing::warn!("No forecast entries; skipping chart rendering");
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let temperature_path = dir.join(TEMPERATURE_CHART);
    temperature_chart(&temperature_path, entries)
        .context("Failed to render temperature chart")?;

    let precipitation_path = dir.join(PRECIPITATION_CHART);
    precipitation_chart(&precipitation_path, entries)
        .context("Failed to render precipitation chart")?;

    tracing::info!(dir = %dir.display(), "Rendered chart artifacts");
    Ok(vec![temperature_path, precipitation_path])
}

/// Time axis over the forecast window, widened for single-entry forecasts so
/// the range is never empty.
fn time_range(entries: &[ForecastEntry]) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = entries[0].timestamp;
    let mut end = entries[entries.len() - 1].timestamp;
    if end <= start {
        end = start + Duration::hours(3);
    }
    (start, end)
}

fn temperature_chart(path: &Path, entries: &[ForecastEntry]) -> Result<()> {
    let (start, end) = time_range(entries);

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for e in entries {
        y_min = y_min.min(e.temperature).min(e.wind_chill);
        y_max = y_max.max(e.temperature).max(e.wind_chill);
    }
    let pad = ((y_max - y_min) * 0.1).max(1.0);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Temperature and wind chill (°C)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            RangedDateTime::from(start..end),
            (y_min - pad)..(y_max + pad),
        )?;

    chart
        .configure_mesh()
        .x_labels(8)
        .x_label_formatter(&|dt: &DateTime<Utc>| dt.format("%m-%d %H:%M").to_string())
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            entries.iter().map(|e| (e.timestamp, e.temperature)),
            &RED,
        ))?
        .label("temperature")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(LineSeries::new(
            entries.iter().map(|e| (e.timestamp, e.wind_chill)),
            &BLUE,
        ))?
        .label("wind chill")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn precipitation_chart(path: &Path, entries: &[ForecastEntry]) -> Result<()> {
    let (start, end) = time_range(entries);

    let y_max = entries
        .iter()
        .map(|e| e.precipitation)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Precipitation (mm per 3h)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            RangedDateTime::from(start..end),
            0.0..(y_max * 1.1),
        )?;

    chart
        .configure_mesh()
        .x_labels(8)
        .x_label_formatter(&|dt: &DateTime<Utc>| dt.format("%m-%d %H:%M").to_string())
        .draw()?;

    // One bar per 3h entry, centered on its timestamp
    let half_width = Duration::minutes(60);
    chart.draw_series(entries.iter().map(|e| {
        Rectangle::new(
            [
                (e.timestamp - half_width, 0.0),
                (e.timestamp + half_width, e.precipitation),
            ],
            BLUE.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

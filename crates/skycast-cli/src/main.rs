//! Skycast: a one-shot forecast dashboard.
//!
//! One run covers the whole pipeline: fetch-or-cache, normalize, window,
//! alert, then render the table, alerts file and chart artifacts.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use skycast_core::{AppError, Config, ConfigError};
use skycast_forecast::{
    cached_only, evaluate, fetch_or_cached, transform, AlertReport, Coordinate,
    ForecastCache, ForecastClient, ForecastSource, Severity, Thresholds,
};

#[derive(Parser)]
#[command(name = "skycast")]
#[command(about = "Fetch a 3-day forecast, derive wind chill and precipitation, flag alerts", long_about = None)]
struct Cli {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: String,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: String,

    /// Critical alert above this temperature (°C)
    #[arg(long)]
    high_temp: Option<f64>,

    /// Warning alert below this temperature (°C)
    #[arg(long, allow_hyphen_values = true)]
    low_temp: Option<f64>,

    /// Warning alert above this wind speed (m/s)
    #[arg(long)]
    high_wind: Option<f64>,

    /// Critical alert above this 3h precipitation (mm)
    #[arg(long)]
    high_precip: Option<f64>,

    /// Serve the cached forecast without contacting the provider
    #[arg(long)]
    no_network: bool,

    /// Directory for alerts.txt and chart PNGs
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    if let Err(e) = skycast_core::init() {
        eprintln!("error: failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Run failed: {err}");
            eprintln!("error: {}", err.display_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::load()?;

    let validation = config.validate();
    for warning in &validation.warnings {
        tracing::warn!("Config: {}", warning);
    }
    if !validation.is_valid() {
        return Err(ConfigError::Invalid(validation.error_summary()).into());
    }

    let coord = Coordinate::parse(&cli.lat, &cli.lon)?;

    let thresholds = Thresholds {
        high_temp: cli.high_temp.unwrap_or(config.thresholds.high_temp),
        low_temp: cli.low_temp.unwrap_or(config.thresholds.low_temp),
        high_wind: cli.high_wind.unwrap_or(config.thresholds.high_wind),
        high_precip: cli.high_precip.unwrap_or(config.thresholds.high_precip),
    };

    let cache = ForecastCache::new(&config.config_dir);

    let (payload, source) = if cli.no_network {
        cached_only(&cache)?
    } else {
        let api_key = config
            .provider
            .resolve_api_key()
            .ok_or_else(|| ConfigError::MissingSetting("provider.api_key".to_string()))?;
        let client = ForecastClient::with_base_url(&api_key, &config.provider.api_url)?;
        fetch_or_cached(&client, &cache, &coord).await?
    };

    if source == ForecastSource::Cached {
        println!("(showing cached forecast; live data unavailable)\n");
    }

    let entries = transform(&payload)?;
    let report = evaluate(&entries, &thresholds);

    println!("{}", skycast_report::render_table(&entries));
    print_alerts(&report);

    write_artifacts(&cli.out_dir, &entries, &report)?;

    Ok(())
}

/// Severity maps to presentation: Critical → error styling, Warning → warn.
fn print_alerts(report: &AlertReport) {
    if report.is_calm() {
        println!("No extreme conditions in the forecast window.");
        return;
    }

    for alert in report.alerts() {
        match alert.severity {
            Severity::Critical => tracing::error!("{}", alert.message),
            Severity::Warning => tracing::warn!("{}", alert.message),
        }
        println!("[{}] {}", alert.severity.label(), alert.message);
    }
}

fn write_artifacts(
    out_dir: &Path,
    entries: &[skycast_forecast::ForecastEntry],
    report: &AlertReport,
) -> Result<(), AppError> {
    std::fs::create_dir_all(out_dir)?;

    skycast_report::write_alerts(&out_dir.join("alerts.txt"), report)?;

    let charts = skycast_report::render_charts(out_dir, entries)?;
    for path in charts {
        println!("wrote {}", path.display());
    }
    println!("wrote {}", out_dir.join("alerts.txt").display());

    Ok(())
}

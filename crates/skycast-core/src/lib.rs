pub mod config;
pub mod error;

pub use config::{Config, ProviderConfig, ThresholdConfig, ValidationResult};
pub use error::{AppError, CacheError, ConfigError, FetchError, InputError, TransformError};

use anyhow::Result;

/// Initialize logging for the Skycast pipeline
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Skycast core initialized");
    Ok(())
}

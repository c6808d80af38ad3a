//! Weather provider HTTP client and the fetch-or-cache policy.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::instrument;

use skycast_core::FetchError;

use crate::cache::ForecastCache;
use crate::types::{Coordinate, RawForecastPayload};

const DEFAULT_API_URL: &str = "https://api.openweathermap.org";
const FORECAST_PATH: &str = "/data/2.5/forecast";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Where a payload came from on a given run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastSource {
    Live,
    Cached,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ForecastClient {
    /// Build a client with a bounded request timeout.
    pub fn new(api_key: &str) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, DEFAULT_API_URL)
    }

    /// Build a client against a non-default base URL (used by tests).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the 3-hourly forecast for a coordinate from the live API.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, coord: &Coordinate) -> Result<RawForecastPayload, FetchError> {
        let url = format!("{}{}", self.base_url, FORECAST_PATH);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coord.latitude.to_string()),
                ("lon", coord.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response(
        &self,
        response: Response,
    ) -> Result<RawForecastPayload, FetchError> {
        let status = response.status();

        if status.is_success() {
            let payload: RawForecastPayload = response.json().await?;
            tracing::info!(entries = payload.list.len(), "Fetched live forecast");
            return Ok(payload);
        }

        // Non-200 responses carry an optional `message` field in the body.
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| "Unknown Error".to_string());

        Err(FetchError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Cache-only path: serve the slot without contacting the provider.
///
/// An empty or unreadable slot is `FetchError::Unavailable`; there is
/// nothing else to serve.
pub fn cached_only(
    cache: &ForecastCache,
) -> Result<(RawForecastPayload, ForecastSource), FetchError> {
    match cache.load() {
        Ok(Some(payload)) => Ok((payload, ForecastSource::Cached)),
        Ok(None) => Err(FetchError::Unavailable),
        Err(cache_err) => {
            tracing::warn!("Cache read failed: {}", cache_err);
            Err(FetchError::Unavailable)
        }
    }
}

/// Network-first fetch policy.
///
/// Always attempt a live fetch. On success, overwrite the cache slot and
/// return fresh data; a cache write failure is logged and swallowed since the
/// payload is already in memory. On fetch failure, fall back to the cache
/// when a readable slot exists, else fail with `FetchError::Unavailable`.
pub async fn fetch_or_cached(
    client: &ForecastClient,
    cache: &ForecastCache,
    coord: &Coordinate,
) -> Result<(RawForecastPayload, ForecastSource), FetchError> {
    match client.fetch(coord).await {
        Ok(payload) => {
            if let Err(e) = cache.save(&payload) {
                tracing::warn!("Failed to cache forecast: {}", e);
            }
            Ok((payload, ForecastSource::Live))
        }
        Err(fetch_err) => {
            tracing::warn!("Live fetch failed: {}", fetch_err);
            match cache.load() {
                Ok(Some(payload)) => {
                    tracing::warn!("Falling back to cached forecast");
                    Ok((payload, ForecastSource::Cached))
                }
                Ok(None) => Err(FetchError::Unavailable),
                Err(cache_err) => {
                    tracing::warn!("Cache fallback failed: {}", cache_err);
                    Err(FetchError::Unavailable)
                }
            }
        }
    }
}

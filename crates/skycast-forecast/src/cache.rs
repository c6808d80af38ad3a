//! Single-slot JSON cache for the last fetched forecast payload.
//!
//! One global slot, last-writer-wins. Usage is single-user and
//! single-request-at-a-time, so there is no locking.

use std::path::{Path, PathBuf};

use skycast_core::CacheError;

use crate::types::RawForecastPayload;

const CACHE_FILE_NAME: &str = "forecast_cache.json";

#[derive(Debug, Clone)]
pub struct ForecastCache {
    cache_path: PathBuf,
}

impl ForecastCache {
    /// Cache slot under the given directory (normally the config dir).
    pub fn new(dir: &Path) -> Self {
        Self {
            cache_path: dir.join(CACHE_FILE_NAME),
        }
    }

    /// Cache slot at an explicit file path.
    pub fn at_path(cache_path: PathBuf) -> Self {
        Self { cache_path }
    }

    pub fn path(&self) -> &Path {
        &self.cache_path
    }

    /// Load the cached payload.
    ///
    /// An absent file is `Ok(None)`; a present but unparseable file is
    /// `CacheError::Corrupt`.
    pub fn load(&self) -> Result<Option<RawForecastPayload>, CacheError> {
        if !self.cache_path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.cache_path).map_err(CacheError::Read)?;
        let payload = serde_json::from_str(&contents)
            .map_err(|e| CacheError::Corrupt(e.to_string()))?;

        tracing::debug!(path = %self.cache_path.display(), "Loaded cached forecast");
        Ok(Some(payload))
    }

    /// Overwrite the slot with a new payload.
    ///
    /// Callers treat a failure here as a warning; the data being saved is
    /// already in memory and the pipeline continues without it.
    pub fn save(&self, payload: &RawForecastPayload) -> Result<(), CacheError> {
        if let Some(parent) = self.cache_path.parent() {
            std::fs::create_dir_all(parent).map_err(CacheError::Write)?;
        }

        let contents = serde_json::to_string(payload)
            .map_err(|e| CacheError::Corrupt(e.to_string()))?;
        std::fs::write(&self.cache_path, contents).map_err(CacheError::Write)?;

        tracing::debug!(path = %self.cache_path.display(), "Saved forecast to cache");
        Ok(())
    }
}

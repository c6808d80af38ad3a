//! Forecast pipeline for Skycast
//!
//! Fetch-or-cache → normalize → windowed derive → threshold alert. The
//! provider client and cache slot are the only side-effecting pieces; the
//! transform and alert stages are pure and testable in memory.

pub mod alert;
pub mod cache;
pub mod provider;
pub mod transform;
pub mod types;

pub use alert::evaluate;
pub use cache::ForecastCache;
pub use provider::{cached_only, fetch_or_cached, ForecastClient, ForecastSource};
pub use transform::transform;
pub use types::*;

//! Presentation layer for Skycast
//!
//! Renders the transformed forecast as a text table, flattens alerts to a
//! text artifact, and draws the two chart PNGs. No pipeline logic lives here.

pub mod alerts;
pub mod charts;
pub mod table;

pub use alerts::{format_alerts, write_alerts, NO_ALERTS_SENTINEL};
pub use charts::{render_charts, PRECIPITATION_CHART, TEMPERATURE_CHART};
pub use table::render_table;

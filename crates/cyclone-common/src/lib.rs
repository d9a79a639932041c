//! Common types and utilities shared by the cyclone chart jobs.

pub mod catalog;
pub mod chart;
pub mod error;
pub mod rendered;
pub mod time;

pub use catalog::{Catalog, StormSystem, DEFAULT_BASIN};
pub use chart::{
    build_png_url, extract_params, png_url_for_page, ChartKind, ChartParams, CHART_API_BASE,
};
pub use error::{CycloneError, CycloneResult};
pub use rendered::{RenderedCatalog, RenderedSystem, DEFAULT_CENTER, UNKNOWN_ID};
pub use time::{iso8601, now_iso8601, parse_iso8601};

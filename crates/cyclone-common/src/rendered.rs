//! Output document consumed by the front-end.

use serde::{Deserialize, Serialize};

use crate::catalog::{non_empty, Catalog, StormSystem};
use crate::chart::ChartKind;
use crate::error::CycloneResult;
use crate::time::now_iso8601;

/// Sentinel id for systems listed without one.
pub const UNKNOWN_ID: &str = "UNKNOWN";

/// Forecast center assumed when the catalog does not name one.
pub const DEFAULT_CENTER: &str = "ECMWF";

/// One storm system with its chart references resolved.
///
/// Every field is always serialized; unavailable values are `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSystem {
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub basin: String,
    pub center: String,
    pub advisory_time: Option<String>,
    /// Image the front-end puts in its strike `<img>`
    pub strike_image: Option<String>,
    /// Image the front-end puts in its plumes `<img>`
    pub plumes_image: Option<String>,
    /// Interactive strike page
    pub strike_page: Option<String>,
    /// Interactive plumes page
    pub plumes_page: Option<String>,
}

impl RenderedSystem {
    /// Resolved id of a catalog entry, never empty.
    pub fn resolve_id(system: &StormSystem) -> &str {
        non_empty(&system.id).unwrap_or(UNKNOWN_ID)
    }

    /// Build the output record from a catalog entry, with no images yet.
    pub fn from_system(system: &StormSystem, default_basin: &str) -> Self {
        let id = Self::resolve_id(system).to_string();
        Self {
            name: non_empty(&system.name).unwrap_or(id.as_str()).to_string(),
            year: system.year,
            basin: non_empty(&system.basin).unwrap_or(default_basin).to_string(),
            center: non_empty(&system.center).unwrap_or(DEFAULT_CENTER).to_string(),
            advisory_time: non_empty(&system.advisory_time).map(str::to_string),
            strike_image: None,
            plumes_image: None,
            strike_page: non_empty(&system.strike_url).map(str::to_string),
            plumes_page: non_empty(&system.plumes_url).map(str::to_string),
            id,
        }
    }

    /// Page URL for a chart kind.
    pub fn page(&self, kind: ChartKind) -> Option<&str> {
        match kind {
            ChartKind::Strike => self.strike_page.as_deref(),
            ChartKind::Plumes => self.plumes_page.as_deref(),
        }
    }

    pub fn set_image(&mut self, kind: ChartKind, image: Option<String>) {
        match kind {
            ChartKind::Strike => self.strike_image = image,
            ChartKind::Plumes => self.plumes_image = image,
        }
    }
}

/// The transformed document written for the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCatalog {
    pub basin: String,
    pub last_update: String,
    pub systems: Vec<RenderedSystem>,
}

impl RenderedCatalog {
    /// Empty output carrying the catalog's basin and timestamp.
    ///
    /// A catalog without `lastUpdate` gets the current time.
    pub fn header_from(catalog: &Catalog) -> Self {
        Self {
            basin: catalog.basin_or_default().to_string(),
            last_update: non_empty(&catalog.last_update)
                .map(str::to_string)
                .unwrap_or_else(now_iso8601),
            systems: Vec::with_capacity(catalog.systems.len()),
        }
    }

    /// Serialize as 2-space indented JSON.
    pub fn to_pretty_json(&self) -> CycloneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

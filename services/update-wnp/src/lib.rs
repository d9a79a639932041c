//! WNP catalog writer.
//!
//! Produces the catalog read by `build-ecmwf-wpac`. Every write is a full
//! replace; nothing from a previous catalog is kept.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::info;

use cyclone_common::{iso8601, Catalog, StormSystem, DEFAULT_BASIN};

/// Which systems the written catalog lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogContents {
    /// The built-in sample system
    #[default]
    Sample,
    /// No active systems
    Empty,
}

/// Where and what to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    pub catalog_path: PathBuf,
    pub basin: String,
    pub contents: CatalogContents,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data").join("wnp-catalog.json"),
            basin: DEFAULT_BASIN.to_string(),
            contents: CatalogContents::default(),
        }
    }
}

/// The sample system: 32W FUNG WONG, 2025-11-13 00Z AIFS ensemble cycle.
pub fn sample_systems() -> Vec<StormSystem> {
    vec![StormSystem {
        id: Some("32W".to_string()),
        name: Some("FUNG WONG".to_string()),
        year: Some(2025),
        basin: Some("WPAC".to_string()),
        center: Some("ECMWF".to_string()),
        advisory_time: Some("2025-11-13 00Z · offset D-8".to_string()),
        strike_url: Some(
            "https://charts.ecmwf.int/products/cyclone?base_time=202511130000&offset=D-8&product=tc_strike_aifs_ens&unique_id=32W_FUNGWONG_2025"
                .to_string(),
        ),
        plumes_url: Some(
            "https://charts.ecmwf.int/products/cyclone?base_time=202511130000&offset=D-8&product=tc_plumes_aifs_ens&unique_id=32W_FUNGWONG_2025"
                .to_string(),
        ),
    }]
}

/// Assemble a catalog stamped with `now`.
pub fn build_catalog(basin: &str, contents: CatalogContents, now: DateTime<Utc>) -> Catalog {
    let systems = match contents {
        CatalogContents::Sample => sample_systems(),
        CatalogContents::Empty => Vec::new(),
    };

    Catalog {
        basin: Some(basin.to_string()),
        last_update: Some(iso8601(&now)),
        systems,
    }
}

/// Write `catalog` to `path` as 2-space indented JSON, creating the parent
/// directory if needed.
pub async fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let json = catalog.to_pretty_json()?;
    fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write catalog: {}", path.display()))?;
    Ok(())
}

/// Build a fresh catalog and replace the one on disk.
pub async fn update_catalog(config: &WriterConfig) -> Result<Catalog> {
    let catalog = build_catalog(&config.basin, config.contents, Utc::now());
    write_catalog(&config.catalog_path, &catalog).await?;

    info!(
        path = %config.catalog_path.display(),
        basin = %config.basin,
        systems = catalog.systems.len(),
        "WNP catalog updated"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_build_sample_catalog() {
        let now = Utc.with_ymd_and_hms(2025, 11, 13, 6, 0, 0).unwrap();
        let catalog = build_catalog("WPAC", CatalogContents::Sample, now);

        assert_eq!(catalog.basin.as_deref(), Some("WPAC"));
        assert_eq!(catalog.last_update.as_deref(), Some("2025-11-13T06:00:00.000Z"));
        assert_eq!(catalog.systems.len(), 1);
        assert_eq!(catalog.systems[0].id.as_deref(), Some("32W"));
    }

    #[test]
    fn test_build_empty_catalog() {
        let catalog = build_catalog("EPAC", CatalogContents::Empty, Utc::now());
        assert_eq!(catalog.basin.as_deref(), Some("EPAC"));
        assert!(catalog.systems.is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = WriterConfig::default();
        assert_eq!(config.catalog_path, PathBuf::from("data/wnp-catalog.json"));
        assert_eq!(config.basin, "WPAC");
        assert_eq!(config.contents, CatalogContents::Sample);
    }
}

//! Pipeline configuration.
//!
//! Values come from an optional YAML file, then CLI arguments (each with an
//! environment fallback), then built-in defaults, in that order of
//! precedence from lowest to highest: defaults < file < CLI.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use cyclone_common::ChartKind;

/// Catalog file name inside the data directory.
pub const CATALOG_FILE: &str = "wnp-catalog.json";

/// Output file name inside the data directory.
pub const OUTPUT_FILE: &str = "ecmwf-wpac.json";

/// How the image fields of each rendered system are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ChartMode {
    /// Link straight to the PNG API
    #[default]
    ApiUrl,
    /// Download each PNG and link to the local copy
    Download,
    /// Pass page URLs through without deriving images
    Link,
}

/// Runtime configuration handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Directory holding the catalog, the output and downloaded charts
    pub data_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub output_path: PathBuf,
    pub mode: ChartMode,
    /// Prefix the front-end uses to reach `data_dir`
    pub public_prefix: String,
    /// Bound on each chart request
    pub request_timeout: Duration,
    /// Systems processed at once; output order is unaffected
    pub max_concurrent: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new("data")
    }
}

impl PipelineConfig {
    /// Configuration rooted at `data_dir` with default file names.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            catalog_path: data_dir.join(CATALOG_FILE),
            output_path: data_dir.join(OUTPUT_FILE),
            data_dir,
            mode: ChartMode::default(),
            public_prefix: "./data".to_string(),
            request_timeout: Duration::from_secs(60),
            max_concurrent: 1,
        }
    }

    pub fn with_mode(mut self, mode: ChartMode) -> Self {
        self.mode = mode;
        self
    }

    /// Build from layered overrides; unset values take defaults.
    pub fn from_overrides(overrides: ConfigOverrides) -> Self {
        let mut config = match overrides.data_dir {
            Some(dir) => Self::new(dir),
            None => Self::default(),
        };
        if let Some(path) = overrides.catalog_path {
            config.catalog_path = path;
        }
        if let Some(path) = overrides.output_path {
            config.output_path = path;
        }
        if let Some(mode) = overrides.mode {
            config.mode = mode;
        }
        if let Some(prefix) = overrides.public_prefix {
            config.public_prefix = prefix;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(n) = overrides.max_concurrent {
            config.max_concurrent = n.max(1);
        }
        config
    }

    /// Directory holding a system's downloaded charts.
    pub fn chart_dir(&self, system_id: &str) -> PathBuf {
        self.data_dir.join(path_component(system_id))
    }

    /// Where a downloaded chart is stored.
    pub fn chart_path(&self, system_id: &str, kind: ChartKind) -> PathBuf {
        self.chart_dir(system_id).join(kind.file_name())
    }

    /// Chart directories claimed by more than one of `system_ids`, with the
    /// ids that map to each.
    pub fn shared_chart_dirs<'a>(
        &self,
        system_ids: impl IntoIterator<Item = &'a str>,
    ) -> Vec<(PathBuf, Vec<&'a str>)> {
        let mut dirs: BTreeMap<PathBuf, Vec<&'a str>> = BTreeMap::new();
        for id in system_ids {
            dirs.entry(self.chart_dir(id)).or_default().push(id);
        }
        dirs.into_iter().filter(|(_, ids)| ids.len() > 1).collect()
    }

    /// How the front-end refers to a downloaded chart.
    pub fn public_chart_path(&self, system_id: &str, kind: ChartKind) -> String {
        format!(
            "{}/{}/{}",
            self.public_prefix.trim_end_matches('/'),
            path_component(system_id),
            kind.file_name()
        )
    }
}

/// Optional settings from one configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub mode: Option<ChartMode>,
    pub public_prefix: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub max_concurrent: Option<usize>,
}

impl ConfigOverrides {
    /// Load overrides from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let overrides: ConfigOverrides = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "Loaded pipeline config");
        Ok(overrides)
    }

    /// Layer `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: ConfigOverrides) -> Self {
        Self {
            data_dir: other.data_dir.or(self.data_dir),
            catalog_path: other.catalog_path.or(self.catalog_path),
            output_path: other.output_path.or(self.output_path),
            mode: other.mode.or(self.mode),
            public_prefix: other.public_prefix.or(self.public_prefix),
            request_timeout_secs: other.request_timeout_secs.or(self.request_timeout_secs),
            max_concurrent: other.max_concurrent.or(self.max_concurrent),
        }
    }
}

/// Directory-safe form of a system id.
fn path_component(system_id: &str) -> String {
    system_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.catalog_path, PathBuf::from("data/wnp-catalog.json"));
        assert_eq!(config.output_path, PathBuf::from("data/ecmwf-wpac.json"));
        assert_eq!(config.mode, ChartMode::ApiUrl);
        assert_eq!(config.max_concurrent, 1);
    }

    #[test]
    fn test_chart_paths() {
        let config = PipelineConfig::new("/srv/site/data");
        assert_eq!(
            config.chart_path("32W", ChartKind::Strike),
            PathBuf::from("/srv/site/data/32W/strike.png")
        );
        assert_eq!(
            config.public_chart_path("32W", ChartKind::Plumes),
            "./data/32W/plumes.png"
        );
    }

    #[test]
    fn test_id_is_sanitized_for_paths() {
        let config = PipelineConfig::new("data");
        assert_eq!(
            config.chart_path("../etc", ChartKind::Strike),
            PathBuf::from("data/___etc/strike.png")
        );
        assert_eq!(
            config.public_chart_path("INVEST 91W", ChartKind::Strike),
            "./data/INVEST_91W/strike.png"
        );
    }

    #[test]
    fn test_shared_chart_dirs() {
        let config = PipelineConfig::new("data");
        let shared = config.shared_chart_dirs(["A/B", "32W", "A_B", "UNKNOWN", "UNKNOWN"]);
        assert_eq!(
            shared,
            vec![
                (PathBuf::from("data/A_B"), vec!["A/B", "A_B"]),
                (PathBuf::from("data/UNKNOWN"), vec!["UNKNOWN", "UNKNOWN"]),
            ]
        );
        assert!(config.shared_chart_dirs(["32W", "33W"]).is_empty());
    }

    #[test]
    fn test_public_prefix_trailing_slash() {
        let mut config = PipelineConfig::new("data");
        config.public_prefix = "/static/charts/".to_string();
        assert_eq!(
            config.public_chart_path("32W", ChartKind::Strike),
            "/static/charts/32W/strike.png"
        );
    }

    #[test]
    fn test_overrides_follow_data_dir() {
        let config = PipelineConfig::from_overrides(ConfigOverrides {
            data_dir: Some(PathBuf::from("/tmp/wpac")),
            max_concurrent: Some(0),
            ..Default::default()
        });
        assert_eq!(config.catalog_path, PathBuf::from("/tmp/wpac/wnp-catalog.json"));
        assert_eq!(config.max_concurrent, 1);
    }

    #[test]
    fn test_merge_prefers_later_source() {
        let file = ConfigOverrides {
            mode: Some(ChartMode::Download),
            request_timeout_secs: Some(30),
            ..Default::default()
        };
        let cli = ConfigOverrides {
            mode: Some(ChartMode::Link),
            ..Default::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.mode, Some(ChartMode::Link));
        assert_eq!(merged.request_timeout_secs, Some(30));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
data_dir: /srv/wpac/data
mode: download
public_prefix: /charts
request_timeout_secs: 20
max_concurrent: 4
"#;
        let overrides: ConfigOverrides = serde_yaml::from_str(yaml).unwrap();
        let config = PipelineConfig::from_overrides(overrides);
        assert_eq!(config.mode, ChartMode::Download);
        assert_eq!(config.request_timeout, Duration::from_secs(20));
        assert_eq!(config.max_concurrent, 4);
        assert_eq!(config.output_path, PathBuf::from("/srv/wpac/data/ecmwf-wpac.json"));
    }

    #[test]
    fn test_yaml_rejects_unknown_keys() {
        let result: Result<ConfigOverrides, _> = serde_yaml::from_str("catalog: x.json\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigOverrides::load(Path::new("/nonexistent/wpac.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

//! Input catalog of active storm systems.
//!
//! The catalog is hand- or script-maintained, so every field is optional and
//! empty strings are treated the same as missing values downstream.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::error::{CycloneError, CycloneResult};

/// Basin label used when the catalog does not name one.
pub const DEFAULT_BASIN: &str = "WPAC";

/// One storm system as listed in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StormSystem {
    /// Basin designator, e.g. "32W"
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub basin: Option<String>,
    /// Issuing forecast center
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub center: Option<String>,
    /// Free-text advisory description
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub advisory_time: Option<String>,
    /// Strike-probability chart page URL
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub strike_url: Option<String>,
    /// Ensemble plumes chart page URL
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub plumes_url: Option<String>,
}

/// The catalog document handed from the writer to the transformer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub basin: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_update: Option<String>,
    #[serde(default, deserialize_with = "deserialize_systems")]
    pub systems: Vec<StormSystem>,
}

impl Catalog {
    /// Parse a catalog from JSON text.
    pub fn from_json(content: &str) -> CycloneResult<Self> {
        serde_json::from_str(content).map_err(|e| CycloneError::InvalidCatalog(e.to_string()))
    }

    /// Load a catalog from disk.
    ///
    /// A missing file and an unparsable file are both fatal for the caller.
    pub fn load(path: &Path) -> CycloneResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CycloneError::CatalogNotFound(path.display().to_string()),
            _ => CycloneError::Io(format!("{}: {}", path.display(), e)),
        })?;

        let catalog = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            systems = catalog.systems.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Basin label, falling back to [`DEFAULT_BASIN`].
    pub fn basin_or_default(&self) -> &str {
        non_empty(&self.basin).unwrap_or(DEFAULT_BASIN)
    }

    /// Serialize as 2-space indented JSON.
    pub fn to_pretty_json(&self) -> CycloneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Treat `None` and `Some("")` alike.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Accepts a number or a numeric string. Anything else, and zero, is absent.
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Number(i64),
        Text(String),
        #[allow(dead_code)]
        Other(serde_json::Value),
    }

    let year = match Option::<RawYear>::deserialize(deserializer)? {
        Some(RawYear::Number(n)) => i32::try_from(n).ok(),
        Some(RawYear::Text(s)) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    Ok(year.filter(|y| *y != 0))
}

/// Strings pass through, numbers and booleans are stringified, anything else
/// is absent.
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawText {
        Text(String),
        Number(serde_json::Number),
        Flag(bool),
        #[allow(dead_code)]
        Other(serde_json::Value),
    }

    Ok(match Option::<RawText>::deserialize(deserializer)? {
        Some(RawText::Text(s)) => Some(s),
        Some(RawText::Number(n)) => Some(n.to_string()),
        Some(RawText::Flag(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// A non-array `systems` value is an empty list rather than a parse failure.
///
/// Entries that are not objects become empty systems so that one bad entry
/// never drops its neighbours.
fn deserialize_systems<'de, D>(deserializer: D) -> Result<Vec<StormSystem>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(_) => serde_json::from_value(item).unwrap_or_else(|e| {
                warn!(index, error = %e, "Unreadable catalog entry");
                StormSystem::default()
            }),
            other => {
                warn!(index, value = %other, "Catalog entry is not an object");
                StormSystem::default()
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_system() {
        let json = r#"{
            "basin": "WPAC",
            "lastUpdate": "2025-11-13T06:00:00.000Z",
            "systems": [{
                "id": "32W",
                "name": "FUNG WONG",
                "year": 2025,
                "basin": "WPAC",
                "center": "ECMWF",
                "advisoryTime": "2025-11-13 00Z",
                "strikeUrl": "https://charts.ecmwf.int/products/cyclone?product=a",
                "plumesUrl": "https://charts.ecmwf.int/products/cyclone?product=b"
            }]
        }"#;

        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.basin_or_default(), "WPAC");
        assert_eq!(catalog.systems.len(), 1);

        let sys = &catalog.systems[0];
        assert_eq!(sys.id.as_deref(), Some("32W"));
        assert_eq!(sys.year, Some(2025));
        assert_eq!(sys.advisory_time.as_deref(), Some("2025-11-13 00Z"));
    }

    #[test]
    fn test_all_fields_optional() {
        let catalog = Catalog::from_json(r#"{"systems": [{}]}"#).unwrap();
        assert_eq!(catalog.systems, vec![StormSystem::default()]);
        assert_eq!(catalog.basin_or_default(), DEFAULT_BASIN);
        assert!(catalog.last_update.is_none());
    }

    #[test]
    fn test_missing_or_non_array_systems_is_empty() {
        assert!(Catalog::from_json(r#"{"basin": "WPAC"}"#).unwrap().systems.is_empty());
        assert!(Catalog::from_json(r#"{"systems": null}"#).unwrap().systems.is_empty());
        assert!(Catalog::from_json(r#"{"systems": "none"}"#).unwrap().systems.is_empty());
    }

    #[test]
    fn test_year_variants() {
        let parse = |year: &str| {
            let json = format!(r#"{{"systems": [{{"year": {}}}]}}"#, year);
            Catalog::from_json(&json).unwrap().systems[0].year
        };
        assert_eq!(parse("2024"), Some(2024));
        assert_eq!(parse(r#""2024""#), Some(2024));
        assert_eq!(parse(r#""soon""#), None);
        assert_eq!(parse("0"), None);
        assert_eq!(parse("null"), None);
        assert_eq!(parse("[2024]"), None);
    }

    #[test]
    fn test_mistyped_fields_are_lenient() {
        let json = r#"{"systems": [
            {"id": 33, "name": true, "strikeUrl": 5, "plumesUrl": {"x": 1}, "center": null},
            "32W",
            {"id": "34W"}
        ]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.systems.len(), 3);

        let sys = &catalog.systems[0];
        assert_eq!(sys.id.as_deref(), Some("33"));
        assert_eq!(sys.name.as_deref(), Some("true"));
        assert_eq!(sys.strike_url.as_deref(), Some("5"));
        assert_eq!(sys.plumes_url, None);
        assert_eq!(sys.center, None);

        assert_eq!(catalog.systems[1], StormSystem::default());
        assert_eq!(catalog.systems[2].id.as_deref(), Some("34W"));
    }

    #[test]
    fn test_empty_basin_falls_back() {
        let catalog = Catalog::from_json(r#"{"basin": "", "systems": []}"#).unwrap();
        assert_eq!(catalog.basin_or_default(), "WPAC");
    }

    #[test]
    fn test_malformed_json_is_invalid_catalog() {
        let err = Catalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CycloneError::InvalidCatalog(_)));
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let catalog = Catalog {
            basin: Some("WPAC".into()),
            last_update: Some("2025-11-13T00:00:00.000Z".into()),
            systems: vec![StormSystem {
                id: Some("32W".into()),
                advisory_time: Some("00Z".into()),
                ..Default::default()
            }],
        };
        let json = catalog.to_pretty_json().unwrap();
        assert!(json.contains("\"lastUpdate\""));
        assert!(json.contains("\"advisoryTime\""));
        assert!(!json.contains("strikeUrl"));
        assert!(json.contains("\n  \"basin\""));
    }
}

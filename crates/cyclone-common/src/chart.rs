//! Chart page URL parsing and OpenCharts PNG API URL construction.
//!
//! Page URLs look like
//! `https://charts.ecmwf.int/products/cyclone?base_time=...&product=...&offset=...&unique_id=...`.
//! The same four parameters, prefixed with `format=png`, address the PNG
//! rendering of that chart.

use tracing::warn;
use url::Url;

use crate::catalog::non_empty;
use crate::error::{CycloneError, CycloneResult};

/// Base of the OpenCharts cyclone product API.
pub const CHART_API_BASE: &str = "https://charts.ecmwf.int/opencharts-api/v1/products/cyclone/";

/// The two charts published per storm system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Strike probability map
    Strike,
    /// Ensemble track/intensity plumes
    Plumes,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Strike, ChartKind::Plumes];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Strike => "strike",
            ChartKind::Plumes => "plumes",
        }
    }

    /// File name used when the chart is stored locally.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.as_str())
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters carried by a chart page URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartParams {
    /// Forecast cycle timestamp, e.g. "202511130000"
    pub base_time: Option<String>,
    /// Chart product identifier, e.g. "tc_strike_aifs_ens"
    pub product: Option<String>,
    /// Forecast lead descriptor, e.g. "D-8"
    pub offset: Option<String>,
    /// Per-storm identifier, e.g. "32W_FUNGWONG_2025"
    pub unique_id: Option<String>,
}

impl ChartParams {
    /// Parse the parameters out of a page URL.
    ///
    /// Only the first occurrence of each parameter is kept. Parameters that
    /// are absent stay `None`; an unparsable URL is an error.
    pub fn from_page_url(page_url: &str) -> CycloneResult<Self> {
        let url = Url::parse(page_url).map_err(|e| CycloneError::InvalidPageUrl {
            url: page_url.to_string(),
            message: e.to_string(),
        })?;

        let mut params = ChartParams::default();
        for (key, value) in url.query_pairs() {
            let slot = match &*key {
                "base_time" => &mut params.base_time,
                "product" => &mut params.product,
                "offset" => &mut params.offset,
                "unique_id" => &mut params.unique_id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        Ok(params)
    }

    /// Build the PNG API URL for these parameters.
    ///
    /// `base_time` and `product` are required and must be non-empty;
    /// `offset` and `unique_id` are appended only when non-empty.
    pub fn to_png_url(&self) -> CycloneResult<Url> {
        let product = non_empty(&self.product).ok_or(CycloneError::MissingParameter("product"))?;
        let base_time =
            non_empty(&self.base_time).ok_or(CycloneError::MissingParameter("base_time"))?;

        let mut url = Url::parse(CHART_API_BASE).map_err(|e| CycloneError::InvalidPageUrl {
            url: CHART_API_BASE.to_string(),
            message: e.to_string(),
        })?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("format", "png");
            query.append_pair("product", product);
            query.append_pair("base_time", base_time);
            if let Some(offset) = non_empty(&self.offset) {
                query.append_pair("offset", offset);
            }
            if let Some(unique_id) = non_empty(&self.unique_id) {
                query.append_pair("unique_id", unique_id);
            }
        }

        Ok(url)
    }
}

/// Extract chart parameters from an optional page URL.
///
/// Absent or empty input gives `None` silently. A malformed URL gives `None`
/// and a warning; it is never fatal.
pub fn extract_params(page_url: Option<&str>) -> Option<ChartParams> {
    let page_url = page_url.filter(|s| !s.is_empty())?;
    match ChartParams::from_page_url(page_url) {
        Ok(params) => Some(params),
        Err(e) => {
            warn!(url = %page_url, error = %e, "Invalid chart page URL");
            None
        }
    }
}

/// Build the PNG API URL string, or `None` when required parameters are missing.
pub fn build_png_url(params: Option<&ChartParams>) -> Option<String> {
    params?.to_png_url().ok().map(String::from)
}

/// Page URL straight to PNG API URL.
pub fn png_url_for_page(page_url: Option<&str>) -> Option<String> {
    build_png_url(extract_params(page_url).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kind_file_names() {
        assert_eq!(ChartKind::Strike.file_name(), "strike.png");
        assert_eq!(ChartKind::Plumes.file_name(), "plumes.png");
        assert_eq!(ChartKind::Plumes.to_string(), "plumes");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let params = ChartParams::from_page_url(
            "https://charts.ecmwf.int/products/cyclone?product=first&product=second",
        )
        .unwrap();
        assert_eq!(params.product.as_deref(), Some("first"));
    }

    #[test]
    fn test_form_decoding() {
        let params = ChartParams::from_page_url(
            "https://charts.ecmwf.int/products/cyclone?unique_id=A+B%2FC&product=x",
        )
        .unwrap();
        assert_eq!(params.unique_id.as_deref(), Some("A B/C"));
    }

    #[test]
    fn test_empty_required_value_is_missing() {
        let params = ChartParams {
            base_time: Some(String::new()),
            product: Some("tc_strike_aifs_ens".into()),
            ..Default::default()
        };
        assert!(matches!(
            params.to_png_url(),
            Err(CycloneError::MissingParameter("base_time"))
        ));
    }

    #[test]
    fn test_values_are_encoded() {
        let params = ChartParams {
            base_time: Some("202511130000".into()),
            product: Some("a b&c".into()),
            ..Default::default()
        };
        let url = params.to_png_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://charts.ecmwf.int/opencharts-api/v1/products/cyclone/?format=png&product=a+b%26c&base_time=202511130000"
        );
    }
}

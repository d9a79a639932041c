//! Common test fixtures for cyclone chart tests.
//!
//! Values mirror a real ECMWF AIFS ensemble cycle for 32W (FUNG WONG, 2025).

/// Chart page URLs as they appear in a catalog.
pub mod pages {
    pub const STRIKE_32W: &str = "https://charts.ecmwf.int/products/cyclone?base_time=202511130000&offset=D-8&product=tc_strike_aifs_ens&unique_id=32W_FUNGWONG_2025";

    pub const PLUMES_32W: &str = "https://charts.ecmwf.int/products/cyclone?base_time=202511130000&offset=D-8&product=tc_plumes_aifs_ens&unique_id=32W_FUNGWONG_2025";

    /// Required parameters only
    pub const MINIMAL: &str =
        "https://charts.ecmwf.int/products/cyclone?product=tc_strike_aifs_ens&base_time=202511130000";

    /// No base_time
    pub const MISSING_BASE_TIME: &str =
        "https://charts.ecmwf.int/products/cyclone?product=tc_strike_aifs_ens&offset=D-8";

    /// No product
    pub const MISSING_PRODUCT: &str =
        "https://charts.ecmwf.int/products/cyclone?base_time=202511130000&offset=D-8";

    /// Not parseable as an absolute URL
    pub const MALFORMED: &str = "charts.ecmwf.int/products/cyclone?product=x";
}

/// PNG API URLs expected for the pages above.
pub mod api {
    pub const STRIKE_32W: &str = "https://charts.ecmwf.int/opencharts-api/v1/products/cyclone/?format=png&product=tc_strike_aifs_ens&base_time=202511130000&offset=D-8&unique_id=32W_FUNGWONG_2025";

    pub const PLUMES_32W: &str = "https://charts.ecmwf.int/opencharts-api/v1/products/cyclone/?format=png&product=tc_plumes_aifs_ens&base_time=202511130000&offset=D-8&unique_id=32W_FUNGWONG_2025";

    pub const MINIMAL: &str = "https://charts.ecmwf.int/opencharts-api/v1/products/cyclone/?format=png&product=tc_strike_aifs_ens&base_time=202511130000";
}

/// Catalog documents.
pub mod catalogs {
    pub const LAST_UPDATE: &str = "2025-11-13T06:00:00.000Z";

    /// The single-system catalog the writer produces.
    pub const FUNG_WONG: &str = r#"{
  "basin": "WPAC",
  "lastUpdate": "2025-11-13T06:00:00.000Z",
  "systems": [
    {
      "id": "32W",
      "name": "FUNG WONG",
      "year": 2025,
      "basin": "WPAC",
      "center": "ECMWF",
      "advisoryTime": "2025-11-13 00Z · offset D-8",
      "strikeUrl": "https://charts.ecmwf.int/products/cyclone?base_time=202511130000&offset=D-8&product=tc_strike_aifs_ens&unique_id=32W_FUNGWONG_2025",
      "plumesUrl": "https://charts.ecmwf.int/products/cyclone?base_time=202511130000&offset=D-8&product=tc_plumes_aifs_ens&unique_id=32W_FUNGWONG_2025"
    }
  ]
}"#;

    /// No active systems and no timestamp.
    pub const EMPTY: &str = r#"{ "basin": "WPAC", "systems": [] }"#;

    /// Three systems where the middle one cannot produce any chart.
    pub const MIXED: &str = r#"{
  "basin": "WPAC",
  "lastUpdate": "2025-11-13T06:00:00.000Z",
  "systems": [
    {
      "id": "32W",
      "name": "FUNG WONG",
      "strikeUrl": "https://charts.ecmwf.int/products/cyclone?base_time=202511130000&offset=D-8&product=tc_strike_aifs_ens&unique_id=32W_FUNGWONG_2025",
      "plumesUrl": "https://charts.ecmwf.int/products/cyclone?base_time=202511130000&offset=D-8&product=tc_plumes_aifs_ens&unique_id=32W_FUNGWONG_2025"
    },
    {
      "name": "NAMELESS",
      "strikeUrl": "charts.ecmwf.int/products/cyclone?product=x",
      "plumesUrl": "https://charts.ecmwf.int/products/cyclone?base_time=202511130000&offset=D-8"
    },
    {
      "id": "33W",
      "strikeUrl": "https://charts.ecmwf.int/products/cyclone?product=tc_strike_aifs_ens&base_time=202511130000"
    }
  ]
}"#;
}

/// A few bytes that start like a PNG file.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

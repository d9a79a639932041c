//! Temporary directory helpers.
//!
//! Tests never touch the repository's `data/` directory; each one gets a
//! throwaway directory that is removed when the returned `TempDir` drops.

use std::path::PathBuf;

/// Creates a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Creates a temporary directory with a specific prefix.
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// Creates a temporary `data/` directory holding `wnp-catalog.json` with the
/// given contents.
///
/// Returns the temp root (keep it alive) and the data directory path.
pub fn temp_data_dir(catalog_json: &str) -> (tempfile::TempDir, PathBuf) {
    let root = temp_test_dir_with_prefix("cyclone_test_");
    let data_dir = root.path().join("data");
    std::fs::create_dir_all(&data_dir).expect("Failed to create data directory");
    std::fs::write(data_dir.join("wnp-catalog.json"), catalog_json)
        .expect("Failed to write catalog fixture");
    (root, data_dir)
}

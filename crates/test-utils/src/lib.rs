//! Shared test utilities for the cyclone chart workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Catalog and page URL fixtures
//! - Temporary data directories laid out like the repository's `data/`
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../../crates/test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, temp_data_dir};
//! ```

pub mod fixtures;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use paths::*;

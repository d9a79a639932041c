//! ECMWF WPAC chart document builder.
//!
//! Reads the WNP storm catalog and writes `ecmwf-wpac.json` for the
//! front-end, with chart images resolved according to the configured
//! [`ChartMode`]:
//! - `api-url`: link to the OpenCharts PNG API
//! - `download`: fetch each PNG into the data directory and link locally
//! - `link`: pass the interactive page URLs through only

pub mod config;
pub mod download;
pub mod fetch;
pub mod job;
pub mod pipeline;

pub use config::{ChartMode, ConfigOverrides, PipelineConfig};
pub use download::{ChartDownloader, DownloadError};
pub use fetch::{ChartFetcher, ChartResponse, HttpChartFetcher};
pub use job::{job_span, run_job};
pub use pipeline::Pipeline;

//! Builds `ecmwf-wpac.json` from the WNP storm catalog.
//!
//! Exits non-zero only when the catalog cannot be read or parsed, or the
//! output cannot be written. Per-system problems are logged and leave
//! `null` image fields.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use build_ecmwf_wpac::{
    run_job, ChartMode, ConfigOverrides, HttpChartFetcher, Pipeline, PipelineConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "build-ecmwf-wpac")]
#[command(about = "Build the ECMWF WPAC chart document from the WNP catalog")]
struct Args {
    /// YAML configuration file (CLI arguments take precedence)
    #[arg(short, long, env = "WPAC_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the catalog, output and downloaded charts (default: data)
    #[arg(long, env = "WPAC_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Catalog path (default: <data-dir>/wnp-catalog.json)
    #[arg(long, env = "WPAC_CATALOG")]
    catalog: Option<PathBuf>,

    /// Output path (default: <data-dir>/ecmwf-wpac.json)
    #[arg(long, env = "WPAC_OUTPUT")]
    output: Option<PathBuf>,

    /// How chart images are resolved (default: api-url)
    #[arg(short, long, env = "WPAC_CHART_MODE", value_enum)]
    mode: Option<ChartMode>,

    /// Prefix for downloaded chart paths in the output (default: ./data)
    #[arg(long, env = "WPAC_PUBLIC_PREFIX")]
    public_prefix: Option<String>,

    /// Per-request timeout in seconds (default: 60)
    #[arg(long, env = "WPAC_REQUEST_TIMEOUT")]
    request_timeout_secs: Option<u64>,

    /// Systems processed concurrently (default: 1)
    #[arg(long, env = "WPAC_MAX_CONCURRENT")]
    max_concurrent: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: self.data_dir.clone(),
            catalog_path: self.catalog.clone(),
            output_path: self.output.clone(),
            mode: self.mode,
            public_prefix: self.public_prefix.clone(),
            request_timeout_secs: self.request_timeout_secs,
            max_concurrent: self.max_concurrent,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_format)?;

    run_job(run(&args)).await
}

async fn run(args: &Args) -> Result<()> {
    let file_overrides = match &args.config {
        Some(path) => ConfigOverrides::load(path)?,
        None => ConfigOverrides::default(),
    };
    let config = PipelineConfig::from_overrides(file_overrides.merge(args.overrides()));

    info!(
        mode = ?config.mode,
        catalog = %config.catalog_path.display(),
        output = %config.output_path.display(),
        "Starting ECMWF WPAC build"
    );

    let fetcher = Arc::new(HttpChartFetcher::new(config.request_timeout)?);
    let pipeline = Pipeline::new(config, fetcher);
    let output = pipeline.run().await?;

    let with_images = output
        .systems
        .iter()
        .filter(|s| s.strike_image.is_some() || s.plumes_image.is_some())
        .count();
    info!(
        systems = output.systems.len(),
        with_images = with_images,
        "Build complete"
    );

    Ok(())
}

fn init_tracing(log_level: &str, format: LogFormat) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false);

    match format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }

    Ok(())
}

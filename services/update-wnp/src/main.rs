//! Writes the WNP storm catalog.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{error, info_span, Instrument, Level};
use tracing_subscriber::FmtSubscriber;

use update_wnp::{update_catalog, CatalogContents, WriterConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "update-wnp")]
#[command(about = "Write the WNP storm catalog")]
struct Args {
    /// Data directory
    #[arg(long, env = "WPAC_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Catalog path (default: <data-dir>/wnp-catalog.json)
    #[arg(long, env = "WPAC_CATALOG")]
    catalog: Option<PathBuf>,

    /// Default basin label
    #[arg(long, default_value = "WPAC")]
    basin: String,

    /// Write a catalog with no active systems
    #[arg(long)]
    empty: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_format)?;

    let config = WriterConfig {
        catalog_path: args
            .catalog
            .clone()
            .unwrap_or_else(|| args.data_dir.join("wnp-catalog.json")),
        basin: args.basin.clone(),
        contents: if args.empty {
            CatalogContents::Empty
        } else {
            CatalogContents::Sample
        },
    };

    async {
        let result = update_catalog(&config).await;
        if let Err(e) = &result {
            error!(error = format!("{:#}", e), "Catalog update failed");
        }
        result.map(|_| ())
    }
    .instrument(info_span!("update-wnp"))
    .await
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

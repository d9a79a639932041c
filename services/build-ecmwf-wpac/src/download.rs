//! Single-attempt chart downloader.
//!
//! One GET per chart, no retry. Any failure is reported to the caller as
//! "not downloaded" so the rest of the run carries on.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use reqwest::StatusCode;
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

use crate::fetch::ChartFetcher;

/// Why a chart was not downloaded.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    Status(StatusCode),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Downloads charts through an injected fetcher.
#[derive(Clone)]
pub struct ChartDownloader {
    fetcher: Arc<dyn ChartFetcher>,
}

impl ChartDownloader {
    pub fn new(fetcher: Arc<dyn ChartFetcher>) -> Self {
        Self { fetcher }
    }

    /// Download `url` to `target`, returning the path on success.
    ///
    /// Failures are logged as warnings and yield `None`.
    #[instrument(skip(self, target), fields(path = %target.display()))]
    pub async fn download(&self, url: &str, target: &Path) -> Option<PathBuf> {
        match self.try_download(url, target).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "Chart download failed");
                None
            }
        }
    }

    /// Download `url` to `target`, overwriting any existing file.
    ///
    /// A partially written file is removed before the error is returned.
    pub async fn try_download(&self, url: &str, target: &Path) -> Result<PathBuf, DownloadError> {
        let response = self
            .fetcher
            .get(url)
            .await
            .map_err(|e| DownloadError::Transport(format!("{:#}", e)))?;

        if !response.status.is_success() {
            return Err(DownloadError::Status(response.status));
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| write_error(target, source))?;
        }

        let mut file = File::create(target)
            .await
            .map_err(|source| write_error(target, source))?;

        let mut body = response.body;
        let mut bytes = 0u64;

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    drop(file);
                    fs::remove_file(target).await.ok();
                    return Err(DownloadError::Transport(format!("{:#}", e)));
                }
            };

            if let Err(source) = file.write_all(&chunk).await {
                drop(file);
                fs::remove_file(target).await.ok();
                return Err(write_error(target, source));
            }
            bytes += chunk.len() as u64;
        }

        // Flush and sync
        file.flush().await.map_err(|source| write_error(target, source))?;
        file.sync_all()
            .await
            .map_err(|source| write_error(target, source))?;

        info!(bytes = bytes, "Chart downloaded");
        Ok(target.to_path_buf())
    }
}

fn write_error(path: &Path, source: std::io::Error) -> DownloadError {
    DownloadError::Write {
        path: path.to_path_buf(),
        source,
    }
}

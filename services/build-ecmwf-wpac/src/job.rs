//! Root span and fatal-error reporting for a build run.

use std::future::Future;

use anyhow::Result;
use tracing::{error, info_span, Instrument, Span};

/// Span every log line of a build run is nested under.
pub fn job_span() -> Span {
    info_span!("build-ecmwf-wpac")
}

/// Run `job` inside [`job_span`], logging a fatal error before returning it.
pub async fn run_job<T, F>(job: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    async move {
        let result = job.await;
        if let Err(e) = &result {
            error!(error = format!("{:#}", e), "Build failed");
        }
        result
    }
    .instrument(job_span())
    .await
}

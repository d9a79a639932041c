//! Tests for the build run's root span.

use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use tracing_subscriber::FmtSubscriber;

use build_ecmwf_wpac::run_job;

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capture() -> (Captured, tracing::subscriber::DefaultGuard) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = FmtSubscriber::builder()
        .with_ansi(false)
        .with_target(false)
        .with_writer(move || writer.clone())
        .finish();
    (captured, tracing::subscriber::set_default(subscriber))
}

#[tokio::test]
async fn test_fatal_error_is_logged_under_job_span() {
    let (captured, _guard) = capture();

    let result: anyhow::Result<()> = run_job(async { Err(anyhow!("catalog gone")) }).await;

    assert!(result.is_err());
    let logs = captured.text();
    let line = logs
        .lines()
        .find(|l| l.contains("Build failed"))
        .expect("fatal error was not logged");
    assert!(line.contains("build-ecmwf-wpac"), "line: {}", line);
    assert!(line.contains("catalog gone"), "line: {}", line);
}

#[tokio::test]
async fn test_success_logs_nothing_fatal() {
    let (captured, _guard) = capture();

    let value = run_job(async { Ok(7) }).await.unwrap();

    assert_eq!(value, 7);
    assert!(!captured.text().contains("Build failed"));
}

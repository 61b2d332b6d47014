//! Common test utilities for integration tests
//!
//! Provides shared fixtures, helpers, and test utilities used across
//! multiple integration test files.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use stagelog::infrastructure::logging::SpinnerController;
use stagelog::{Logger, LoggerConfig, OutputMode};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
#[allow(dead_code)]
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// In-memory terminal stream that can be read back after writing
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CaptureStream(Arc<Mutex<Vec<u8>>>);

impl CaptureStream {
    /// Everything written so far, lossily decoded
    #[allow(dead_code)]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Everything written so far with ANSI escapes removed
    #[allow(dead_code)]
    pub fn plain_text(&self) -> String {
        console::strip_ansi_codes(&self.text()).into_owned()
    }
}

impl Write for CaptureStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Logger in `mode` writing into a fresh [`CaptureStream`]
///
/// The spinner is enabled but drawn to a hidden target.
#[allow(dead_code)]
pub fn capture_logger(mode: OutputMode) -> (Logger, CaptureStream) {
    let config = LoggerConfig {
        output: mode,
        ..LoggerConfig::default()
    };
    capture_logger_with(&config)
}

/// Logger built from `config` writing into a fresh [`CaptureStream`]
#[allow(dead_code)]
pub fn capture_logger_with(config: &LoggerConfig) -> (Logger, CaptureStream) {
    let out = CaptureStream::default();
    let spinner = SpinnerController::hidden(config.output.is_interactive());
    let logger = Logger::with_spinner(config, Box::new(out.clone()), spinner)
        .expect("Failed to build logger");
    (logger, out)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

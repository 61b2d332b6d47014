use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::dispatcher::{self, Dispatch};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

use super::config::RotationPolicy;
use super::rotation::RotatingFile;
use crate::domain::models::Level;

/// Secondary sink that receives every log call as a JSON line
///
/// The sink owns its own `tracing` dispatch instead of installing a global
/// subscriber, so several loggers (and the process-wide diagnostics
/// subscriber) can coexist. Entries are written by a background worker;
/// [`FileSink::flush`] drains it.
pub struct FileSink {
    dispatch: Dispatch,
    guard: Mutex<Option<WorkerGuard>>,
    path: PathBuf,
}

impl FileSink {
    /// Open the rotating log file at `path`
    pub fn open(path: impl AsRef<Path>, policy: &RotationPolicy) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = RotatingFile::open(&path, policy)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);

        // every level goes to the file, independent of the terminal level
        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_filter(LevelFilter::TRACE);

        let subscriber = tracing_subscriber::registry().with(file_layer);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            guard: Mutex::new(Some(guard)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `message` at `level`, tagged with the current stage
    pub fn log(&self, level: Level, stage: &str, message: &str) {
        dispatcher::with_default(&self.dispatch, || match level {
            Level::Trace => tracing::trace!(target: "stagelog::file", stage, "{message}"),
            Level::Debug => tracing::debug!(target: "stagelog::file", stage, "{message}"),
            Level::Info => tracing::info!(target: "stagelog::file", stage, "{message}"),
            Level::Warn => tracing::warn!(target: "stagelog::file", stage, "{message}"),
            Level::Error => tracing::error!(target: "stagelog::file", stage, "{message}"),
        });
    }

    /// Drain pending entries to disk.
    ///
    /// The background worker stops afterwards; later entries are dropped.
    /// Used right before the process terminates.
    pub fn flush(&self) {
        let guard = self
            .guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        drop(guard);
    }
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink").field("path", &self.path).finish()
    }
}

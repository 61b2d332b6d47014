//! Writer variants
//!
//! Both variants implement [`OutputWriter`] over one [`WriterContext`]: the
//! terminal stream, the structured capture, the current stage and level,
//! and the optional file sink. The context outlives any single writer, so
//! swapping the output mode keeps stage and captured history intact.

pub mod plain;
pub mod tty;

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tracing::{debug, info};

use super::capture::StructuredCapture;
use super::file_sink::FileSink;
use super::spinner::SpinnerController;
use super::theme::Theme;
use crate::domain::models::{Level, OutputMode};
use crate::domain::ports::OutputWriter;

pub use plain::PlainWriter;
pub use tty::TtyWriter;

/// Terminal stream shared by every writer
pub type OutputStream = Box<dyn Write + Send>;

/// State shared by the writer variants and owned by the logger
pub struct WriterContext {
    out: Mutex<OutputStream>,
    capture: Arc<StructuredCapture>,
    stage: RwLock<String>,
    level: RwLock<Level>,
    file: Option<FileSink>,
}

impl WriterContext {
    /// Context with an empty stage
    pub fn new(
        out: OutputStream,
        capture: Arc<StructuredCapture>,
        level: Level,
        file: Option<FileSink>,
    ) -> Self {
        Self {
            out: Mutex::new(out),
            capture,
            stage: RwLock::new(String::new()),
            level: RwLock::new(level),
            file,
        }
    }

    /// The run's structured capture
    pub fn capture(&self) -> &Arc<StructuredCapture> {
        &self.capture
    }

    /// File sink, when one was configured
    pub fn file(&self) -> Option<&FileSink> {
        self.file.as_ref()
    }

    /// Current stage
    pub fn stage(&self) -> String {
        self.stage
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current stage
    pub fn set_stage(&self, stage: &str) {
        *self.stage.write().unwrap_or_else(PoisonError::into_inner) = stage.to_string();
    }

    /// Terminal level for diagnostics
    pub fn level(&self) -> Level {
        *self.level.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the terminal level
    pub fn set_level(&self, level: Level) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    /// Whether a diagnostic at `level` reaches the terminal
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Swap the terminal stream, returning the previous one
    pub fn replace_output(&self, out: OutputStream) -> OutputStream {
        std::mem::replace(&mut *self.lock_out(), out)
    }

    /// Write `text` to the terminal stream as one unit; failures are ignored
    pub fn write_out(&self, text: &str) {
        let mut out = self.lock_out();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            debug!(error = %e, "failed to write to output stream");
        }
    }

    /// Send the raw message to the file sink, if one is attached
    pub fn file_log(&self, level: Level, message: &str) {
        if let Some(file) = &self.file {
            file.log(level, &self.stage(), message);
        }
    }

    /// Append a structured record for `message` under the current stage
    pub fn record(&self, level: Level, message: &str) {
        if let Err(e) = self.capture.capture(level, &self.stage(), message) {
            info!(error = %e, "error marshalling message");
        }
    }

    fn lock_out(&self) -> MutexGuard<'_, OutputStream> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for WriterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterContext")
            .field("stage", &self.stage())
            .field("level", &self.level())
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

/// Build the writer for `mode` over the shared context
pub fn new_writer(
    mode: OutputMode,
    ctx: Arc<WriterContext>,
    theme: &Theme,
    spinner: Arc<SpinnerController>,
) -> Arc<dyn OutputWriter> {
    match mode {
        OutputMode::Tty => Arc::new(TtyWriter::new(ctx, theme.clone(), spinner)),
        OutputMode::Plain => Arc::new(PlainWriter::new(ctx)),
    }
}

/// Write to a caller-supplied stream, ignoring failures
fn write_to(out: &mut dyn Write, text: &str) {
    if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        debug!(error = %e, "failed to write to caller stream");
    }
}

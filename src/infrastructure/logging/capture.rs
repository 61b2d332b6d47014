//! In-memory structured capture
//!
//! Accumulates one JSON record per emitted line, in arrival order, for the
//! whole run. The buffer is the only shared mutable state the writers touch,
//! so every append goes through one mutex.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::errors::LogResult;
use crate::domain::models::{Level, LogRecord};

/// Append-only JSON-lines buffer shared by every writer
#[derive(Debug, Default)]
pub struct StructuredCapture {
    buf: Mutex<String>,
}

impl StructuredCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode and append a record for `message`.
    ///
    /// Returns `Ok(false)` when the record was skipped because the stage or
    /// the cleaned message is empty. An encoding failure drops the line and
    /// leaves the buffer untouched.
    pub fn capture(&self, level: Level, stage: &str, message: &str) -> LogResult<bool> {
        let Some(record) = LogRecord::new(level, stage, message) else {
            return Ok(false);
        };
        self.append(&record)?;
        Ok(true)
    }

    /// Append an already built record
    pub fn append(&self, record: &LogRecord) -> LogResult<()> {
        let line = serde_json::to_string(record)?;
        let mut buf = self.lock();
        buf.push_str(&line);
        buf.push('\n');
        Ok(())
    }

    /// Snapshot of the whole buffer, one newline-terminated JSON object per line
    pub fn contents(&self) -> String {
        self.lock().clone()
    }

    /// The buffer decoded back into records; undecodable lines are skipped
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock()
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Number of captured records
    pub fn len(&self) -> usize {
        self.lock().lines().count()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_capture_appends_json_lines() {
        let capture = StructuredCapture::new();
        assert!(capture.capture(Level::Info, "build", "step one").unwrap());
        assert!(capture.capture(Level::Warn, "build", "step two").unwrap());

        let contents = capture.contents();
        assert!(contents.ends_with('\n'));
        assert_eq!(contents.lines().count(), 2);

        let records = capture.records();
        assert_eq!(records[0].message, "step one");
        assert_eq!(records[0].level, Level::Info);
        assert_eq!(records[1].message, "step two");
        assert_eq!(records[1].level, Level::Warn);
    }

    #[test]
    fn test_capture_skips_empty_stage_or_message() {
        let capture = StructuredCapture::new();
        assert!(!capture.capture(Level::Info, "", "hello").unwrap());
        assert!(!capture.capture(Level::Info, "build", "  ").unwrap());
        assert!(capture.is_empty());
        assert_eq!(capture.len(), 0);
    }

    #[test]
    fn test_concurrent_appends_are_not_torn() {
        let capture = Arc::new(StructuredCapture::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let capture = Arc::clone(&capture);
                thread::spawn(move || {
                    for i in 0..50 {
                        capture
                            .capture(Level::Info, "stress", &format!("thread {t} line {i}"))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(capture.len(), 400);
        assert_eq!(capture.records().len(), 400);

        // per-thread order is preserved
        let records = capture.records();
        for t in 0..8 {
            let lines: Vec<_> = records
                .iter()
                .filter(|r| r.message.starts_with(&format!("thread {t} ")))
                .map(|r| r.message.clone())
                .collect();
            let expected: Vec<_> = (0..50).map(|i| format!("thread {t} line {i}")).collect();
            assert_eq!(lines, expected);
        }
    }
}

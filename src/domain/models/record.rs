//! Structured log records.
//!
//! Every user-facing line the logger prints is mirrored into the structured
//! capture as one [`LogRecord`], serialized as a single JSON object per line:
//!
//! ```text
//! {"level":"info","message":"token=***","stage":"login","timestamp":1700000000}
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::errors::LogError;

/// Log level enumeration
///
/// Levels are ordered from most verbose (Trace) to most severe (Error), so a
/// message is visible when `message_level >= configured_level`.
///
/// # Examples
///
/// ```
/// use stagelog::domain::models::Level;
///
/// assert!(Level::Error > Level::Info);
/// assert!(Level::Trace < Level::Debug);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Most verbose level
    Trace,
    /// Debug information useful during development
    Debug,
    /// Informational messages about normal operations
    Info,
    /// Potentially problematic situations
    Warn,
    /// Failure conditions
    Error,
}

impl Level {
    /// Lowercase name, as used in structured records
    ///
    /// ```
    /// use stagelog::domain::models::Level;
    ///
    /// assert_eq!(Level::Warn.as_str(), "warn");
    /// ```
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Uppercase tag used by the plain writer, e.g. `INFO`
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    /// Parse a level name, case-insensitively.
    ///
    /// Accepts `warning` as an alias of `warn`, and maps `fatal`/`panic` to
    /// `error` since the logger has no more severe level.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "fatal" | "panic" => Ok(Self::Error),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}

/// One line of structured capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// debug, info, warn or error
    pub level: Level,
    /// Redacted message without color codes or trailing whitespace
    pub message: String,
    /// Stage that was current when the line was emitted
    pub stage: String,
    /// Unix seconds
    pub timestamp: i64,
}

impl LogRecord {
    /// Build a record for `message` emitted during `stage`.
    ///
    /// ANSI escape sequences are stripped from the message and trailing
    /// whitespace is trimmed. Returns `None` when either the stage or the
    /// cleaned message is empty: such lines are never captured. Records have
    /// no trace level; `Trace` is stored as `Debug`.
    pub fn new(level: Level, stage: &str, message: &str) -> Option<Self> {
        let message = clean_message(message);
        if stage.trim().is_empty() || message.is_empty() {
            return None;
        }

        Some(Self {
            level: level.max(Level::Debug),
            message,
            stage: stage.to_string(),
            timestamp: Utc::now().timestamp(),
        })
    }
}

/// Strip ANSI escape sequences and trailing whitespace.
///
/// Idempotent: cleaning an already clean message returns it unchanged.
pub fn clean_message(message: &str) -> String {
    console::strip_ansi_codes(message).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!("trace".parse::<Level>().unwrap(), Level::Trace);
        assert_eq!("DEBUG".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("fatal".parse::<Level>().unwrap(), Level::Error);
        assert!("not-a-level".parse::<Level>().is_err());
        assert!("".parse::<Level>().is_err());
    }

    #[test]
    fn test_record_requires_stage_and_message() {
        assert!(LogRecord::new(Level::Info, "", "hello").is_none());
        assert!(LogRecord::new(Level::Info, "   ", "hello").is_none());
        assert!(LogRecord::new(Level::Info, "build", "").is_none());
        assert!(LogRecord::new(Level::Info, "build", " \n\t").is_none());
        assert!(LogRecord::new(Level::Info, "build", "\x1b[32m\x1b[0m").is_none());
        assert!(LogRecord::new(Level::Info, "build", "hello").is_some());
    }

    #[test]
    fn test_record_strips_ansi_and_trailing_whitespace() {
        let record = LogRecord::new(Level::Warn, "deploy", "\x1b[33mcareful\x1b[0m  \n").unwrap();
        assert_eq!(record.message, "careful");
        assert_eq!(record.stage, "deploy");
        assert_eq!(record.level, Level::Warn);
    }

    #[test]
    fn test_trace_is_recorded_as_debug() {
        let record = LogRecord::new(Level::Trace, "build", "fine detail").unwrap();
        assert_eq!(record.level, Level::Debug);
        assert!(serde_json::to_string(&record)
            .unwrap()
            .contains(r#""level":"debug""#));
    }

    #[test]
    fn test_record_json_shape() {
        let record = LogRecord {
            level: Level::Info,
            message: "token=***".to_string(),
            stage: "login".to_string(),
            timestamp: 1_700_000_000,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"level":"info","message":"token=***","stage":"login","timestamp":1700000000}"#
        );
    }

    #[test]
    fn test_clean_message_is_idempotent() {
        let colored = "\x1b[1;32mBold Green\x1b[0m Normal  ";
        let once = clean_message(colored);
        assert_eq!(once, "Bold Green Normal");
        assert_eq!(clean_message(&once), once);
    }
}

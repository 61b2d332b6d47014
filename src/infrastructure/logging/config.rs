use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::models::OutputMode;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Terminal log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Initial output mode (tty, plain)
    #[serde(default)]
    pub output: OutputMode,

    /// Rotating log file; when None no file sink is attached
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Rotation policy for the log file
    #[serde(default)]
    pub rotation: RotationPolicy,
}

/// Size, count and age bounds for the rotating log file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate once the active file exceeds this many megabytes
    #[serde(default = "default_max_size_mb")]
    pub max_size_mb: u64,

    /// Rotated files to keep
    #[serde(default = "default_max_backups")]
    pub max_backups: usize,

    /// Rotated files older than this are deleted
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,

    /// Gzip rotated files
    #[serde(default = "default_true")]
    pub compress: bool,
}

impl RotationPolicy {
    /// Size threshold in bytes, saturating at `u64::MAX`
    pub const fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            output: OutputMode::default(),
            log_file: None,
            rotation: RotationPolicy::default(),
        }
    }
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size_mb: default_max_size_mb(),
            max_backups: default_max_backups(),
            max_age_days: default_max_age_days(),
            compress: default_true(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_max_size_mb() -> u64 {
    1
}

const fn default_max_backups() -> usize {
    10
}

const fn default_max_age_days() -> u32 {
    28
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rotation_policy() {
        let policy = RotationPolicy::default();
        assert_eq!(policy.max_size_bytes(), 1024 * 1024);
        assert_eq!(policy.max_backups, 10);
        assert_eq!(policy.max_age_days, 28);
        assert!(policy.compress);
    }

    #[test]
    fn test_huge_max_size_saturates() {
        let policy = RotationPolicy {
            max_size_mb: u64::MAX / 2,
            ..RotationPolicy::default()
        };
        assert_eq!(policy.max_size_bytes(), u64::MAX);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: LoggerConfig = serde_json::from_str(r#"{"output": "plain"}"#).unwrap();
        assert_eq!(config.level, "info");
        assert_eq!(config.output, OutputMode::Plain);
        assert!(config.log_file.is_none());
        assert_eq!(config.rotation, RotationPolicy::default());
    }
}

//! Stagelog - staged terminal logging
//!
//! Renders human-readable, colorized output (with an optional spinner) to a
//! terminal while capturing a machine-readable JSON record of the same
//! events, masking known secrets in both.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): records, levels, output modes and the writer port
//! - **Infrastructure Layer** (`infrastructure`): writers, logger facade, sinks, config
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use stagelog::{Logger, LoggerConfig, OutputMode};
//!
//! let config = LoggerConfig { output: OutputMode::Plain, ..LoggerConfig::default() };
//! let logger = Logger::with_output(&config, Box::new(std::io::sink())).unwrap();
//!
//! logger.set_stage("build");
//! logger.success("image built");
//! logger.warning("cache miss");
//!
//! assert_eq!(logger.records().len(), 2);
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::models::{Level, LogRecord, OutputMode};
pub use domain::ports::OutputWriter;
pub use domain::{LogError, LogResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::logging::{Logger, LoggerConfig, RotationPolicy, MASK};

//! Domain models: levels, records and output modes.

pub mod output_mode;
pub mod record;

pub use output_mode::OutputMode;
pub use record::{clean_message, Level, LogRecord};

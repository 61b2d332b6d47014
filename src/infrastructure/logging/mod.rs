//! Logging infrastructure
//!
//! Terminal logging with a structured side channel:
//! - Interactive and plain writers behind one facade
//! - Spinner coordination for atomic terminal writes
//! - Secret masking
//! - JSON-lines structured capture
//! - Rotating file sink
pub mod capture;
pub mod config;
pub mod file_sink;
pub mod logger;
pub mod redactor;
pub mod rotation;
pub mod spinner;
pub mod theme;
pub mod writers;

pub use capture::StructuredCapture;
pub use config::{LoggerConfig, RotationPolicy};
pub use file_sink::FileSink;
pub use logger::Logger;
pub use redactor::{Redactor, MASK};
pub use rotation::RotatingFile;
pub use spinner::{SpinnerController, SpinnerHold};
pub use theme::Theme;
pub use writers::{OutputStream, PlainWriter, TtyWriter, WriterContext};

use std::io::Write;

use crate::domain::errors::LogResult;
use crate::domain::models::{Level, OutputMode};

/// Port trait for rendering log output following hexagonal architecture
///
/// Two adapters implement this surface: the interactive TTY writer (colored,
/// symbol-prefixed, spinner-aware) and the plain writer (uncolored, literal
/// level tags). The `Logger` facade owns exactly one live writer and swaps it
/// when the output mode changes.
///
/// # Contract
///
/// Messages arrive already redacted. For every visible write an
/// implementation must:
///
/// 1. send the raw message to the attached file sink, if any,
/// 2. render it to the shared terminal stream as one atomic write,
/// 3. append a structured record to the shared capture when the current
///    stage and the cleaned message are both non-empty.
///
/// Write failures are swallowed; only `question` has a fallible signature,
/// and it currently always succeeds.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: one writer serves every
/// concurrent reporter in the process.
pub trait OutputWriter: Send + Sync {
    /// Level-filtered diagnostic line (`Debug`/`Info`/`Error` family).
    ///
    /// Printed only when `level` is enabled; always reaches the file sink;
    /// never captured.
    fn log(&self, level: Level, message: &str);

    /// Error-level line written to both sinks ahead of process termination.
    ///
    /// Does not terminate by itself; the facade exits afterwards.
    fn fatal(&self, message: &str);

    /// Success symbol followed by green text
    fn success(&self, message: &str);

    /// Information symbol followed by blue text
    fn information(&self, message: &str);

    /// Warning symbol followed by yellow text
    fn warning(&self, message: &str);

    /// Warning rendered to a caller-supplied stream; not captured
    fn fwarning(&self, out: &mut dyn Write, message: &str);

    /// Blue text without a symbol
    fn hint(&self, message: &str);

    /// Question symbol followed by magenta text, without a trailing newline
    fn question(&self, message: &str) -> LogResult<()>;

    /// Error symbol followed by red text
    fn fail(&self, message: &str);

    /// Whole line in green
    fn green(&self, message: &str);

    /// Whole line in yellow
    fn yellow(&self, message: &str);

    /// Raw line
    fn println(&self, message: &str);

    /// Raw line to a caller-supplied stream; not captured
    fn fprintln(&self, out: &mut dyn Write, message: &str);

    /// Raw text without a trailing newline
    fn print(&self, message: &str);

    /// Capture a record without printing anything
    fn add_to_buffer(&self, level: Level, message: &str);

    /// Whether this writer targets an interactive terminal
    fn is_interactive(&self) -> bool;

    /// The mode this writer was built for
    fn output_mode(&self) -> OutputMode;
}

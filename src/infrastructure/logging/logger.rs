use std::fmt::{self, Display};
use std::io::{self, Write};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use super::capture::StructuredCapture;
use super::config::LoggerConfig;
use super::file_sink::FileSink;
use super::redactor::{sort_longest_first, Redactor};
use super::spinner::SpinnerController;
use super::theme::Theme;
use super::writers::{new_writer, OutputStream, WriterContext};
use crate::domain::errors::LogResult;
use crate::domain::models::{Level, LogRecord, OutputMode};
use crate::domain::ports::OutputWriter;
use crate::infrastructure::env::{load_bool, DISABLE_SPINNER_ENV_VAR};

#[derive(Debug, Default)]
struct MaskState {
    words: Vec<String>,
    enabled: bool,
    redactor: Redactor,
}

/// Single entry point for all log and print operations
///
/// Owns the cross-cutting state: level, masking, the structured capture and
/// the active writer. Every call is redacted before it reaches the writer.
/// The logger is `Send + Sync`; share it behind an `Arc` between reporters.
///
/// # Example
///
/// ```
/// use stagelog::{Logger, LoggerConfig, OutputMode};
///
/// let config = LoggerConfig { output: OutputMode::Plain, ..LoggerConfig::default() };
/// let logger = Logger::with_output(&config, Box::new(std::io::sink())).unwrap();
///
/// logger.add_masked_word("supersecret");
/// logger.enable_masking();
/// logger.set_stage("login");
/// logger.println("token=supersecret");
///
/// assert!(logger.output_buffer().contains(r#""message":"token=***""#));
/// ```
pub struct Logger {
    ctx: Arc<WriterContext>,
    writer: RwLock<Arc<dyn OutputWriter>>,
    masking: RwLock<MaskState>,
    theme: Theme,
    spinner: Arc<SpinnerController>,
}

impl Logger {
    /// Logger writing to stdout
    pub fn new(config: &LoggerConfig) -> LogResult<Self> {
        Self::with_output(config, Box::new(io::stdout()))
    }

    /// Logger writing to `out`, with the spinner drawn on stderr
    ///
    /// The spinner is enabled when the configured mode is interactive and
    /// `STAGELOG_DISABLE_SPINNER` is not true.
    pub fn with_output(config: &LoggerConfig, out: OutputStream) -> LogResult<Self> {
        let (disabled, env_error) = load_bool(DISABLE_SPINNER_ENV_VAR);
        let spinner = SpinnerController::new(config.output.is_interactive() && !disabled);
        let logger = Self::with_spinner(config, out, spinner)?;

        if let Some(err) = env_error {
            warn!(error = %err, "ignoring invalid environment value");
            logger.yellow(err);
        }
        Ok(logger)
    }

    /// Logger with an explicit spinner controller
    ///
    /// The file sink is attached here, once, iff `config.log_file` is set.
    pub fn with_spinner(
        config: &LoggerConfig,
        out: OutputStream,
        spinner: SpinnerController,
    ) -> LogResult<Self> {
        let level = config.level.parse().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to info level");
            Level::Info
        });

        let file = match &config.log_file {
            Some(path) => Some(FileSink::open(path, &config.rotation)?),
            None => None,
        };

        let ctx = Arc::new(WriterContext::new(
            out,
            Arc::new(StructuredCapture::new()),
            level,
            file,
        ));
        let theme = Theme::new();
        let spinner = Arc::new(spinner);
        let writer = new_writer(config.output, Arc::clone(&ctx), &theme, Arc::clone(&spinner));

        debug!(
            level = %level,
            output = %config.output,
            file_output = config.log_file.is_some(),
            spinner = spinner.is_enabled(),
            "logger initialized"
        );

        Ok(Self {
            ctx,
            writer: RwLock::new(writer),
            masking: RwLock::new(MaskState::default()),
            theme,
            spinner,
        })
    }

    fn writer(&self) -> Arc<dyn OutputWriter> {
        Arc::clone(&self.writer.read().unwrap_or_else(PoisonError::into_inner))
    }

    // --- level -------------------------------------------------------------

    /// Set the terminal level from its name; invalid names are ignored
    pub fn set_level(&self, level: &str) {
        match level.parse::<Level>() {
            Ok(level) => self.ctx.set_level(level),
            Err(e) => warn!(error = %e, current = %self.ctx.level(), "ignoring invalid log level"),
        }
    }

    /// Current terminal level
    pub fn level(&self) -> Level {
        self.ctx.level()
    }

    /// Whether debug (or trace) lines reach the terminal
    pub fn is_debug(&self) -> bool {
        self.ctx.level() <= Level::Debug
    }

    // --- writer ------------------------------------------------------------

    /// Swap in the writer for `mode`; stage and captured records are kept
    ///
    /// Switching to a non-interactive mode stops a running spinner.
    pub fn set_output_format(&self, mode: OutputMode) {
        let writer = new_writer(mode, Arc::clone(&self.ctx), &self.theme, Arc::clone(&self.spinner));
        *self.writer.write().unwrap_or_else(PoisonError::into_inner) = writer;
        if !mode.is_interactive() {
            self.spinner.stop();
        }
    }

    /// Mode of the active writer
    pub fn output_format(&self) -> OutputMode {
        self.writer().output_mode()
    }

    /// The active writer
    pub fn output_writer(&self) -> Arc<dyn OutputWriter> {
        self.writer()
    }

    /// Whether the active writer is the interactive one
    pub fn is_interactive(&self) -> bool {
        self.writer().is_interactive()
    }

    /// Replace the terminal stream, returning the previous one
    pub fn set_output(&self, out: OutputStream) -> OutputStream {
        self.ctx.replace_output(out)
    }

    /// Stage attached to every record from now on
    pub fn set_stage(&self, stage: &str) {
        self.ctx.set_stage(stage);
    }

    /// Current stage; empty until set
    pub fn stage(&self) -> String {
        self.ctx.stage()
    }

    /// Colors and symbols used by the interactive writer
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    // --- masking -----------------------------------------------------------

    /// Add a secret to mask; blank words are ignored
    ///
    /// While masking is enabled the redaction table is rebuilt right away,
    /// so the new word is masked from the next call on.
    pub fn add_masked_word(&self, word: impl Into<String>) {
        let word = word.into();
        if word.trim().is_empty() {
            return;
        }
        let mut state = self.masking.write().unwrap_or_else(PoisonError::into_inner);
        state.words.push(word);
        if state.enabled {
            rebuild_redactor(&mut state);
        }
    }

    /// Start masking every word added so far (and any added later)
    pub fn enable_masking(&self) {
        let mut state = self.masking.write().unwrap_or_else(PoisonError::into_inner);
        state.enabled = true;
        rebuild_redactor(&mut state);
    }

    /// Stop masking; the word set is kept for a later `enable_masking`
    pub fn disable_masking(&self) {
        self.masking
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .enabled = false;
    }

    /// Whether masked words are currently replaced
    pub fn is_masking_enabled(&self) -> bool {
        self.masking.read().unwrap_or_else(PoisonError::into_inner).enabled
    }

    /// Mask secrets in `message`; the identity while masking is disabled
    pub fn redact(&self, message: &str) -> String {
        let state = self.masking.read().unwrap_or_else(PoisonError::into_inner);
        if state.enabled {
            state.redactor.redact(message).into_owned()
        } else {
            message.to_string()
        }
    }

    fn redact_display(&self, message: impl Display) -> String {
        self.redact(&message.to_string())
    }

    // --- structured capture ------------------------------------------------

    /// The run's structured capture: one JSON record per line, in arrival order
    pub fn output_buffer(&self) -> String {
        self.ctx.capture().contents()
    }

    /// The structured capture decoded into records
    pub fn records(&self) -> Vec<LogRecord> {
        self.ctx.capture().records()
    }

    /// Capture a record without printing anything
    pub fn add_to_buffer(&self, level: Level, message: impl Display) {
        self.writer().add_to_buffer(level, &self.redact_display(message));
    }

    // --- diagnostics -------------------------------------------------------

    /// Diagnostic line at debug level; shown only when the level allows it
    pub fn debug(&self, message: impl Display) {
        self.writer().log(Level::Debug, &self.redact_display(message));
    }

    /// Formatted [`Logger::debug`]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.debug(args);
    }

    /// Diagnostic line at info level
    pub fn info(&self, message: impl Display) {
        self.writer().log(Level::Info, &self.redact_display(message));
    }

    /// Formatted [`Logger::info`]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.info(args);
    }

    /// Diagnostic line at error level
    pub fn error(&self, message: impl Display) {
        self.writer().log(Level::Error, &self.redact_display(message));
    }

    /// Formatted [`Logger::error`]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.error(args);
    }

    /// Write an error to both sinks, then terminate the process with status 1
    pub fn fatal(&self, message: impl Display) -> ! {
        self.writer().fatal(&self.redact_display(message));
        self.spinner.stop();
        if let Some(file) = self.ctx.file() {
            file.flush();
        }
        std::process::exit(1)
    }

    /// Formatted [`Logger::fatal`]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.fatal(args)
    }

    // --- styled lines ------------------------------------------------------

    /// Success line, captured at info
    pub fn success(&self, message: impl Display) {
        self.writer().success(&self.redact_display(message));
    }

    /// Informational line, captured at info
    pub fn information(&self, message: impl Display) {
        self.writer().information(&self.redact_display(message));
    }

    /// Warning line, captured at warn
    pub fn warning(&self, message: impl Display) {
        self.writer().warning(&self.redact_display(message));
    }

    /// Warning rendered to `out` instead of the terminal stream
    pub fn fwarning(&self, out: &mut dyn Write, message: impl Display) {
        self.writer().fwarning(out, &self.redact_display(message));
    }

    /// Hint line, captured at info
    pub fn hint(&self, message: impl Display) {
        self.writer().hint(&self.redact_display(message));
    }

    /// Print a question prompt without a trailing newline
    ///
    /// Reserved for interactive prompt failures; currently always `Ok`.
    pub fn question(&self, message: impl Display) -> LogResult<()> {
        self.writer().question(&self.redact_display(message))
    }

    /// Failure line, captured at error
    pub fn fail(&self, message: impl Display) {
        self.writer().fail(&self.redact_display(message));
    }

    /// Whole line in green, captured at info
    pub fn green(&self, message: impl Display) {
        self.writer().green(&self.redact_display(message));
    }

    /// Whole line in yellow, captured at warn
    pub fn yellow(&self, message: impl Display) {
        self.writer().yellow(&self.redact_display(message));
    }

    // --- raw output --------------------------------------------------------

    /// Raw text without a trailing newline
    pub fn print(&self, message: impl Display) {
        self.writer().print(&self.redact_display(message));
    }

    /// Formatted [`Logger::print`]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.print(args);
    }

    /// Raw line
    pub fn println(&self, message: impl Display) {
        self.writer().println(&self.redact_display(message));
    }

    /// Line written to `out` instead of the terminal stream; not captured
    pub fn fprintln(&self, out: &mut dyn Write, message: impl Display) {
        self.writer().fprintln(out, &self.redact_display(message));
    }

    // --- spinner -----------------------------------------------------------

    /// Start the spinner, or retitle it when already running
    ///
    /// Ignored unless the active writer is interactive.
    pub fn spinner(&self, message: impl Display) {
        if !self.is_interactive() {
            return;
        }
        self.spinner.start(self.redact_display(message));
    }

    /// Stop and erase the spinner
    pub fn stop_spinner(&self) {
        self.spinner.stop();
    }

    /// Whether the spinner is running
    pub fn is_spinner_active(&self) -> bool {
        self.spinner.is_active()
    }

    /// Whether the spinner may animate at all
    pub fn is_spinner_enabled(&self) -> bool {
        self.spinner.is_enabled()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("ctx", &self.ctx)
            .field("output", &self.output_format())
            .field("masking", &self.is_masking_enabled())
            .finish_non_exhaustive()
    }
}

/// Sort the word set longest-first and freeze a new redaction table
///
/// On failure the previous table stays in place.
fn rebuild_redactor(state: &mut MaskState) {
    sort_longest_first(&mut state.words);
    match Redactor::new(&state.words) {
        Ok(redactor) => state.redactor = redactor,
        Err(e) => warn!(error = %e, "keeping previous redaction table"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logger(mode: OutputMode) -> (Logger, SharedBuf) {
        let out = SharedBuf::default();
        let config = LoggerConfig {
            output: mode,
            ..LoggerConfig::default()
        };
        let logger =
            Logger::with_spinner(&config, Box::new(out.clone()), SpinnerController::hidden(true))
                .unwrap();
        (logger, out)
    }

    #[test]
    fn test_masking_disabled_is_identity() {
        let (logger, _) = logger(OutputMode::Plain);
        logger.add_masked_word("secret");
        assert_eq!(logger.redact("my secret"), "my secret");
    }

    #[test]
    fn test_masking_longest_first() {
        let (logger, _) = logger(OutputMode::Plain);
        logger.add_masked_word("ab");
        logger.add_masked_word("abc");
        logger.enable_masking();
        assert_eq!(logger.redact("abcxyz"), "***xyz");
    }

    #[test]
    fn test_word_added_after_enable_is_masked() {
        let (logger, _) = logger(OutputMode::Plain);
        logger.enable_masking();
        logger.add_masked_word("late-secret");
        assert_eq!(logger.redact("x=late-secret"), "x=***");
    }

    #[test]
    fn test_disable_then_enable_keeps_words() {
        let (logger, _) = logger(OutputMode::Plain);
        logger.add_masked_word("pw");
        logger.enable_masking();
        logger.disable_masking();
        assert_eq!(logger.redact("pw"), "pw");
        logger.enable_masking();
        assert_eq!(logger.redact("pw"), "***");
    }

    #[test]
    fn test_blank_masked_word_is_ignored() {
        let (logger, _) = logger(OutputMode::Plain);
        logger.add_masked_word("  ");
        logger.enable_masking();
        assert_eq!(logger.redact("a  b"), "a  b");
    }

    #[test]
    fn test_set_level_invalid_keeps_previous() {
        let (logger, _) = logger(OutputMode::Plain);
        logger.set_level("debug");
        assert_eq!(logger.level(), Level::Debug);
        logger.set_level("not-a-level");
        assert_eq!(logger.level(), Level::Debug);
        assert!(logger.is_debug());
    }

    #[test]
    fn test_invalid_configured_level_falls_back_to_info() {
        let config = LoggerConfig {
            level: "loud".to_string(),
            output: OutputMode::Plain,
            ..LoggerConfig::default()
        };
        let logger =
            Logger::with_spinner(&config, Box::new(io::sink()), SpinnerController::disabled())
                .unwrap();
        assert_eq!(logger.level(), Level::Info);
    }

    #[test]
    fn test_diagnostics_respect_level_and_skip_capture() {
        let (logger, out) = logger(OutputMode::Plain);
        logger.set_stage("build");
        logger.set_level("info");
        logger.debug("hidden detail");
        logger.infof(format_args!("visible {}", 42));
        logger.error("broken");

        let text = out.text();
        assert!(!text.contains("hidden detail"));
        assert!(text.contains("INFO: visible 42\n"));
        assert!(text.contains("ERROR: broken\n"));
        assert!(logger.output_buffer().is_empty());
    }

    #[test]
    fn test_question_always_succeeds() {
        let (logger, out) = logger(OutputMode::Tty);
        assert!(logger.question("Continue?").is_ok());
        assert!(!out.text().ends_with('\n'));
    }

    #[test]
    fn test_spinner_surface() {
        let (logger, _) = logger(OutputMode::Tty);
        logger.spinner("Building");
        assert!(logger.is_spinner_active());
        logger.success("built");
        assert!(logger.is_spinner_active());
        logger.stop_spinner();
        assert!(!logger.is_spinner_active());
    }

    #[test]
    fn test_spinner_stops_when_switching_to_plain() {
        let (logger, _) = logger(OutputMode::Tty);
        logger.spinner("Building");
        assert!(logger.is_spinner_active());

        logger.set_output_format(OutputMode::Plain);
        assert!(!logger.is_spinner_active());

        logger.spinner("Working");
        assert!(!logger.is_spinner_active());

        logger.set_output_format(OutputMode::Tty);
        logger.spinner("Working");
        assert!(logger.is_spinner_active());
        logger.stop_spinner();
    }

    #[test]
    fn test_set_output_returns_previous_stream() {
        let (logger, first) = logger(OutputMode::Plain);
        let second = SharedBuf::default();
        let _previous = logger.set_output(Box::new(second.clone()));
        logger.println("to second");
        assert!(first.text().is_empty());
        assert_eq!(second.text(), "to second\n");
    }

    #[test]
    fn test_logger_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger>();
    }
}

use std::io::Write;
use std::sync::Arc;

use super::{write_to, WriterContext};
use crate::domain::errors::LogResult;
use crate::domain::models::{Level, OutputMode};
use crate::domain::ports::OutputWriter;
use crate::infrastructure::logging::spinner::SpinnerController;
use crate::infrastructure::logging::theme::Theme;

/// Interactive writer: colored, symbol-prefixed and spinner-aware
///
/// Every terminal write happens under a spinner hold, so an animated frame
/// is never interleaved with, or drawn over, a line that was just printed.
#[derive(Debug)]
pub struct TtyWriter {
    ctx: Arc<WriterContext>,
    theme: Theme,
    spinner: Arc<SpinnerController>,
}

impl TtyWriter {
    pub fn new(ctx: Arc<WriterContext>, theme: Theme, spinner: Arc<SpinnerController>) -> Self {
        Self {
            ctx,
            theme,
            spinner,
        }
    }

    /// File sink, held terminal write, then capture
    fn emit(&self, level: Level, message: &str, rendered: &str) {
        self.ctx.file_log(level, message);
        self.write_held(rendered);
        self.ctx.record(level, message);
    }

    fn write_held(&self, rendered: &str) {
        let _hold = self.spinner.hold();
        self.ctx.write_out(rendered);
    }
}

impl OutputWriter for TtyWriter {
    fn log(&self, level: Level, message: &str) {
        self.ctx.file_log(level, message);
        if self.ctx.enabled(level) {
            self.write_held(&format!("{} {message}\n", self.theme.level_tag(level)));
        }
    }

    fn fatal(&self, message: &str) {
        self.ctx.file_log(Level::Error, message);
        self.write_held(&format!(
            "{} {}\n",
            self.theme.error_symbol(),
            self.theme.red_string(message)
        ));
    }

    fn success(&self, message: &str) {
        let rendered = format!(
            "{} {}\n",
            self.theme.success_symbol(),
            self.theme.green_string(message)
        );
        self.emit(Level::Info, message, &rendered);
    }

    fn information(&self, message: &str) {
        let rendered = format!(
            "{} {}\n",
            self.theme.information_symbol(),
            self.theme.blue_string(message)
        );
        self.emit(Level::Info, message, &rendered);
    }

    fn warning(&self, message: &str) {
        let rendered = format!(
            "{} {}\n",
            self.theme.warning_symbol(),
            self.theme.yellow_string(message)
        );
        self.emit(Level::Warn, message, &rendered);
    }

    fn fwarning(&self, out: &mut dyn Write, message: &str) {
        self.ctx.file_log(Level::Warn, message);
        let _hold = self.spinner.hold();
        write_to(
            out,
            &format!(
                "{} {}\n",
                self.theme.warning_symbol(),
                self.theme.yellow_string(message)
            ),
        );
    }

    fn hint(&self, message: &str) {
        let rendered = format!("{}\n", self.theme.blue_string(message));
        self.emit(Level::Info, message, &rendered);
    }

    fn question(&self, message: &str) -> LogResult<()> {
        let rendered = format!(
            "{} {}",
            self.theme.question_symbol(),
            self.theme.magenta_string(message)
        );
        self.emit(Level::Info, message, &rendered);
        Ok(())
    }

    fn fail(&self, message: &str) {
        let rendered = format!(
            "{} {}\n",
            self.theme.error_symbol(),
            self.theme.red_string(message)
        );
        self.emit(Level::Error, message, &rendered);
    }

    fn green(&self, message: &str) {
        let rendered = format!("{}\n", self.theme.green_string(message));
        self.emit(Level::Info, message, &rendered);
    }

    fn yellow(&self, message: &str) {
        let rendered = format!("{}\n", self.theme.yellow_string(message));
        self.emit(Level::Warn, message, &rendered);
    }

    fn println(&self, message: &str) {
        self.emit(Level::Info, message, &format!("{message}\n"));
    }

    fn fprintln(&self, out: &mut dyn Write, message: &str) {
        self.ctx.file_log(Level::Info, message);
        let _hold = self.spinner.hold();
        write_to(out, &format!("{message}\n"));
    }

    fn print(&self, message: &str) {
        self.emit(Level::Info, message, message);
    }

    fn add_to_buffer(&self, level: Level, message: &str) {
        self.ctx.record(level, message);
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn output_mode(&self) -> OutputMode {
        OutputMode::Tty
    }
}

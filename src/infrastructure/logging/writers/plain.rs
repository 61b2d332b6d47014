use std::io::Write;
use std::sync::Arc;

use super::{write_to, WriterContext};
use crate::domain::errors::LogResult;
use crate::domain::models::{Level, OutputMode};
use crate::domain::ports::OutputWriter;
use crate::infrastructure::logging::theme::QUESTION_SYMBOL;

/// Plain writer for redirected output: no color, no spinner, literal tags
#[derive(Debug)]
pub struct PlainWriter {
    ctx: Arc<WriterContext>,
}

impl PlainWriter {
    pub fn new(ctx: Arc<WriterContext>) -> Self {
        Self { ctx }
    }

    fn emit(&self, level: Level, message: &str, rendered: &str) {
        self.ctx.file_log(level, message);
        self.ctx.write_out(rendered);
        self.ctx.record(level, message);
    }
}

impl OutputWriter for PlainWriter {
    fn log(&self, level: Level, message: &str) {
        self.ctx.file_log(level, message);
        if self.ctx.enabled(level) {
            self.ctx.write_out(&format!("{}: {message}\n", level.tag()));
        }
    }

    fn fatal(&self, message: &str) {
        self.ctx.file_log(Level::Error, message);
        self.ctx.write_out(&format!("ERROR: {message}\n"));
    }

    fn success(&self, message: &str) {
        self.emit(Level::Info, message, &format!("SUCCESS: {message}\n"));
    }

    fn information(&self, message: &str) {
        self.emit(Level::Info, message, &format!("INFO: {message}\n"));
    }

    fn warning(&self, message: &str) {
        self.emit(Level::Warn, message, &format!("WARNING: {message}\n"));
    }

    fn fwarning(&self, out: &mut dyn Write, message: &str) {
        self.ctx.file_log(Level::Warn, message);
        write_to(out, &format!("WARNING: {message}\n"));
    }

    fn hint(&self, message: &str) {
        self.emit(Level::Info, message, &format!("{message}\n"));
    }

    fn question(&self, message: &str) -> LogResult<()> {
        self.emit(Level::Info, message, &format!("{QUESTION_SYMBOL} {message}"));
        Ok(())
    }

    fn fail(&self, message: &str) {
        self.emit(Level::Error, message, &format!("ERROR: {message}\n"));
    }

    fn green(&self, message: &str) {
        self.emit(Level::Info, message, &format!("{message}\n"));
    }

    fn yellow(&self, message: &str) {
        self.emit(Level::Warn, message, &format!("{message}\n"));
    }

    fn println(&self, message: &str) {
        self.emit(Level::Info, message, &format!("{message}\n"));
    }

    fn fprintln(&self, out: &mut dyn Write, message: &str) {
        self.ctx.file_log(Level::Info, message);
        write_to(out, &format!("{message}\n"));
    }

    fn print(&self, message: &str) {
        self.emit(Level::Info, message, message);
    }

    fn add_to_buffer(&self, level: Level, message: &str) {
        self.ctx.record(level, message);
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn output_mode(&self) -> OutputMode {
        OutputMode::Plain
    }
}

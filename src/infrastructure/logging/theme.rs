//! Colors and symbols for the interactive writer.
//!
//! Built once and injected into each writer instead of living in globals.
//! Styles are forced on: the writer mode, not stream detection, decides
//! whether output is colored.

use console::Style;

use crate::domain::models::Level;

/// Badge text for failures
pub const ERROR_SYMBOL: &str = " x ";
/// Badge text for successes
pub const SUCCESS_SYMBOL: &str = " ✓ ";
/// Badge text for informational lines
pub const INFORMATION_SYMBOL: &str = " i ";
/// Badge text for warnings
pub const WARNING_SYMBOL: &str = " ! ";
/// Badge text for question prompts
pub const QUESTION_SYMBOL: &str = " ? ";

/// Styles for every colored element the interactive writer prints
#[derive(Debug, Clone)]
pub struct Theme {
    red: Style,
    green: Style,
    yellow: Style,
    blue: Style,
    magenta: Style,
    dim: Style,
    error_badge: Style,
    success_badge: Style,
    information_badge: Style,
    warning_badge: Style,
    question_badge: Style,
}

impl Theme {
    /// Default palette with styling forced on
    pub fn new() -> Self {
        let fg = || Style::new().force_styling(true);
        let badge = || Style::new().force_styling(true).black();

        Self {
            red: fg().red().bright(),
            green: fg().green(),
            yellow: fg().yellow().bright(),
            blue: fg().blue().bright(),
            magenta: fg().magenta(),
            dim: fg().dim(),
            error_badge: badge().on_red().on_bright(),
            success_badge: badge().on_green(),
            information_badge: badge().on_blue().on_bright(),
            warning_badge: badge().on_yellow().on_bright(),
            question_badge: badge().on_magenta().on_bright(),
        }
    }

    /// Error badge
    pub fn error_symbol(&self) -> String {
        self.error_badge.apply_to(ERROR_SYMBOL).to_string()
    }

    /// Success badge
    pub fn success_symbol(&self) -> String {
        self.success_badge.apply_to(SUCCESS_SYMBOL).to_string()
    }

    /// Information badge
    pub fn information_symbol(&self) -> String {
        self.information_badge.apply_to(INFORMATION_SYMBOL).to_string()
    }

    /// Warning badge
    pub fn warning_symbol(&self) -> String {
        self.warning_badge.apply_to(WARNING_SYMBOL).to_string()
    }

    /// Question badge
    pub fn question_symbol(&self) -> String {
        self.question_badge.apply_to(QUESTION_SYMBOL).to_string()
    }

    /// `text` in bright red
    pub fn red_string(&self, text: &str) -> String {
        self.red.apply_to(text).to_string()
    }

    /// `text` in green
    pub fn green_string(&self, text: &str) -> String {
        self.green.apply_to(text).to_string()
    }

    /// `text` in bright yellow
    pub fn yellow_string(&self, text: &str) -> String {
        self.yellow.apply_to(text).to_string()
    }

    /// `text` in bright blue
    pub fn blue_string(&self, text: &str) -> String {
        self.blue.apply_to(text).to_string()
    }

    /// `text` in magenta
    pub fn magenta_string(&self, text: &str) -> String {
        self.magenta.apply_to(text).to_string()
    }

    /// Colored level tag for diagnostic lines
    pub fn level_tag(&self, level: Level) -> String {
        let style = match level {
            Level::Trace | Level::Debug => &self.dim,
            Level::Info => &self.blue,
            Level::Warn => &self.yellow,
            Level::Error => &self.red,
        };
        style.apply_to(level.tag()).to_string()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::clean_message;

    #[test]
    fn test_styles_are_forced() {
        let theme = Theme::new();
        let green = theme.green_string("done");
        assert!(green.contains("\x1b["));
        assert_eq!(clean_message(&green), "done");
    }

    #[test]
    fn test_symbols_strip_to_plain_glyphs() {
        let theme = Theme::new();
        assert_eq!(console::strip_ansi_codes(&theme.success_symbol()), SUCCESS_SYMBOL);
        assert_eq!(console::strip_ansi_codes(&theme.error_symbol()), ERROR_SYMBOL);
    }

    #[test]
    fn test_strip_is_color_independent() {
        let theme = Theme::new();
        let text = "same text";
        let variants = [
            theme.red_string(text),
            theme.green_string(text),
            theme.yellow_string(text),
            theme.blue_string(text),
            theme.magenta_string(text),
        ];
        for variant in variants {
            assert_eq!(clean_message(&variant), text);
        }
    }
}

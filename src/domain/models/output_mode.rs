use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::LogError;

/// Presentation mode of the active writer
///
/// The surrounding CLI resolves the mode (flag or detected interactivity);
/// the logger only consumes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Colored, symbol-prefixed, spinner-aware output for a real terminal
    #[default]
    #[serde(alias = "interactive")]
    Tty,
    /// Uncolored output with literal level tags, for redirected streams
    Plain,
}

impl OutputMode {
    /// Lowercase name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tty => "tty",
            Self::Plain => "plain",
        }
    }

    /// True for [`OutputMode::Tty`]
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Tty)
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tty" | "interactive" => Ok(Self::Tty),
            "plain" => Ok(Self::Plain),
            _ => Err(LogError::InvalidOutputMode(s.to_string())),
        }
    }
}

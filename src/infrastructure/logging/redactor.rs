use std::borrow::Cow;
use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::domain::errors::LogResult;

/// Placeholder that replaces every masked word
pub const MASK: &str = "***";

/// Compiled size limit for the alternation of masked words
const REGEX_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Single-pass find/replace table built from a set of secret words
///
/// Words are matched longest-first so a short secret embedded in a longer one
/// never produces a partially masked result: with `{"ab", "abc"}` the input
/// `abcxyz` becomes `***xyz`, not `***cxyz`.
#[derive(Clone)]
pub struct Redactor {
    pattern: Option<Regex>,
}

impl Redactor {
    /// Build a redactor from masked words.
    ///
    /// Blank words are skipped. The remaining words are sorted by descending
    /// length and compiled into one leftmost-first alternation.
    pub fn new<I, S>(words: I) -> LogResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_size_limit(words, REGEX_SIZE_LIMIT)
    }

    /// Like [`Redactor::new`] with an explicit compiled size limit in bytes
    pub fn with_size_limit<I, S>(words: I, size_limit: usize) -> LogResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().to_string())
            .filter(|w| !w.trim().is_empty())
            .collect();

        if words.is_empty() {
            return Ok(Self { pattern: None });
        }

        sort_longest_first(&mut words);
        words.dedup();

        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = RegexBuilder::new(&alternation)
            .size_limit(size_limit)
            .build()?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// A redactor that masks nothing
    pub const fn empty() -> Self {
        Self { pattern: None }
    }

    /// Replace every masked word in `message` with [`MASK`]
    pub fn redact<'a>(&self, message: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(message, MASK),
            None => Cow::Borrowed(message),
        }
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Redactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never print the secrets themselves
        f.debug_struct("Redactor")
            .field("active", &self.pattern.is_some())
            .finish()
    }
}

/// Sort words by descending length; ties keep insertion order.
pub fn sort_longest_first(words: &mut [String]) {
    words.sort_by(|a, b| b.len().cmp(&a.len()));
}

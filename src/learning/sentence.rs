//! Cuts raw text into the clean runs learners expect.

use std::sync::Arc;

use regex::Regex;

use crate::error::{LexicaError, Result};

/// Letters, combining marks and digits.
const DEFAULT_PATTERN: &str = r"[\p{L}\p{M}\p{N}]+";

/// Splits raw lines at every non-lexical character.
///
/// Punctuation, whitespace and symbols end a sentence, so no candidate
/// substring ever spans them.
///
/// # Examples
///
/// ```
/// use lexica::learning::SentenceSplitter;
///
/// let splitter = SentenceSplitter::new().unwrap();
/// let runs: Vec<&str> = splitter.split("今天天气，很好! ok").collect();
/// assert_eq!(runs, vec!["今天天气", "很好", "ok"]);
/// ```
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    pattern: Arc<Regex>,
    lowercase: bool,
}

impl SentenceSplitter {
    /// Split on anything that is not a letter, mark or digit.
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    /// Use a custom pattern describing what a clean run looks like.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| LexicaError::invalid_config(format!("invalid sentence pattern: {e}")))?;
        Ok(SentenceSplitter {
            pattern: Arc::new(pattern),
            lowercase: false,
        })
    }

    /// Lowercase runs produced by [`split_owned`](Self::split_owned).
    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Clean runs of `line`, borrowed from it.
    pub fn split<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pattern.find_iter(line).map(|m| m.as_str())
    }

    /// Clean runs of `line`, lowercased if configured.
    pub fn split_owned(&self, line: &str) -> Vec<String> {
        self.split(line)
            .map(|run| {
                if self.lowercase {
                    run.to_lowercase()
                } else {
                    run.to_string()
                }
            })
            .collect()
    }
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new().expect("Default sentence pattern should be valid")
    }
}

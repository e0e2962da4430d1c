//! Fuzzy lookup of query strings against a compiled vocabulary.

use std::path::Path;

use fst::Automaton;
use fst::automaton::{Levenshtein, Str};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{LexicaError, Result};
use crate::spelling::compiler::CompiledVocabulary;
use crate::spelling::levenshtein::levenshtein_distance_threshold;
use crate::spelling::suggest::{Suggestion, SuggestionCollector};

/// Query defaults for a [`FuzzyCorrector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Maximum number of suggestions returned.
    pub limit: usize,
    /// Largest edit distance searched.
    pub max_distance: usize,
    /// Leading characters a suggestion must share with the query.
    pub prefix_length: usize,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            limit: 8,
            max_distance: 2,
            prefix_length: 1,
        }
    }
}

impl CorrectorConfig {
    /// Check that every field is usable.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(LexicaError::invalid_config("limit must be at least 1"));
        }
        if u32::try_from(self.max_distance).is_err() {
            return Err(LexicaError::invalid_config(format!(
                "max_distance {} is out of range",
                self.max_distance
            )));
        }
        Ok(())
    }
}

/// Ranks vocabulary words by edit distance, length and frequency.
///
/// Distance sweeps run from 1 up to the maximum. The query itself, when it
/// is a vocabulary word, always comes first. Scanning stops after the first
/// sweep that leaves `limit` suggestions collected.
///
/// # Examples
///
/// ```
/// use lexica::spelling::{FuzzyCorrector, VocabularyCompiler};
///
/// let mut compiler = VocabularyCompiler::new();
/// compiler.extend(vec![("cat", 50), ("cats", 10), ("car", 3)]);
/// let corrector = FuzzyCorrector::new(compiler.compile().unwrap());
///
/// let words = corrector.suggest("cst").unwrap();
/// assert_eq!(words[0], "cat");
/// ```
#[derive(Debug, Clone)]
pub struct FuzzyCorrector {
    vocabulary: CompiledVocabulary,
    config: CorrectorConfig,
}

impl FuzzyCorrector {
    /// Create a corrector with the default query settings.
    pub fn new(vocabulary: CompiledVocabulary) -> Self {
        FuzzyCorrector {
            vocabulary,
            config: CorrectorConfig::default(),
        }
    }

    /// Create a corrector with custom query settings.
    pub fn with_config(vocabulary: CompiledVocabulary, config: CorrectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(FuzzyCorrector { vocabulary, config })
    }

    /// Load the automaton and frequency table written by
    /// [`CompiledVocabulary::save`].
    ///
    /// Fails when either file is missing or unreadable.
    pub fn open<P, Q>(automaton_path: P, frequency_path: Q) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        Ok(Self::new(CompiledVocabulary::open(
            automaton_path,
            frequency_path,
        )?))
    }

    /// The vocabulary searched.
    pub fn vocabulary(&self) -> &CompiledVocabulary {
        &self.vocabulary
    }

    /// The default query settings.
    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Best corrections for `text` using the configured settings.
    pub fn suggest(&self, text: &str) -> Result<Vec<String>> {
        self.suggest_with(
            text,
            self.config.limit,
            self.config.max_distance,
            self.config.prefix_length,
        )
    }

    /// Best corrections for `text`, best first.
    pub fn suggest_with(
        &self,
        text: &str,
        limit: usize,
        max_distance: usize,
        prefix_length: usize,
    ) -> Result<Vec<String>> {
        Ok(self
            .suggest_scored(text, limit, max_distance, prefix_length)?
            .into_iter()
            .map(|suggestion| suggestion.word)
            .collect())
    }

    /// Best corrections for `text` with their distances and scores.
    pub fn suggest_scored(
        &self,
        text: &str,
        limit: usize,
        max_distance: usize,
        prefix_length: usize,
    ) -> Result<Vec<Suggestion>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut collector = SuggestionCollector::new(limit);

        if self.vocabulary.contains(text) {
            collector.offer(Suggestion::exact(text, self.vocabulary.frequency(text)));
        }

        let prefix = leading_chars(text, prefix_length);
        for distance in 1..=max_distance {
            if collector.is_full() {
                debug!("collected {limit} suggestions for {text:?} before distance {distance}");
                break;
            }
            self.sweep(text, prefix, distance, &mut collector)?;
        }

        Ok(collector.into_sorted_vec())
    }

    /// Offer every word at exactly `distance` edits that starts with `prefix`.
    fn sweep(
        &self,
        text: &str,
        prefix: &str,
        distance: usize,
        collector: &mut SuggestionCollector,
    ) -> Result<()> {
        let max_edits = u32::try_from(distance)
            .map_err(|_| LexicaError::spelling(format!("edit distance {distance} is too large")))?;
        let levenshtein = Levenshtein::new(text, max_edits).map_err(|e| {
            LexicaError::spelling(format!(
                "cannot build the distance-{distance} automaton for {text:?}: {e}"
            ))
        })?;
        let automaton = Str::new(prefix).starts_with().intersection(levenshtein);

        for word in self.vocabulary.search(automaton) {
            // The automaton also accepts words closer than `distance`
            if levenshtein_distance_threshold(text, &word, distance) != Some(distance) {
                continue;
            }
            let frequency = self.vocabulary.frequency(&word);
            collector.offer(Suggestion::edited(word, distance, frequency));
        }
        Ok(())
    }
}

/// The first `count` characters of `text`, or all of it when shorter.
fn leading_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

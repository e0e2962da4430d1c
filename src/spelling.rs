//! Fuzzy spelling correction over a compiled vocabulary.
//!
//! A [`VocabularyCompiler`] turns a `(word, frequency)` table into an
//! immutable automaton; a [`FuzzyCorrector`] walks that automaton with
//! Levenshtein automata of increasing distance and returns the best
//! [`Suggestion`]s.

pub mod compiler;
pub mod corrector;
pub mod levenshtein;
pub mod suggest;

pub use compiler::{AUTOMATON_FILE, CompiledVocabulary, FREQUENCY_FILE, VocabularyCompiler};
pub use corrector::{CorrectorConfig, FuzzyCorrector};
pub use levenshtein::{levenshtein_distance, levenshtein_distance_threshold};
pub use suggest::{Suggestion, SuggestionCollector};

//! Online statistical discovery of previously unknown words.
//!
//! Learners consume pre-cleaned sentences in epochs. Every substring of up to
//! `max_word_length` grapheme clusters is counted together with its left and
//! right neighbours; at each flush, candidates that are frequent, cohesive
//! (high mutual-information ratio) and freely distributed (high context
//! entropy) are promoted into a [`FrequencyLexicon`].
//!
//! Two strategies share the [`Learner`] interface:
//!
//! - [`PreciseLearner`] keeps every candidate for the whole pass and tests
//!   cohesion on cross-epoch counts.
//! - [`FastLearner`] drops its tables at every flush, which keeps memory flat
//!   on large corpora.

pub mod config;
pub mod fast;
pub mod pipeline;
pub mod precise;
pub mod sentence;
pub mod stats;

use serde::{Deserialize, Serialize};

use crate::lexicon::FrequencyLexicon;

pub use config::{LearnerConfig, LearnerStrategy, TrainingConfig};
pub use fast::FastLearner;
pub use pipeline::{TrainingOutcome, TrainingPipeline, TrainingReport};
pub use precise::PreciseLearner;
pub use sentence::SentenceSplitter;
pub use stats::{ContextCounter, WordStat};

/// Summary of one epoch flush.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlushReport {
    /// The epoch that was flushed.
    pub epoch_id: u64,
    /// Sentences fed during the epoch.
    pub sentences: u64,
    /// Substrings counted during the epoch.
    pub observed: u64,
    /// Candidates evaluated for promotion.
    pub candidates: usize,
    /// Promoted words, sorted.
    pub promoted: Vec<String>,
}

/// A new-word learner.
pub trait Learner {
    /// The thresholds in use.
    fn config(&self) -> &LearnerConfig;

    /// Count one sentence. Returns the flush report when the sentence closed
    /// an epoch.
    fn feed(&mut self, sentence: &str) -> Option<FlushReport>;

    /// Promote qualifying candidates and start the next epoch.
    ///
    /// Flushing an epoch that received no sentences is a no-op.
    fn flush(&mut self) -> FlushReport;

    /// The epoch currently being filled. Starts at 1.
    fn epoch_id(&self) -> u64;

    /// The lexicon promoted words are merged into.
    fn lexicon(&self) -> &FrequencyLexicon;

    /// Move the lexicon out, leaving an empty one behind.
    fn take_lexicon(&mut self) -> FrequencyLexicon;
}

/// Feed every sentence, collecting the reports of automatic flushes.
///
/// The final partial epoch is left open; call [`Learner::flush`] to close it.
pub fn learn_from<L, I, S>(learner: &mut L, sentences: I) -> Vec<FlushReport>
where
    L: Learner + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sentences
        .into_iter()
        .filter_map(|sentence| learner.feed(sentence.as_ref()))
        .collect()
}

/// Sentence and substring counters for the open epoch.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Epoch {
    pub(crate) id: u64,
    pub(crate) sentences: u64,
    pub(crate) observed: u64,
}

impl Epoch {
    pub(crate) fn first() -> Self {
        Epoch {
            id: 1,
            sentences: 0,
            observed: 0,
        }
    }

    pub(crate) fn advance(&mut self) {
        self.id += 1;
        self.sentences = 0;
        self.observed = 0;
    }

    pub(crate) fn empty_report(&self) -> FlushReport {
        FlushReport {
            epoch_id: self.id,
            sentences: 0,
            observed: 0,
            candidates: 0,
            promoted: Vec::new(),
        }
    }
}

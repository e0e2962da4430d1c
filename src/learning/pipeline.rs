//! End-to-end training: raw corpus in, frequency table out.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::learning::config::{LearnerStrategy, TrainingConfig};
use crate::learning::fast::FastLearner;
use crate::learning::precise::PreciseLearner;
use crate::learning::sentence::SentenceSplitter;
use crate::learning::{FlushReport, Learner};
use crate::lexicon::FrequencyLexicon;
use crate::lexicon::frequency_table::write_frequency_table;

/// What a training run did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// The learner actually used (never `Auto`).
    pub strategy: LearnerStrategy,
    /// Clean sentences fed to the learner.
    pub sentences: u64,
    /// One report per flushed epoch.
    pub epochs: Vec<FlushReport>,
    /// Entries written to the output frequency table, if one was written.
    pub words_written: usize,
}

impl TrainingReport {
    /// Number of epochs flushed.
    pub fn epochs_completed(&self) -> u64 {
        self.epochs.len() as u64
    }
}

/// The learned lexicon together with its report.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub report: TrainingReport,
    pub lexicon: FrequencyLexicon,
}

impl TrainingOutcome {
    /// Established words after the run, sorted by word.
    pub fn vocabulary(&self) -> Vec<(String, u64)> {
        self.lexicon
            .established_words(self.report.epochs_completed())
    }
}

/// Streams raw text through a [`SentenceSplitter`] into a learner.
#[derive(Debug, Clone)]
pub struct TrainingPipeline {
    config: TrainingConfig,
    splitter: SentenceSplitter,
    seed: FrequencyLexicon,
}

impl TrainingPipeline {
    /// Create a pipeline with the default splitter and no seed dictionary.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(TrainingPipeline {
            config,
            splitter: SentenceSplitter::new()?,
            seed: FrequencyLexicon::new(),
        })
    }

    /// Replace the sentence splitter.
    pub fn with_splitter(mut self, splitter: SentenceSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    /// Start learning from a seed dictionary.
    pub fn with_seed(mut self, seed: FrequencyLexicon) -> Self {
        self.seed = seed;
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Build the learner for a corpus of `corpus_bytes` bytes.
    pub fn create_learner(&self, corpus_bytes: u64) -> Result<Box<dyn Learner>> {
        let strategy = self.config.resolve_strategy(corpus_bytes);
        let learner: Box<dyn Learner> = match strategy {
            LearnerStrategy::Fast => Box::new(FastLearner::with_lexicon(
                self.config.learner.clone(),
                self.seed.clone(),
            )?),
            LearnerStrategy::Precise | LearnerStrategy::Auto => Box::new(
                PreciseLearner::with_lexicon(self.config.learner.clone(), self.seed.clone())?,
            ),
        };
        info!("training with the {strategy:?} learner for a {corpus_bytes}-byte corpus");
        Ok(learner)
    }

    /// Learn from raw lines. `corpus_bytes` drives learner selection.
    pub fn train_lines<I, S>(&self, lines: I, corpus_bytes: u64) -> Result<TrainingOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut learner = self.create_learner(corpus_bytes)?;
        let mut report = self.empty_report(corpus_bytes);

        for line in lines {
            self.feed_line(learner.as_mut(), &mut report, line.as_ref());
        }
        self.finish(learner.as_mut(), &mut report);

        Ok(TrainingOutcome {
            report,
            lexicon: learner.take_lexicon(),
        })
    }

    /// Learn from a UTF-8 corpus file, one or more sentences per line.
    ///
    /// Invalid UTF-8 is replaced and thereby treated as a sentence boundary.
    pub fn train_file<P: AsRef<Path>>(&self, corpus_path: P) -> Result<TrainingOutcome> {
        let file = File::open(corpus_path.as_ref())?;
        let corpus_bytes = file.metadata()?.len();
        let mut reader = BufReader::new(file);

        let mut learner = self.create_learner(corpus_bytes)?;
        let mut report = self.empty_report(corpus_bytes);

        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            self.feed_line(learner.as_mut(), &mut report, &String::from_utf8_lossy(&buffer));
        }
        self.finish(learner.as_mut(), &mut report);

        info!(
            "trained on {} ({} sentences, {} epochs)",
            corpus_path.as_ref().display(),
            report.sentences,
            report.epochs.len()
        );
        Ok(TrainingOutcome {
            report,
            lexicon: learner.take_lexicon(),
        })
    }

    /// Train on a corpus file and write the established vocabulary as a
    /// frequency table.
    pub fn train_file_to<P, Q>(&self, corpus_path: P, output_path: Q) -> Result<TrainingOutcome>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let mut outcome = self.train_file(corpus_path)?;
        outcome.report.words_written = write_frequency_table(output_path, outcome.vocabulary())?;
        Ok(outcome)
    }

    fn empty_report(&self, corpus_bytes: u64) -> TrainingReport {
        TrainingReport {
            strategy: self.config.resolve_strategy(corpus_bytes),
            sentences: 0,
            epochs: Vec::new(),
            words_written: 0,
        }
    }

    /// Split one raw line and feed every sentence, recording closed epochs.
    fn feed_line(&self, learner: &mut dyn Learner, report: &mut TrainingReport, line: &str) {
        for sentence in self.splitter.split_owned(line) {
            report.sentences += 1;
            if let Some(flushed) = learner.feed(&sentence) {
                report.epochs.push(flushed);
            }
        }
    }

    fn finish(&self, learner: &mut dyn Learner, report: &mut TrainingReport) {
        let flushed = learner.flush();
        if flushed.sentences > 0 {
            report.epochs.push(flushed);
        }
    }
}

//! Configuration for new-word learning.
//!
//! # Examples
//!
//! ```
//! use lexica::learning::config::{LearnerConfig, LearnerStrategy, TrainingConfig};
//!
//! let config = LearnerConfig::default();
//! assert_eq!(config.max_word_length, 5);
//! assert_eq!(config.flush_interval, 10_000);
//!
//! let training = TrainingConfig {
//!     strategy: LearnerStrategy::Fast,
//!     ..Default::default()
//! };
//! assert!(training.validate().is_ok());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LexicaError, Result};

/// Thresholds and batching for a single learner.
///
/// The promotion thresholds are hand-tuned for character-level corpora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Longest candidate substring, in grapheme clusters.
    pub max_word_length: usize,
    /// Sentences per epoch before an automatic flush.
    pub flush_interval: u64,
    /// Minimum candidate frequency for promotion.
    pub min_frequency: u64,
    /// `p / p_parts` must exceed this.
    pub min_mi_ratio: f64,
    /// Each non-empty context distribution must exceed this entropy (nats).
    pub min_context_entropy: f64,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        LearnerConfig {
            max_word_length: 5,
            flush_interval: 10_000,
            min_frequency: 3,
            min_mi_ratio: 100.0,
            min_context_entropy: 1.0,
        }
    }
}

impl LearnerConfig {
    /// Check that every field is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_word_length == 0 {
            return Err(LexicaError::invalid_config(
                "max_word_length must be at least 1",
            ));
        }
        if self.flush_interval == 0 {
            return Err(LexicaError::invalid_config(
                "flush_interval must be at least 1",
            ));
        }
        if !self.min_mi_ratio.is_finite() || self.min_mi_ratio < 0.0 {
            return Err(LexicaError::invalid_config(format!(
                "min_mi_ratio must be a non-negative number, got {}",
                self.min_mi_ratio
            )));
        }
        if !self.min_context_entropy.is_finite() || self.min_context_entropy < 0.0 {
            return Err(LexicaError::invalid_config(format!(
                "min_context_entropy must be a non-negative number, got {}",
                self.min_context_entropy
            )));
        }
        Ok(())
    }

    /// Load and validate a JSON configuration file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LexicaError::invalid_config(format!(
                "failed to read learner config '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: LearnerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Which learner implementation a training run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnerStrategy {
    /// Pick from the corpus size.
    Auto,
    /// Keep every candidate across the whole pass.
    Precise,
    /// Keep only per-epoch tables.
    Fast,
}

/// Configuration for a [`TrainingPipeline`](crate::learning::pipeline::TrainingPipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Learner thresholds.
    pub learner: LearnerConfig,
    /// Learner selection.
    pub strategy: LearnerStrategy,
    /// Largest corpus, in bytes, for which `Auto` picks the precise learner.
    pub precise_corpus_limit: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            learner: LearnerConfig::default(),
            strategy: LearnerStrategy::Auto,
            precise_corpus_limit: 4 * 1024 * 1024,
        }
    }
}

impl TrainingConfig {
    /// Check that every field is usable.
    pub fn validate(&self) -> Result<()> {
        self.learner.validate()
    }

    /// Resolve `Auto` for a corpus of `corpus_bytes` bytes.
    pub fn resolve_strategy(&self, corpus_bytes: u64) -> LearnerStrategy {
        match self.strategy {
            LearnerStrategy::Auto if corpus_bytes <= self.precise_corpus_limit => {
                LearnerStrategy::Precise
            }
            LearnerStrategy::Auto => LearnerStrategy::Fast,
            chosen => chosen,
        }
    }
}

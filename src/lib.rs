//! # Lexica
//!
//! Lexicon building blocks for unsegmented and noisy text.
//!
//! ## Features
//!
//! - k-shortest-paths ranking over weighted graphs (Dijkstra and a layered-DAG solver)
//! - Unsupervised new-word discovery from raw corpora
//! - Fuzzy spelling correction over a compiled vocabulary automaton
//! - Word-lattice segmentation ranked by lexicon probabilities

pub mod error;
pub mod graph;
pub mod learning;
pub mod lexicon;
pub mod segment;
pub mod spelling;

pub mod prelude {
    pub use crate::error::{LexicaError, Result};
    pub use crate::graph::{KShortestPaths, Path, WeightedGraph, k_shortest_paths};
    pub use crate::learning::{FastLearner, Learner, LearnerConfig, PreciseLearner};
    pub use crate::lexicon::FrequencyLexicon;
    pub use crate::segment::{Segmentation, SegmentationGraph};
    pub use crate::spelling::{FuzzyCorrector, Suggestion, VocabularyCompiler};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

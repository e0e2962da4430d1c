//! Error types for the Lexica library.
//!
//! All fallible operations return [`LexicaError`] through the crate-wide
//! [`Result`] alias.
//!
//! # Examples
//!
//! ```
//! use lexica::error::{LexicaError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexicaError::invalid_config("max_word_length must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Lexica operations.
#[derive(Error, Debug)]
pub enum LexicaError {
    /// I/O errors (corpus, frequency tables, automaton files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Automaton construction or decoding errors
    #[error("FST error: {0}")]
    Fst(#[from] fst::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A priority map was popped while holding no live entries.
    ///
    /// Search routines treat this as exhaustion, not as a defect.
    #[error("Priority queue is empty")]
    EmptyQueue,

    /// Graph-related errors (invalid costs, layering violations)
    #[error("Graph error: {0}")]
    Graph(String),

    /// Spelling correction errors
    #[error("Spelling error: {0}")]
    Spelling(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed input data
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for operations that may fail with LexicaError.
pub type Result<T> = std::result::Result<T, LexicaError>;

impl LexicaError {
    /// Create a new graph error.
    pub fn graph<S: Into<String>>(msg: S) -> Self {
        LexicaError::Graph(msg.into())
    }

    /// Create a new spelling error.
    pub fn spelling<S: Into<String>>(msg: S) -> Self {
        LexicaError::Spelling(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        LexicaError::InvalidConfig(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        LexicaError::Parse(msg.into())
    }

    /// Whether this error only signals an exhausted search.
    pub fn is_empty_queue(&self) -> bool {
        matches!(self, LexicaError::EmptyQueue)
    }
}

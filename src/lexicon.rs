//! Persistent word records shared by the learner and the vocabulary compiler.
//!
//! The learner promotes new words into a [`FrequencyLexicon`] at every epoch
//! flush; the compiler later reads it (or its flat frequency-table file) to
//! build the spelling automaton.

pub mod dictionary;
pub mod frequency_table;
pub mod word;

pub use dictionary::FrequencyLexicon;
pub use frequency_table::{parse_line, read_frequency_table, write_frequency_table};
pub use word::Word;

//! Compiles a frequency table into an immutable vocabulary automaton.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ahash::AHashMap;
use fst::{IntoStreamer, Set, SetBuilder, Streamer};
use log::{debug, info, warn};

use crate::error::Result;
use crate::lexicon::FrequencyLexicon;
use crate::lexicon::frequency_table::{is_valid_word, read_frequency_table, write_frequency_table};

/// File name of the persisted automaton.
pub const AUTOMATON_FILE: &str = "vocabulary.fst";
/// File name of the persisted frequency table.
pub const FREQUENCY_FILE: &str = "vocabulary.freq";

/// Collects `(word, frequency)` entries and builds a [`CompiledVocabulary`].
///
/// Repeated words have their frequencies summed.
///
/// # Examples
///
/// ```
/// use lexica::spelling::VocabularyCompiler;
///
/// let mut compiler = VocabularyCompiler::new();
/// compiler.add("cat", 50);
/// compiler.add("bat", 5);
/// let vocabulary = compiler.compile().unwrap();
///
/// assert!(vocabulary.contains("cat"));
/// assert_eq!(vocabulary.frequency("bat"), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VocabularyCompiler {
    entries: Vec<(String, u64)>,
}

impl VocabularyCompiler {
    /// Create an empty compiler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a frequency-table file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut compiler = Self::new();
        compiler.extend(read_frequency_table(path)?);
        Ok(compiler)
    }

    /// Start from every word of a lexicon.
    pub fn from_lexicon(lexicon: &FrequencyLexicon) -> Self {
        let mut compiler = Self::new();
        compiler.extend(lexicon.to_frequency_table());
        compiler
    }

    /// Add one entry.
    pub fn add(&mut self, word: impl Into<String>, frequency: u64) {
        self.entries.push((word.into(), frequency));
    }

    /// Add many entries.
    pub fn extend<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        self.entries
            .extend(entries.into_iter().map(|(word, freq)| (word.into(), freq)));
    }

    /// Number of entries added, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry was added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort the entries and build the automaton.
    pub fn compile(mut self) -> Result<CompiledVocabulary> {
        self.entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut builder = SetBuilder::memory();
        let mut frequencies: AHashMap<String, u64> = AHashMap::with_capacity(self.entries.len());
        let mut last: Option<String> = None;

        for (word, frequency) in self.entries {
            if !is_valid_word(&word) {
                warn!("skipping invalid vocabulary word {word:?}");
                continue;
            }
            if last.as_deref() == Some(word.as_str()) {
                if let Some(total) = frequencies.get_mut(&word) {
                    *total += frequency;
                }
                continue;
            }
            builder.insert(word.as_bytes())?;
            frequencies.insert(word.clone(), frequency);
            last = Some(word);
        }

        let bytes = builder.into_inner()?;
        let automaton: Set<Arc<[u8]>> = Set::new(Arc::from(bytes))?;
        debug!(
            "compiled vocabulary of {} words into {} automaton bytes",
            automaton.len(),
            automaton.as_fst().size()
        );
        Ok(CompiledVocabulary {
            automaton: Arc::new(automaton),
            frequencies,
        })
    }
}

/// A read-only vocabulary: the automaton plus each word's frequency.
#[derive(Clone)]
pub struct CompiledVocabulary {
    automaton: Arc<Set<Arc<[u8]>>>,
    frequencies: AHashMap<String, u64>,
}

impl std::fmt::Debug for CompiledVocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledVocabulary")
            .field("words", &self.automaton.len())
            .finish()
    }
}

impl CompiledVocabulary {
    /// Load a vocabulary saved by [`save`](Self::save).
    ///
    /// Both files must exist and be readable.
    pub fn open<P, Q>(automaton_path: P, frequency_path: Q) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let bytes = fs::read(automaton_path.as_ref())?;
        let automaton: Set<Arc<[u8]>> = Set::new(Arc::from(bytes))?;

        let mut frequencies = AHashMap::with_capacity(automaton.len());
        for (word, frequency) in read_frequency_table(frequency_path.as_ref())? {
            if automaton.contains(word.as_bytes()) {
                *frequencies.entry(word).or_insert(0) += frequency;
            } else {
                warn!("frequency entry {word:?} is not in the automaton, ignoring it");
            }
        }

        info!(
            "opened vocabulary of {} words from {}",
            automaton.len(),
            automaton_path.as_ref().display()
        );
        Ok(CompiledVocabulary {
            automaton: Arc::new(automaton),
            frequencies,
        })
    }

    /// Load `vocabulary.fst` and `vocabulary.freq` from `dir`.
    pub fn open_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        Self::open(dir.join(AUTOMATON_FILE), dir.join(FREQUENCY_FILE))
    }

    /// Write `vocabulary.fst` and `vocabulary.freq` into `dir`.
    ///
    /// Returns the two paths written.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<(PathBuf, PathBuf)> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let automaton_path = dir.join(AUTOMATON_FILE);
        fs::write(&automaton_path, self.automaton.as_fst().as_bytes())?;

        let frequency_path = dir.join(FREQUENCY_FILE);
        write_frequency_table(&frequency_path, self.entries())?;

        info!(
            "saved vocabulary of {} words to {}",
            self.len(),
            dir.display()
        );
        Ok((automaton_path, frequency_path))
    }

    /// Whether `word` is in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.automaton.contains(word.as_bytes())
    }

    /// Frequency of `word`, `0` when unknown.
    pub fn frequency(&self, word: &str) -> u64 {
        self.frequencies.get(word).copied().unwrap_or(0)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.automaton.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.automaton.is_empty()
    }

    /// Every word with its frequency, in lexicographic order.
    pub fn entries(&self) -> Vec<(String, u64)> {
        let mut entries = Vec::with_capacity(self.len());
        let mut stream = self.automaton.stream();
        while let Some(key) = stream.next() {
            let word = String::from_utf8_lossy(key).into_owned();
            let frequency = self.frequency(&word);
            entries.push((word, frequency));
        }
        entries
    }

    /// The underlying automaton.
    pub fn automaton(&self) -> &Set<Arc<[u8]>> {
        &self.automaton
    }

    /// Words accepted by `automaton`, in lexicographic order.
    pub(crate) fn search<A: fst::Automaton>(&self, automaton: A) -> Vec<String> {
        let mut words = Vec::new();
        let mut stream = self.automaton.search(automaton).into_stream();
        while let Some(key) = stream.next() {
            match std::str::from_utf8(key) {
                Ok(word) => words.push(word.to_string()),
                Err(_) => warn!("skipping non-UTF-8 vocabulary key"),
            }
        }
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_compile_merges_duplicates() {
        let mut compiler = VocabularyCompiler::new();
        compiler.extend(vec![("cats", 4), ("cat", 50), ("cats", 6), ("bat", 5)]);
        compiler.add("bad word", 9);
        assert_eq!(compiler.len(), 5);

        let vocabulary = compiler.compile().unwrap();
        assert_eq!(vocabulary.len(), 3);
        assert_eq!(
            vocabulary.entries(),
            vec![
                ("bat".to_string(), 5),
                ("cat".to_string(), 50),
                ("cats".to_string(), 10)
            ]
        );
        assert!(!vocabulary.contains("bad word"));
        assert!(!vocabulary.contains("ca"));
    }

    #[test]
    fn test_empty_vocabulary() {
        let vocabulary = VocabularyCompiler::new().compile().unwrap();
        assert!(vocabulary.is_empty());
        assert_eq!(vocabulary.frequency("anything"), 0);
    }

    #[test]
    fn test_save_and_open() {
        let dir = TempDir::new().unwrap();
        let mut compiler = VocabularyCompiler::new();
        compiler.extend(vec![("东京", 7), ("北京", 9)]);
        let vocabulary = compiler.compile().unwrap();

        let (automaton_path, frequency_path) = vocabulary.save(dir.path()).unwrap();
        assert!(automaton_path.ends_with(AUTOMATON_FILE));
        assert!(frequency_path.ends_with(FREQUENCY_FILE));

        let reopened = CompiledVocabulary::open_dir(dir.path()).unwrap();
        assert_eq!(reopened.entries(), vocabulary.entries());
        assert_eq!(reopened.frequency("北京"), 9);
    }

    #[test]
    fn test_open_missing_files_fails() {
        let dir = TempDir::new().unwrap();
        assert!(CompiledVocabulary::open_dir(dir.path()).is_err());

        let vocabulary = VocabularyCompiler::new().compile().unwrap();
        vocabulary.save(dir.path()).unwrap();
        fs::remove_file(dir.path().join(FREQUENCY_FILE)).unwrap();
        assert!(CompiledVocabulary::open_dir(dir.path()).is_err());
    }

    #[test]
    fn test_from_lexicon() {
        let lexicon = FrequencyLexicon::from_seed_entries(vec![("hello", 3), ("world", 2)]);
        let vocabulary = VocabularyCompiler::from_lexicon(&lexicon).compile().unwrap();
        assert_eq!(vocabulary.len(), 2);
        assert_eq!(vocabulary.frequency("hello"), 3);
    }
}

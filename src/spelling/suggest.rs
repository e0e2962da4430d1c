//! Suggestion scoring and the bounded collector used during a query.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Points per character of the suggested word.
const LENGTH_WEIGHT: i64 = 10;
/// Penalty per edit.
const DISTANCE_PENALTY: i64 = 100;
/// Frequency multiplier for an exact vocabulary hit.
const EXACT_FREQUENCY_WEIGHT: i64 = 5;

/// A scored correction candidate.
///
/// The [`Ord`] impl sorts better suggestions first: the exact match, then
/// higher scores, then words in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    /// The vocabulary word.
    pub word: String,
    /// Edit distance from the query; `0` for the exact match.
    pub distance: usize,
    /// Ranking score, higher is better.
    pub score: i64,
}

impl Suggestion {
    /// The query itself, found in the vocabulary.
    ///
    /// Scored `len * 10 + frequency * 5`.
    pub fn exact(word: impl Into<String>, frequency: u64) -> Self {
        let word = word.into();
        let score = char_len(&word)
            .saturating_mul(LENGTH_WEIGHT)
            .saturating_add(clamp(frequency).saturating_mul(EXACT_FREQUENCY_WEIGHT));
        Suggestion {
            word,
            distance: 0,
            score,
        }
    }

    /// A vocabulary word `distance` edits away from the query.
    ///
    /// Scored `-distance * 100 + len * 10 + frequency`.
    pub fn edited(word: impl Into<String>, distance: usize, frequency: u64) -> Self {
        let word = word.into();
        let penalty = i64::try_from(distance)
            .unwrap_or(i64::MAX)
            .saturating_mul(DISTANCE_PENALTY);
        let score = char_len(&word)
            .saturating_mul(LENGTH_WEIGHT)
            .saturating_add(clamp(frequency))
            .saturating_sub(penalty);
        Suggestion {
            word,
            distance,
            score,
        }
    }

    /// Whether this is the query itself.
    pub fn is_exact(&self) -> bool {
        self.distance == 0
    }
}

fn char_len(word: &str) -> i64 {
    i64::try_from(word.chars().count()).unwrap_or(i64::MAX)
}

fn clamp(frequency: u64) -> i64 {
    i64::try_from(frequency).unwrap_or(i64::MAX)
}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .is_exact()
            .cmp(&self.is_exact())
            .then_with(|| other.score.cmp(&self.score))
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Keeps the best `limit` suggestions offered so far.
///
/// Backed by a heap whose top is the worst suggestion kept, so a better
/// newcomer evicts it in `O(log limit)`. Words are only ever accepted once.
#[derive(Debug, Clone)]
pub struct SuggestionCollector {
    limit: usize,
    heap: BinaryHeap<Suggestion>,
    seen: AHashSet<String>,
}

impl SuggestionCollector {
    /// Create a collector holding at most `limit` suggestions.
    pub fn new(limit: usize) -> Self {
        SuggestionCollector {
            limit,
            heap: BinaryHeap::with_capacity(limit.saturating_add(1)),
            seen: AHashSet::new(),
        }
    }

    /// Offer a suggestion. Returns whether it is now held.
    pub fn offer(&mut self, suggestion: Suggestion) -> bool {
        if self.limit == 0 || self.seen.contains(&suggestion.word) {
            return false;
        }
        self.seen.insert(suggestion.word.clone());

        if self.heap.len() < self.limit {
            self.heap.push(suggestion);
            return true;
        }

        match self.heap.peek() {
            Some(worst) if suggestion < *worst => {
                self.heap.pop();
                self.heap.push(suggestion);
                true
            }
            _ => false,
        }
    }

    /// Whether `limit` suggestions are held.
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.limit
    }

    /// Number of suggestions held.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no suggestion is held.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The held suggestions, best first.
    pub fn into_sorted_vec(self) -> Vec<Suggestion> {
        self.heap.into_sorted_vec()
    }
}

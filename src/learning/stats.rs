//! Epoch-local candidate statistics and the promotion test.

use ahash::AHashMap;
use unicode_segmentation::UnicodeSegmentation;

use crate::learning::config::LearnerConfig;

/// Counts of the grapheme clusters seen next to a candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextCounter {
    counts: AHashMap<String, u64>,
    total: u64,
}

impl ContextCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one neighbouring grapheme.
    pub fn add(&mut self, neighbor: &str) {
        match self.counts.get_mut(neighbor) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(neighbor.to_string(), 1);
            }
        }
        self.total += 1;
    }

    /// Number of recorded neighbours.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct neighbours.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Count for one neighbour.
    pub fn count(&self, neighbor: &str) -> u64 {
        self.counts.get(neighbor).copied().unwrap_or(0)
    }

    /// Shannon entropy in nats; `0.0` for an empty counter.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        self.counts
            .values()
            .map(|&count| {
                let p = count as f64 / total;
                -p * p.ln()
            })
            .sum()
    }

    /// Forget every neighbour.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
    }
}

/// Statistics for one candidate substring.
///
/// `process_freq` and both context counters belong to `epoch_id` only;
/// `total_freq` keeps counting across epochs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordStat {
    pub epoch_id: u64,
    pub process_freq: u64,
    pub total_freq: u64,
    pub left_context: ContextCounter,
    pub right_context: ContextCounter,
}

impl WordStat {
    /// A stat first observed in `epoch_id`.
    pub fn new(epoch_id: u64) -> Self {
        WordStat {
            epoch_id,
            ..Self::default()
        }
    }

    /// Reset the epoch-local fields if this stat belongs to an older epoch.
    pub fn refresh(&mut self, epoch_id: u64) {
        if self.epoch_id != epoch_id {
            self.epoch_id = epoch_id;
            self.process_freq = 0;
            self.left_context.clear();
            self.right_context.clear();
        }
    }

    /// Record one occurrence with its neighbours.
    pub fn observe(&mut self, left: Option<&str>, right: Option<&str>) {
        self.process_freq += 1;
        self.total_freq += 1;
        if let Some(left) = left {
            self.left_context.add(left);
        }
        if let Some(right) = right {
            self.right_context.add(right);
        }
    }

    /// Whether every non-empty context distribution is diverse enough.
    pub fn passes_context_entropy(&self, threshold: f64) -> bool {
        [&self.left_context, &self.right_context]
            .into_iter()
            .filter(|context| !context.is_empty())
            .all(|context| context.entropy() > threshold)
    }
}

/// Byte offsets of every grapheme boundary in `text`, both ends included.
pub(crate) fn grapheme_bounds(text: &str) -> Vec<usize> {
    text.grapheme_indices(true)
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect()
}

/// Visit every substring of 1..=`max_len` graphemes with its neighbours.
///
/// Returns the number of substrings visited.
pub(crate) fn for_each_candidate<F>(sentence: &str, max_len: usize, mut visit: F) -> u64
where
    F: FnMut(&str, Option<&str>, Option<&str>),
{
    let bounds = grapheme_bounds(sentence);
    let count = bounds.len() - 1;
    let mut visited = 0;

    for len in 1..=max_len.min(count) {
        for start in 0..=count - len {
            let end = start + len;
            let candidate = &sentence[bounds[start]..bounds[end]];
            let left = (start > 0).then(|| &sentence[bounds[start - 1]..bounds[start]]);
            let right = (end < count).then(|| &sentence[bounds[end]..bounds[end + 1]]);
            visit(candidate, left, right);
            visited += 1;
        }
    }

    visited
}

/// `p / p_parts` for `candidate`, where `p_parts` is the best product of
/// the probabilities of a binary split.
///
/// Returns `None` for single graphemes, a zero `total`, or when no split has
/// a positive probability.
pub fn mutual_information_ratio<F>(candidate: &str, frequency: u64, total: u64, lookup: F) -> Option<f64>
where
    F: Fn(&str) -> u64,
{
    let bounds = grapheme_bounds(candidate);
    if bounds.len() < 3 || total == 0 {
        return None;
    }

    let total = total as f64;
    let p = frequency as f64 / total;
    let p_parts = bounds[1..bounds.len() - 1]
        .iter()
        .map(|&split| {
            let left = lookup(&candidate[..split]) as f64 / total;
            let right = lookup(&candidate[split..]) as f64 / total;
            left * right
        })
        .fold(0.0f64, f64::max);

    (p_parts > 0.0).then(|| p / p_parts)
}

/// The promotion test shared by every learner.
///
/// `frequency` and `total` are whatever counts the learner bases its
/// probabilities on; `lookup` returns the same kind of count for the halves.
pub(crate) fn is_promotable<F>(
    candidate: &str,
    stat: &WordStat,
    frequency: u64,
    total: u64,
    lookup: F,
    config: &LearnerConfig,
) -> bool
where
    F: Fn(&str) -> u64,
{
    if frequency < config.min_frequency {
        return false;
    }
    match mutual_information_ratio(candidate, frequency, total, lookup) {
        Some(ratio) if ratio > config.min_mi_ratio => {
            stat.passes_context_entropy(config.min_context_entropy)
        }
        _ => false,
    }
}

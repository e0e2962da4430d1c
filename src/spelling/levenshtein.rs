//! Character-level edit distance.
//!
//! Distances count Unicode scalar values, the same unit the vocabulary
//! automaton uses, so a word the automaton accepts at distance `k` also
//! measures `<= k` here.

use std::cmp::min;

/// Levenshtein distance between two strings.
///
/// The minimum number of single-character insertions, deletions or
/// substitutions turning `s1` into `s2`.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1: Vec<char> = s1.chars().collect();
    let s2: Vec<char> = s2.chars().collect();

    if s1.is_empty() {
        return s2.len();
    }
    if s2.is_empty() {
        return s1.len();
    }

    let mut prev_row: Vec<usize> = (0..=s2.len()).collect();
    let mut curr_row = vec![0; s2.len() + 1];

    for (i, c1) in s1.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, c2) in s2.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            curr_row[j + 1] = min(
                min(prev_row[j + 1] + 1, curr_row[j] + 1),
                prev_row[j] + cost,
            );
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[s2.len()]
}

/// Levenshtein distance, or `None` as soon as it must exceed `threshold`.
pub fn levenshtein_distance_threshold(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    let s1: Vec<char> = s1.chars().collect();
    let s2: Vec<char> = s2.chars().collect();

    if s1.len().abs_diff(s2.len()) > threshold {
        return None;
    }

    let mut prev_row: Vec<usize> = (0..=s2.len()).collect();
    let mut curr_row = vec![0; s2.len() + 1];

    for (i, c1) in s1.iter().enumerate() {
        curr_row[0] = i + 1;
        let mut row_min = curr_row[0];

        for (j, c2) in s2.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            curr_row[j + 1] = min(
                min(prev_row[j + 1] + 1, curr_row[j] + 1),
                prev_row[j] + cost,
            );
            row_min = min(row_min, curr_row[j + 1]);
        }

        // Every later cell descends from this row
        if row_min > threshold {
            return None;
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[s2.len()];
    (distance <= threshold).then_some(distance)
}

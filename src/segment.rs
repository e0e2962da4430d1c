//! Ranking alternative segmentations of a sentence.
//!
//! Every grapheme boundary of the sentence becomes a node. An edge `i -> j`
//! spans the graphemes between the two boundaries and costs the negative log
//! probability of that word in a [`FrequencyLexicon`]. Single graphemes are
//! always connected, unknown ones at the cost of a frequency of one, so there
//! is always at least one route from the first boundary to the last.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{KShortestPaths, LayeredDagSolver, NodeId, Path, WeightedGraph, best_layered_path};
use crate::learning::stats::grapheme_bounds;
use crate::lexicon::FrequencyLexicon;

/// Default longest word considered, in grapheme clusters.
pub const DEFAULT_MAX_WORD_LENGTH: usize = 5;

/// One way of cutting a sentence into words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segmentation {
    /// The words, in sentence order.
    pub words: Vec<String>,
    /// Sum of the word costs; lower is more likely.
    pub cost: f64,
}

/// The word lattice of one sentence.
///
/// # Examples
///
/// ```
/// use lexica::lexicon::FrequencyLexicon;
/// use lexica::segment::SegmentationGraph;
///
/// let lexicon = FrequencyLexicon::from_seed_entries(vec![("up", 30), ("set", 30), ("upset", 40)]);
/// let graph = SegmentationGraph::build("upset", &lexicon).unwrap();
///
/// let best = graph.best().unwrap().unwrap();
/// assert_eq!(best.words, vec!["upset"]);
/// ```
#[derive(Debug, Clone)]
pub struct SegmentationGraph<'a> {
    sentence: &'a str,
    bounds: Vec<usize>,
    graph: WeightedGraph,
}

impl<'a> SegmentationGraph<'a> {
    /// Build the lattice with words of up to [`DEFAULT_MAX_WORD_LENGTH`] graphemes.
    pub fn build(sentence: &'a str, lexicon: &FrequencyLexicon) -> Result<Self> {
        Self::with_max_word_length(sentence, lexicon, DEFAULT_MAX_WORD_LENGTH)
    }

    /// Build the lattice with words of up to `max_word_length` graphemes.
    pub fn with_max_word_length(
        sentence: &'a str,
        lexicon: &FrequencyLexicon,
        max_word_length: usize,
    ) -> Result<Self> {
        let bounds = grapheme_bounds(sentence);
        let count = bounds.len() - 1;
        let log_total = lexicon.normalizer().ln();

        let mut graph = WeightedGraph::new();
        graph.add_node(0);
        for start in 0..count {
            for end in start + 1..=count.min(start + max_word_length.max(1)) {
                let word = &sentence[bounds[start]..bounds[end]];
                let frequency = lexicon.frequency(word);
                if frequency == 0 && end - start > 1 {
                    continue;
                }
                let cost = (log_total - (frequency.max(1) as f64).ln()).max(0.0);
                graph.add_edge(start, end, cost)?;
            }
        }
        debug!(
            "segmentation lattice for {sentence:?}: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(SegmentationGraph {
            sentence,
            bounds,
            graph,
        })
    }

    /// The underlying graph.
    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }

    /// Number of grapheme clusters in the sentence.
    pub fn grapheme_count(&self) -> usize {
        self.bounds.len() - 1
    }

    /// The cheapest segmentation, `None` for an empty sentence.
    pub fn best(&self) -> Result<Option<Segmentation>> {
        if self.grapheme_count() == 0 {
            return Ok(None);
        }
        let path = best_layered_path(&self.graph, self.bounds.len())?;
        Ok(self.to_segmentation(&path))
    }

    /// Up to `k` segmentations, cheapest first.
    pub fn top_k(&self, k: usize) -> Result<Vec<Segmentation>> {
        if self.grapheme_count() == 0 {
            return Ok(Vec::new());
        }
        let paths = KShortestPaths::new(LayeredDagSolver).find(
            &self.graph,
            0,
            self.grapheme_count(),
            k,
        )?;
        Ok(paths
            .iter()
            .filter_map(|path| self.to_segmentation(path))
            .collect())
    }

    fn to_segmentation(&self, path: &Path) -> Option<Segmentation> {
        if path.is_empty() {
            return None;
        }
        let words = path
            .edges()
            .map(|(from, to): (NodeId, NodeId)| {
                self.sentence[self.bounds[from]..self.bounds[to]].to_string()
            })
            .collect();
        Some(Segmentation {
            words,
            cost: path.cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> FrequencyLexicon {
        // normalizer is 100
        FrequencyLexicon::from_seed_entries(vec![
            ("ab", 40),
            ("cd", 40),
            ("abcd", 10),
            ("a", 5),
            ("b", 5),
        ])
    }

    #[test]
    fn test_top_k_ranking() {
        let graph = SegmentationGraph::build("abcd", &lexicon()).unwrap();
        assert_eq!(graph.grapheme_count(), 4);
        assert!(graph.graph().is_layered());

        let ranked = graph.top_k(3).unwrap();
        let words: Vec<Vec<String>> = ranked.iter().map(|s| s.words.clone()).collect();
        assert_eq!(
            words,
            vec![
                vec!["ab".to_string(), "cd".to_string()],
                vec!["abcd".to_string()],
                vec!["a".to_string(), "b".to_string(), "cd".to_string()],
            ]
        );

        let expected = 2.0 * (100f64.ln() - 40f64.ln());
        assert!((ranked[0].cost - expected).abs() < 1e-9);
        assert!(ranked.windows(2).all(|pair| pair[0].cost <= pair[1].cost));
    }

    #[test]
    fn test_best_matches_first_ranked() {
        let graph = SegmentationGraph::build("abcd", &lexicon()).unwrap();
        let best = graph.best().unwrap().unwrap();
        assert_eq!(best, graph.top_k(1).unwrap()[0]);
    }

    #[test]
    fn test_unknown_text_falls_back_to_graphemes() {
        let graph = SegmentationGraph::build("xyz", &lexicon()).unwrap();
        let ranked = graph.top_k(5).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].words, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_short_word_limit() {
        let graph = SegmentationGraph::with_max_word_length("abcd", &lexicon(), 2).unwrap();
        let best = graph.best().unwrap().unwrap();
        assert_eq!(best.words, vec!["ab", "cd"]);
        assert!(graph.graph().cost(0, 4).is_none());
    }

    #[test]
    fn test_empty_sentence() {
        let graph = SegmentationGraph::build("", &lexicon()).unwrap();
        assert!(graph.best().unwrap().is_none());
        assert!(graph.top_k(3).unwrap().is_empty());
    }
}

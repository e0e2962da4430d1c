//! Yen's k-shortest-paths search.
//!
//! Each spur search receives an explicit [`EdgeFilter`] describing what it
//! may not use, so the shared graph is never mutated and nothing needs to be
//! restored afterwards.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashSet;
use log::debug;

use crate::error::Result;
use crate::graph::path::Path;
use crate::graph::shortest_path::{DijkstraSolver, ShortestPathSolver};
use crate::graph::weighted::{EdgeFilter, NodeId, WeightedGraph};

/// A spliced root + spur path waiting to be accepted.
#[derive(Debug, Clone)]
struct Candidate {
    path: Path,
    /// Discovery order, used to keep equal-cost paths stable.
    seq: u64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: cheaper first, then earlier discovery
        other
            .path
            .cost
            .partial_cmp(&self.path.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Enumerates the K cheapest loopless paths with a pluggable solver.
///
/// # Examples
///
/// ```
/// use lexica::graph::{KShortestPaths, LayeredDagSolver, WeightedGraph};
///
/// let graph = WeightedGraph::from_edges([(0, 1, 1.0), (1, 2, 1.0), (0, 2, 3.0)]).unwrap();
/// let paths = KShortestPaths::new(LayeredDagSolver).find(&graph, 0, 2, 5).unwrap();
///
/// assert_eq!(paths.len(), 2);
/// assert_eq!(paths[0].nodes, vec![0, 1, 2]);
/// assert_eq!(paths[1].cost, 3.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KShortestPaths<S = DijkstraSolver> {
    solver: S,
}

impl<S: ShortestPathSolver> KShortestPaths<S> {
    /// Create a search using `solver` for the seed path and every spur path.
    pub fn new(solver: S) -> Self {
        KShortestPaths { solver }
    }

    /// The underlying solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Up to `k` paths from `source` to `target`, ascending by cost.
    ///
    /// Fewer than `k` paths are returned when the graph has no more; an
    /// unreachable target yields an empty list. Fails only when the graph
    /// does not have the shape the solver requires.
    pub fn find(
        &self,
        graph: &WeightedGraph,
        source: NodeId,
        target: NodeId,
        k: usize,
    ) -> Result<Vec<Path>> {
        self.solver.validate(graph)?;
        Ok(self.search(graph, source, target, k))
    }

    fn search(&self, graph: &WeightedGraph, source: NodeId, target: NodeId, k: usize) -> Vec<Path> {
        if k == 0 {
            return Vec::new();
        }

        let best = self
            .solver
            .shortest_path(graph, source, target, &EdgeFilter::new());
        if best.is_empty() {
            return Vec::new();
        }

        let mut seen: AHashSet<Vec<NodeId>> = AHashSet::new();
        seen.insert(best.nodes.clone());
        let mut accepted = vec![best];
        let mut candidates = BinaryHeap::new();
        let mut next_seq = 0u64;

        while accepted.len() < k {
            let last = accepted[accepted.len() - 1].nodes.clone();

            for spur_index in 0..last.len() - 1 {
                let spur_node = last[spur_index];
                let root = &last[..=spur_index];

                let mut filter = EdgeFilter::new();
                for path in &accepted {
                    if path.nodes.len() > spur_index + 1 && path.nodes[..=spur_index] == *root {
                        filter.exclude_edge(path.nodes[spur_index], path.nodes[spur_index + 1]);
                    }
                }
                for &node in &root[..spur_index] {
                    filter.exclude_node(node);
                }

                let spur = self.solver.shortest_path(graph, spur_node, target, &filter);
                if spur.is_empty() {
                    continue;
                }
                let Some(root_cost) = graph.path_cost(root) else {
                    continue;
                };

                let mut nodes = root[..spur_index].to_vec();
                nodes.extend_from_slice(&spur.nodes);
                if seen.insert(nodes.clone()) {
                    candidates.push(Candidate {
                        path: Path::new(nodes, root_cost + spur.cost),
                        seq: next_seq,
                    });
                    next_seq += 1;
                }
            }

            match candidates.pop() {
                Some(candidate) => accepted.push(candidate.path),
                None => {
                    debug!(
                        "k-shortest search from {source} to {target} exhausted after {} of {k} paths",
                        accepted.len()
                    );
                    break;
                }
            }
        }

        accepted
    }
}

/// Up to `k` cheapest paths using the general Dijkstra solver.
pub fn k_shortest_paths(
    graph: &WeightedGraph,
    source: NodeId,
    target: NodeId,
    k: usize,
) -> Vec<Path> {
    KShortestPaths::new(DijkstraSolver).search(graph, source, target, k)
}

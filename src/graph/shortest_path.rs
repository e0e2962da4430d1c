//! Single-source shortest path solvers.
//!
//! [`DijkstraSolver`] works on any graph with non-negative costs.
//! [`LayeredDagSolver`] assumes every edge points from a lower to a higher
//! node id and replaces the global priority queue with one backward
//! dynamic-programming sweep.

use std::fmt::Debug;

use ahash::{AHashMap, AHashSet};

use crate::error::{LexicaError, Result};
use crate::graph::path::Path;
use crate::graph::priority_map::PriorityMap;
use crate::graph::weighted::{EdgeFilter, NodeId, WeightedGraph};

/// A routine finding the cheapest path between two nodes.
///
/// Implementations must honour `filter` and return [`Path::empty`] when the
/// target cannot be reached.
pub trait ShortestPathSolver: Debug {
    /// Cheapest path from `source` to `target` avoiding everything `filter` hides.
    fn shortest_path(
        &self,
        graph: &WeightedGraph,
        source: NodeId,
        target: NodeId,
        filter: &EdgeFilter,
    ) -> Path;

    /// Check that `graph` has the shape this solver requires.
    fn validate(&self, _graph: &WeightedGraph) -> Result<()> {
        Ok(())
    }
}

/// Distances and predecessor links from one Dijkstra run.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: NodeId,
    distances: AHashMap<NodeId, f64>,
    predecessors: AHashMap<NodeId, NodeId>,
}

impl ShortestPathTree {
    /// The node the search started from.
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Distance from the source, `+inf` when unreachable.
    pub fn distance(&self, node: NodeId) -> f64 {
        self.distances.get(&node).copied().unwrap_or(f64::INFINITY)
    }

    /// Whether `node` was reached.
    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distances.contains_key(&node)
    }

    /// Walk predecessor links back from `target`.
    ///
    /// A broken chain yields [`Path::empty`].
    pub fn path_to(&self, target: NodeId) -> Path {
        let Some(&cost) = self.distances.get(&target) else {
            return Path::empty();
        };

        let mut nodes = vec![target];
        let mut current = target;
        while current != self.source {
            match self.predecessors.get(&current) {
                Some(&previous) if nodes.len() <= self.distances.len() => {
                    nodes.push(previous);
                    current = previous;
                }
                _ => return Path::empty(),
            }
        }
        nodes.reverse();
        Path::new(nodes, cost)
    }
}

/// Run Dijkstra from `source` over every reachable node.
pub fn dijkstra(graph: &WeightedGraph, source: NodeId, filter: &EdgeFilter) -> ShortestPathTree {
    run_dijkstra(graph, source, None, filter)
}

fn run_dijkstra(
    graph: &WeightedGraph,
    source: NodeId,
    target: Option<NodeId>,
    filter: &EdgeFilter,
) -> ShortestPathTree {
    let mut tree = ShortestPathTree {
        source,
        distances: AHashMap::new(),
        predecessors: AHashMap::new(),
    };
    if !filter.allows_node(source) {
        return tree;
    }

    let mut settled = AHashSet::new();
    let mut queue = PriorityMap::new();
    tree.distances.insert(source, 0.0);
    queue.set(source, 0.0);

    // EmptyQueue ends the search.
    while let Ok((node, distance)) = queue.pop_min() {
        settled.insert(node);
        if target == Some(node) {
            break;
        }

        for (next, cost) in graph.neighbors(node) {
            if settled.contains(&next) || !filter.allows_edge(node, next) {
                continue;
            }
            let candidate = distance + cost;
            if candidate < tree.distance(next) {
                tree.distances.insert(next, candidate);
                tree.predecessors.insert(next, node);
                queue.set(next, candidate);
            }
        }
    }

    tree
}

/// General-purpose solver backed by [`PriorityMap`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraSolver;

impl ShortestPathSolver for DijkstraSolver {
    fn shortest_path(
        &self,
        graph: &WeightedGraph,
        source: NodeId,
        target: NodeId,
        filter: &EdgeFilter,
    ) -> Path {
        run_dijkstra(graph, source, Some(target), filter).path_to(target)
    }
}

/// Backward dynamic programming over an index-layered DAG.
///
/// `distance[i] = min over edges (i, j) of distance[j] + cost(i, j)`,
/// processed from the target index down to the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredDagSolver;

impl LayeredDagSolver {
    /// Distance from every node in `0..=target` to `target`.
    ///
    /// Empty when `target` is not a node of `graph`.
    pub fn distances_to_target(&self, graph: &WeightedGraph, target: NodeId) -> Vec<f64> {
        if !spans_graph(graph, 0, target) {
            return Vec::new();
        }
        backward_pass(graph, 0, target, &EdgeFilter::new()).0
    }
}

impl ShortestPathSolver for LayeredDagSolver {
    fn shortest_path(
        &self,
        graph: &WeightedGraph,
        source: NodeId,
        target: NodeId,
        filter: &EdgeFilter,
    ) -> Path {
        if !spans_graph(graph, source, target) || !filter.allows_node(source) {
            return Path::empty();
        }
        let (distances, successors) = backward_pass(graph, source, target, filter);
        follow_successors(source, target, &distances, &successors)
    }

    fn validate(&self, graph: &WeightedGraph) -> Result<()> {
        if graph.is_layered() {
            Ok(())
        } else {
            Err(LexicaError::graph(
                "layered DAG solver needs contiguous ids 0..n with edges pointing upward",
            ))
        }
    }
}

/// Whether `source..=target` is a run of node ids no wider than the graph.
fn spans_graph(graph: &WeightedGraph, source: NodeId, target: NodeId) -> bool {
    source <= target
        && target - source < graph.node_count()
        && graph.contains_node(source)
        && graph.contains_node(target)
}

/// Distances to `target` and the chosen successor of every node in
/// `source..=target`, both indexed by `node - source`.
fn backward_pass(
    graph: &WeightedGraph,
    source: NodeId,
    target: NodeId,
    filter: &EdgeFilter,
) -> (Vec<f64>, Vec<Option<NodeId>>) {
    let width = target - source + 1;
    let mut distances = vec![f64::INFINITY; width];
    let mut successors = vec![None; width];
    distances[width - 1] = 0.0;

    for node in (source..target).rev() {
        if !filter.allows_node(node) {
            continue;
        }
        let slot = node - source;
        for (next, cost) in graph.neighbors(node) {
            if next <= node || next > target || !filter.allows_edge(node, next) {
                continue;
            }
            let candidate = distances[next - source] + cost;
            if candidate < distances[slot] {
                distances[slot] = candidate;
                successors[slot] = Some(next);
            }
        }
    }

    (distances, successors)
}

fn follow_successors(
    source: NodeId,
    target: NodeId,
    distances: &[f64],
    successors: &[Option<NodeId>],
) -> Path {
    let cost = distances[0];
    if !cost.is_finite() {
        return Path::empty();
    }

    let mut nodes = vec![source];
    let mut current = source;
    while current != target {
        match successors[current - source] {
            Some(next) => {
                nodes.push(next);
                current = next;
            }
            None => return Path::empty(),
        }
    }
    Path::new(nodes, cost)
}

/// Best path from node `0` to node `node_count - 1` in one backward pass.
///
/// For callers that never need more than one path. The graph must use ids
/// `0..node_count` with every edge pointing to a higher id; anything else is
/// rejected instead of producing a silently wrong answer.
pub fn best_layered_path(graph: &WeightedGraph, node_count: usize) -> Result<Path> {
    if node_count == 0 {
        return Err(LexicaError::graph("layered DAG must have at least one node"));
    }
    for node in graph.nodes() {
        if node >= node_count {
            return Err(LexicaError::graph(format!(
                "node {node} is outside 0..{node_count}"
            )));
        }
        if let Some((next, _)) = graph.neighbors(node).find(|(next, _)| *next <= node) {
            return Err(LexicaError::graph(format!(
                "edge {node} -> {next} does not point to a higher index"
            )));
        }
    }

    let sink = node_count - 1;
    let (distances, successors) = backward_pass(graph, 0, sink, &EdgeFilter::new());
    Ok(follow_successors(0, sink, &distances, &successors))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> WeightedGraph {
        WeightedGraph::from_edges([
            (0, 1, 1.0),
            (0, 2, 4.0),
            (1, 2, 1.0),
            (1, 3, 2.0),
            (2, 3, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_dijkstra_distances() {
        let tree = dijkstra(&sample_graph(), 0, &EdgeFilter::new());
        assert_eq!(tree.distance(0), 0.0);
        assert_eq!(tree.distance(1), 1.0);
        assert_eq!(tree.distance(2), 2.0);
        assert_eq!(tree.distance(3), 3.0);
        assert!(tree.distance(99).is_infinite());
        assert!(!tree.is_reachable(99));
    }

    #[test]
    fn test_dijkstra_path_keeps_first_found_tie() {
        let path = DijkstraSolver.shortest_path(&sample_graph(), 0, 3, &EdgeFilter::new());
        assert_eq!(path.nodes, vec![0, 1, 3]);
        assert_eq!(path.cost, 3.0);
    }

    #[test]
    fn test_unreachable_target_yields_empty_path() {
        let mut graph = sample_graph();
        graph.add_node(7);
        assert!(DijkstraSolver
            .shortest_path(&graph, 0, 7, &EdgeFilter::new())
            .is_empty());
        assert!(LayeredDagSolver
            .shortest_path(&graph, 3, 0, &EdgeFilter::new())
            .is_empty());
    }

    #[test]
    fn test_layered_solver_ignores_targets_outside_graph() {
        let graph = sample_graph();
        for target in [4, 1_000_000_000, usize::MAX] {
            assert!(LayeredDagSolver
                .shortest_path(&graph, 0, target, &EdgeFilter::new())
                .is_empty());
            assert!(LayeredDagSolver.distances_to_target(&graph, target).is_empty());
        }
        assert!(LayeredDagSolver
            .shortest_path(&graph, usize::MAX, usize::MAX, &EdgeFilter::new())
            .is_empty());

        let sparse = WeightedGraph::from_edges([(0, 1_000_000_000, 1.0)]).unwrap();
        assert!(LayeredDagSolver
            .shortest_path(&sparse, 0, 1_000_000_000, &EdgeFilter::new())
            .is_empty());
    }

    #[test]
    fn test_source_equals_target() {
        let path = DijkstraSolver.shortest_path(&sample_graph(), 2, 2, &EdgeFilter::new());
        assert_eq!(path.nodes, vec![2]);
        assert_eq!(path.cost, 0.0);

        let path = LayeredDagSolver.shortest_path(&sample_graph(), 2, 2, &EdgeFilter::new());
        assert_eq!(path.nodes, vec![2]);
    }

    #[test]
    fn test_layered_solver_prefers_lowest_neighbor_on_ties() {
        let path = LayeredDagSolver.shortest_path(&sample_graph(), 0, 3, &EdgeFilter::new());
        assert_eq!(path.nodes, vec![0, 1, 2, 3]);
        assert_eq!(path.cost, 3.0);
    }

    #[test]
    fn test_filter_is_honoured_by_both_solvers() {
        let graph = sample_graph();
        let mut filter = EdgeFilter::new();
        filter.exclude_edge(1, 3);
        filter.exclude_edge(1, 2);

        for solver in [&DijkstraSolver as &dyn ShortestPathSolver, &LayeredDagSolver] {
            let path = solver.shortest_path(&graph, 0, 3, &filter);
            assert_eq!(path.nodes, vec![0, 2, 3]);
            assert_eq!(path.cost, 5.0);
        }

        let mut filter = EdgeFilter::new();
        filter.exclude_node(2);
        filter.exclude_node(1);
        assert!(DijkstraSolver.shortest_path(&graph, 0, 3, &filter).is_empty());
        assert!(LayeredDagSolver.shortest_path(&graph, 0, 3, &filter).is_empty());
    }

    #[test]
    fn test_layered_distances_to_target() {
        let distances = LayeredDagSolver.distances_to_target(&sample_graph(), 3);
        assert_eq!(distances, vec![3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_layered_validate() {
        assert!(LayeredDagSolver.validate(&sample_graph()).is_ok());
        let cyclic = WeightedGraph::from_edges([(0, 1, 1.0), (1, 0, 1.0)]).unwrap();
        assert!(LayeredDagSolver.validate(&cyclic).is_err());
        assert!(DijkstraSolver.validate(&cyclic).is_ok());
    }

    #[test]
    fn test_best_layered_path() {
        let path = best_layered_path(&sample_graph(), 4).unwrap();
        assert_eq!(path.cost, 3.0);
        assert_eq!(path.source(), Some(0));
        assert_eq!(path.target(), Some(3));

        let disconnected = WeightedGraph::from_edges([(0, 1, 1.0), (2, 3, 1.0)]).unwrap();
        assert!(best_layered_path(&disconnected, 4).unwrap().is_empty());
    }

    #[test]
    fn test_best_layered_path_rejects_bad_shapes() {
        assert!(best_layered_path(&WeightedGraph::new(), 0).is_err());

        let backward = WeightedGraph::from_edges([(0, 2, 1.0), (2, 1, 1.0)]).unwrap();
        assert!(best_layered_path(&backward, 3).is_err());

        let out_of_range = WeightedGraph::from_edges([(0, 5, 1.0)]).unwrap();
        assert!(best_layered_path(&out_of_range, 3).is_err());
    }

    #[test]
    fn test_broken_predecessor_chain_yields_empty_path() {
        let mut tree = dijkstra(&sample_graph(), 0, &EdgeFilter::new());
        tree.predecessors.remove(&2);
        assert!(tree.path_to(2).is_empty());
        assert!(!tree.path_to(1).is_empty());
    }
}

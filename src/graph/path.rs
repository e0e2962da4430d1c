//! Paths produced by the shortest path solvers.

use serde::{Deserialize, Serialize};

use crate::graph::weighted::NodeId;

/// An ordered node sequence with its total cost.
///
/// An empty path means "no route"; its cost is `+inf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Total cost of all edges along the path.
    pub cost: f64,
    /// Visited nodes from source to target.
    pub nodes: Vec<NodeId>,
}

impl Path {
    /// Create a path.
    pub fn new(nodes: Vec<NodeId>, cost: f64) -> Self {
        Path { cost, nodes }
    }

    /// The "no route" path.
    pub fn empty() -> Self {
        Path {
            cost: f64::INFINITY,
            nodes: Vec::new(),
        }
    }

    /// Whether this path represents "no route".
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// First node, if any.
    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Last node, if any.
    pub fn target(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Consecutive `(from, to)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path() {
        let path = Path::empty();
        assert!(path.is_empty());
        assert!(path.cost.is_infinite());
        assert_eq!(path.edge_count(), 0);
        assert_eq!(path.source(), None);
    }

    #[test]
    fn test_edges() {
        let path = Path::new(vec![0, 2, 5], 3.0);
        let edges: Vec<_> = path.edges().collect();
        assert_eq!(edges, vec![(0, 2), (2, 5)]);
        assert_eq!(path.edge_count(), 2);
        assert_eq!(path.target(), Some(5));
    }
}

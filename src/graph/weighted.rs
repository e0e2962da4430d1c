//! Weighted directed graph and per-search edge exclusion.

use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashSet;

use crate::error::{LexicaError, Result};

/// Node identifier: a boundary index in a token sequence or an opaque id.
pub type NodeId = usize;

/// A directed graph mapping each node to `{neighbor: cost}`.
///
/// Costs are finite and non-negative. Neighbors iterate in ascending id
/// order so every search over the graph is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedGraph {
    adjacency: BTreeMap<NodeId, BTreeMap<NodeId, f64>>,
}

impl WeightedGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        WeightedGraph {
            adjacency: BTreeMap::new(),
        }
    }

    /// Build a graph from `(from, to, cost)` triples.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId, f64)>,
    {
        let mut graph = WeightedGraph::new();
        for (from, to, cost) in edges {
            graph.add_edge(from, to, cost)?;
        }
        Ok(graph)
    }

    /// Ensure `node` exists, even without outgoing edges.
    pub fn add_node(&mut self, node: NodeId) {
        self.adjacency.entry(node).or_default();
    }

    /// Insert or replace the edge `from -> to`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, cost: f64) -> Result<()> {
        if !cost.is_finite() || cost < 0.0 {
            return Err(LexicaError::graph(format!(
                "edge {from} -> {to} has invalid cost {cost}"
            )));
        }
        self.adjacency.entry(from).or_default().insert(to, cost);
        self.add_node(to);
        Ok(())
    }

    /// Cost of the edge `from -> to`, if present.
    pub fn cost(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.adjacency.get(&from)?.get(&to).copied()
    }

    /// Outgoing edges of `node` in ascending neighbor order.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(to, cost)| (*to, *cost)))
    }

    /// All nodes in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Whether `node` exists.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Total cost of walking `nodes` edge by edge.
    ///
    /// Returns `None` if any consecutive pair is not connected.
    pub fn path_cost(&self, nodes: &[NodeId]) -> Option<f64> {
        nodes
            .windows(2)
            .map(|pair| self.cost(pair[0], pair[1]))
            .sum()
    }

    /// Whether the nodes are exactly `0..n` and every edge points upward.
    pub fn is_layered(&self) -> bool {
        let contiguous = self
            .adjacency
            .keys()
            .enumerate()
            .all(|(index, node)| index == *node);
        contiguous
            && self
                .adjacency
                .iter()
                .all(|(from, edges)| edges.keys().all(|to| to > from))
    }
}

/// Edges and nodes hidden from a single search.
///
/// Yen's algorithm hands one of these to every spur search instead of
/// mutating the shared graph.
#[derive(Debug, Clone, Default)]
pub struct EdgeFilter {
    edges: AHashSet<(NodeId, NodeId)>,
    nodes: BTreeSet<NodeId>,
}

impl EdgeFilter {
    /// A filter that hides nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide the edge `from -> to`.
    pub fn exclude_edge(&mut self, from: NodeId, to: NodeId) {
        self.edges.insert((from, to));
    }

    /// Hide `node` and every edge touching it.
    pub fn exclude_node(&mut self, node: NodeId) {
        self.nodes.insert(node);
    }

    /// Whether the edge `from -> to` may be traversed.
    pub fn allows_edge(&self, from: NodeId, to: NodeId) -> bool {
        !self.edges.contains(&(from, to)) && self.allows_node(from) && self.allows_node(to)
    }

    /// Whether `node` may be visited.
    pub fn allows_node(&self, node: NodeId) -> bool {
        !self.nodes.contains(&node)
    }

    /// Whether the filter hides anything.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.nodes.is_empty()
    }
}

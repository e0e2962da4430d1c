//! Weighted graph search for ranking alternative segmentations.
//!
//! This module provides a decrease-key capable priority map, single-source
//! shortest path solvers (general Dijkstra and a layered-DAG specialisation)
//! and Yen's k-shortest-paths search built on top of either solver.

pub mod k_shortest;
pub mod path;
pub mod priority_map;
pub mod shortest_path;
pub mod weighted;

pub use k_shortest::{KShortestPaths, k_shortest_paths};
pub use path::Path;
pub use priority_map::PriorityMap;
pub use shortest_path::{
    DijkstraSolver, LayeredDagSolver, ShortestPathSolver, ShortestPathTree, best_layered_path,
    dijkstra,
};
pub use weighted::{EdgeFilter, NodeId, WeightedGraph};

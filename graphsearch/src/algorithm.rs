//! The three search strategies and the contract they share.
//!
//! Every strategy is a stateless function from `(graph, source, target)` to
//! a [SearchOutcome]. The endpoints must exist in the graph, a search where
//! source and target coincide short-circuits to the single-node path, and
//! exhausting the frontier without reaching the target is a normal outcome
//! reported as an empty path.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::{Result, SearchError};
use crate::graph::{Graph, NodeId};

pub mod astar;
pub mod bfs;
pub mod dijkstra;

/// Everything a single search invocation produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Node sequence from source to target; empty when no path exists.
    pub path: Vec<NodeId>,
    /// Nodes touched before the search terminated.
    pub visited: HashSet<NodeId>,
    /// Frontier pops performed by the main loop.
    pub expansions: usize,
}

impl SearchOutcome {
    /// The degenerate search where source and target coincide.
    fn trivial(node: NodeId) -> Self {
        let mut visited = HashSet::new();
        visited.insert(node);
        SearchOutcome {
            path: vec![node],
            visited,
            expansions: 0,
        }
    }

    /// The frontier ran dry without reaching the target.
    fn exhausted(visited: HashSet<NodeId>, expansions: usize) -> Self {
        SearchOutcome {
            path: Vec::new(),
            visited,
            expansions,
        }
    }
}

/// The closed set of search strategies the suite benchmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    Bfs,
    Dijkstra,
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::Astar];

    /// Canonical identifier used in records and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dijkstra => "DIJKSTRA",
            Algorithm::Astar => "ASTAR",
        }
    }

    /// Dispatch to the strategy this variant names.
    pub fn run(&self, graph: &Graph, source: NodeId, target: NodeId) -> Result<SearchOutcome> {
        match self {
            Algorithm::Bfs => bfs::bfs(graph, source, target),
            Algorithm::Dijkstra => dijkstra::dijkstra(graph, source, target),
            Algorithm::Astar => astar::astar(graph, source, target),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BFS" => Ok(Algorithm::Bfs),
            "DIJKSTRA" => Ok(Algorithm::Dijkstra),
            "ASTAR" | "A*" => Ok(Algorithm::Astar),
            _ => Err(SearchError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

fn check_endpoints(graph: &Graph, source: NodeId, target: NodeId) -> Result<()> {
    if !graph.contains(source) {
        return Err(SearchError::MissingNode(source));
    }
    if !graph.contains(target) {
        return Err(SearchError::MissingNode(target));
    }
    Ok(())
}

/// Walk parent pointers from `target` back to the search root and reverse.
fn reconstruct(parents: &HashMap<NodeId, NodeId>, target: NodeId) -> Vec<NodeId> {
    let mut path = vec![target];
    let mut current = target;
    while let Some(&parent) = parents.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

/// Min-heap entry for the cost-ordered frontiers.
///
/// Ties on cost break by node id, keeping expansion order deterministic
/// when several frontier entries share a cost.
#[derive(Debug, Clone, Copy)]
struct CostEntry {
    cost: f64,
    node: NodeId,
}

impl PartialEq for CostEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for CostEntry {}

impl Ord for CostEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Costs are finite sums of non-negative weights, never NaN.
        self.cost
            .partial_cmp(&other.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.node.cmp(&other.node))
            .reverse()
    }
}

impl PartialOrd for CostEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

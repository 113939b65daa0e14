//! Uniform-cost search: weight-optimal over non-negative edges.

use std::collections::{BinaryHeap, HashMap, HashSet};

use super::{CostEntry, SearchOutcome};
use crate::errors::Result;
use crate::graph::{Graph, NodeId};

/// Dijkstra's algorithm with a lazy-deletion min-heap frontier.
///
/// Relaxation pushes improved `(distance, node)` pairs without removing the
/// stale entries they supersede; the visited check discards stale pops when
/// they eventually surface. Every pop counts as an expansion, stale or not.
/// Edges without a weight attribute contribute the default weight of 1.
pub fn dijkstra(graph: &Graph, source: NodeId, target: NodeId) -> Result<SearchOutcome> {
    super::check_endpoints(graph, source, target)?;

    if source == target {
        return Ok(SearchOutcome::trivial(source));
    }

    // Absent keys stand for an infinite tentative distance.
    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    distances.insert(source, 0.0);

    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut expansions = 0;

    let mut frontier = BinaryHeap::new();
    frontier.push(CostEntry {
        cost: 0.0,
        node: source,
    });

    while let Some(CostEntry { cost, node }) = frontier.pop() {
        expansions += 1;

        if !visited.insert(node) {
            continue;
        }

        if node == target {
            return Ok(SearchOutcome {
                path: super::reconstruct(&parents, target),
                visited,
                expansions,
            });
        }

        for neighbor in graph.neighbors(node) {
            if visited.contains(&neighbor) {
                continue;
            }

            let weight = match graph.edge_weight(node, neighbor) {
                Some(weight) => weight,
                None => continue,
            };

            let next = cost + weight;
            let known = distances.get(&neighbor).copied().unwrap_or(f64::INFINITY);
            if next < known {
                distances.insert(neighbor, next);
                parents.insert(neighbor, node);
                frontier.push(CostEntry {
                    cost: next,
                    node: neighbor,
                });
            }
        }
    }

    Ok(SearchOutcome::exhausted(visited, expansions))
}

//! Breadth-first search over hop count, blind to edge weights.

use std::collections::{HashSet, VecDeque};

use super::SearchOutcome;
use crate::errors::Result;
use crate::graph::{Graph, NodeId};

/// Explore the graph in non-decreasing hop order, returning the first path
/// to reach `target`.
///
/// Each frontier entry carries its path from the source, so no parent map
/// is kept. Nodes are marked visited on enqueue and therefore enter the
/// frontier at most once, and the search stops the moment `target` is
/// enqueued. The returned path has the minimum number of edges, which need
/// not be the minimum total weight.
pub fn bfs(graph: &Graph, source: NodeId, target: NodeId) -> Result<SearchOutcome> {
    super::check_endpoints(graph, source, target)?;

    if source == target {
        return Ok(SearchOutcome::trivial(source));
    }

    let mut queue: VecDeque<(NodeId, Vec<NodeId>)> = VecDeque::new();
    queue.push_back((source, vec![source]));

    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(source);
    let mut expansions = 0;

    while let Some((current, path)) = queue.pop_front() {
        expansions += 1;

        for neighbor in graph.neighbors(current) {
            if visited.insert(neighbor) {
                let mut next = path.clone();
                next.push(neighbor);

                if neighbor == target {
                    return Ok(SearchOutcome {
                        path: next,
                        visited,
                        expansions,
                    });
                }

                queue.push_back((neighbor, next));
            }
        }
    }

    Ok(SearchOutcome::exhausted(visited, expansions))
}

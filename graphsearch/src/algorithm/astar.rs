//! A* search guided by a Euclidean heuristic over node positions.

use std::collections::{BinaryHeap, HashMap, HashSet};

use super::{CostEntry, SearchOutcome};
use crate::errors::Result;
use crate::graph::{Graph, NodeId};

/// Straight-line distance between two placed nodes.
///
/// Falls back to 0 when either node carries no position, which keeps the
/// estimate admissible and degrades the search to plain uniform-cost
/// behavior.
fn heuristic(graph: &Graph, from: NodeId, to: NodeId) -> f64 {
    match (graph.position(from), graph.position(to)) {
        (Some(a), Some(b)) => a.distance(&b),
        _ => 0.0,
    }
}

/// Weight-optimal search keyed by `g(node) + h(node, target)`.
///
/// Structurally the uniform-cost loop with the frontier re-keyed by the
/// heuristic estimate; relaxation, lazy deletion and expansion counting are
/// identical. Optimality holds as long as the heuristic never overestimates
/// the true remaining cost, which Euclidean distance on road-network-like
/// weights satisfies.
pub fn astar(graph: &Graph, source: NodeId, target: NodeId) -> Result<SearchOutcome> {
    super::check_endpoints(graph, source, target)?;

    if source == target {
        return Ok(SearchOutcome::trivial(source));
    }

    // Absent keys stand for an infinite g-score.
    let mut g_score: HashMap<NodeId, f64> = HashMap::new();
    g_score.insert(source, 0.0);

    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut expansions = 0;

    let mut frontier = BinaryHeap::new();
    frontier.push(CostEntry {
        cost: heuristic(graph, source, target),
        node: source,
    });

    while let Some(CostEntry { node, .. }) = frontier.pop() {
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

        let current_g = g_score.get(&node).copied().unwrap_or(f64::INFINITY);

        for neighbor in graph.neighbors(node) {
            if visited.contains(&neighbor) {
                continue;
            }

            let weight = match graph.edge_weight(node, neighbor) {
                Some(weight) => weight,
                None => continue,
            };

            let tentative = current_g + weight;
            let known = g_score.get(&neighbor).copied().unwrap_or(f64::INFINITY);
            if tentative < known {
                g_score.insert(neighbor, tentative);
                parents.insert(neighbor, node);
                frontier.push(CostEntry {
                    cost: tentative + heuristic(graph, neighbor, target),
                    node: neighbor,
                });
            }
        }
    }

    Ok(SearchOutcome::exhausted(visited, expansions))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::dijkstra::dijkstra;
    use crate::graph::{path_distance, Point};

    /// Unit-weight cycle with nodes placed evenly on a circle, so node 2 of
    /// a 5-cycle sits roughly opposite node 0.
    fn placed_cycle(n: u64) -> Graph {
        let mut graph = Graph::new();
        for i in 0..n {
            graph.add_edge(NodeId(i), NodeId((i + 1) % n), Some(1.0));
            let angle = (i as f64) * 2.0 * std::f64::consts::PI / (n as f64);
            graph.set_position(NodeId(i), Point::new(angle.cos(), angle.sin()));
        }
        graph
    }

    #[test]
    fn source_equals_target_is_the_trivial_path() {
        let graph = placed_cycle(5);
        let outcome = astar(&graph, NodeId(1), NodeId(1)).unwrap();

        assert_eq!(outcome.path, vec![NodeId(1)]);
        assert_eq!(outcome.expansions, 0);
    }

    #[test]
    fn five_node_cycle_has_distance_two() {
        let graph = placed_cycle(5);
        let outcome = astar(&graph, NodeId(0), NodeId(2)).unwrap();

        assert_eq!(outcome.path.len(), 3);
        assert!((path_distance(&graph, &outcome.path) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn matches_dijkstra_distance_when_every_node_is_placed() {
        let graph = placed_cycle(9);
        for &target in &[NodeId(3), NodeId(4), NodeId(7)] {
            let guided = astar(&graph, NodeId(0), target).unwrap();
            let optimal = dijkstra(&graph, NodeId(0), target).unwrap();

            let guided_distance = path_distance(&graph, &guided.path);
            let optimal_distance = path_distance(&graph, &optimal.path);
            assert!(
                (guided_distance - optimal_distance).abs() < 1e-9,
                "target {}: A* {} vs Dijkstra {}",
                target,
                guided_distance,
                optimal_distance
            );
        }
    }

    #[test]
    fn degrades_to_uniform_cost_without_positions() {
        let mut graph = Graph::new();
        graph.add_edge(NodeId(1), NodeId(3), Some(10.0));
        graph.add_edge(NodeId(1), NodeId(2), Some(1.0));
        graph.add_edge(NodeId(2), NodeId(3), Some(1.0));

        let guided = astar(&graph, NodeId(1), NodeId(3)).unwrap();
        let optimal = dijkstra(&graph, NodeId(1), NodeId(3)).unwrap();
        assert_eq!(guided.path, optimal.path);
    }

    #[test]
    fn heuristic_prunes_expansions_on_a_grid() {
        // 5x5 unit grid; the goal-directed search should expand no more
        // nodes than the undirected one.
        let side = 5u64;
        let mut graph = Graph::new();
        for y in 0..side {
            for x in 0..side {
                let node = NodeId(y * side + x);
                graph.set_position(node, Point::new(x as f64, y as f64));
                if x + 1 < side {
                    graph.add_edge(node, NodeId(y * side + x + 1), Some(1.0));
                }
                if y + 1 < side {
                    graph.add_edge(node, NodeId((y + 1) * side + x), Some(1.0));
                }
            }
        }

        let source = NodeId(0);
        let target = NodeId(side * side - 1);
        let guided = astar(&graph, source, target).unwrap();
        let optimal = dijkstra(&graph, source, target).unwrap();

        assert!(guided.expansions <= optimal.expansions);
        assert!(
            (path_distance(&graph, &guided.path) - path_distance(&graph, &optimal.path)).abs()
                < 1e-9
        );
    }

    #[test]
    fn disconnected_targets_exhaust_the_component() {
        let mut graph = Graph::new();
        graph.add_edge(NodeId(1), NodeId(2), Some(1.0));
        graph.add_node(NodeId(3));

        let outcome = astar(&graph, NodeId(1), NodeId(3)).unwrap();
        assert!(outcome.path.is_empty());
        let component: HashSet<NodeId> = vec![NodeId(1), NodeId(2)].into_iter().collect();
        assert_eq!(outcome.visited, component);
    }
}

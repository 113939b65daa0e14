//! The weighted undirected graph model consumed by the search algorithms.
//!
//! Graphs are supplied by an external loader and only read here: nodes are
//! opaque identifiers which may carry planar coordinates, and edges carry an
//! optional non-negative weight. Parallel edges between the same pair of
//! nodes are retained, but every weight lookup answers with the first edge
//! recorded for that pair.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

/// Weight assumed for edges which carry no explicit weight attribute.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Opaque node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Planar coordinates attached to a node, used by the A* heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone)]
struct Adjacency {
    to: NodeId,
    /// Parallel edge weights in insertion order. Lookups use the first.
    weights: Vec<Option<f64>>,
}

/// An undirected graph with optionally weighted edges and optionally
/// placed nodes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    order: Vec<NodeId>,
    adjacency: HashMap<NodeId, Vec<Adjacency>>,
    positions: HashMap<NodeId, Point>,
    edges: usize,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Insert a node. Re-inserting an existing node is a no-op.
    pub fn add_node(&mut self, node: NodeId) {
        if !self.adjacency.contains_key(&node) {
            self.adjacency.insert(node, Vec::new());
            self.order.push(node);
        }
    }

    /// Insert an undirected edge, creating the endpoints as needed.
    ///
    /// `weight` is the edge's weight attribute; `None` records an edge with
    /// no attribute, which weight-aware lookups default to
    /// [DEFAULT_EDGE_WEIGHT]. A repeated `(u, v)` pair records a parallel
    /// edge rather than replacing the existing one.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: Option<f64>) {
        self.add_node(u);
        self.add_node(v);
        self.attach(u, v, weight);
        if u != v {
            self.attach(v, u, weight);
        }
        self.edges += 1;
    }

    fn attach(&mut self, from: NodeId, to: NodeId, weight: Option<f64>) {
        let list = self.adjacency.entry(from).or_insert_with(Vec::new);
        match list.iter_mut().find(|adjacent| adjacent.to == to) {
            Some(adjacent) => adjacent.weights.push(weight),
            None => list.push(Adjacency {
                to,
                weights: vec![weight],
            }),
        }
    }

    /// Attach planar coordinates to a node, creating it as needed.
    pub fn set_position(&mut self, node: NodeId, point: Point) {
        self.add_node(node);
        self.positions.insert(node, point);
    }

    pub fn position(&self, node: NodeId) -> Option<Point> {
        self.positions.get(&node).copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    /// Unique neighbors of `node`, in first-insertion order.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flat_map(|list| list.iter().map(|adjacent| adjacent.to))
    }

    /// Weight of the first edge recorded between `u` and `v`, defaulting a
    /// missing weight attribute to [DEFAULT_EDGE_WEIGHT].
    ///
    /// Returns `None` when the nodes are not connected.
    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.first_edge(u, v)
            .map(|weight| weight.unwrap_or(DEFAULT_EDGE_WEIGHT))
    }

    /// Weight attribute of the first edge recorded between `u` and `v`.
    ///
    /// Returns `None` when the nodes are not connected or when the first
    /// edge carries no weight attribute.
    pub fn recorded_weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.first_edge(u, v).and_then(|weight| weight)
    }

    fn first_edge(&self, u: NodeId, v: NodeId) -> Option<Option<f64>> {
        self.adjacency
            .get(&u)?
            .iter()
            .find(|adjacent| adjacent.to == v)
            .and_then(|adjacent| adjacent.weights.first().copied())
    }

    /// Sub-graph over the first `limit` nodes in insertion order, keeping
    /// the edges whose endpoints both survive.
    ///
    /// When `limit` covers the whole graph this is a plain copy.
    pub fn subgraph(&self, limit: usize) -> Graph {
        if limit >= self.node_count() {
            return self.clone();
        }

        let kept: HashSet<NodeId> = self.order.iter().take(limit).copied().collect();
        let mut sub = Graph::new();

        for &node in self.order.iter().take(limit) {
            sub.add_node(node);
            if let Some(point) = self.position(node) {
                sub.set_position(node, point);
            }
        }

        for &node in self.order.iter().take(limit) {
            if let Some(list) = self.adjacency.get(&node) {
                for adjacent in list {
                    // Each undirected edge appears in both adjacency lists;
                    // take it from the smaller endpoint only.
                    if node <= adjacent.to && kept.contains(&adjacent.to) {
                        for &weight in &adjacent.weights {
                            sub.add_edge(node, adjacent.to, weight);
                        }
                    }
                }
            }
        }

        sub
    }
}

/// Total recorded weight along `path`.
///
/// Paths shorter than two nodes have distance 0. Consecutive pairs with no
/// recorded weight contribute 0 rather than failing; callers who care about
/// gaps can probe [Graph::recorded_weight] themselves.
pub fn path_distance(graph: &Graph, path: &[NodeId]) -> f64 {
    if path.len() < 2 {
        return 0.0;
    }

    path.windows(2)
        .filter_map(|pair| graph.recorded_weight(pair[0], pair[1]))
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;

    fn node(id: u64) -> NodeId {
        NodeId(id)
    }

    #[test]
    fn neighbors_are_unique_and_ordered() {
        let mut graph = Graph::new();
        graph.add_edge(node(1), node(2), Some(5.0));
        graph.add_edge(node(1), node(3), Some(1.0));
        graph.add_edge(node(1), node(2), Some(2.0));

        let neighbors: Vec<NodeId> = graph.neighbors(node(1)).collect();
        assert_eq!(neighbors, vec![node(2), node(3)]);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn parallel_edges_resolve_to_the_first() {
        let mut graph = Graph::new();
        graph.add_edge(node(1), node(2), Some(5.0));
        graph.add_edge(node(1), node(2), Some(2.0));

        assert_eq!(graph.edge_weight(node(1), node(2)), Some(5.0));
        assert_eq!(graph.edge_weight(node(2), node(1)), Some(5.0));
    }

    #[test]
    fn missing_weight_attribute_defaults_to_one() {
        let mut graph = Graph::new();
        graph.add_edge(node(1), node(2), None);

        assert_eq!(graph.edge_weight(node(1), node(2)), Some(DEFAULT_EDGE_WEIGHT));
        assert_eq!(graph.recorded_weight(node(1), node(2)), None);
    }

    #[test]
    fn unconnected_nodes_have_no_weight() {
        let mut graph = Graph::new();
        graph.add_node(node(1));
        graph.add_node(node(2));

        assert_eq!(graph.edge_weight(node(1), node(2)), None);
        assert_eq!(graph.recorded_weight(node(1), node(2)), None);
    }

    #[test]
    fn subgraph_takes_an_insertion_order_prefix() {
        let mut graph = Graph::new();
        graph.add_edge(node(1), node(2), Some(1.0));
        graph.add_edge(node(2), node(3), Some(2.0));
        graph.add_edge(node(3), node(4), Some(3.0));
        graph.set_position(node(1), Point::new(0.0, 0.0));

        let sub = graph.subgraph(3);
        assert_eq!(sub.node_count(), 3);
        assert!(sub.contains(node(3)));
        assert!(!sub.contains(node(4)));
        assert_eq!(sub.edge_weight(node(2), node(3)), Some(2.0));
        assert_eq!(sub.edge_weight(node(3), node(4)), None);
        assert_eq!(sub.position(node(1)), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn subgraph_at_full_size_is_a_copy() {
        let mut graph = Graph::new();
        graph.add_edge(node(1), node(2), Some(1.0));

        let sub = graph.subgraph(10);
        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.edge_count(), 1);
    }

    #[test]
    fn distance_of_short_paths_is_zero() {
        let mut graph = Graph::new();
        graph.add_node(node(1));

        assert_eq!(path_distance(&graph, &[]), 0.0);
        assert_eq!(path_distance(&graph, &[node(1)]), 0.0);
    }

    #[test]
    fn distance_sums_recorded_weights() {
        let mut graph = Graph::new();
        graph.add_edge(node(1), node(2), Some(1.5));
        graph.add_edge(node(2), node(3), Some(2.5));

        let distance = path_distance(&graph, &[node(1), node(2), node(3)]);
        assert!((distance - 4.0).abs() < 1e-9);
    }

    #[test]
    fn distance_skips_pairs_without_recorded_weights() {
        let mut graph = Graph::new();
        graph.add_edge(node(1), node(2), Some(1.5));
        graph.add_edge(node(2), node(3), None);
        graph.add_node(node(4));

        // The unweighted edge and the disconnected pair both contribute 0.
        assert_eq!(path_distance(&graph, &[node(1), node(2), node(3)]), 1.5);
        assert_eq!(path_distance(&graph, &[node(3), node(4)]), 0.0);
    }

    #[test]
    fn point_distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-9);
    }
}

//! Shortest-path search algorithms over weighted undirected graphs.
//!
//! Three strategies share one traversal contract: [bfs] minimizes hop
//! count and ignores weights, [dijkstra] minimizes total weight, and
//! [astar] minimizes total weight guided by a Euclidean heuristic over
//! node positions. All three report the nodes they visited and the
//! number of frontier expansions alongside the path, so callers can
//! compare how much work each strategy did.

pub mod algorithm;
mod errors;
pub mod graph;

pub use errors::Result as SearchResult;
pub use errors::SearchError;

pub use graph::path_distance;
pub use graph::Graph;
pub use graph::NodeId;
pub use graph::Point;
pub use graph::DEFAULT_EDGE_WEIGHT;

pub use algorithm::astar::astar;
pub use algorithm::bfs::bfs;
pub use algorithm::dijkstra::dijkstra;
pub use algorithm::Algorithm;
pub use algorithm::SearchOutcome;

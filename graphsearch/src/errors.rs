use thiserror::Error;

use crate::graph::NodeId;

/// Error produced when a search cannot run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    #[error("Node {0} is not in the graph")]
    MissingNode(NodeId),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Result when a search method might fail.
pub type Result<T> = std::result::Result<T, SearchError>;

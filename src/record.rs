//! Flat value records produced by the experiment runner.

use graphsearch::NodeId;
use serde::Serialize;

/// Everything measured for one `(graph, source, target, algorithm)` run.
///
/// Records are immutable once produced and flat enough for tabular
/// serialization; reporting collaborators consume them as-is. `algorithm`
/// holds the identifier as requested, so a record produced for an
/// unsupported name still says which name failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentRecord {
    pub algorithm: String,
    pub source: NodeId,
    pub target: NodeId,
    /// Wall-clock seconds for the algorithm call.
    pub cpu_time: f64,
    /// Peak sampled process memory in megabytes; 0 when the call returned
    /// before the first sample.
    pub memory_mb: f64,
    pub nodes_expanded: usize,
    /// Node count of the returned path, 0 when no path was found.
    pub path_length: usize,
    /// Sum of recorded edge weights along the path.
    pub path_distance: f64,
    pub visited_nodes: usize,
    /// True iff the path is non-empty and its endpoints match the request.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExperimentRecord {
    /// Zero-filled failure record for a run that produced no metrics.
    pub fn failure(
        algorithm: impl Into<String>,
        source: NodeId,
        target: NodeId,
        error: impl ToString,
    ) -> Self {
        ExperimentRecord {
            algorithm: algorithm.into(),
            source,
            target,
            cpu_time: 0.0,
            memory_mb: 0.0,
            nodes_expanded: 0,
            path_length: 0,
            path_distance: 0.0,
            visited_nodes: 0,
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// An experiment record tagged with the sub-graph size it ran under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalabilitySample {
    pub graph_size: usize,
    #[serde(flatten)]
    pub record: ExperimentRecord,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn failure_records_zero_their_metrics() {
        let record = ExperimentRecord::failure("BFS", NodeId(1), NodeId(2), "boom");

        assert_eq!(record.algorithm, "BFS");
        assert_eq!(record.cpu_time, 0.0);
        assert_eq!(record.nodes_expanded, 0);
        assert!(!record.success);
        assert_eq!(record.error.as_deref(), Some("boom"));
    }
}

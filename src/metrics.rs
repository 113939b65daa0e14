//! Aggregate metrics over batches of experiment records.

use serde::Serialize;
use thiserror::Error;

use crate::record::ExperimentRecord;

/// Error produced when a batch cannot be aggregated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricsError {
    #[error("Cannot average an empty batch of records")]
    EmptyBatch,
}

/// Percentage by which `candidate` exceeds the weight-optimal distance.
///
/// An optimal distance of 0 yields 0 rather than dividing by zero.
pub fn suboptimality(optimal: f64, candidate: f64) -> f64 {
    if optimal == 0.0 {
        return 0.0;
    }
    (candidate - optimal) / optimal * 100.0
}

/// Arithmetic means of the numeric record fields across a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub cpu_time: f64,
    pub memory_mb: f64,
    pub nodes_expanded: f64,
    pub path_length: f64,
    pub path_distance: f64,
    pub visited_nodes: f64,
    /// Fraction of records with `success == true`.
    pub success_rate: f64,
}

/// Average every numeric field of `records`.
///
/// The batch must be non-empty; averaging zero records fails loudly
/// instead of returning a zero-filled summary.
pub fn average(records: &[ExperimentRecord]) -> Result<MetricsSummary, MetricsError> {
    if records.is_empty() {
        return Err(MetricsError::EmptyBatch);
    }

    let mut summary = MetricsSummary {
        cpu_time: 0.0,
        memory_mb: 0.0,
        nodes_expanded: 0.0,
        path_length: 0.0,
        path_distance: 0.0,
        visited_nodes: 0.0,
        success_rate: 0.0,
    };

    for record in records {
        summary.cpu_time += record.cpu_time;
        summary.memory_mb += record.memory_mb;
        summary.nodes_expanded += record.nodes_expanded as f64;
        summary.path_length += record.path_length as f64;
        summary.path_distance += record.path_distance;
        summary.visited_nodes += record.visited_nodes as f64;
        if record.success {
            summary.success_rate += 1.0;
        }
    }

    let n = records.len() as f64;
    summary.cpu_time /= n;
    summary.memory_mb /= n;
    summary.nodes_expanded /= n;
    summary.path_length /= n;
    summary.path_distance /= n;
    summary.visited_nodes /= n;
    summary.success_rate /= n;

    Ok(summary)
}

#[cfg(test)]
mod test {
    use super::*;
    use graphsearch::NodeId;

    fn record(cpu: f64, expanded: usize, distance: f64, success: bool) -> ExperimentRecord {
        ExperimentRecord {
            algorithm: "DIJKSTRA".to_string(),
            source: NodeId(1),
            target: NodeId(2),
            cpu_time: cpu,
            memory_mb: 10.0,
            nodes_expanded: expanded,
            path_length: 3,
            path_distance: distance,
            visited_nodes: 4,
            success,
            error: None,
        }
    }

    #[test]
    fn suboptimality_of_zero_optimal_is_zero() {
        assert_eq!(suboptimality(0.0, 42.0), 0.0);
    }

    #[test]
    fn suboptimality_is_a_relative_percentage() {
        assert!((suboptimality(10.0, 12.5) - 25.0).abs() < 1e-9);
        assert_eq!(suboptimality(10.0, 10.0), 0.0);
    }

    #[test]
    fn averaging_nothing_is_an_error() {
        assert_eq!(average(&[]).unwrap_err(), MetricsError::EmptyBatch);
    }

    #[test]
    fn averages_every_numeric_field() {
        let records = vec![
            record(1.0, 10, 4.0, true),
            record(3.0, 30, 8.0, false),
        ];

        let summary = average(&records).unwrap();
        assert!((summary.cpu_time - 2.0).abs() < 1e-9);
        assert!((summary.nodes_expanded - 20.0).abs() < 1e-9);
        assert!((summary.path_distance - 6.0).abs() < 1e-9);
        assert!((summary.memory_mb - 10.0).abs() < 1e-9);
        assert!((summary.success_rate - 0.5).abs() < 1e-9);
    }
}

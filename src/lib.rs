//! Benchmark harness comparing shortest-path search strategies.
//!
//! Wraps each algorithm from the `graphsearch` crate in wall-clock timing
//! and periodic process-memory sampling, normalizes every run into a flat
//! [ExperimentRecord], and aggregates batches of records for comparative
//! analysis. A failure in one run never aborts the rest of a batch.

pub mod metrics;
pub mod record;
pub mod runner;

pub use metrics::average;
pub use metrics::suboptimality;
pub use metrics::MetricsError;
pub use metrics::MetricsSummary;

pub use record::ExperimentRecord;
pub use record::ScalabilitySample;

pub use runner::Runner;
pub use runner::RunnerConfig;
pub use runner::RunnerError;

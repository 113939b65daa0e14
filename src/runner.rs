//! Instrumented execution of search algorithms over a shared graph.
//!
//! The runner executes exactly one algorithm at a time: batches are
//! strictly sequential so that peak-memory attribution stays unambiguous.
//! While an algorithm runs on the caller's thread, a sampler thread polls
//! the process RSS and is torn down the moment the call returns.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, warn};

use graphsearch::{path_distance, Algorithm, Graph, NodeId, SearchError, SearchOutcome};

use crate::record::{ExperimentRecord, ScalabilitySample};

mod memory;

use memory::MemorySampler;

/// Default memory sampling period.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

/// Default upper bound on a single algorithm call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Attempts at drawing a target distinct from the source before giving up
/// and keeping whatever was drawn.
const ENDPOINT_RETRIES: usize = 16;

/// Error produced when a single instrumented run fails.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("Search exceeded the time limit of {0:?}")]
    TimeLimitExhausted(Duration),
}

/// The externally tunable parameters of the harness.
///
/// Everything else — the graph, the endpoints, the algorithms to run — is
/// passed explicitly into each call; the runner keeps no process-wide
/// state.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Memory sampling period.
    pub sample_interval: Duration,
    /// Upper bound on a single algorithm call; a run observed to exceed it
    /// fails with [RunnerError::TimeLimitExhausted].
    pub timeout: Duration,
    /// Seed for endpoint selection in scalability sweeps. Unset means
    /// entropy-seeded, which is the default.
    pub seed: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            seed: None,
        }
    }
}

/// Runs search algorithms one at a time under timing and memory
/// instrumentation, normalizing every outcome into an [ExperimentRecord].
#[derive(Debug)]
pub struct Runner {
    config: RunnerConfig,
    rng: StdRng,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Runner { config, rng }
    }

    /// Run one algorithm once, instrumented.
    ///
    /// Wall-clock time is measured around the call on the caller's thread;
    /// the memory sampler runs concurrently for exactly the duration of the
    /// call. Errors out of the algorithm, and runs past the configured
    /// timeout, are fatal for this record only — batch entry points
    /// downgrade them to failure records.
    pub fn run_single(
        &self,
        graph: &Graph,
        source: NodeId,
        target: NodeId,
        algorithm: Algorithm,
    ) -> Result<ExperimentRecord, RunnerError> {
        debug!(%algorithm, %source, %target, "starting instrumented run");

        let sampler = MemorySampler::new(self.config.sample_interval, self.config.timeout);
        let stop = AtomicBool::new(false);

        let (outcome, elapsed, memory_mb) = thread::scope(|scope| {
            let handle = scope.spawn(|| sampler.sample(&stop));

            let started = Instant::now();
            let outcome = algorithm.run(graph, source, target);
            let elapsed = started.elapsed();

            stop.store(true, Ordering::Relaxed);
            let memory_mb = handle.join().unwrap_or_else(|_| {
                warn!("memory sampler thread panicked; memory will read 0");
                0.0
            });

            (outcome, elapsed, memory_mb)
        });

        if elapsed > self.config.timeout {
            return Err(RunnerError::TimeLimitExhausted(self.config.timeout));
        }

        let outcome = outcome?;
        debug!(
            %algorithm,
            expansions = outcome.expansions,
            elapsed_s = elapsed.as_secs_f64(),
            "run finished"
        );

        Ok(self.record(graph, source, target, algorithm, outcome, elapsed, memory_mb))
    }

    fn record(
        &self,
        graph: &Graph,
        source: NodeId,
        target: NodeId,
        algorithm: Algorithm,
        outcome: SearchOutcome,
        elapsed: Duration,
        memory_mb: f64,
    ) -> ExperimentRecord {
        let SearchOutcome {
            path,
            visited,
            expansions,
        } = outcome;

        let distance = path_distance(graph, &path);
        let gaps = path
            .windows(2)
            .filter(|pair| graph.recorded_weight(pair[0], pair[1]).is_none())
            .count();
        if gaps > 0 {
            warn!(
                %algorithm,
                gaps,
                "path contains segments without a recorded weight; they contribute 0 to the distance"
            );
        }

        let success = path.first() == Some(&source) && path.last() == Some(&target);

        ExperimentRecord {
            algorithm: algorithm.name().to_string(),
            source,
            target,
            cpu_time: elapsed.as_secs_f64(),
            memory_mb,
            nodes_expanded: expansions,
            path_length: path.len(),
            path_distance: distance,
            visited_nodes: visited.len(),
            success,
            error: None,
        }
    }

    /// Run each named algorithm in order, isolating failures.
    ///
    /// An unrecognized identifier, or any error from the single-run
    /// contract, becomes a zero-filled failure record; the rest of the
    /// batch still runs.
    pub fn run_comparison<S: AsRef<str>>(
        &self,
        graph: &Graph,
        source: NodeId,
        target: NodeId,
        algorithms: &[S],
    ) -> Vec<ExperimentRecord> {
        algorithms
            .iter()
            .map(|name| {
                let name = name.as_ref();
                match Algorithm::from_str(name) {
                    Ok(algorithm) => self
                        .run_single(graph, source, target, algorithm)
                        .unwrap_or_else(|err| {
                            warn!(algorithm = name, %err, "run failed");
                            ExperimentRecord::failure(algorithm.name(), source, target, err)
                        }),
                    Err(err) => {
                        warn!(algorithm = name, %err, "unsupported algorithm requested");
                        ExperimentRecord::failure(name, source, target, err)
                    }
                }
            })
            .collect()
    }

    /// Sweep one algorithm across prefix sub-graphs of the given sizes.
    ///
    /// Sizes beyond the graph, and sub-graphs with fewer than two nodes,
    /// are skipped. Endpoints are drawn uniformly at random from each
    /// sub-graph; failures become failure records tagged with the size and
    /// sibling sizes continue.
    pub fn run_scalability(
        &mut self,
        graph: &Graph,
        sizes: &[usize],
        algorithm: Algorithm,
    ) -> Vec<ScalabilitySample> {
        let mut samples = Vec::new();

        for &size in sizes {
            if size > graph.node_count() {
                warn!(size, nodes = graph.node_count(), "size exceeds the graph; skipping");
                continue;
            }

            let subgraph = graph.subgraph(size);
            if subgraph.node_count() < 2 {
                warn!(size, "sub-graph too small to pick two endpoints; skipping");
                continue;
            }

            let (source, target) = self.pick_endpoints(&subgraph);
            let record = self
                .run_single(&subgraph, source, target, algorithm)
                .unwrap_or_else(|err| {
                    warn!(size, %err, "scalability run failed");
                    ExperimentRecord::failure(algorithm.name(), source, target, err)
                });

            samples.push(ScalabilitySample {
                graph_size: size,
                record,
            });
        }

        samples
    }

    /// Two nodes drawn uniformly at random, distinct when a bounded number
    /// of retries allows.
    fn pick_endpoints(&mut self, graph: &Graph) -> (NodeId, NodeId) {
        let nodes: Vec<NodeId> = graph.nodes().collect();
        let source = nodes[self.rng.gen_range(0..nodes.len())];
        let mut target = nodes[self.rng.gen_range(0..nodes.len())];

        for _ in 0..ENDPOINT_RETRIES {
            if target != source {
                break;
            }
            target = nodes[self.rng.gen_range(0..nodes.len())];
        }

        (source, target)
    }
}

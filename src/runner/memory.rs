//! Periodic process-memory sampling alongside a running search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use sysinfo::{Pid, System};
use tracing::warn;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Polls the current process RSS at a fixed interval, keeping the peak.
///
/// The sampler carries no state between calls; each call to [sample]
/// observes exactly one algorithm run.
#[derive(Debug)]
pub(crate) struct MemorySampler {
    interval: Duration,
    timeout: Duration,
}

impl MemorySampler {
    pub(crate) fn new(interval: Duration, timeout: Duration) -> Self {
        MemorySampler { interval, timeout }
    }

    /// Sample until `stop` is set or the timeout passes.
    ///
    /// Returns the peak sample in megabytes, or 0 when the run finished
    /// before anything was captured.
    pub(crate) fn sample(&self, stop: &AtomicBool) -> f64 {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(err) => {
                warn!(error = err, "cannot resolve the current pid; memory will read 0");
                return 0.0;
            }
        };

        let mut system = System::new();
        let mut peak: f64 = 0.0;
        let started = Instant::now();

        while !stop.load(Ordering::Relaxed) && started.elapsed() < self.timeout {
            if let Some(sample) = Self::rss_mb(&mut system, pid) {
                peak = peak.max(sample);
            }
            thread::sleep(self.interval);
        }

        peak
    }

    fn rss_mb(system: &mut System, pid: Pid) -> Option<f64> {
        if !system.refresh_process(pid) {
            return None;
        }
        system
            .process(pid)
            .map(|process| process.memory() as f64 / BYTES_PER_MB)
    }
}

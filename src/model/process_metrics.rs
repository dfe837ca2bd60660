use serde::{Deserialize, Serialize};

/// Cumulative resource counters for one process, read once per cycle.
///
/// All counters are monotonic non-decreasing for a live process; a CPU time
/// that went backwards between two samples of the same pid means the pid was
/// reused by a new process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub cpu_seconds: f64,
    pub wakeups: u64,
    pub disk_read_bytes: u64,
    pub disk_write_bytes: u64,
}

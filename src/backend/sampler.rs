use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use once_cell::sync::Lazy;

use crate::model::{Pid, ProcessMetrics};
use crate::util::PropertyBag;

/// Read-only view of the OS process layer.
///
/// `responsible_pid` is the narrow seam for the platform's notion of which
/// process answers for a helper's resource usage; it may be absent or point
/// back at the pid itself, and callers must tolerate both.
pub trait ProcessDataSource {
    fn pids(&self) -> Vec<Pid>;
    fn metrics(&self, pid: Pid) -> Option<ProcessMetrics>;
    fn executable_path(&self, pid: Pid) -> Option<PathBuf>;
    fn responsible_pid(&self, pid: Pid) -> Option<Pid>;

    /// One pass over every live process. Processes that exit or refuse reads
    /// mid-enumeration are silently omitted; partial results are normal.
    fn sample(&self) -> HashMap<Pid, ProcessMetrics> {
        let mut samples = HashMap::new();
        for pid in self.pids() {
            if let Some(metrics) = self.metrics(pid) {
                samples.insert(pid, metrics);
            }
        }
        samples
    }
}

static CLK_TCK: Lazy<f64> = Lazy::new(|| {
    let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if ticks > 0 {
        ticks as f64
    } else {
        100.0
    }
});

/// `/proc`-backed process sampler.
pub struct ProcSampler {
    proc_root: PathBuf,
}

impl ProcSampler {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    /// Sampler rooted at an alternate proc mount, e.g. a host `/proc`
    /// bind-mounted into a container, or a fixture tree in tests.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: root.into(),
        }
    }

    fn pid_dir(&self, pid: Pid) -> PathBuf {
        self.proc_root.join(pid.to_string())
    }
}

impl ProcessDataSource for ProcSampler {
    fn pids(&self) -> Vec<Pid> {
        let entries = match fs::read_dir(&self.proc_root) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        entries
            .flatten()
            .filter_map(|entry| entry.file_name().to_string_lossy().parse().ok())
            .collect()
    }

    fn metrics(&self, pid: Pid) -> Option<ProcessMetrics> {
        let dir = self.pid_dir(pid);
        let stat = fs::read_to_string(dir.join("stat")).ok()?;
        let fields = stat_fields(&stat)?;

        let utime: u64 = fields[11].parse().ok()?;
        let stime: u64 = fields[12].parse().ok()?;
        let cpu_seconds = (utime + stime) as f64 / *CLK_TCK;

        // Only stat is load-bearing. status and io are often unreadable for
        // other users' processes; their counters then read as zero.
        let status =
            PropertyBag::parse(&fs::read_to_string(dir.join("status")).unwrap_or_default());
        // Voluntary context switches stand in for the idle-wakeup count.
        let wakeups = status.u64("voluntary_ctxt_switches").unwrap_or(0);

        let io = PropertyBag::parse(&fs::read_to_string(dir.join("io")).unwrap_or_default());
        let disk_read_bytes = io.u64("read_bytes").unwrap_or(0);
        let disk_write_bytes = io.u64("write_bytes").unwrap_or(0);

        Some(ProcessMetrics {
            cpu_seconds,
            wakeups,
            disk_read_bytes,
            disk_write_bytes,
        })
    }

    fn executable_path(&self, pid: Pid) -> Option<PathBuf> {
        fs::read_link(self.pid_dir(pid).join("exe")).ok()
    }

    fn responsible_pid(&self, pid: Pid) -> Option<Pid> {
        let stat = fs::read_to_string(self.pid_dir(pid).join("stat")).ok()?;
        let ppid: Pid = stat_fields(&stat)?[1].parse().ok()?;
        // Processes reparented to init have no user-facing owner.
        (ppid > 1).then_some(ppid)
    }
}

/// Fields of `/proc/<pid>/stat` after the comm field, which may itself
/// contain spaces and parentheses.
fn stat_fields(stat: &str) -> Option<Vec<&str>> {
    let comm_end = stat.rfind(')')?;
    let rest = stat.get(comm_end + 2..)?;
    let fields: Vec<&str> = rest.split_whitespace().collect();
    if fields.len() < 15 {
        return None;
    }
    Some(fields)
}

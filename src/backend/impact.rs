use std::collections::HashMap;

use crate::model::{Pid, ProcessMetrics};

// Unitless heuristic weights; disk bytes weigh far below cpu percent and
// wakeup rate. Tuned empirically, not derived.
const CPU_WEIGHT: f64 = 1.0;
const WAKEUP_WEIGHT: f64 = 0.02;
const DISK_WEIGHT: f64 = 1.0e-7;

/// Scores below this are noise and not worth an attribution lookup.
const MIN_PROCESS_IMPACT: f64 = 0.5;

/// Instantaneous energy impact of one process over `dt` seconds.
///
/// A negative CPU delta means the pid was reused since the previous sample;
/// the whole sample is invalid and scores exactly zero. Wakeup and disk
/// counters may wrap or reset, so their deltas clamp at zero instead.
pub(crate) fn energy_impact(current: &ProcessMetrics, previous: &ProcessMetrics, dt: f64) -> f64 {
    let cpu_delta = current.cpu_seconds - previous.cpu_seconds;
    if cpu_delta < 0.0 {
        return 0.0;
    }

    let cpu_percent = (cpu_delta / dt) * 100.0;

    let wakeups_delta = current.wakeups.saturating_sub(previous.wakeups) as f64;
    let disk_delta = current.disk_read_bytes.saturating_sub(previous.disk_read_bytes) as f64
        + current
            .disk_write_bytes
            .saturating_sub(previous.disk_write_bytes) as f64;

    cpu_percent * CPU_WEIGHT
        + (wakeups_delta / dt) * WAKEUP_WEIGHT
        + (disk_delta / dt) * DISK_WEIGHT
}

/// Per-pid impact scores for every pid present in both sample sets, with
/// scores under the noise floor already dropped.
pub fn impact_scores(
    current: &HashMap<Pid, ProcessMetrics>,
    previous: &HashMap<Pid, ProcessMetrics>,
    dt: f64,
) -> HashMap<Pid, f64> {
    let mut scores = HashMap::new();
    for (pid, cur) in current {
        let prev = match previous.get(pid) {
            Some(p) => p,
            None => continue,
        };
        let impact = energy_impact(cur, prev, dt);
        if impact >= MIN_PROCESS_IMPACT {
            scores.insert(*pid, impact);
        }
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn metrics(cpu: f64, wakeups: u64, read: u64, write: u64) -> ProcessMetrics {
        ProcessMetrics {
            cpu_seconds: cpu,
            wakeups,
            disk_read_bytes: read,
            disk_write_bytes: write,
        }
    }

    #[test]
    fn full_core_for_two_seconds_scores_one_hundred() {
        let prev = metrics(10.0, 0, 0, 0);
        let cur = metrics(12.0, 0, 0, 0);
        assert_relative_eq!(energy_impact(&cur, &prev, 2.0), 100.0);
    }

    #[test]
    fn negative_cpu_delta_scores_exactly_zero() {
        // Pid reuse: the new process has less cumulative CPU time than the
        // old one, and also happens to show wakeup and disk activity.
        let prev = metrics(500.0, 90_000, 4_000_000, 4_000_000);
        let cur = metrics(3.0, 100_000, 9_000_000, 9_000_000);
        assert_eq!(energy_impact(&cur, &prev, 2.0), 0.0);
    }

    #[test]
    fn wakeup_and_disk_counter_resets_clamp_to_zero() {
        let prev = metrics(10.0, 5_000, 8_000_000, 8_000_000);
        let cur = metrics(10.0, 100, 200, 300);
        assert_eq!(energy_impact(&cur, &prev, 2.0), 0.0);
    }

    #[test]
    fn impact_is_monotonic_in_each_delta() {
        let prev = metrics(10.0, 1_000, 1_000, 1_000);
        let dt = 2.0;

        let base = energy_impact(&metrics(10.5, 1_100, 2_000, 2_000), &prev, dt);
        let more_cpu = energy_impact(&metrics(11.0, 1_100, 2_000, 2_000), &prev, dt);
        let more_wakeups = energy_impact(&metrics(10.5, 1_500, 2_000, 2_000), &prev, dt);
        let more_disk = energy_impact(&metrics(10.5, 1_100, 9_000_000, 2_000), &prev, dt);

        assert!(more_cpu > base);
        assert!(more_wakeups > base);
        assert!(more_disk > base);
    }

    #[test]
    fn weights_combine_cpu_wakeups_and_disk() {
        let prev = metrics(10.0, 1_000, 0, 0);
        let cur = metrics(11.0, 1_200, 10_000_000, 10_000_000);
        // 50 cpu percent + 100 wakeups/s * 0.02 + 1e7 bytes/s * 1e-7
        assert_relative_eq!(
            energy_impact(&cur, &prev, 2.0),
            50.0 + 2.0 + 1.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn scores_cover_only_pids_present_in_both_samples() {
        let mut previous = HashMap::new();
        previous.insert(1, metrics(10.0, 0, 0, 0));
        previous.insert(2, metrics(10.0, 0, 0, 0));

        let mut current = HashMap::new();
        current.insert(1, metrics(12.0, 0, 0, 0));
        current.insert(3, metrics(50.0, 0, 0, 0));

        let scores = impact_scores(&current, &previous, 2.0);
        assert_eq!(scores.len(), 1);
        assert!(scores.contains_key(&1));
    }

    #[test]
    fn scores_below_the_noise_floor_are_dropped() {
        let mut previous = HashMap::new();
        previous.insert(1, metrics(10.0, 0, 0, 0));

        // 0.004 cpu seconds over 2s is 0.2 percent, well under the floor.
        let mut current = HashMap::new();
        current.insert(1, metrics(10.004, 0, 0, 0));

        assert!(impact_scores(&current, &previous, 2.0).is_empty());
    }
}

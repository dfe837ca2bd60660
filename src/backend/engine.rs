use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use crate::backend::attribution;
use crate::backend::impact;
use crate::backend::sampler::ProcessDataSource;
use crate::backend::state::StateTracker;
use crate::model::{Pid, ProcessMetrics, RunningApp, SignificantEnergyApp};

/// Bundle id prefixes of system UI surfaces that are never tracked.
const IGNORED_BUNDLE_ID_PREFIXES: &[&str] = &[
    "com.apple.preference",
    "com.apple.systempreferences",
    "com.apple.controlcenter",
    "com.apple.notificationcenterui",
];

/// Cycles an application must have been observed before it may be reported,
/// so the first few noisy samples cannot produce a verdict.
const MIN_SAMPLES_TO_REPORT: u32 = 50;

/// Significant-energy attribution engine.
///
/// One instance owns the previous sample set and the per-application energy
/// state; nothing is shared or persisted. A cycle runs the full pipeline to
/// completion through `&mut self`, so cycles on one engine cannot overlap
/// unless the caller opts into shared mutability.
pub struct EnergyEngine<S> {
    source: S,
    own_bundle_id: String,
    previous: HashMap<Pid, ProcessMetrics>,
    previous_at: Option<f64>,
    tracker: StateTracker,
    started: Instant,
}

impl<S: ProcessDataSource> EnergyEngine<S> {
    /// `own_bundle_id` is the host application's bundle identifier; it is
    /// always excluded from results.
    pub fn new(source: S, own_bundle_id: impl Into<String>) -> Self {
        Self {
            source,
            own_bundle_id: own_bundle_id.into(),
            previous: HashMap::new(),
            previous_at: None,
            tracker: StateTracker::new(),
            started: Instant::now(),
        }
    }

    /// Run one full cycle against the current registry snapshot.
    pub fn cycle(&mut self, registry: &[RunningApp]) -> Vec<SignificantEnergyApp> {
        self.cycle_at(self.started.elapsed().as_secs_f64(), registry)
    }

    /// Deterministic cycle entry point. `now_secs` is a reading of any
    /// monotonic clock shared by consecutive calls; `cycle` feeds it the
    /// engine's own clock, while replay harnesses and tests pass their own
    /// timestamps.
    pub fn cycle_at(
        &mut self,
        now_secs: f64,
        registry: &[RunningApp],
    ) -> Vec<SignificantEnergyApp> {
        let running: Vec<&RunningApp> = registry
            .iter()
            .filter(|app| !is_ignored(&app.bundle_id))
            .collect();
        let apps_by_path: HashMap<&Path, &RunningApp> = running
            .iter()
            .map(|app| (app.bundle_path.as_path(), *app))
            .collect();

        let current = self.source.sample();

        let energy_by_bundle = match self.previous_at {
            Some(previous_at) if now_secs > previous_at => {
                self.attribute_impacts(now_secs - previous_at, &current, &apps_by_path)
            }
            _ => {
                // First cycle after startup, or a non-advancing clock:
                // baseline only.
                log::debug!("baseline cycle, skipping impact computation");
                HashMap::new()
            }
        };

        self.previous = current;
        self.previous_at = Some(now_secs);

        self.tracker.update(&running, &energy_by_bundle);

        let results = self.build_results(&running);
        log::debug!(
            "cycle done: {} processes, {} running apps, {} significant",
            self.previous.len(),
            running.len(),
            results.len()
        );
        results
    }

    fn attribute_impacts(
        &self,
        dt: f64,
        current: &HashMap<Pid, ProcessMetrics>,
        apps_by_path: &HashMap<&Path, &RunningApp>,
    ) -> HashMap<String, f64> {
        let scores = impact::impact_scores(current, &self.previous, dt);

        let mut energy_by_bundle: HashMap<String, f64> = HashMap::new();
        for (pid, score) in scores {
            match attribution::resolve_bundle_id(&self.source, pid, apps_by_path) {
                Some(bundle_id) => *energy_by_bundle.entry(bundle_id).or_insert(0.0) += score,
                // Background processes with no owning app are invisible here.
                None => continue,
            }
        }
        energy_by_bundle
    }

    fn build_results(&self, running: &[&RunningApp]) -> Vec<SignificantEnergyApp> {
        let mut results = Vec::new();
        for app in running {
            if app.bundle_id == self.own_bundle_id {
                continue;
            }
            let state = match self.tracker.get(&app.bundle_id) {
                Some(state) => state,
                None => continue,
            };
            if state.samples < MIN_SAMPLES_TO_REPORT || !state.significant {
                continue;
            }
            results.push(SignificantEnergyApp {
                pid: app.pid,
                name: app.name.clone(),
                bundle_id: app.bundle_id.clone(),
                bundle_path: app.bundle_path.clone(),
                energy_impact: state.ema,
            });
        }

        // Stable sort keeps registry order for equal impacts.
        results.sort_by(|a, b| {
            b.energy_impact
                .partial_cmp(&a.energy_impact)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results
    }
}

fn is_ignored(bundle_id: &str) -> bool {
    IGNORED_BUNDLE_ID_PREFIXES
        .iter()
        .any(|prefix| bundle_id.starts_with(prefix))
}

use std::collections::{HashMap, HashSet};

use crate::model::RunningApp;

const ALPHA: f64 = 0.05;
const APPEAR_THRESHOLD: f64 = 1.5;
const DISAPPEAR_THRESHOLD: f64 = 1.0;

/// Smoothed per-application energy state.
#[derive(Debug, Clone)]
pub(crate) struct EnergyState {
    pub ema: f64,
    /// Cycles this bundle id has been continuously running. Resets by state
    /// deletion when the app disappears, not by decrement.
    pub samples: u32,
    pub significant: bool,
}

/// One `EnergyState` per running bundle id, carried across cycles.
#[derive(Debug, Default)]
pub(crate) struct StateTracker {
    by_bundle: HashMap<String, EnergyState>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            by_bundle: HashMap::new(),
        }
    }

    /// Fold this cycle's raw impact sums into the per-app state, then drop
    /// state for bundle ids that are no longer running.
    ///
    /// The appear threshold sits above the disappear threshold, so an app
    /// hovering between the two keeps whatever significance it already has
    /// instead of toggling every cycle.
    pub fn update(&mut self, running: &[&RunningApp], energy_by_bundle: &HashMap<String, f64>) {
        for app in running {
            let raw = energy_by_bundle
                .get(&app.bundle_id)
                .copied()
                .unwrap_or(0.0);

            let state = self
                .by_bundle
                .entry(app.bundle_id.clone())
                .or_insert(EnergyState {
                    ema: raw,
                    samples: 0,
                    significant: false,
                });

            state.ema = ALPHA * raw + (1.0 - ALPHA) * state.ema;
            state.samples += 1;
            state.significant = if state.significant {
                state.ema >= DISAPPEAR_THRESHOLD
            } else {
                state.ema >= APPEAR_THRESHOLD
            };
        }

        let keep: HashSet<&str> = running.iter().map(|app| app.bundle_id.as_str()).collect();
        self.by_bundle.retain(|bundle_id, _| keep.contains(bundle_id.as_str()));
    }

    pub fn get(&self, bundle_id: &str) -> Option<&EnergyState> {
        self.by_bundle.get(bundle_id)
    }
}

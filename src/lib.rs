//! Per-application energy attribution.
//!
//! Once per polling cycle the engine samples every running process, scores
//! each one's instantaneous energy impact from resource-counter deltas,
//! attributes the score to the user-facing application that owns the
//! process, and reports the applications whose smoothed impact has stayed
//! high enough for long enough to count as "using significant energy."

mod backend;
mod model;
mod util;

pub use backend::{impact_scores, EnergyEngine, ProcSampler, ProcessDataSource};
pub use model::{Pid, ProcessMetrics, RunningApp, SignificantEnergyApp};

use serde::Serialize;
use std::path::PathBuf;

use super::Pid;

/// An application currently flagged as using significant energy.
///
/// Built fresh each cycle; the bundle id is the only identity that carries
/// across cycles.
#[derive(Debug, Clone, Serialize)]
pub struct SignificantEnergyApp {
    pub pid: Pid,
    pub name: String,
    pub bundle_id: String,
    pub bundle_path: PathBuf,
    /// Smoothed energy impact at the end of the cycle that produced this
    /// record.
    pub energy_impact: f64,
}

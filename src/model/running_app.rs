use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::Pid;

/// One running user-facing application, as reported by the application
/// registry collaborator for the current cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunningApp {
    pub pid: Pid,
    pub bundle_id: String,
    pub name: String,
    pub bundle_path: PathBuf,
}

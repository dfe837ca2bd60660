use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::backend::sampler::ProcessDataSource;
use crate::model::{Pid, RunningApp};

/// Directory suffix that marks an application bundle root.
const BUNDLE_SUFFIX: &str = ".app";

/// Map a process to the bundle id of the running application that owns it.
///
/// Direct match first: the outermost bundle ancestor of the executable path,
/// looked up in the registry snapshot. Helpers living outside any bundle get
/// one hop through the responsible pid and a second lookup. Anything still
/// unmatched stays unattributed and its impact is dropped by the caller.
pub(crate) fn resolve_bundle_id<S: ProcessDataSource>(
    source: &S,
    pid: Pid,
    apps_by_path: &HashMap<&Path, &RunningApp>,
) -> Option<String> {
    if let Some(bundle_id) = bundle_id_for_pid(source, pid, apps_by_path) {
        return Some(bundle_id);
    }

    let responsible = source.responsible_pid(pid)?;
    if responsible == pid {
        return None;
    }
    bundle_id_for_pid(source, responsible, apps_by_path)
}

fn bundle_id_for_pid<S: ProcessDataSource>(
    source: &S,
    pid: Pid,
    apps_by_path: &HashMap<&Path, &RunningApp>,
) -> Option<String> {
    let exe = source.executable_path(pid)?;
    let bundle = bundle_root(&exe)?;
    apps_by_path
        .get(bundle.as_path())
        .map(|app| app.bundle_id.clone())
}

/// Outermost ancestor whose path component carries the bundle suffix, so
/// executables inside nested helper bundles resolve to the enclosing
/// application.
fn bundle_root(exe_path: &Path) -> Option<PathBuf> {
    let mut root = PathBuf::new();
    for component in exe_path.components() {
        root.push(component);
        if let Component::Normal(name) = component {
            if name.to_string_lossy().ends_with(BUNDLE_SUFFIX) {
                return Some(root);
            }
        }
    }
    None
}

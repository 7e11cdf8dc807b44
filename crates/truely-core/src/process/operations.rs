use tracing::debug;

use crate::process::errors::ProcessError;
use crate::process::table::ProcessTable;
use crate::process::types::{PATH_CAPACITY, Pid, RawProcess, truncate_to_capacity};

/// Snapshot the live process table, dropping kernel and idle slots (pid <= 0).
pub fn enumerate(table: &dyn ProcessTable) -> Result<Vec<RawProcess>, ProcessError> {
    debug!(
        event = "core.process.enumerate_started",
        backend = table.backend_name()
    );

    let raw = table.snapshot()?;
    let total = raw.len();
    let live: Vec<RawProcess> = raw.into_iter().filter(|p| p.pid > 0).collect();

    debug!(
        event = "core.process.enumerate_completed",
        backend = table.backend_name(),
        total = total,
        filtered = total - live.len(),
        count = live.len()
    );

    Ok(live)
}

/// Resolve the process name. A process without a name is treated as not found.
pub fn resolve_name(table: &dyn ProcessTable, pid: i32) -> Result<String, ProcessError> {
    let pid = Pid::new(pid)?;
    let name = table.name(pid)?;
    if name.is_empty() {
        return Err(ProcessError::NotFound { pid: pid.as_i32() });
    }
    Ok(truncate_to_capacity(&name, PATH_CAPACITY).to_string())
}

/// Resolve the executable path, surfacing the failure.
pub fn try_resolve_path(table: &dyn ProcessTable, pid: i32) -> Result<String, ProcessError> {
    let pid = Pid::new(pid)?;
    let path = table.path(pid)?;
    Ok(truncate_to_capacity(&path, PATH_CAPACITY).to_string())
}

/// Resolve the executable path on a best-effort basis; failures yield "".
pub fn resolve_path(table: &dyn ProcessTable, pid: i32) -> String {
    match try_resolve_path(table, pid) {
        Ok(path) => path,
        Err(e) => {
            debug!(
                event = "core.process.path_unresolved",
                pid = pid,
                error = %e
            );
            String::new()
        }
    }
}

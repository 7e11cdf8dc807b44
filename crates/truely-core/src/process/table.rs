use std::collections::BTreeMap;
use std::sync::Mutex;

use sysinfo::{Pid as SysinfoPid, ProcessesToUpdate, System};
use tracing::debug;

use crate::process::errors::ProcessError;
use crate::process::types::{Pid, RawProcess};

/// OS adapter for the live process table.
///
/// Implementations hide how the table is read (two-phase libproc queries,
/// sysinfo refreshes, in-memory fixtures). Callers only see owned snapshots.
pub trait ProcessTable: Send + Sync {
    /// Short backend identifier used in logs
    fn backend_name(&self) -> &'static str;

    /// Snapshot every process slot. Entries with pid <= 0 may be present.
    fn snapshot(&self) -> Result<Vec<RawProcess>, ProcessError>;

    /// Short process name (the kernel's command name).
    fn name(&self, pid: Pid) -> Result<String, ProcessError>;

    /// Absolute executable path.
    fn path(&self, pid: Pid) -> Result<String, ProcessError>;
}

/// Process table backed by `sysinfo`, used on every non-macOS host.
pub struct SysinfoProcessTable {
    system: Mutex<System>,
}

impl SysinfoProcessTable {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }

    fn with_process<T>(
        &self,
        pid: Pid,
        read: impl FnOnce(&sysinfo::Process) -> Option<T>,
    ) -> Result<Option<T>, ProcessError> {
        let sys_pid = SysinfoPid::from_u32(pid.as_u32());
        let mut system = self
            .system
            .lock()
            .map_err(|_| ProcessError::TableQueryFailed {
                message: "sysinfo system lock poisoned".to_string(),
            })?;
        system.refresh_processes(ProcessesToUpdate::Some(&[sys_pid]), true);
        Ok(system.process(sys_pid).and_then(read))
    }
}

impl Default for SysinfoProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable for SysinfoProcessTable {
    fn backend_name(&self) -> &'static str {
        "sysinfo"
    }

    fn snapshot(&self) -> Result<Vec<RawProcess>, ProcessError> {
        let mut system = self
            .system
            .lock()
            .map_err(|_| ProcessError::TableQueryFailed {
                message: "sysinfo system lock poisoned".to_string(),
            })?;
        system.refresh_processes(ProcessesToUpdate::All, true);

        // Linux reports every thread as a task entry; only processes are kept.
        let mut processes: Vec<RawProcess> = system
            .processes()
            .iter()
            .filter(|(_, process)| process.thread_kind().is_none())
            .filter_map(|(pid, _)| i32::try_from(pid.as_u32()).ok())
            .map(|pid| RawProcess { pid })
            .collect();

        if processes.is_empty() {
            return Err(ProcessError::EmptyTable);
        }

        processes.sort_by_key(|p| p.pid);
        Ok(processes)
    }

    fn name(&self, pid: Pid) -> Result<String, ProcessError> {
        self.with_process(pid, |process| {
            let name = process.name().to_string_lossy().into_owned();
            (!name.is_empty()).then_some(name)
        })?
        .ok_or(ProcessError::NotFound { pid: pid.as_i32() })
    }

    fn path(&self, pid: Pid) -> Result<String, ProcessError> {
        self.with_process(pid, |process| {
            process.exe().map(|exe| exe.to_string_lossy().into_owned())
        })?
        .filter(|path| !path.is_empty())
        .ok_or(ProcessError::PathUnavailable { pid: pid.as_i32() })
    }
}

/// One entry of a [`StaticProcessTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticProcess {
    pub pid: i32,
    pub name: Option<String>,
    pub path: Option<String>,
}

impl StaticProcess {
    pub fn new(pid: i32, name: &str) -> Self {
        Self {
            pid,
            name: Some(name.to_string()),
            path: None,
        }
    }

    /// A slot whose name cannot be resolved (exited or access denied).
    pub fn unnamed(pid: i32) -> Self {
        Self {
            pid,
            name: None,
            path: None,
        }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }
}

/// In-memory process table for tests and replayed snapshots.
#[derive(Debug, Clone, Default)]
pub struct StaticProcessTable {
    processes: BTreeMap<i32, StaticProcess>,
    slots: Vec<i32>,
}

impl StaticProcessTable {
    pub fn new(processes: Vec<StaticProcess>) -> Self {
        let slots = processes.iter().map(|p| p.pid).collect();
        let processes = processes.into_iter().map(|p| (p.pid, p)).collect();
        Self { processes, slots }
    }
}

impl ProcessTable for StaticProcessTable {
    fn backend_name(&self) -> &'static str {
        "static"
    }

    fn snapshot(&self) -> Result<Vec<RawProcess>, ProcessError> {
        if self.slots.is_empty() {
            return Err(ProcessError::EmptyTable);
        }
        Ok(self.slots.iter().map(|&pid| RawProcess { pid }).collect())
    }

    fn name(&self, pid: Pid) -> Result<String, ProcessError> {
        self.processes
            .get(&pid.as_i32())
            .and_then(|p| p.name.clone())
            .ok_or(ProcessError::NotFound { pid: pid.as_i32() })
    }

    fn path(&self, pid: Pid) -> Result<String, ProcessError> {
        self.processes
            .get(&pid.as_i32())
            .and_then(|p| p.path.clone())
            .ok_or(ProcessError::PathUnavailable { pid: pid.as_i32() })
    }
}

/// The process table for the current platform.
pub fn platform_table() -> Box<dyn ProcessTable> {
    #[cfg(target_os = "macos")]
    {
        debug!(event = "core.process.table_selected", backend = "libproc");
        Box::new(crate::process::libproc::LibprocProcessTable)
    }

    #[cfg(not(target_os = "macos"))]
    {
        debug!(event = "core.process.table_selected", backend = "sysinfo");
        Box::new(SysinfoProcessTable::new())
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::heuristics;
use crate::process::errors::ProcessError;

/// Capacity of name and path fields, terminator included.
///
/// Matches the platform's `PROC_PIDPATHINFO_MAXSIZE`.
pub const PATH_CAPACITY: usize = 4096;

/// Process ID of a live, user-visible process (always > 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(i32);

impl Pid {
    pub fn new(pid: i32) -> Result<Self, ProcessError> {
        if pid <= 0 {
            return Err(ProcessError::InvalidPid { pid });
        }
        Ok(Self(pid))
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }

    pub fn as_u32(&self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entry of a raw process table snapshot. Kernel and idle slots (pid <= 0) may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawProcess {
    pub pid: i32,
}

/// Immutable per-process result of one enumerate + enrich pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pid: Pid,
    name: String,
    path: String,
    window_count: u32,
    screen_evasion_count: u32,
    elevated_layer_count: u32,
    suspicious_window_count: u8,
}

impl ProcessRecord {
    /// Build a record; `suspicious_window_count` is derived from the two signal counts.
    pub fn new(
        pid: Pid,
        name: String,
        path: String,
        window_count: u32,
        screen_evasion_count: u32,
        elevated_layer_count: u32,
    ) -> Self {
        let suspicious_window_count =
            heuristics::suspicious_window_count(screen_evasion_count, elevated_layer_count);
        Self {
            pid,
            name,
            path,
            window_count,
            screen_evasion_count,
            elevated_layer_count,
            suspicious_window_count,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Executable path, empty when it could not be resolved.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn window_count(&self) -> u32 {
        self.window_count
    }

    pub fn screen_evasion_count(&self) -> u32 {
        self.screen_evasion_count
    }

    pub fn elevated_layer_count(&self) -> u32 {
        self.elevated_layer_count
    }

    pub fn suspicious_window_count(&self) -> u8 {
        self.suspicious_window_count
    }

    pub fn is_suspicious(&self) -> bool {
        self.suspicious_window_count == 1
    }
}

/// Cut `value` so it fits a buffer of `capacity` bytes including a terminator.
///
/// Truncation is silent and lands on a UTF-8 character boundary.
pub fn truncate_to_capacity(value: &str, capacity: usize) -> &str {
    let Some(limit) = capacity.checked_sub(1) else {
        return "";
    };
    if value.len() <= limit {
        return value;
    }
    let mut end = limit;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::bridge::errors::BridgeError;
use crate::bridge::types::ProcessList;
use crate::config::TruelyConfig;
use crate::errors::{Status, TruelyError};
use crate::hashing::{self, DIGEST_BUFFER_CAPACITY, HashError};
use crate::heuristics::{self, HeuristicThresholds, WindowProperties};
use crate::process::{
    self, Pid, ProcessError, ProcessRecord, ProcessTable, platform_table, truncate_to_capacity,
};
use crate::window::{self, WindowServer, platform_window_server};

/// Host-facing handle over the process table and window server.
///
/// Each handle owns its own lock and readiness flag. The lock serializes
/// whole enumerate + enrich passes; single-pid queries do not take it.
pub struct Bridge {
    lock: Mutex<()>,
    ready: AtomicBool,
    table: Box<dyn ProcessTable>,
    windows: Box<dyn WindowServer>,
    thresholds: HeuristicThresholds,
}

impl Bridge {
    pub fn new(table: Box<dyn ProcessTable>, windows: Box<dyn WindowServer>) -> Self {
        Self {
            lock: Mutex::new(()),
            ready: AtomicBool::new(false),
            table,
            windows,
            thresholds: HeuristicThresholds::default(),
        }
    }

    /// Bridge over the native backends of the current platform.
    pub fn platform() -> Self {
        Self::new(platform_table(), platform_window_server())
    }

    pub fn from_config(config: &TruelyConfig) -> Self {
        Self::platform().with_thresholds(config.thresholds())
    }

    pub fn with_thresholds(mut self, thresholds: HeuristicThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thresholds(&self) -> &HeuristicThresholds {
        &self.thresholds
    }

    pub fn initialize(&self) -> Result<(), BridgeError> {
        let _guard = self.lock.lock().map_err(|_| BridgeError::LockPoisoned)?;
        self.ready.store(true, Ordering::SeqCst);
        info!(
            event = "core.bridge.initialize_completed",
            table = self.table.backend_name(),
            windows = self.windows.backend_name()
        );
        Ok(())
    }

    pub fn cleanup(&self) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.ready.store(false, Ordering::SeqCst);
        info!(event = "core.bridge.cleanup_completed");
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn warn_if_not_ready(&self, operation: &'static str) {
        if !self.is_ready() {
            warn!(
                event = "core.bridge.not_initialized",
                operation = operation,
                "Bridge used before initialize() or after cleanup()"
            );
        }
    }

    /// Snapshot every live process and enrich it with name, path and window signals.
    ///
    /// Processes whose name cannot be resolved are left out. The whole pass runs
    /// under the bridge lock, so concurrent callers each see one complete snapshot.
    pub fn enumerate_processes(&self) -> Result<ProcessList, BridgeError> {
        self.warn_if_not_ready("enumerate_processes");
        let _guard = self.lock.lock().map_err(|_| BridgeError::LockPoisoned)?;

        info!(
            event = "core.bridge.enumerate_started",
            table = self.table.backend_name(),
            windows = self.windows.backend_name()
        );

        let raw = match process::enumerate(self.table.as_ref()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    event = "core.bridge.enumerate_failed",
                    error = %e,
                    error_code = e.error_code()
                );
                return Err(e.into());
            }
        };

        let mut records: Vec<ProcessRecord> = Vec::new();
        records
            .try_reserve_exact(raw.len())
            .map_err(|_| ProcessError::AllocationFailed {
                requested: raw.len(),
            })?;

        let mut skipped = 0usize;
        for entry in &raw {
            let Ok(pid) = Pid::new(entry.pid) else {
                continue;
            };

            let name = match process::resolve_name(self.table.as_ref(), entry.pid) {
                Ok(name) => name,
                Err(e) => {
                    debug!(
                        event = "core.process.name_unresolved",
                        pid = entry.pid,
                        error = %e
                    );
                    skipped += 1;
                    continue;
                }
            };
            let path = process::resolve_path(self.table.as_ref(), entry.pid);

            records.push(self.enrich(pid, name, path));
        }

        let suspicious = records.iter().filter(|r| r.is_suspicious()).count();
        info!(
            event = "core.bridge.enumerate_completed",
            count = records.len(),
            skipped = skipped,
            suspicious = suspicious
        );

        Ok(ProcessList::new(records))
    }

    fn enrich(&self, pid: Pid, name: String, path: String) -> ProcessRecord {
        let server = self.windows.as_ref();
        let raw_pid = pid.as_i32();
        ProcessRecord::new(
            pid,
            name,
            path,
            window::window_count(server, raw_pid),
            heuristics::detect_screen_evasion(server, raw_pid, &self.thresholds),
            heuristics::detect_elevated_layers(server, raw_pid, &self.thresholds),
        )
    }

    pub fn release_process_list(&self, list: ProcessList) {
        debug!(event = "core.bridge.list_released", count = list.len());
        drop(list);
    }

    /// Write the process name into `out`, truncated to `capacity - 1` bytes.
    ///
    /// `out` is left untouched unless the call succeeds.
    pub fn resolve_name_into(&self, pid: i32, out: &mut String, capacity: usize) -> Status {
        self.warn_if_not_ready("resolve_name_into");
        if capacity == 0 {
            return Status::NullPointer;
        }
        match process::resolve_name(self.table.as_ref(), pid) {
            Ok(name) => write_truncated(out, &name, capacity),
            Err(e) => status_of(&e, "core.bridge.name_failed", pid),
        }
    }

    /// Write the executable path into `out`, truncated to `capacity - 1` bytes.
    ///
    /// On failure `out` is cleared: an unresolved path reads as empty.
    pub fn resolve_path_into(&self, pid: i32, out: &mut String, capacity: usize) -> Status {
        self.warn_if_not_ready("resolve_path_into");
        if capacity == 0 {
            return Status::NullPointer;
        }
        match process::try_resolve_path(self.table.as_ref(), pid) {
            Ok(path) => write_truncated(out, &path, capacity),
            Err(e) => {
                out.clear();
                status_of(&e, "core.bridge.path_failed", pid)
            }
        }
    }

    /// Write the lowercase hex SHA-256 of the file at `path` into `out`.
    ///
    /// `capacity` must fit 64 hex characters plus a terminator; anything
    /// smaller, zero included, is an invalid parameter.
    pub fn hash_file_into(&self, path: impl AsRef<Path>, out: &mut String, capacity: usize) -> Status {
        self.warn_if_not_ready("hash_file_into");
        if capacity < DIGEST_BUFFER_CAPACITY {
            let e = HashError::BufferTooSmall {
                capacity,
                required: DIGEST_BUFFER_CAPACITY,
            };
            debug!(event = "core.bridge.hash_rejected", error = %e);
            return e.status();
        }

        let path = path.as_ref();
        match hashing::hash_file(path) {
            Ok(digest) => {
                out.clear();
                out.push_str(digest.as_str());
                Status::Success
            }
            Err(e) => {
                debug!(
                    event = "core.bridge.hash_failed",
                    path = %path.display(),
                    error = %e,
                    error_code = e.error_code()
                );
                e.status()
            }
        }
    }

    /// On-screen windows owned by `pid`. Zero for pid <= 0.
    pub fn window_count(&self, pid: i32) -> u32 {
        self.warn_if_not_ready("window_count");
        window::window_count(self.windows.as_ref(), pid)
    }

    pub fn detect_screen_evasion(&self, pid: i32) -> u32 {
        self.warn_if_not_ready("detect_screen_evasion");
        heuristics::detect_screen_evasion(self.windows.as_ref(), pid, &self.thresholds)
    }

    pub fn detect_elevated_layers(&self, pid: i32) -> u32 {
        self.warn_if_not_ready("detect_elevated_layers");
        heuristics::detect_elevated_layers(self.windows.as_ref(), pid, &self.thresholds)
    }

    /// Consolidated window metrics for `pid`.
    ///
    /// Unlike the per-metric calls, an unreachable window server is an error here.
    pub fn window_properties(&self, pid: i32) -> Result<WindowProperties, BridgeError> {
        self.warn_if_not_ready("window_properties");
        if pid <= 0 {
            return Err(BridgeError::InvalidPid { pid });
        }
        if !self.windows.is_available() {
            let backend = self.windows.backend_name();
            warn!(event = "core.bridge.window_server_unavailable", pid = pid, backend = backend);
            return Err(BridgeError::WindowServerUnavailable { backend });
        }
        Ok(heuristics::window_properties(
            self.windows.as_ref(),
            pid,
            &self.thresholds,
        ))
    }
}

fn write_truncated(out: &mut String, value: &str, capacity: usize) -> Status {
    out.clear();
    out.push_str(truncate_to_capacity(value, capacity));
    Status::Success
}

fn status_of(error: &ProcessError, event: &'static str, pid: i32) -> Status {
    debug!(
        event = event,
        pid = pid,
        error = %error,
        error_code = error.error_code()
    );
    error.status()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{RawProcess, StaticProcess, StaticProcessTable};
    use crate::window::{
        HeadlessWindowServer, SharingState, StaticWindowServer, WindowBounds, WindowRecord,
    };
    use std::io::Write;
    use std::sync::Arc;

    fn fixture_bridge() -> Bridge {
        let table = StaticProcessTable::new(vec![
            StaticProcess::unnamed(0),
            StaticProcess::new(1, "launchd").with_path("/sbin/launchd"),
            StaticProcess::new(310, "Finder")
                .with_path("/System/Library/CoreServices/Finder.app/Contents/MacOS/Finder"),
            StaticProcess::unnamed(311),
            StaticProcess::new(4242, "overlay"),
        ]);
        let windows = StaticWindowServer::new()
            .with_window(WindowRecord::new(310, WindowBounds::new(0.0, 25.0, 800.0, 600.0)))
            .with_window(WindowRecord::new(310, WindowBounds::new(40.0, 60.0, 400.0, 300.0)))
            .with_hidden_window(
                WindowRecord::new(4242, WindowBounds::new(-2000.0, -2000.0, 100.0, 100.0))
                    .with_sharing_state(SharingState::NotCapturable),
            )
            .with_window(
                WindowRecord::new(4242, WindowBounds::new(10.0, 10.0, 300.0, 200.0)).with_layer(3),
            );
        Bridge::new(Box::new(table), Box::new(windows))
    }

    #[test]
    fn test_enumerate_skips_unresolvable_and_kernel_slots() {
        let bridge = fixture_bridge();
        bridge.initialize().unwrap();

        let list = bridge.enumerate_processes().unwrap();
        let pids: Vec<i32> = list.iter().map(|r| r.pid().as_i32()).collect();
        assert_eq!(pids, vec![1, 310, 4242]);
    }

    #[test]
    fn test_enumerate_enriches_records() {
        let bridge = fixture_bridge();
        bridge.initialize().unwrap();
        let list = bridge.enumerate_processes().unwrap();

        let finder = &list.records()[1];
        assert_eq!(finder.name(), "Finder");
        assert!(finder.path().ends_with("/Finder"));
        assert_eq!(finder.window_count(), 2);
        assert_eq!(finder.suspicious_window_count(), 0);

        let overlay = &list.records()[2];
        assert_eq!(overlay.path(), "");
        assert_eq!(overlay.window_count(), 1);
        assert_eq!(overlay.screen_evasion_count(), 2);
        assert_eq!(overlay.elevated_layer_count(), 1);
        assert!(overlay.is_suspicious());

        for record in &list {
            assert!(record.pid().as_i32() > 0);
            assert!(record.suspicious_window_count() <= 1);
        }
        bridge.release_process_list(list);
    }

    #[test]
    fn test_enumerate_without_initialize_still_runs() {
        let bridge = fixture_bridge();
        assert!(!bridge.is_ready());
        assert_eq!(bridge.enumerate_processes().unwrap().len(), 3);
    }

    #[test]
    fn test_initialize_and_cleanup_toggle_readiness() {
        let bridge = fixture_bridge();
        bridge.initialize().unwrap();
        assert!(bridge.is_ready());
        bridge.cleanup();
        assert!(!bridge.is_ready());
        bridge.initialize().unwrap();
        assert!(bridge.is_ready());
    }

    #[test]
    fn test_empty_table_is_invalid_parameter() {
        let bridge = Bridge::new(
            Box::new(StaticProcessTable::default()),
            Box::new(HeadlessWindowServer),
        );
        let error = bridge.enumerate_processes().unwrap_err();
        assert_eq!(error.status(), Status::InvalidParameter);
    }

    struct PanickingTable;

    impl ProcessTable for PanickingTable {
        fn backend_name(&self) -> &'static str {
            "panicking"
        }

        fn snapshot(&self) -> Result<Vec<RawProcess>, ProcessError> {
            panic!("process table exploded");
        }

        fn name(&self, pid: Pid) -> Result<String, ProcessError> {
            Err(ProcessError::NotFound { pid: pid.as_i32() })
        }

        fn path(&self, pid: Pid) -> Result<String, ProcessError> {
            Err(ProcessError::PathUnavailable { pid: pid.as_i32() })
        }
    }

    #[test]
    fn test_poisoned_lock_is_environment_failure() {
        let bridge = Arc::new(Bridge::new(
            Box::new(PanickingTable),
            Box::new(HeadlessWindowServer),
        ));

        let worker = Arc::clone(&bridge);
        let joined = std::thread::spawn(move || worker.enumerate_processes()).join();
        assert!(joined.is_err());

        let error = bridge.enumerate_processes().unwrap_err();
        assert!(matches!(error, BridgeError::LockPoisoned));
        assert_eq!(error.status(), Status::SystemCallFailure);
        assert!(matches!(bridge.initialize(), Err(BridgeError::LockPoisoned)));

        bridge.cleanup();
        assert!(!bridge.is_ready());
    }

    #[test]
    fn test_resolve_name_into() {
        let bridge = fixture_bridge();
        let mut out = String::from("untouched");

        assert_eq!(bridge.resolve_name_into(310, &mut out, 0), Status::NullPointer);
        assert_eq!(out, "untouched");

        assert_eq!(bridge.resolve_name_into(0, &mut out, 64), Status::InvalidParameter);
        assert_eq!(bridge.resolve_name_into(-5, &mut out, 64), Status::InvalidParameter);
        assert_eq!(bridge.resolve_name_into(311, &mut out, 64), Status::SystemCallFailure);
        assert_eq!(out, "untouched");

        assert_eq!(bridge.resolve_name_into(310, &mut out, 64), Status::Success);
        assert_eq!(out, "Finder");

        assert_eq!(bridge.resolve_name_into(310, &mut out, 4), Status::Success);
        assert_eq!(out, "Fin");
    }

    #[test]
    fn test_resolve_path_into() {
        let bridge = fixture_bridge();
        let mut out = String::new();

        assert_eq!(bridge.resolve_path_into(1, &mut out, 0), Status::NullPointer);
        assert_eq!(bridge.resolve_path_into(1, &mut out, 128), Status::Success);
        assert_eq!(out, "/sbin/launchd");

        assert_eq!(bridge.resolve_path_into(1, &mut out, 6), Status::Success);
        assert_eq!(out, "/sbin");
    }

    #[test]
    fn test_resolve_path_into_failure_clears_buffer() {
        let bridge = fixture_bridge();
        let mut out = String::from("/stale/previous/path");

        assert_eq!(
            bridge.resolve_path_into(4242, &mut out, 128),
            Status::SystemCallFailure
        );
        assert!(out.is_empty(), "stale path left behind: {:?}", out);

        out.push_str("/stale/previous/path");
        assert_eq!(bridge.resolve_path_into(0, &mut out, 128), Status::InvalidParameter);
        assert!(out.is_empty());
    }

    #[test]
    fn test_hash_file_into() {
        let bridge = fixture_bridge();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();
        file.flush().unwrap();

        let mut out = String::from("previous");
        assert_eq!(
            bridge.hash_file_into(file.path(), &mut out, 0),
            Status::InvalidParameter
        );
        assert_eq!(
            bridge.hash_file_into(file.path(), &mut out, 64),
            Status::InvalidParameter
        );
        assert_eq!(bridge.hash_file_into("", &mut out, 65), Status::InvalidParameter);
        assert_eq!(out, "previous");

        assert_eq!(bridge.hash_file_into(file.path(), &mut out, 65), Status::Success);
        assert_eq!(
            out,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_missing_file_leaves_buffer() {
        let bridge = fixture_bridge();
        let dir = tempfile::tempdir().unwrap();
        let mut out = String::from("previous");
        assert_eq!(
            bridge.hash_file_into(dir.path().join("missing"), &mut out, 65),
            Status::FileAccessFailure
        );
        assert_eq!(out, "previous");
    }

    #[test]
    fn test_window_queries() {
        let bridge = fixture_bridge();
        assert_eq!(bridge.window_count(310), 2);
        assert_eq!(bridge.window_count(0), 0);
        assert_eq!(bridge.detect_screen_evasion(4242), 2);
        assert_eq!(bridge.detect_screen_evasion(-1), 0);
        assert_eq!(bridge.detect_elevated_layers(4242), 1);
        assert_eq!(bridge.detect_elevated_layers(310), 0);
    }

    #[test]
    fn test_window_properties() {
        let bridge = fixture_bridge();
        let props = bridge.window_properties(4242).unwrap();
        assert_eq!(
            props,
            WindowProperties {
                window_count: 1,
                sharing_state_disabled_count: 1,
                elevated_layer_count: 1,
                suspicious_pattern_count: 2,
            }
        );

        let error = bridge.window_properties(0).unwrap_err();
        assert_eq!(error.status(), Status::InvalidParameter);
    }

    #[test]
    fn test_custom_thresholds_apply() {
        let strict = HeuristicThresholds {
            normal_layer_threshold: 5,
            ..HeuristicThresholds::default()
        };
        let bridge = fixture_bridge().with_thresholds(strict);
        assert_eq!(bridge.detect_elevated_layers(4242), 0);
        assert_eq!(bridge.thresholds().normal_layer_threshold, 5);
    }

    #[test]
    fn test_headless_window_properties_is_system_call_failure() {
        let bridge = Bridge::new(
            Box::new(StaticProcessTable::new(vec![StaticProcess::new(9, "zsh")])),
            Box::new(HeadlessWindowServer),
        );

        let error = bridge.window_properties(9).unwrap_err();
        assert!(matches!(
            error,
            BridgeError::WindowServerUnavailable { backend: "headless" }
        ));
        assert_eq!(error.status(), Status::SystemCallFailure);

        assert_eq!(bridge.window_count(9), 0);
        assert_eq!(bridge.detect_screen_evasion(9), 0);
        assert_eq!(bridge.detect_elevated_layers(9), 0);
    }
}

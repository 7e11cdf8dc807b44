use crate::window::server::WindowServer;
use crate::window::types::{WindowRecord, WindowScope};

/// Windows in `scope` owned by `pid`, re-queried from the server.
pub fn windows_owned_by(
    server: &dyn WindowServer,
    scope: WindowScope,
    pid: i32,
) -> impl Iterator<Item = WindowRecord> + '_ {
    server
        .list_windows(scope)
        .filter(move |window| window.owner_pid == pid)
}

/// Number of on-screen windows owned by `pid`. Zero for pid <= 0.
pub fn window_count(server: &dyn WindowServer, pid: i32) -> u32 {
    if pid <= 0 {
        return 0;
    }
    windows_owned_by(server, WindowScope::OnScreenOnly, pid).count() as u32
}

use tracing::debug;

use crate::window::types::{WindowRecord, WindowScope};

/// Lazy, finite, single-pass sequence of windows from one server query
pub type Windows<'a> = Box<dyn Iterator<Item = WindowRecord> + 'a>;

/// Window server adapter.
///
/// Every call re-queries the server. When the server is unreachable
/// (headless session, no display) the sequence is empty rather than an error;
/// callers that must report the outage check [`WindowServer::is_available`].
pub trait WindowServer: Send + Sync {
    /// Short backend identifier used in logs
    fn backend_name(&self) -> &'static str;

    /// Whether the server currently answers window list queries.
    fn is_available(&self) -> bool;

    fn list_windows(&self, scope: WindowScope) -> Windows<'_>;
}

/// Window server for hosts without a display. Always empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessWindowServer;

impl WindowServer for HeadlessWindowServer {
    fn backend_name(&self) -> &'static str {
        "headless"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn list_windows(&self, _scope: WindowScope) -> Windows<'_> {
        Box::new(std::iter::empty())
    }
}

/// In-memory window server for tests and recorded sessions.
#[derive(Debug, Clone, Default)]
pub struct StaticWindowServer {
    windows: Vec<(WindowRecord, bool)>,
}

impl StaticWindowServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a window that is composited on screen.
    pub fn with_window(mut self, window: WindowRecord) -> Self {
        self.windows.push((window, true));
        self
    }

    /// Add a window only visible to [`WindowScope::All`] queries.
    pub fn with_hidden_window(mut self, window: WindowRecord) -> Self {
        self.windows.push((window, false));
        self
    }
}

impl WindowServer for StaticWindowServer {
    fn backend_name(&self) -> &'static str {
        "static"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn list_windows(&self, scope: WindowScope) -> Windows<'_> {
        Box::new(
            self.windows
                .iter()
                .filter(move |(_, on_screen)| scope == WindowScope::All || *on_screen)
                .map(|(window, _)| *window),
        )
    }
}

/// The window server for the current platform.
pub fn platform_window_server() -> Box<dyn WindowServer> {
    #[cfg(target_os = "macos")]
    {
        debug!(event = "core.window.server_selected", backend = "core_graphics");
        Box::new(crate::window::macos::CoreGraphicsWindowServer)
    }

    #[cfg(not(target_os = "macos"))]
    {
        debug!(event = "core.window.server_selected", backend = "headless");
        Box::new(HeadlessWindowServer)
    }
}

use serde::Serialize;

/// Which windows a window server query covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindowScope {
    /// Windows currently composited on screen
    OnScreenOnly,
    /// Every window the server tracks, including hidden and off-screen ones
    All,
}

/// Whether the OS lets screen capture read a window's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SharingState {
    Capturable,
    NotCapturable,
}

impl SharingState {
    /// Map a raw `kCGWindowSharingState` value. Only `kCGWindowSharingNone` (0)
    /// hides the window from capture; read-only and read-write both allow it.
    pub fn from_raw(value: i64) -> Self {
        if value == 0 {
            SharingState::NotCapturable
        } else {
            SharingState::Capturable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WindowBounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One window as reported by the window server. Never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowRecord {
    pub owner_pid: i32,
    /// Absent when the server omits the bounds dictionary
    pub bounds: Option<WindowBounds>,
    /// Z-order level; 0 is a normal application window
    pub layer: i32,
    pub sharing_state: SharingState,
}

impl WindowRecord {
    /// A normal, capturable, layer-0 window.
    pub fn new(owner_pid: i32, bounds: WindowBounds) -> Self {
        Self {
            owner_pid,
            bounds: Some(bounds),
            layer: 0,
            sharing_state: SharingState::Capturable,
        }
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_sharing_state(mut self, sharing_state: SharingState) -> Self {
        self.sharing_state = sharing_state;
        self
    }

    pub fn without_bounds(mut self) -> Self {
        self.bounds = None;
        self
    }

    pub fn is_capturable(&self) -> bool {
        self.sharing_state == SharingState::Capturable
    }
}

use serde::{Deserialize, Serialize};

/// Origins below this coordinate are treated as parked off-screen
pub const DEFAULT_OFFSCREEN_MIN: f64 = -1000.0;

/// Origins above this coordinate are treated as parked off-screen
pub const DEFAULT_OFFSCREEN_MAX: f64 = 10000.0;

/// Width or height below this is treated as collapsed
pub const DEFAULT_MIN_DIMENSION: f64 = 1.0;

/// Highest layer used by normal application windows.
/// `kCGFloatingWindowLevel` (3) and above are overlays.
pub const DEFAULT_NORMAL_LAYER_THRESHOLD: i32 = 2;

/// Tunable limits for the window heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicThresholds {
    pub offscreen_min: f64,
    pub offscreen_max: f64,
    pub min_dimension: f64,
    pub normal_layer_threshold: i32,
}

impl Default for HeuristicThresholds {
    fn default() -> Self {
        Self {
            offscreen_min: DEFAULT_OFFSCREEN_MIN,
            offscreen_max: DEFAULT_OFFSCREEN_MAX,
            min_dimension: DEFAULT_MIN_DIMENSION,
            normal_layer_threshold: DEFAULT_NORMAL_LAYER_THRESHOLD,
        }
    }
}

/// Per-process window summary, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WindowProperties {
    /// On-screen windows owned by the process
    pub window_count: u32,
    /// Windows excluded from screen capture
    pub sharing_state_disabled_count: u32,
    /// Windows above the normal application layer
    pub elevated_layer_count: u32,
    /// Weighted screen evasion score (see `screen_evasion_score`)
    pub suspicious_pattern_count: u32,
}

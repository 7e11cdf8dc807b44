//! Window heuristics for screen-capture evasion and overlay detection.
//!
//! All classification functions are pure over [`WindowRecord`](crate::window::WindowRecord)
//! values; the `detect_*` helpers add the per-pid window server scan.

pub mod operations;
pub mod types;

pub use operations::{
    detect_elevated_layers, detect_screen_evasion, elevated_layer_count, evasion_score,
    is_elevated, is_geometry_implausible, screen_evasion_score, sharing_disabled_count,
    suspicious_window_count, window_properties,
};
pub use types::{
    DEFAULT_MIN_DIMENSION, DEFAULT_NORMAL_LAYER_THRESHOLD, DEFAULT_OFFSCREEN_MAX,
    DEFAULT_OFFSCREEN_MIN, HeuristicThresholds, WindowProperties,
};

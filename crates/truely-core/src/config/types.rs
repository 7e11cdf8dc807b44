//! Configuration type definitions.
//!
//! # Example Configuration
//!
//! ```toml
//! [heuristics]
//! offscreen_min = -1000.0
//! offscreen_max = 10000.0
//! min_dimension = 1.0
//! normal_layer_threshold = 2
//!
//! [watchlist]
//! names = ["cluely", "claude"]
//! paths = ["/Applications/Overlay.app/Contents/MacOS/Overlay"]
//! hashes = ["e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"]
//! ```

use serde::{Deserialize, Serialize};

/// Main configuration loaded from TOML config files.
///
/// Loaded from `~/.truely/config.toml` then `./.truely/config.toml`;
/// project values override user values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TruelyConfig {
    /// Window classification thresholds
    #[serde(default)]
    pub heuristics: HeuristicsConfig,

    /// Processes to flag during a scan
    #[serde(default)]
    pub watchlist: WatchlistConfig,
}

/// Overrides for the window heuristics. Unset fields use built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HeuristicsConfig {
    /// Coordinates below this are considered off screen. Default: -1000.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offscreen_min: Option<f64>,

    /// Coordinates above this are considered off screen. Default: 10000.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offscreen_max: Option<f64>,

    /// Width or height below this marks a window as degenerate. Default: 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_dimension: Option<f64>,

    /// Highest layer of an ordinary application window. Default: 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_layer_threshold: Option<i32>,
}

/// Name fragments, executable paths and executable digests to flag.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WatchlistConfig {
    /// Case-insensitive name fragments. Default: `["cluely", "claude"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,

    /// Exact executable paths
    #[serde(default)]
    pub paths: Vec<String>,

    /// Lowercase or uppercase hex SHA-256 digests of executables
    #[serde(default)]
    pub hashes: Vec<String>,
}

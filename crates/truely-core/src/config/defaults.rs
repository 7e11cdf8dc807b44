//! Default values for configuration types.

use crate::config::types::{HeuristicsConfig, TruelyConfig};
use crate::heuristics::HeuristicThresholds;

/// Name fragments watched when the config does not list any.
pub const DEFAULT_WATCH_NAMES: &[&str] = &["cluely", "claude"];

pub fn default_watch_names() -> Vec<String> {
    DEFAULT_WATCH_NAMES.iter().map(|s| s.to_string()).collect()
}

impl HeuristicsConfig {
    /// Resolve against the built-in thresholds.
    pub fn resolve(&self) -> HeuristicThresholds {
        let defaults = HeuristicThresholds::default();
        HeuristicThresholds {
            offscreen_min: self.offscreen_min.unwrap_or(defaults.offscreen_min),
            offscreen_max: self.offscreen_max.unwrap_or(defaults.offscreen_max),
            min_dimension: self.min_dimension.unwrap_or(defaults.min_dimension),
            normal_layer_threshold: self
                .normal_layer_threshold
                .unwrap_or(defaults.normal_layer_threshold),
        }
    }
}

impl TruelyConfig {
    pub fn thresholds(&self) -> HeuristicThresholds {
        self.heuristics.resolve()
    }

    /// Configured name fragments, or the built-in list when unset.
    pub fn watch_names(&self) -> Vec<String> {
        self.watchlist
            .names
            .clone()
            .unwrap_or_else(default_watch_names)
    }
}

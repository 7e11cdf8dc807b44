//! # Configuration System
//!
//! Hierarchical TOML configuration: built-in defaults, then
//! `~/.truely/config.toml`, then `./.truely/config.toml`.
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use truely_core::config::TruelyConfig;
//!
//! fn example() -> Result<(), truely_core::errors::ConfigError> {
//!     let config = TruelyConfig::load_hierarchy()?;
//!     let thresholds = config.thresholds();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use defaults::{DEFAULT_WATCH_NAMES, default_watch_names};
pub use loading::{load_config_file, load_from_paths, merge_configs, user_config_path};
pub use types::{HeuristicsConfig, TruelyConfig, WatchlistConfig};
pub use validation::validate_config;

impl TruelyConfig {
    /// See [`loading::load_hierarchy`].
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// See [`validation::validate_config`].
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}

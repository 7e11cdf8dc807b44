//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.truely/config.toml`
//! 3. **Project config** - `./.truely/config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::config::types::{HeuristicsConfig, TruelyConfig, WatchlistConfig};
use crate::config::validation::validate_config;
use crate::errors::{ConfigError, TruelyError};

const CONFIG_DIR: &str = ".truely";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a file cannot be parsed or validation fails.
/// Missing config files are not errors.
pub fn load_hierarchy() -> Result<TruelyConfig, ConfigError> {
    let user = user_config_path();
    let project = std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    load_from_paths(user.as_deref(), Some(&project))
}

/// Load and merge the given user and project files over the defaults.
pub fn load_from_paths(
    user: Option<&Path>,
    project: Option<&Path>,
) -> Result<TruelyConfig, ConfigError> {
    let mut config = TruelyConfig::default();

    for (source, path) in [("user", user), ("project", project)] {
        let Some(path) = path else { continue };
        match load_config_file(path) {
            Ok(loaded) => {
                debug!(
                    event = "core.config.file_loaded",
                    source = source,
                    path = %path.display()
                );
                config = merge_configs(config, loaded);
            }
            Err(ConfigError::ConfigNotFound { .. }) => {}
            Err(e) => return Err(e),
        }
    }

    if let Err(e) = validate_config(&config) {
        error!(
            event = "core.config.validation_failed",
            error = %e,
            error_code = e.error_code()
        );
        return Err(e);
    }

    info!(
        event = "core.config.load_completed",
        watch_names = config.watch_names().len(),
        watch_paths = config.watchlist.paths.len(),
        watch_hashes = config.watchlist.hashes.len()
    );

    Ok(config)
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<TruelyConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two configurations, with override_config taking precedence.
///
/// Thresholds and the name list are replaced only when the override sets
/// them. Paths and hashes accumulate across files.
pub fn merge_configs(base: TruelyConfig, override_config: TruelyConfig) -> TruelyConfig {
    TruelyConfig {
        heuristics: HeuristicsConfig {
            offscreen_min: override_config
                .heuristics
                .offscreen_min
                .or(base.heuristics.offscreen_min),
            offscreen_max: override_config
                .heuristics
                .offscreen_max
                .or(base.heuristics.offscreen_max),
            min_dimension: override_config
                .heuristics
                .min_dimension
                .or(base.heuristics.min_dimension),
            normal_layer_threshold: override_config
                .heuristics
                .normal_layer_threshold
                .or(base.heuristics.normal_layer_threshold),
        },
        watchlist: WatchlistConfig {
            names: override_config.watchlist.names.or(base.watchlist.names),
            paths: union(base.watchlist.paths, override_config.watchlist.paths),
            hashes: union(base.watchlist.hashes, override_config.watchlist.hashes),
        },
    }
}

fn union(mut base: Vec<String>, extra: Vec<String>) -> Vec<String> {
    for item in extra {
        if !base.contains(&item) {
            base.push(item);
        }
    }
    base
}

/// Path of the user config file, if a home directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

use crate::config::types::TruelyConfig;
use crate::errors::ConfigError;
use crate::hashing::HashDigest;

/// Validate the configuration.
///
/// Checked against the resolved thresholds, so a project override of one
/// bound is compared with the other bound's effective value.
pub fn validate_config(config: &TruelyConfig) -> Result<(), ConfigError> {
    let thresholds = config.thresholds();

    if !thresholds.offscreen_min.is_finite() || !thresholds.offscreen_max.is_finite() {
        return Err(ConfigError::InvalidConfiguration {
            message: "heuristics.offscreen_min and offscreen_max must be finite".to_string(),
        });
    }

    if thresholds.offscreen_min >= thresholds.offscreen_max {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "heuristics.offscreen_min ({}) must be below offscreen_max ({})",
                thresholds.offscreen_min, thresholds.offscreen_max
            ),
        });
    }

    if thresholds.min_dimension.is_nan() || thresholds.min_dimension < 0.0 {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "heuristics.min_dimension must be zero or greater, got {}",
                thresholds.min_dimension
            ),
        });
    }

    if let Some(names) = &config.watchlist.names
        && names.iter().any(|name| name.trim().is_empty())
    {
        return Err(ConfigError::InvalidConfiguration {
            message: "watchlist.names entries cannot be empty".to_string(),
        });
    }

    if config.watchlist.paths.iter().any(|path| path.trim().is_empty()) {
        return Err(ConfigError::InvalidConfiguration {
            message: "watchlist.paths entries cannot be empty".to_string(),
        });
    }

    if let Some(bad) = config
        .watchlist
        .hashes
        .iter()
        .find(|hash| HashDigest::parse(hash).is_none())
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("watchlist.hashes entry '{bad}' is not a 64-character hex SHA-256"),
        });
    }

    Ok(())
}

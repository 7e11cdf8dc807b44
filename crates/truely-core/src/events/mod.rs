use tracing::{error, info, warn};

use crate::errors::TruelyError;

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        platform = std::env::consts::OS
    );
}

pub fn log_app_shutdown() {
    info!(event = "core.app.shutdown_started");
}

/// Log a classified error with its code and host status.
///
/// User errors (bad arguments, bad config) are logged at warn level.
pub fn log_app_error(error: &dyn TruelyError) {
    if error.is_user_error() {
        warn!(
            event = "core.app.error_occurred",
            error = %error,
            error_code = error.error_code(),
            status = error.status().code()
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error = %error,
            error_code = error.error_code(),
            status = error.status().code()
        );
    }
}

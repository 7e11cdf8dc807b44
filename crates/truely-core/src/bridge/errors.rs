use crate::errors::{ErrorClass, Status, TruelyError};
use crate::hashing::HashError;
use crate::process::ProcessError;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Bridge lock is poisoned: a previous enumeration panicked")]
    LockPoisoned,

    #[error("Invalid PID: {pid}")]
    InvalidPid { pid: i32 },

    #[error("Window server unavailable ({backend})")]
    WindowServerUnavailable { backend: &'static str },

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Hash(#[from] HashError),
}

impl TruelyError for BridgeError {
    fn error_code(&self) -> &'static str {
        match self {
            BridgeError::LockPoisoned => "BRIDGE_LOCK_POISONED",
            BridgeError::InvalidPid { .. } => "BRIDGE_INVALID_PID",
            BridgeError::WindowServerUnavailable { .. } => "BRIDGE_WINDOW_SERVER_UNAVAILABLE",
            BridgeError::Process(e) => e.error_code(),
            BridgeError::Hash(e) => e.error_code(),
        }
    }

    fn class(&self) -> ErrorClass {
        match self {
            BridgeError::LockPoisoned | BridgeError::WindowServerUnavailable { .. } => {
                ErrorClass::EnvironmentFailure
            }
            BridgeError::InvalidPid { .. } => ErrorClass::ContractViolation,
            BridgeError::Process(e) => e.class(),
            BridgeError::Hash(e) => e.class(),
        }
    }

    fn status(&self) -> Status {
        match self {
            BridgeError::Process(e) => e.status(),
            BridgeError::Hash(e) => e.status(),
            other => Status::from(other.class()),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            BridgeError::LockPoisoned | BridgeError::WindowServerUnavailable { .. } => false,
            BridgeError::InvalidPid { .. } => true,
            BridgeError::Process(e) => e.is_user_error(),
            BridgeError::Hash(e) => e.is_user_error(),
        }
    }
}

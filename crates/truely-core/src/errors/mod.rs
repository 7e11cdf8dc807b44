use std::error::Error;

use serde::Serialize;

/// Broad failure categories shared by every module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorClass {
    /// Null/empty/out-of-range argument. Checked before any OS call.
    ContractViolation,
    /// A result buffer could not be allocated.
    ResourceExhaustion,
    /// The OS query or the bridge lock failed.
    EnvironmentFailure,
    /// File open, seek or read failed.
    IoFailure,
}

/// Status codes of the host-facing call surface.
///
/// Values are stable: hosts compare against the raw integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum Status {
    Success = 0,
    NullPointer = -1,
    InvalidParameter = -2,
    AllocationFailure = -3,
    SystemCallFailure = -4,
    FileAccessFailure = -5,
}

impl Status {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl From<ErrorClass> for Status {
    fn from(class: ErrorClass) -> Self {
        match class {
            ErrorClass::ContractViolation => Status::InvalidParameter,
            ErrorClass::ResourceExhaustion => Status::AllocationFailure,
            ErrorClass::EnvironmentFailure => Status::SystemCallFailure,
            ErrorClass::IoFailure => Status::FileAccessFailure,
        }
    }
}

/// Base trait for all application errors
pub trait TruelyError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Taxonomy bucket used to pick a status code
    fn class(&self) -> ErrorClass;

    /// Status code surfaced to host applications
    fn status(&self) -> Status {
        Status::from(self.class())
    }

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type TruelyResult<T> = Result<T, Box<dyn TruelyError>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found at '{path}'")]
    ConfigNotFound { path: String },

    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl TruelyError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn class(&self) -> ErrorClass {
        match self {
            ConfigError::ConfigNotFound { .. } | ConfigError::IoError { .. } => {
                ErrorClass::IoFailure
            }
            ConfigError::ConfigParseError { .. } | ConfigError::InvalidConfiguration { .. } => {
                ErrorClass::ContractViolation
            }
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. } | ConfigError::InvalidConfiguration { .. }
        )
    }
}

use crate::errors::{ErrorClass, TruelyError};

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Invalid PID: {pid}")]
    InvalidPid { pid: i32 },

    #[error("Process '{pid}' not found or has no resolvable name")]
    NotFound { pid: i32 },

    #[error("Executable path unavailable for process '{pid}'")]
    PathUnavailable { pid: i32 },

    #[error("Process table query failed: {message}")]
    TableQueryFailed { message: String },

    #[error("Process table query returned no entries")]
    EmptyTable,

    #[error("Failed to allocate process buffer of {requested} entries")]
    AllocationFailed { requested: usize },
}

impl TruelyError for ProcessError {
    fn error_code(&self) -> &'static str {
        match self {
            ProcessError::InvalidPid { .. } => "PROCESS_INVALID_PID",
            ProcessError::NotFound { .. } => "PROCESS_NOT_FOUND",
            ProcessError::PathUnavailable { .. } => "PROCESS_PATH_UNAVAILABLE",
            ProcessError::TableQueryFailed { .. } => "PROCESS_TABLE_QUERY_FAILED",
            ProcessError::EmptyTable => "PROCESS_TABLE_EMPTY",
            ProcessError::AllocationFailed { .. } => "PROCESS_ALLOCATION_FAILED",
        }
    }

    fn class(&self) -> ErrorClass {
        match self {
            ProcessError::InvalidPid { .. } | ProcessError::EmptyTable => {
                ErrorClass::ContractViolation
            }
            ProcessError::NotFound { .. }
            | ProcessError::PathUnavailable { .. }
            | ProcessError::TableQueryFailed { .. } => ErrorClass::EnvironmentFailure,
            ProcessError::AllocationFailed { .. } => ErrorClass::ResourceExhaustion,
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, ProcessError::InvalidPid { .. })
    }
}

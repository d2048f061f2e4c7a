use thiserror::Error;

/// Tool dispatch failure kinds.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unsafe code rejected: {0}")]
    UnsafeCode(String),
    #[error("tool timed out")]
    Timeout,
    #[error("sandbox error: {0}")]
    SandboxError(String),
    #[error("tool not found: {0}")]
    ToolNotFound(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, ToolError>;

impl From<ToolError> for context::RelayError {
    fn from(error: ToolError) -> Self {
        match error {
            ToolError::UnsafeCode(detail) => context::RelayError::UnsafeCode(detail),
            ToolError::Timeout => context::RelayError::SandboxTimeout,
            ToolError::SandboxError(detail) => context::RelayError::SandboxError(detail),
            ToolError::ToolNotFound(name) => context::RelayError::NotFound(name),
            ToolError::InvalidPath(detail) => context::RelayError::BadRequest(detail),
        }
    }
}

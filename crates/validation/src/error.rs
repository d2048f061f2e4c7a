use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("sandbox error during post-validation: {0}")]
    Sandbox(String),
    #[error("reviewer model pass failed: {0}")]
    Review(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;

impl From<tools::ToolError> for ValidationError {
    fn from(error: tools::ToolError) -> Self {
        ValidationError::Sandbox(error.to_string())
    }
}

impl From<generation::GenerationError> for ValidationError {
    fn from(error: generation::GenerationError) -> Self {
        ValidationError::Review(error.to_string())
    }
}

impl From<ValidationError> for context::RelayError {
    fn from(error: ValidationError) -> Self {
        context::RelayError::Internal(error.to_string())
    }
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerationError>;

/// Substring the backend uses to report it could not fit a model in memory.
const MEMORY_PRESSURE_SENTINEL: &str = "not enough memory";

/// Errors from talking to the LM backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("backend returned {status}: {body}")]
    Backend { status: u16, body: String },
    #[error("connection error: {0}")]
    Connect(String),
    #[error("request timed out")]
    Timeout,
    #[error("failed to decode backend response: {0}")]
    Decode(String),
}

impl GenerationError {
    pub fn from_backend_status(status: u16, body: String) -> Self {
        Self::Backend { status, body }
    }

    pub fn from_backend_body(body: String) -> Self {
        Self::Backend { status: 200, body }
    }

    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() { Self::Timeout } else { Self::Connect(err.to_string()) }
    }

    /// Whether this error matches the backend's memory-pressure sentinel,
    /// which triggers a single fallback attempt instead of surfacing as a
    /// user-facing error.
    pub fn is_memory_pressure(&self) -> bool {
        match self {
            Self::Backend { body, .. } => body.to_ascii_lowercase().contains(MEMORY_PRESSURE_SENTINEL),
            _ => false,
        }
    }
}

impl From<GenerationError> for context::RelayError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Timeout => context::RelayError::Timeout,
            other => context::RelayError::BackendError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_the_memory_pressure_sentinel_case_insensitively() {
        let err = GenerationError::from_backend_body("Error: NOT ENOUGH MEMORY to load model".to_string());
        assert!(err.is_memory_pressure());
    }

    #[test]
    fn other_backend_errors_are_not_memory_pressure() {
        let err = GenerationError::from_backend_status(500, "internal error".to_string());
        assert!(!err.is_memory_pressure());
    }
}

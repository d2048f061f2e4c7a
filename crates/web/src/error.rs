use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("search request failed: {0}")]
    Request(String),
    #[error("no search results")]
    Empty,
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("blocked url: {0}")]
    Blocked(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, WebError>;

impl From<WebError> for context::RelayError {
    fn from(error: WebError) -> Self {
        match error {
            WebError::Empty => context::RelayError::UpstreamUnavailable("web search returned no results".to_string()),
            WebError::InvalidUrl(detail) => context::RelayError::BadRequest(detail),
            WebError::Blocked(detail) => context::RelayError::BadRequest(format!("blocked url: {detail}")),
            WebError::Request(detail) | WebError::Fetch(detail) => context::RelayError::UpstreamUnavailable(detail),
        }
    }
}

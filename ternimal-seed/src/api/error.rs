use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// True when the error came from a non-success HTTP status rather than
    /// transport or decoding. Duplicate registration shows up this way.
    pub fn is_status(&self) -> bool {
        matches!(
            self,
            ApiError::Api(_) | ApiError::NotFound(_) | ApiError::BadRequest(_)
        )
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

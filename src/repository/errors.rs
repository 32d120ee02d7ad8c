use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("voucher not found")]
    NotFound,

    /// Message reported by the backend for a rejected operation. Shown to the
    /// user verbatim.
    #[error("{0}")]
    Remote(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed server response: {0}")]
    Decode(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(feature = "http")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            RepositoryError::Network(err.to_string())
        } else if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else {
            RepositoryError::Unexpected(err.to_string())
        }
    }
}

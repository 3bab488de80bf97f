use std::time::Duration;

use thiserror::Error;

/// Failure of a single file listing fetch.
///
/// An empty listing is not an error: `[]` decodes successfully and yields an
/// empty list.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, reset mid-body and similar transport errors.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The server answered with a non-2xx status.
    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },
    /// The body was not a JSON array of strings.
    #[error("Malformed file list: {0}")]
    Decode(#[from] serde_json::Error),
    /// The caller-side deadline elapsed before the server answered.
    #[error("Request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),
    /// Failure raised by a non-HTTP fetcher implementation.
    #[error("Fetch failed: {0}")]
    Other(String),
}

impl FetchError {
    /// Connectivity class of failure (transport, status or timeout), as opposed to
    /// a body that arrived but could not be decoded.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Status { .. } | FetchError::Timeout(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err)
    }
}

/// A type alias for `Result<T, FetchError>`.
pub type FetchResult<T> = Result<T, FetchError>;

// Status Source Port
// Abstraction over whatever serves the list of running jobs

use crate::domain::{RawHistoryRecord, RawJobRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Fetch errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Request failed or the service answered with a non-success status
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Client error: {0}")]
    Client(String),
}

impl FetchError {
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Status source trait
///
/// Implementations:
/// - StatusClient (jobby-client): HTTP GET against the status service
/// - fixed in-memory sources in tests
///
/// A single call issues at most one request. No retries, no caching.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch the currently running jobs
    async fn fetch(&self) -> FetchResult<Vec<RawJobRecord>>;

    /// Fetch recorded runs whose job name starts with `prefix`
    async fn fetch_history(&self, prefix: &str) -> FetchResult<Vec<RawHistoryRecord>>;
}

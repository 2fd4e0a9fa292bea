//! Mapping of transport errors onto the core fetch taxonomy

use jobby_core::port::FetchError;

/// Classify a reqwest failure as a decode or a network problem
pub(crate) fn from_reqwest(e: reqwest::Error) -> FetchError {
    if e.is_decode() {
        FetchError::Decode(e.to_string())
    } else if e.is_builder() {
        FetchError::Client(e.to_string())
    } else {
        FetchError::Network(describe(&e))
    }
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {}", e)
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

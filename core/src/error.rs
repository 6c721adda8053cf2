//! Error types for the catalog fetch pipeline.
//!
//! # Design
//! Three outcomes end a fetch early: the request URL could not be built, the
//! server (or the transport underneath it) did not deliver a 2xx response, or
//! the body did not match the expected schema. Each variant carries only owned
//! strings so the error can be cloned onto every error-stream subscriber.
//!
//! Per-entry mapping problems (an unparsable resource URL, an unknown type
//! tag) are not errors at all; the mapper drops or nulls that one field.

use thiserror::Error;

/// Why a request produced no usable payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataFetchFailure {
    /// The server answered with a status outside `200..300`.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The request never produced a response (DNS, connect, I/O, ...).
    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors surfaced by `Fetcher::fetch` and published on error streams.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The URL could not be parsed. Nothing was sent.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("data fetch failed: {0}")]
    DataFetchFailure(#[from] DataFetchFailure),

    /// The body could not be deserialized into the expected type.
    #[error("decoding failed: {0}")]
    DecodingFailure(String),
}

impl FetchError {
    pub(crate) fn invalid_url(url: &str, err: url::ParseError) -> Self {
        FetchError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }

    /// The HTTP status that caused this error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::DataFetchFailure(DataFetchFailure::Status(status)) => Some(*status),
            _ => None,
        }
    }
}

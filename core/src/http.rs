//! HTTP transport types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. The fetcher builds an `HttpRequest`,
//! hands it to a `Transport`, and interprets the `HttpResponse` it gets back.
//! Status codes are never treated as transport errors here: a 404 is a
//! perfectly good response, and deciding what it means is the fetcher's job.
//!
//! All fields use owned types so values can move freely between the caller's
//! task and a blocking worker thread.

use std::future::Future;

use url::Url;

use crate::error::{DataFetchFailure, FetchError};

/// A GET request described as plain data. The URL is already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Build a GET request, rejecting malformed URLs before anything is sent.
    pub fn get(url: &str) -> Result<Self, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::invalid_url(url, e))?;
        Ok(Self {
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        })
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one HTTP round-trip.
///
/// Implementations must complete exactly once per call and must not retry.
/// Any response that arrives, whatever its status, is returned as `Ok`.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, DataFetchFailure>> + Send;
}

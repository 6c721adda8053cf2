//! Generic fetch-and-decode primitive.
//!
//! # Design
//! `Fetcher` is the only place network and parsing failures originate. It is
//! constructed explicitly and shared by reference (usually `Arc`) with every
//! accumulator and loader that needs it, so tests can swap the transport for a
//! scripted double. The fetcher keeps no mutable state: concurrent calls are
//! independent and each one completes exactly once.

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{DataFetchFailure, FetchError};
use crate::http::{HttpRequest, HttpResponse, Transport};

#[derive(Debug, Clone)]
pub struct Fetcher<T> {
    transport: T,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `url` once and decode the body as `R`.
    ///
    /// The payload type is always named at the call site:
    /// `fetcher.fetch::<CatalogPage>(&url)`.
    #[instrument(level = "debug", skip(self), fields(payload = std::any::type_name::<R>()))]
    pub async fn fetch<R: DeserializeOwned>(&self, url: &str) -> Result<R, FetchError> {
        let request = HttpRequest::get(url)?;
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, bytes = response.body.len(), "decoding response");
        decode_response(response)
    }
}

/// Check for a 2xx status, then decode the body. Non-2xx bodies are dropped.
pub fn decode_response<R: DeserializeOwned>(response: HttpResponse) -> Result<R, FetchError> {
    check_status(&response)?;
    serde_json::from_slice(&response.body).map_err(|e| FetchError::DecodingFailure(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    Err(DataFetchFailure::Status(response.status).into())
}

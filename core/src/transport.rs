//! `ureq`-backed `Transport`.
//!
//! `ureq` is a blocking client, so each request runs on tokio's blocking pool
//! and the caller's task only awaits the join handle. Automatic
//! status-code-as-error handling is disabled so 4xx/5xx responses come back
//! as data and the fetcher decides what they mean.

use tracing::trace;

use crate::error::DataFetchFailure;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Production transport. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DataFetchFailure> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| DataFetchFailure::Transport(format!("request task failed: {e}")))?
    }
}

fn execute_blocking(
    agent: &ureq::Agent,
    request: HttpRequest,
) -> Result<HttpResponse, DataFetchFailure> {
    let mut builder = agent.get(request.url.as_str());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let mut response = builder
        .call()
        .map_err(|e| DataFetchFailure::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_vec()
        .map_err(|e| DataFetchFailure::Transport(e.to_string()))?;

    trace!(url = %request.url, status, bytes = body.len(), "response received");
    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

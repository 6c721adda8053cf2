//! Scripted `Transport` double for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::DataFetchFailure;
use crate::http::{HttpRequest, HttpResponse, Transport};

pub type Scripted = Result<HttpResponse, DataFetchFailure>;

/// Replays canned responses in order and records every request it sees.
/// Running out of script is a transport error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_urls(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| r.url.to_string())
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DataFetchFailure> {
        self.requests.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(DataFetchFailure::Transport("script exhausted".to_string())))
    }
}

pub fn json_response(status: u16, body: &str) -> Scripted {
    Ok(HttpResponse {
        status,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: body.as_bytes().to_vec(),
    })
}

pub fn status_response(status: u16) -> Scripted {
    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body: Vec::new(),
    })
}

/// A list page whose entries are `(id, name)` pairs.
pub fn page_body(count: u32, has_next: bool, entries: &[(u32, &str)]) -> String {
    let results: Vec<serde_json::Value> = entries
        .iter()
        .map(|(id, name)| {
            serde_json::json!({
                "name": name,
                "url": format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
            })
        })
        .collect();
    serde_json::json!({
        "count": count,
        "next": has_next.then_some("https://pokeapi.co/api/v2/pokemon?offset=20&limit=20"),
        "previous": null,
        "results": results,
    })
    .to_string()
}

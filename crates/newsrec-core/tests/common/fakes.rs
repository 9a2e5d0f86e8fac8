//! In-memory stand-ins for the browser collaborators

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use newsrec_core::{
    Fragment, HttpReply, QueryInput, QueryRenderer, RendererConfig, ResultsRegion, Transport,
    TransportError,
};
use tokio::sync::oneshot;

#[derive(Default)]
pub struct MemoryInput {
    value: RefCell<String>,
}

impl MemoryInput {
    pub fn type_text(&self, text: &str) {
        *self.value.borrow_mut() = text.to_string();
    }
}

impl QueryInput for MemoryInput {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        self.type_text(value);
    }
}

/// Records every full replacement of the results region.
#[derive(Default)]
pub struct MemoryResults {
    replacements: RefCell<Vec<String>>,
}

impl MemoryResults {
    pub fn current(&self) -> String {
        self.replacements.borrow().last().cloned().unwrap_or_default()
    }

    pub fn replacement_count(&self) -> usize {
        self.replacements.borrow().len()
    }
}

impl ResultsRegion for MemoryResults {
    fn replace(&self, fragment: &Fragment) {
        self.replacements
            .borrow_mut()
            .push(fragment.as_str().to_string());
    }
}

/// Answers requests from a queue, in order.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<HttpReply, TransportError>>>,
    calls: RefCell<Vec<(String, String)>>,
}

impl ScriptedTransport {
    pub fn replying(reply: Result<HttpReply, TransportError>) -> Self {
        let transport = Self::default();
        transport.push(reply);
        transport
    }

    pub fn push(&self, reply: Result<HttpReply, TransportError>) {
        self.replies.borrow_mut().push_back(reply);
    }

    /// `(url, body)` of every request sent so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, TransportError> {
        self.calls.borrow_mut().push((url.to_string(), body));
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".into())))
    }
}

/// Holds each request open until the test releases it, keyed by query.
#[derive(Default)]
pub struct GatedTransport {
    gates: RefCell<HashMap<String, oneshot::Receiver<Result<HttpReply, TransportError>>>>,
}

impl GatedTransport {
    pub fn gate(&self, query: &str) -> oneshot::Sender<Result<HttpReply, TransportError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(query.to_string(), rx);
        tx
    }
}

impl Transport for GatedTransport {
    async fn post_json(&self, _url: &str, body: String) -> Result<HttpReply, TransportError> {
        let request: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let query = request["query"].as_str().unwrap_or_default().to_string();
        let gate = self.gates.borrow_mut().remove(&query);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("gate dropped".into()))),
            None => Err(TransportError::Network(format!("no gate for {}", query))),
        }
    }
}

pub type TestRenderer<T> = QueryRenderer<T, MemoryInput, MemoryResults>;

pub fn renderer<T: Transport>(transport: T) -> TestRenderer<T> {
    QueryRenderer::new(
        transport,
        MemoryInput::default(),
        MemoryResults::default(),
        RendererConfig::default(),
    )
}

pub fn ok_json(body: serde_json::Value) -> Result<HttpReply, TransportError> {
    Ok(HttpReply::new(200, body.to_string()))
}

pub fn articles(count: usize) -> serde_json::Value {
    serde_json::Value::Array(
        (0..count)
            .map(|i| {
                serde_json::json!({
                    "title": format!("Story {}", i),
                    "link": format!("https://news.example/{}", i),
                    "similarity_score": 0.9 - i as f64 * 0.1,
                })
            })
            .collect(),
    )
}

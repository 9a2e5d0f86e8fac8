//! The network contract
//!
//! `POST <endpoint>` with `Content-Type: application/json` and body
//! `{"query": "..."}`. A 2xx answer is either a JSON array of articles or
//! `{"error": "..."}`; anything else is a failure. The raw exchange sits
//! behind [`Transport`] so the browser can use `fetch` and tests can use
//! scripted replies.

use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::error::{RecommendError, TransportError};
use crate::model::{Article, RecommendationRequest, RecommendationResult, ResponseBody};

/// Status line and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Raw JSON POST. Implementations only report transport-level failures;
/// every status code, including 4xx/5xx, comes back as `Ok`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, TransportError>;
}

/// Error body of a non-2xx response.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub struct RecommendClient<T> {
    transport: T,
    endpoint: String,
}

impl<T: Transport> RecommendClient<T> {
    pub fn new(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one request and interpret the reply.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Article>, RecommendError> {
        let body = serde_json::to_string(request)
            .map_err(|e| RecommendError::Malformed(format!("Failed to encode request: {}", e)))?;

        debug!(endpoint = %self.endpoint, query = %request.query, "Requesting recommendations");

        let reply = self
            .transport
            .post_json(&self.endpoint, body)
            .await
            .map_err(|e| {
                error!("Error fetching recommendations: {}", e);
                RecommendError::from(e)
            })?;

        interpret_reply(reply)
    }
}

/// Map a completed exchange onto the result/error taxonomy. A 2xx
/// `{"error": ...}` body becomes [`RecommendError::Service`].
pub fn interpret_reply(reply: HttpReply) -> Result<Vec<Article>, RecommendError> {
    if !reply.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&reply.body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {}", reply.status));
        error!(status = reply.status, "Recommendation request failed: {}", message);
        return Err(RecommendError::Http {
            status: reply.status,
            message,
        });
    }

    let body: ResponseBody = serde_json::from_str(&reply.body).map_err(|e| {
        error!("Unreadable recommendation response: {}", e);
        RecommendError::Malformed(e.to_string())
    })?;

    match RecommendationResult::from(body) {
        RecommendationResult::Articles(articles) => Ok(articles),
        RecommendationResult::Error(message) => {
            warn!("Recommendation service reported: {}", message);
            Err(RecommendError::Service(message))
        }
    }
}

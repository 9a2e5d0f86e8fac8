//! The query/render state machine
//!
//! `QueryRenderer` owns the live [`ViewState`] and the only handle to the
//! results region. A search is split in two so callers can keep the
//! synchronous part in the same turn as the user action:
//!
//! 1. [`QueryRenderer::begin_search`] stamps the submission with a new
//!    generation, validates the input and renders the loading state.
//! 2. [`QueryRenderer::complete_search`] awaits the network (the only
//!    suspension point) and renders the outcome, unless a newer submission
//!    happened in the meantime, in which case the settlement is dropped.
//!
//! Every transition replaces the whole region with one fragment.

use std::cell::{Cell, RefCell};

use tracing::debug;

use crate::client::{RecommendClient, Transport};
use crate::config::RendererConfig;
use crate::error::RecommendError;
use crate::model::{Article, Query, RecommendationRequest};
use crate::render::render;
use crate::view::{Fragment, ViewState};

/// The query text field.
pub trait QueryInput {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
}

/// The results container. `replace` swaps its entire content.
pub trait ResultsRegion {
    fn replace(&self, fragment: &Fragment);
}

/// A request that has been issued but not yet settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    generation: u64,
    request: RecommendationRequest,
}

impl PendingSearch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &Query {
        &self.request.query
    }
}

/// How a submission ended for the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// Blank input; nothing was sent.
    Rejected,
    /// The response was rendered and this is the resulting state.
    Rendered(ViewState),
    /// A newer search superseded this one; the view was left alone.
    Stale { generation: u64 },
}

pub struct QueryRenderer<T, I, R> {
    client: RecommendClient<T>,
    input: I,
    results: R,
    config: RendererConfig,
    state: RefCell<ViewState>,
    latest: Cell<u64>,
}

impl<T, I, R> QueryRenderer<T, I, R>
where
    T: Transport,
    I: QueryInput,
    R: ResultsRegion,
{
    pub fn new(transport: T, input: I, results: R, config: RendererConfig) -> Self {
        Self {
            client: RecommendClient::new(transport, config.endpoint.clone()),
            input,
            results,
            config,
            state: RefCell::new(ViewState::default()),
            latest: Cell::new(0),
        }
    }

    /// Overwrite the query field with `topic` and search for it.
    pub async fn apply_preset_query(&self, topic: &str) -> Settlement {
        match self.begin_preset_query(topic) {
            Some(pending) => self.complete_search(pending).await,
            None => Settlement::Rejected,
        }
    }

    /// Synchronous half of [`apply_preset_query`](Self::apply_preset_query).
    pub fn begin_preset_query(&self, topic: &str) -> Option<PendingSearch> {
        self.input.set_value(topic);
        self.begin_search()
    }

    /// Read the query field and run a full search.
    pub async fn submit_query(&self) -> Settlement {
        match self.begin_search() {
            Some(pending) => self.complete_search(pending).await,
            None => Settlement::Rejected,
        }
    }

    /// Validate the current input and enter the loading state.
    ///
    /// Returns `None` after rendering the validation warning when the input
    /// is blank. Nothing is sent in that case, but any search still in
    /// flight is superseded all the same.
    pub fn begin_search(&self) -> Option<PendingSearch> {
        let generation = self.latest.get() + 1;
        self.latest.set(generation);

        let query = match Query::parse(&self.input.value()) {
            Ok(query) => query,
            Err(_) => {
                self.transition(ViewState::AwaitingInput { rejected: true });
                return None;
            }
        };

        debug!(generation, query = %query, "Starting search");

        self.transition(ViewState::Loading {
            query: query.clone(),
        });

        Some(PendingSearch {
            generation,
            request: RecommendationRequest::new(query),
        })
    }

    /// Await the response for `pending` and render it if still current.
    pub async fn complete_search(&self, pending: PendingSearch) -> Settlement {
        let outcome = self.client.recommend(&pending.request).await;

        if pending.generation != self.latest.get() {
            debug!(
                generation = pending.generation,
                latest = self.latest.get(),
                "Discarding stale settlement"
            );
            return Settlement::Stale {
                generation: pending.generation,
            };
        }

        let state = settled_state(pending.request.query, outcome);
        self.transition(state.clone());
        Settlement::Rendered(state)
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Generation of the most recent submission, 0 before any.
    pub fn latest_generation(&self) -> u64 {
        self.latest.get()
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn results(&self) -> &R {
        &self.results
    }

    pub fn transport(&self) -> &T {
        self.client.transport()
    }

    fn transition(&self, state: ViewState) {
        let fragment = render(&state, &self.config);
        self.results.replace(&fragment);
        *self.state.borrow_mut() = state;
    }
}

fn settled_state(query: Query, outcome: Result<Vec<Article>, RecommendError>) -> ViewState {
    match outcome {
        Ok(articles) if articles.is_empty() => ViewState::EmptyResult { query },
        Ok(articles) => ViewState::Populated { query, articles },
        Err(RecommendError::Service(message)) => ViewState::ServerError { message },
        Err(e) => ViewState::NetworkError {
            message: e.to_string(),
        },
    }
}

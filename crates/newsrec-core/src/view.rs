use serde::Serialize;

use crate::model::{Article, Query};

/// What the results region currently shows. Exactly one is live at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    /// Nothing searched yet, or the last submission was blank (`rejected`).
    AwaitingInput { rejected: bool },
    Loading { query: Query },
    Populated { query: Query, articles: Vec<Article> },
    EmptyResult { query: Query },
    ServerError { message: String },
    NetworkError { message: String },
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::AwaitingInput { .. } => "awaiting_input",
            ViewState::Loading { .. } => "loading",
            ViewState::Populated { .. } => "populated",
            ViewState::EmptyResult { .. } => "empty_result",
            ViewState::ServerError { .. } => "server_error",
            ViewState::NetworkError { .. } => "network_error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ViewState::ServerError { .. } | ViewState::NetworkError { .. }
        )
    }
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::AwaitingInput { rejected: false }
    }
}

/// Complete markup for the results region. Always replaces, never appends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    markup: String,
}

impl Fragment {
    pub(crate) fn new(markup: String) -> Self {
        Self { markup }
    }

    pub fn as_str(&self) -> &str {
        &self.markup
    }
}

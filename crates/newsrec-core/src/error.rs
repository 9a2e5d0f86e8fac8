use thiserror::Error;

/// Failure below the HTTP layer: nothing usable came back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u32),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Please enter your news interests before searching.")]
    EmptyQuery,

    /// 2xx response whose body was `{"error": ...}`
    #[error("{0}")]
    Service(String),

    /// Non-2xx response. `message` is the body's `error` field when present.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid renderer config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid renderer config: {0}")]
    Invalid(String),
}

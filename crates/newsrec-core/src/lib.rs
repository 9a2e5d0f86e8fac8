//! News recommendation client core
//!
//! Platform-independent half of the news feed: takes the user's query,
//! asks the recommendation service for ranked articles and turns whatever
//! comes back into markup for the results region.
//!
//! The browser binding (`newsrec-wasm`) supplies a `fetch` transport and DOM
//! handles; everything else, including all rendering decisions, lives here.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod renderer;
pub mod view;

pub use client::{interpret_reply, HttpReply, RecommendClient, Transport};
pub use config::RendererConfig;
pub use error::{ConfigError, RecommendError, TransportError};
pub use model::{Article, Query, RecommendationRequest, RecommendationResult};
pub use render::{render, ArticleCard};
pub use renderer::{PendingSearch, QueryInput, QueryRenderer, ResultsRegion, Settlement};
pub use view::{Fragment, ViewState};

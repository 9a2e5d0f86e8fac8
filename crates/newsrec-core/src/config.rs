//! Renderer configuration
//!
//! Everything the page markup and the service deployment decide for us:
//! where to POST, which elements to drive, and the fixed display strings.
//! Every field has a default so an empty `{}` is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "/api/recommend";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x250?text=No+Image";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Path (or absolute URL) of the recommendation endpoint
    pub endpoint: String,
    /// Persistent header shown above every state
    pub header_title: String,
    /// Id of the query text input
    pub input_id: String,
    /// Id of the results container
    pub results_id: String,
    /// Id given to the count element inside the header
    pub count_id: String,
    /// Image used when an article has none or it fails to load
    pub placeholder_image: String,
    /// Characters of `content` used when an article has no summary
    pub snippet_chars: usize,
    /// Reveal delay added per list position
    pub stagger_ms: u32,
    /// Abort the request after this long. `None` waits forever.
    pub timeout_ms: Option<u32>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            header_title: "📌 Top Stories For You".to_string(),
            input_id: "queryInput".to_string(),
            results_id: "recommendationsList".to_string(),
            count_id: "resultsCount".to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            snippet_chars: 180,
            stagger_ms: 100,
            timeout_ms: None,
        }
    }
}

impl RendererConfig {
    /// Parse a JSON config, filling in defaults for missing fields
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field fails validation
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".into()));
        }
        for (name, id) in [
            ("input_id", &self.input_id),
            ("results_id", &self.results_id),
            ("count_id", &self.count_id),
        ] {
            if id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", name)));
            }
        }
        // Spliced into a single-quoted string inside the image's onerror handler
        if self.placeholder_image.contains(['\'', '\\']) {
            return Err(ConfigError::Invalid(
                "placeholder_image must not contain quotes or backslashes".into(),
            ));
        }
        if self.timeout_ms == Some(0) {
            return Err(ConfigError::Invalid("timeout_ms must be positive".into()));
        }
        Ok(())
    }
}

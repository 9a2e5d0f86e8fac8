//! Wire and domain types for the recommendation contract.

use serde::{Deserialize, Serialize};

use crate::error::RecommendError;

/// Trimmed, non-empty search text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Query(String);

impl Query {
    /// Trim raw input and reject it if nothing is left.
    pub fn parse(raw: &str) -> Result<Self, RecommendError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RecommendError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Query {
    type Error = RecommendError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<Query> for String {
    fn from(query: Query) -> Self {
        query.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sole request payload: `{"query": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub query: Query,
}

impl RecommendationRequest {
    pub fn new(query: Query) -> Self {
        Self { query }
    }
}

/// One ranked result item as returned by the service.
///
/// Every display field is optional; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub similarity_score: f64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Article {
    /// Bare article with only a score, for building fixtures.
    pub fn with_score(similarity_score: f64) -> Self {
        Self {
            title: None,
            link: None,
            summary: None,
            content: None,
            category: None,
            similarity_score,
            image_url: None,
        }
    }
}

/// Decoded 2xx body.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationResult {
    /// Relevance order as returned, possibly empty.
    Articles(Vec<Article>),
    /// Service-reported logical error.
    Error(String),
}

/// Both JSON shapes the service may answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ResponseBody {
    Articles(Vec<Article>),
    Failure { error: String },
}

impl From<ResponseBody> for RecommendationResult {
    fn from(body: ResponseBody) -> Self {
        match body {
            ResponseBody::Articles(articles) => RecommendationResult::Articles(articles),
            ResponseBody::Failure { error } => RecommendationResult::Error(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_trimmed() {
        let query = Query::parse("  climate policy \n").unwrap();
        assert_eq!(query.as_str(), "climate policy");
    }

    #[test]
    fn test_query_rejects_blank() {
        assert_eq!(Query::parse(""), Err(RecommendError::EmptyQuery));
        assert_eq!(Query::parse(" \t\n "), Err(RecommendError::EmptyQuery));
    }

    #[test]
    fn test_query_deserialization_validates() {
        assert!(serde_json::from_str::<Query>(r#""   ""#).is_err());
        assert!(serde_json::from_str::<RecommendationRequest>(r#"{"query":""}"#).is_err());

        let query: Query = serde_json::from_str(r#"" climate policy ""#).unwrap();
        assert_eq!(query.as_str(), "climate policy");
    }

    #[test]
    fn test_request_serializes_as_plain_query() {
        let request = RecommendationRequest::new(Query::parse(" ai ").unwrap());
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"query":"ai"}"#);
    }

    #[test]
    fn test_article_tolerates_missing_and_null_fields() {
        let json = r#"{"title": null, "similarity_score": 0.5, "source": "wire"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article, Article::with_score(0.5));
    }

    #[test]
    fn test_body_list_and_error_shapes() {
        let list: ResponseBody =
            serde_json::from_str(r#"[{"title":"A","similarity_score":0.9}]"#).unwrap();
        assert!(matches!(
            RecommendationResult::from(list),
            RecommendationResult::Articles(ref a) if a.len() == 1
        ));

        let failure: ResponseBody = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(
            RecommendationResult::from(failure),
            RecommendationResult::Error("boom".to_string())
        );
    }

    #[test]
    fn test_body_rejects_other_objects() {
        assert!(serde_json::from_str::<ResponseBody>(r#"{"results":[]}"#).is_err());
        assert!(serde_json::from_str::<ResponseBody>(r#"[{"title":"no score"}]"#).is_err());
    }
}

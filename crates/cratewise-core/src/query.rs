//! User queries and the request body sent to the recommendation backend.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when user input is rejected before any network activity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The query is empty or whitespace-only.
    #[error("please describe what you need")]
    EmptyQuery,
}

/// A validated, trimmed, non-empty query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query(String);

impl Query {
    /// Validate `text` and store it trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyQuery`] if nothing remains after trimming.
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Return the query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /api/recommend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// What the user is looking for.
    pub query: String,
    /// Optional hint narrowing the recommendation; omitted on the wire when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl QueryRequest {
    /// Build a request from a validated query. Blank context is dropped.
    #[must_use]
    pub fn new(query: Query, context: Option<&str>) -> Self {
        let context = context
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToOwned::to_owned);
        Self {
            query: query.0,
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_context_is_dropped() {
        let req = QueryRequest::new(Query::new("http client").unwrap(), Some("   "));
        assert_eq!(req.context, None);
    }

    #[test]
    fn context_is_omitted_from_json_when_absent() {
        let req = QueryRequest::new(Query::new("http client").unwrap(), None);
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"query":"http client"}"#);
    }

    #[test]
    fn context_is_serialized_when_present() {
        let req = QueryRequest::new(Query::new("http client").unwrap(), Some("async web server"));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["context"], "async web server");
    }
}

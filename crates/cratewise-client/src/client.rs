//! Recommendation client trait and `reqwest`-backed implementation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use cratewise_core::query::QueryRequest;
use log::debug;

use crate::error::ClientError;

/// Boxed future returned by dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Longest error body kept in [`ClientError::UnexpectedStatus`].
const MAX_ERROR_BODY: usize = 512;

/// A response as received from the backend, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Communicates with a recommendation backend.
pub trait RecommendClient: Send + Sync {
    /// Send one recommendation request and return whatever came back.
    ///
    /// Non-success statuses are returned as responses, not errors; only a
    /// request that produced no response at all is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the backend could not be reached or the
    /// body could not be read.
    fn recommend<'a>(
        &'a self,
        request: &'a QueryRequest,
    ) -> BoxFuture<'a, Result<RawResponse, ClientError>>;

    /// Probe the backend's health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure or a non-success status.
    fn health(&self) -> BoxFuture<'_, Result<(), ClientError>>;
}

/// `reqwest`-backed implementation of [`RecommendClient`].
#[derive(Debug, Clone)]
pub struct HttpRecommendClient {
    base_url: String,
    http: Arc<reqwest::Client>,
}

impl HttpRecommendClient {
    /// Create a new client targeting `base_url`, with no request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(base_url, reqwest::Client::new())
    }

    /// Create a new client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] if the TLS backend cannot be initialised.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;
        Ok(Self::with_http(base_url, http))
    }

    fn with_http(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http: Arc::new(http),
        }
    }

    /// The backend base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl RecommendClient for HttpRecommendClient {
    fn recommend<'a>(
        &'a self,
        request: &'a QueryRequest,
    ) -> BoxFuture<'a, Result<RawResponse, ClientError>> {
        Box::pin(async move {
            let url = format!("{}/api/recommend", self.base_url);
            debug!("requesting recommendations from {url}");

            let resp = self.http.post(&url).json(request).send().await?;
            let status = resp.status().as_u16();
            // A received status is never a transport failure.
            let body = if resp.status().is_success() {
                resp.text().await?
            } else {
                resp.text().await.unwrap_or_default()
            };

            debug!("backend answered {status} with {} bytes", body.len());
            Ok(RawResponse { status, body })
        })
    }

    fn health(&self) -> BoxFuture<'_, Result<(), ClientError>> {
        Box::pin(async move {
            let url = format!("{}/health", self.base_url);
            debug!("probing {url}");

            let resp = self.http.get(&url).send().await?;
            let status = resp.status();
            if status.is_success() {
                return Ok(());
            }
            let mut body = resp.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            })
        })
    }
}

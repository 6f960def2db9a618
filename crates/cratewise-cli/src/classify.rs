//! Mapping of every submission failure to one user-facing message.

use cratewise_client::client::RawResponse;
use cratewise_client::error::ClientError;
use cratewise_core::normalize::normalize;
use cratewise_core::query::ValidationError;
use cratewise_core::types::CrateInfo;
use serde_json::Value;
use thiserror::Error;

const EMPTY_RESULT_FALLBACK: &str =
    "no matching crates found; try different keywords or add more context";

/// The single classification of a submission that did not produce crates.
///
/// `Display` is the message shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Failure {
    /// The query was rejected before any network activity.
    #[error("{0}")]
    Validation(ValidationError),
    /// The backend could not be reached.
    #[error("cannot reach the recommendation server")]
    Network {
        /// Transport error detail, for logs.
        reason: String,
    },
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Http {
        /// HTTP status code received.
        status: u16,
        /// Backend explanation, or a message naming the status.
        message: String,
    },
    /// The response arrived but did not have the expected shape.
    #[error("invalid response format")]
    Parse {
        /// Normalization error detail, for logs.
        reason: String,
    },
    /// The backend found nothing; carries its explanation.
    #[error("{0}")]
    EmptyResult(String),
}

impl Failure {
    /// Build a [`Failure::Http`], preferring a non-blank backend explanation.
    #[must_use]
    pub fn http(status: u16, explanation: Option<&str>) -> Self {
        let message = match explanation.map(str::trim).filter(|e| !e.is_empty()) {
            Some(e) => e.to_owned(),
            None => format!("request failed with status {status}"),
        };
        Self::Http { status, message }
    }

    /// Build an [`Failure::EmptyResult`], falling back to a fixed hint.
    #[must_use]
    pub fn empty_result(explanation: &str) -> Self {
        let explanation = explanation.trim();
        if explanation.is_empty() {
            Self::EmptyResult(EMPTY_RESULT_FALLBACK.to_owned())
        } else {
            Self::EmptyResult(explanation.to_owned())
        }
    }
}

impl From<ValidationError> for Failure {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

/// Classify the outcome of one backend round trip.
///
/// Returns the ranked crates when the backend answered successfully with a
/// well-formed, non-empty list.
///
/// # Errors
///
/// Returns the one [`Failure`] that applies otherwise.
pub fn classify(outcome: Result<RawResponse, ClientError>) -> Result<Vec<CrateInfo>, Failure> {
    let raw = outcome.map_err(|e| Failure::Network {
        reason: e.to_string(),
    })?;

    if !raw.is_success() {
        return Err(Failure::http(raw.status, explanation_of(&raw.body).as_deref()));
    }

    let resp = normalize(&raw.body).map_err(|e| Failure::Parse {
        reason: e.to_string(),
    })?;

    if resp.crates.is_empty() {
        return Err(Failure::empty_result(&resp.explanation));
    }
    Ok(resp.crates)
}

/// The `explanation` string of a JSON error body, if it has one.
fn explanation_of(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("explanation")?.as_str().map(ToOwned::to_owned)
}

//! Validation and reshaping of raw `/api/recommend` payloads.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::{CrateInfo, RecommendationResponse};

/// Errors produced while normalizing a response body.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The body is not JSON, or has no `crates` array.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// One entry of `crates` failed field validation.
    #[error("invalid crate at index {index}: {reason}")]
    InvalidEntry {
        /// Position of the entry in `crates`.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
}

/// Parse `body` into a [`RecommendationResponse`], preserving crate order.
///
/// Every entry is type-checked, `score` must be a finite number in `[0, 1]`,
/// and names must be unique. A missing or non-string `explanation` becomes
/// the empty string.
///
/// # Errors
///
/// Returns [`NormalizeError::Malformed`] if the body is not JSON or `crates`
/// is absent or not an array, and [`NormalizeError::InvalidEntry`] for the
/// first entry that fails validation.
pub fn normalize(body: &str) -> Result<RecommendationResponse, NormalizeError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| NormalizeError::Malformed(format!("body is not JSON: {e}")))?;

    let Some(Value::Array(entries)) = value.get("crates") else {
        return Err(NormalizeError::Malformed(
            "`crates` is missing or not an array".to_owned(),
        ));
    };

    let mut seen = HashSet::with_capacity(entries.len());
    let mut crates = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let info = CrateInfo::deserialize(entry).map_err(|e| NormalizeError::InvalidEntry {
            index,
            reason: e.to_string(),
        })?;
        check_entry(&info).map_err(|reason| NormalizeError::InvalidEntry { index, reason })?;
        if !seen.insert(info.name.clone()) {
            return Err(NormalizeError::InvalidEntry {
                index,
                reason: format!("duplicate crate name '{}'", info.name),
            });
        }
        crates.push(info);
    }

    let explanation = value
        .get("explanation")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    Ok(RecommendationResponse {
        crates,
        explanation,
    })
}

fn check_entry(info: &CrateInfo) -> Result<(), String> {
    if info.name.trim().is_empty() {
        return Err("crate name is empty".to_owned());
    }
    if !info.score.is_finite() || !(0.0..=1.0).contains(&info.score) {
        return Err(format!("score {} is outside [0, 1]", info.score));
    }
    Ok(())
}

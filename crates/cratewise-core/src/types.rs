//! Recommended crates and the backend response that carries them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single recommended crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrateInfo {
    /// Crate name; unique within one response.
    pub name: String,
    /// One-line description.
    #[serde(default)]
    pub description: String,
    /// Newest published version.
    pub version: String,
    /// All-time download count.
    pub downloads: u64,
    /// When the crate was last published.
    pub last_updated: DateTime<Utc>,
    /// Backend relevance score, conventionally in `[0, 1]`.
    pub score: f64,
    /// Source repository URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// Documentation URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Keywords, in the order the backend lists them.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Single link, supplied by backends using [`LinkShape::Single`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CrateInfo {
    /// Labelled links to display for this crate under `shape`.
    #[must_use]
    pub fn links(&self, shape: LinkShape) -> Vec<(&'static str, &str)> {
        match shape {
            LinkShape::Split => [
                ("repository", self.repository.as_deref()),
                ("docs", self.documentation.as_deref()),
            ]
            .into_iter()
            .filter_map(|(label, link)| link.map(|l| (label, l)))
            .collect(),
            LinkShape::Single => self.url.as_deref().map(|l| ("url", l)).into_iter().collect(),
        }
    }
}

/// Ranked recommendations returned by `POST /api/recommend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Crates in ranking order.
    pub crates: Vec<CrateInfo>,
    /// Backend rationale; the reason for an empty `crates` list.
    #[serde(default)]
    pub explanation: String,
}

/// Error returned when a link shape name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown link shape '{0}', expected 'split' or 'single'")]
pub struct UnknownLinkShape(pub String);

/// Which link fields the backend fills in for each crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkShape {
    /// Separate `repository` and `documentation` fields.
    #[default]
    Split,
    /// A single `url` field.
    Single,
}

impl FromStr for LinkShape {
    type Err = UnknownLinkShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "split" => Ok(Self::Split),
            "single" => Ok(Self::Single),
            _ => Err(UnknownLinkShape(s.to_owned())),
        }
    }
}

impl fmt::Display for LinkShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Split => "split",
            Self::Single => "single",
        })
    }
}

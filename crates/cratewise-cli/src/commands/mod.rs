//! CLI subcommand implementations.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use cratewise_client::client::HttpRecommendClient;

use crate::config::CliConfig;
use crate::notify::TerminalNotifier;
use crate::recommender::Recommender;

pub mod health;
pub mod recommend;
pub mod shell;
pub mod show_config;

/// Build the HTTP client described by `cfg`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_client(cfg: &CliConfig) -> Result<HttpRecommendClient> {
    if cfg.timeout_secs == 0 {
        return Ok(HttpRecommendClient::new(&cfg.backend_url));
    }
    Ok(HttpRecommendClient::with_timeout(
        &cfg.backend_url,
        Duration::from_secs(cfg.timeout_secs),
    )?)
}

/// Build a [`Recommender`] that talks to the configured backend and reports
/// notices on the terminal.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_recommender(cfg: &CliConfig) -> Result<Recommender> {
    Ok(Recommender::new(
        Arc::new(build_client(cfg)?),
        Arc::new(TerminalNotifier),
        cfg.on_overlap,
    ))
}

//! `cratewise recommend` — one submission.

use anyhow::Result;

use crate::commands::build_recommender;
use crate::config::CliConfig;
use crate::recommender::SubmitOutcome;
use crate::render::render;

/// Run `cratewise recommend <query> [--context <text>]` and print the result.
///
/// A failed submission is reported, not returned as an error.
///
/// # Errors
///
/// Returns an error only if the HTTP client cannot be constructed.
pub async fn run_recommend(cfg: &CliConfig, query: &str, context: Option<&str>) -> Result<()> {
    let recommender = build_recommender(cfg)?;
    if let SubmitOutcome::Committed(state) = recommender.submit(query, context).await {
        print!("{}", render(&state, cfg.link_shape));
    }
    Ok(())
}

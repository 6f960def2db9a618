//! `cratewise health` — probe the backend.

use anyhow::{Context, Result};
use cratewise_client::client::RecommendClient;

use crate::commands::build_client;
use crate::config::CliConfig;

/// Run `cratewise health`.
///
/// # Errors
///
/// Returns an error if the backend is unreachable or reports itself unhealthy.
pub async fn run_health(cfg: &CliConfig) -> Result<()> {
    let client = build_client(cfg)?;
    client
        .health()
        .await
        .with_context(|| format!("backend at {} is not healthy", client.base_url()))?;
    println!("backend at {} is up", client.base_url());
    Ok(())
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cratewise_cli::commands;
use cratewise_cli::config::{default_config_path, resolve_config};

#[derive(Parser)]
#[command(name = "cratewise", about = "Crate recommendations from a plain-language description")]
struct Cli {
    /// Recommendation backend base URL (overrides config and environment)
    #[arg(long, global = true)]
    backend_url: Option<String>,
    /// Config file path
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend crates for a description of what you need
    Recommend {
        /// What you are looking for, e.g. "need an http client"
        query: String,
        /// Extra context to narrow the recommendation
        #[arg(long, short)]
        context: Option<String>,
    },
    /// Read descriptions from stdin and recommend for each
    Shell,
    /// Check that the backend is reachable
    Health,
    /// Print the effective configuration
    Config {
        /// Also save it to the config file
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let path = cli.config.unwrap_or_else(default_config_path);
    let cfg = resolve_config(&path, cli.backend_url.as_deref(), |key| {
        std::env::var(key).ok()
    })?;
    log::debug!("using backend {}", cfg.backend_url);

    match cli.command {
        Commands::Recommend { query, context } => {
            commands::recommend::run_recommend(&cfg, &query, context.as_deref()).await?;
        }
        Commands::Shell => commands::shell::run_shell(&cfg).await?,
        Commands::Health => commands::health::run_health(&cfg).await?,
        Commands::Config { write } => {
            commands::show_config::run_show_config(&cfg, write.then_some(path.as_path()))?;
        }
    }
    Ok(())
}

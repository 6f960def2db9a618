//! `cratewise shell` — repeated submissions from stdin.

use std::io::{BufRead, Write};

use anyhow::Result;
use cratewise_core::types::LinkShape;

use crate::commands::build_recommender;
use crate::config::CliConfig;
use crate::recommender::{Recommender, SubmitOutcome};
use crate::render::render;

/// Separates the query from its optional context on one input line.
///
/// Spaces on both sides keep flags like `--verbose` inside a query.
pub const CONTEXT_SEPARATOR: &str = " -- ";

/// Run `cratewise shell` on stdin/stdout.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the terminal fails.
pub async fn run_shell(cfg: &CliConfig) -> Result<()> {
    let recommender = build_recommender(cfg)?;
    let stdin = std::io::stdin();
    println!("Describe what you need (append ` -- ` and context to narrow it; `quit` to leave).");
    shell_loop(&recommender, cfg.link_shape, stdin.lock(), std::io::stdout()).await
}

/// Read queries from `input` until EOF or `quit`, writing each committed
/// state to `out`.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `out` fails.
pub async fn shell_loop<R, W>(
    recommender: &Recommender,
    shape: LinkShape,
    mut input: R,
    mut out: W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let entry = line.trim_end_matches(['\r', '\n']);
        if matches!(entry.trim(), "quit" | "exit") {
            break;
        }
        let (query, context) = match entry.split_once(CONTEXT_SEPARATOR) {
            Some((query, context)) => (query, Some(context)),
            None => (entry, None),
        };
        if let SubmitOutcome::Committed(state) = recommender.submit(query, context).await {
            write!(out, "{}", render(&state, shape))?;
        }
    }
    writeln!(out)?;
    Ok(())
}

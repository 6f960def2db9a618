//! Plain-text rendering of a [`ResultState`].

use cratewise_core::display::{format_date, format_downloads, format_score};
use cratewise_core::types::{CrateInfo, LinkShape};

use crate::state::ResultState;

/// Render `state` for a terminal, showing the links `shape` selects.
#[must_use]
pub fn render(state: &ResultState, shape: LinkShape) -> String {
    let mut lines = Vec::new();
    match state {
        ResultState::Idle => lines.push("Describe what you need to get crate recommendations.".to_owned()),
        ResultState::Loading => lines.push("Searching...".to_owned()),
        ResultState::Error(message) => lines.push(format!("Something went wrong: {message}")),
        ResultState::Success(crates) => {
            lines.push("Recommendations".to_owned());
            for (rank, krate) in crates.iter().enumerate() {
                lines.push(String::new());
                render_crate(&mut lines, rank + 1, krate, shape);
            }
        }
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_crate(lines: &mut Vec<String>, rank: usize, krate: &CrateInfo, shape: LinkShape) {
    lines.push(format!("{rank}. {} ({})", krate.name, format_score(krate.score)));
    if !krate.description.is_empty() {
        lines.push(format!("   {}", krate.description));
    }
    lines.push(format!(
        "   version {} | {} downloads | updated {}",
        krate.version,
        format_downloads(krate.downloads),
        format_date(&krate.last_updated),
    ));
    if !krate.keywords.is_empty() {
        lines.push(format!("   keywords: {}", krate.keywords.join(", ")));
    }
    for (label, link) in krate.links(shape) {
        lines.push(format!("   {label}: {link}"));
    }
}

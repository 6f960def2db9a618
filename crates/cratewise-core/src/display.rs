//! Presentation helpers shared by renderers.

use chrono::{DateTime, Utc};

/// Render a relevance score as a whole percentage, e.g. `0.92` → `92%`.
#[must_use]
pub fn format_score(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

/// Render a download count with thousands separators, e.g. `5,000,000`.
#[must_use]
pub fn format_downloads(downloads: u64) -> String {
    let digits = downloads.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render a timestamp as a calendar date.
#[must_use]
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

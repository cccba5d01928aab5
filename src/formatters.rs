//! Display helpers for result strings, dates, and text snippets.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static METRIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+%|\d+x|\d+\+)").expect("metric regex should compile")
});

static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+%|\d+x|\d+\+|£\d+|€\d+|\$\d+|\d+ days|\d+ hours|\d+ minutes)")
        .expect("emphasis regex should compile")
});

/// Wrap numeric metrics in a result string with `**…**` markers for emphasis
/// in card and detail views.
pub fn emphasize_metrics(result: &str) -> String {
    EMPHASIS_RE.replace_all(result, "**$1**").into_owned()
}

/// Pull the first headline metric (percentage, multiplier, or "N+") out of a
/// result string, if it has one.
pub fn extract_metric(result: &str) -> Option<String> {
    METRIC_RE
        .find(result)
        .map(|m| m.as_str().to_string())
}

/// Cut text to at most `max_chars` characters, trimming trailing whitespace
/// before appending an ellipsis. Short text comes back unchanged.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// Render a review date as e.g. "March 4, 2025".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

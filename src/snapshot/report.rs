//! Parsing of the inspection tool's top report.

use regex::Regex;
use std::sync::OnceLock;

fn total_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"of (\d+)ns total").expect("total pattern is a valid regex"))
}

/// Extract `N` from the first `of <N>ns total` occurrence
///
/// Returns `None` when no line matches or `N` does not fit in a u64.
pub fn parse_total_ns(report: &str) -> Option<u64> {
    total_pattern()
        .captures(report)
        .and_then(|caps| caps[1].parse().ok())
}

//! Human-readable report blocks.
//!
//! Each function renders one block of the stdout report. The command
//! layer prints them in order, separated by blank lines.

use crate::compare::{ComparisonResult, Verdict};
use crate::snapshot::SnapshotSummary;
use crate::source::SourceSummary;
use crate::utils::error::SnapshotError;
use colored::Colorize;
use num_format::{Locale, ToFormattedString};
use std::path::Path;

/// Format an integer with `,` thousands separators
///
/// The locale is fixed so the report does not vary between machines.
pub fn format_thousands(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Source trace block
pub fn format_source_summary(input: &Path, summary: &SourceSummary) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Input JSON: {}", input.display()));
    lines.push(format!(
        "  Total X events with dur > 0: {}",
        summary.event_count
    ));
    lines.push(format!(
        "  Complete events: {} of {} ({} skipped with dur <= 0)",
        summary.complete_events, summary.total_events, summary.skipped_non_positive
    ));
    lines.push(format!(
        "  Total duration (sum of all): {} ns",
        format_thousands(summary.total_duration_ns)
    ));
    lines.push(format!(
        "  Total duration: {:.3} seconds",
        summary.total_seconds()
    ));
    lines.join("\n")
}

/// Snapshot block; an error renders as an "unavailable" line
pub fn format_snapshot_summary(
    output: &Path,
    snapshot: Result<&SnapshotSummary, &SnapshotError>,
) -> String {
    let mut lines = vec![format!("Output pprof: {}", output.display())];

    match snapshot {
        Ok(summary) => {
            lines.push(format!(
                "  Total duration: {} ns",
                format_thousands(summary.total_duration_ns)
            ));
            lines.push(format!(
                "  Total duration: {:.3} seconds",
                summary.total_seconds()
            ));
            if summary.defaulted {
                lines.push("  (no total reported; defaulted to 0)".to_string());
            }
        }
        Err(err) => lines.push(format!("  Total duration unavailable: {}", err)),
    }

    lines.join("\n")
}

/// Comparison block; `None` means there was no snapshot total to compare
pub fn format_comparison(result: Option<&ComparisonResult>) -> String {
    let mut lines = vec!["Comparison:".to_string()];

    match result {
        Some(result) => {
            lines.push(format!(
                "  Difference: {} ns ({:.6}%)",
                format_thousands(result.diff_ns),
                result.diff_percent
            ));
            let marker = match result.verdict {
                Verdict::Pass => "✓ Conversion accurate".green().to_string(),
                Verdict::Fail => "✗ Significant discrepancy detected".red().to_string(),
            };
            lines.push(format!("  {}", marker));
        }
        None => {
            lines.push(format!("  {}", "✗ Snapshot total unavailable".red()));
        }
    }

    lines.join("\n")
}

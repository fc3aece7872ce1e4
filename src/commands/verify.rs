//! Verify command implementation.
//!
//! The verify command:
//! 1. Sums complete-event durations in the source trace
//! 2. Reads the aggregate total of the converted snapshot
//! 3. Compares the two totals against the tolerance
//! 4. Prints the report and optionally writes it as JSON

use super::models::VerifyArgs;
use crate::compare::{compare_totals, Tolerance};
use crate::output::{
    format_comparison, format_snapshot_summary, format_source_summary, write_report,
    VerificationReport,
};
use crate::snapshot::{analyze_snapshot, Inspector};
use crate::source::analyze_source;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the verify command
///
/// **Public** - main entry point called from main.rs
///
/// Source trace errors are returned. An unavailable snapshot total is
/// not an error here: it is reported and the returned report has
/// `passed == false`.
///
/// # Errors
/// * Trace read/format errors
/// * Report write errors
pub fn execute_verify(args: &VerifyArgs, inspector: &dyn Inspector) -> Result<VerificationReport> {
    let start_time = Instant::now();

    let source = analyze_source(&args.input)
        .with_context(|| format!("Failed to analyze trace {}", args.input.display()))?;
    println!("{}", format_source_summary(&args.input, &source));

    let snapshot = analyze_snapshot(&args.output, inspector, args.config.missing_total);
    println!();
    println!("{}", format_snapshot_summary(&args.output, snapshot.as_ref()));

    let tolerance = Tolerance::from(&args.config);
    let comparison = snapshot
        .as_ref()
        .ok()
        .map(|s| compare_totals(source.total_duration_ns, s.total_duration_ns, tolerance));
    println!();
    println!("{}", format_comparison(comparison.as_ref()));

    let mut report = VerificationReport::new(&args.input, &args.output, source);
    match snapshot {
        Ok(summary) => report.snapshot_total_ns = Some(summary.total_duration_ns),
        Err(err) => report.snapshot_error = Some(err.to_string()),
    }
    report.passed = comparison.is_some_and(|c| c.verdict.is_pass());
    report.comparison = comparison;

    if let Some(path) = &args.report {
        write_report(&report, path).context("Failed to write verification report")?;
        info!("✓ Report written to: {}", path.display());
    }

    debug!(
        "Verification finished in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Validate verify arguments
///
/// **Public** - can be called before execute_verify for early validation
pub fn validate_args(args: &VerifyArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input trace not found: {}", args.input.display());
    }

    if !args.output.is_file() {
        anyhow::bail!("Output profile not found: {}", args.output.display());
    }

    args.config.validate().context("Invalid configuration")?;

    Ok(())
}

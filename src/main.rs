//! pprof-verify CLI
//!
//! Compares the summed durations of a trace-event JSON file with the
//! total reported for its converted pprof profile.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;
use std::process::ExitCode;

use pprof_verify::commands::{execute_verify, validate_args, VerifyArgs};
use pprof_verify::snapshot::PprofCommand;
use pprof_verify::utils::config::{resolve_config, ConfigOverrides};

/// Verify that a trace-to-pprof conversion preserved total duration
#[derive(Parser, Debug)]
#[command(name = "pprof-verify")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Trace-event JSON input (plain or gzip-compressed)
    input: PathBuf,

    /// Converted pprof profile
    output: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum accepted discrepancy, in percent
    #[arg(long)]
    tolerance: Option<f64>,

    /// Inspection command (default: "go tool pprof")
    #[arg(long)]
    tool: Option<String>,

    /// Seconds to wait for the inspection command
    #[arg(long)]
    timeout: Option<u64>,

    /// Treat a missing snapshot total as 0 instead of failing
    #[arg(long)]
    zero_on_missing_total: bool,

    /// Fail when the source total is 0 but the snapshot total is not
    #[arg(long)]
    strict_zero: bool,

    /// Also write a JSON report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    // Usage errors exit with 1, help and version with 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            return Ok(ExitCode::from(code));
        }
    };

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let overrides = ConfigOverrides {
        tolerance_percent: cli.tolerance,
        tool: cli.tool,
        timeout_secs: cli.timeout,
        zero_on_missing_total: cli.zero_on_missing_total,
        strict_zero_source: cli.strict_zero,
    };
    let config = resolve_config(cli.config.as_deref(), &overrides).with_context(|| {
        match &cli.config {
            Some(path) => format!("Failed to load config {}", path.display()),
            None => "Failed to resolve configuration".to_string(),
        }
    })?;

    let args = VerifyArgs {
        input: cli.input,
        output: cli.output,
        config,
        report: cli.report,
    };

    validate_args(&args)?;

    let inspector = PprofCommand::from_config(&args.config.inspector);
    let report = execute_verify(&args, &inspector)?;

    Ok(if report.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

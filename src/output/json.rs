//! JSON verification report writer.
//!
//! Writes the outcome of one run as a pretty-printed JSON document so
//! CI pipelines can consume it without scraping stdout.

use crate::compare::ComparisonResult;
use crate::source::SourceSummary;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Machine-readable outcome of one verification run
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace-event input path
    pub input: String,

    /// Converted snapshot path
    pub output: String,

    pub source: SourceSummary,

    /// Snapshot total, absent when it could not be obtained
    pub snapshot_total_ns: Option<u64>,

    /// Why the snapshot total is absent
    pub snapshot_error: Option<String>,

    /// Absent when there was no snapshot total to compare
    pub comparison: Option<ComparisonResult>,

    pub passed: bool,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

impl VerificationReport {
    pub fn new(input: &Path, output: &Path, source: SourceSummary) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            input: input.display().to_string(),
            output: output.display().to_string(),
            source,
            snapshot_total_ns: None,
            snapshot_error: None,
            comparison: None,
            passed: false,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Write a verification report to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(
    report: &VerificationReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

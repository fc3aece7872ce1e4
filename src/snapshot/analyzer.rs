//! Snapshot total extraction.

use super::inspector::Inspector;
use super::report::parse_total_ns;
use crate::utils::config::MissingTotalPolicy;
use crate::utils::error::SnapshotError;
use log::{info, warn};
use serde::Serialize;
use std::path::Path;

/// Aggregate total reported for the converted snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    /// Aggregate total in nanoseconds
    pub total_duration_ns: u64,

    /// True when the total was not found and defaulted to 0
    pub defaulted: bool,
}

impl SnapshotSummary {
    pub fn total_seconds(&self) -> f64 {
        self.total_duration_ns as f64 / 1e9
    }
}

/// Obtain the aggregate nanosecond total of a snapshot artifact
///
/// **Public** - SnapshotAnalyzer entry point
///
/// With `MissingTotalPolicy::Error` every failure is returned; with
/// `MissingTotalPolicy::Zero` failures are logged and the total is 0.
///
/// # Errors
/// * `SnapshotError::SpawnFailed` - Inspection program could not be started
/// * `SnapshotError::SubprocessTimeout` - Inspection did not finish in time
/// * `SnapshotError::SnapshotUnavailable` - No total line in the report
pub fn analyze_snapshot(
    artifact: impl AsRef<Path>,
    inspector: &dyn Inspector,
    policy: MissingTotalPolicy,
) -> Result<SnapshotSummary, SnapshotError> {
    let artifact = artifact.as_ref();
    info!("Inspecting snapshot: {}", artifact.display());

    match inspect_total(artifact, inspector) {
        Ok(total_duration_ns) => {
            info!("Snapshot: {} ns", total_duration_ns);
            Ok(SnapshotSummary {
                total_duration_ns,
                defaulted: false,
            })
        }
        Err(err) if policy == MissingTotalPolicy::Zero => {
            warn!("{}; treating snapshot total as 0", err);
            Ok(SnapshotSummary {
                total_duration_ns: 0,
                defaulted: true,
            })
        }
        Err(err) => Err(err),
    }
}

fn inspect_total(artifact: &Path, inspector: &dyn Inspector) -> Result<u64, SnapshotError> {
    let report = inspector.run_inspection(artifact)?;

    parse_total_ns(&report).ok_or_else(|| {
        SnapshotError::SnapshotUnavailable(format!(
            "no `of <N>ns total` line in inspection output ({} bytes)",
            report.len()
        ))
    })
}

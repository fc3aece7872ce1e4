//! Total comparison and verdict.
//!
//! The relative difference is anchored to the source total, so the check
//! is asymmetric: a zero source total cannot express a percentage.

use crate::utils::config::{VerifyConfig, DEFAULT_TOLERANCE_PERCENT};
use log::{debug, warn};
use serde::Serialize;

/// Outcome of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }
}

/// Acceptance policy for a comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Pass iff the difference is strictly below this percentage
    pub percent: f64,

    /// Fail when the source total is 0 but the snapshot total is not
    pub strict_zero_source: bool,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            percent: DEFAULT_TOLERANCE_PERCENT,
            strict_zero_source: false,
        }
    }
}

impl From<&VerifyConfig> for Tolerance {
    fn from(config: &VerifyConfig) -> Self {
        Self {
            percent: config.tolerance_percent,
            strict_zero_source: config.strict_zero_source,
        }
    }
}

/// Difference between the source and snapshot totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Absolute difference in nanoseconds
    pub diff_ns: u64,

    /// Difference as a percentage of the source total (0 when it is 0)
    pub diff_percent: f64,

    pub tolerance_percent: f64,

    pub verdict: Verdict,
}

/// Compare the source total `a` against the snapshot total `b`
///
/// **Public** - Comparator entry point
pub fn compare_totals(a: u64, b: u64, tolerance: Tolerance) -> ComparisonResult {
    let diff_ns = a.abs_diff(b);

    // diff * 100 / a keeps the exact tolerance boundary representable
    let diff_percent = if a > 0 {
        diff_ns as f64 * 100.0 / a as f64
    } else {
        0.0
    };

    let verdict = if a == 0 && b != 0 {
        warn!("Source total is 0 but snapshot total is {} ns", b);
        if tolerance.strict_zero_source {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    } else if diff_percent < tolerance.percent {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    debug!(
        "Compared {} ns vs {} ns: diff {} ns ({:.6}%), {:?}",
        a, b, diff_ns, diff_percent, verdict
    );

    ComparisonResult {
        diff_ns,
        diff_percent,
        tolerance_percent: tolerance.percent,
        verdict,
    }
}

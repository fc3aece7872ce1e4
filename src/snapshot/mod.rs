//! Converted snapshot analysis.
//!
//! The snapshot format is opaque here. An external inspection tool
//! renders a top report and we read its aggregate total line.

pub mod analyzer;
pub mod inspector;
pub mod report;

// Re-export main types
pub use analyzer::{analyze_snapshot, SnapshotSummary};
pub use inspector::{Inspector, PprofCommand};
pub use report::parse_total_ns;

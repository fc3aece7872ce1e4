//! Output rendering for verification results.
//!
//! This module handles:
//! - Text report blocks for stdout
//! - JSON reports for CI consumption

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{write_report, VerificationReport};
pub use text::{format_comparison, format_snapshot_summary, format_source_summary, format_thousands};

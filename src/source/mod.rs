//! Source trace analysis.
//!
//! This module handles:
//! - Loading trace-event JSON (plain or gzip)
//! - Filtering to complete events with a positive duration
//! - Summing durations in nanoseconds

pub mod analyzer;
pub mod loader;
pub mod schema;

// Re-export main types
pub use analyzer::{analyze_source, summarize_events, SourceSummary};
pub use loader::{load_trace_events, parse_document};
pub use schema::{TraceDocument, TraceEvent};

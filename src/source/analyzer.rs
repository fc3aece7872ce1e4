//! Duration aggregation over trace events.
//!
//! Only complete events with a strictly positive duration contribute.
//! Everything else is noise for the conversion check, not an error.

use super::loader::load_trace_events;
use super::schema::TraceEvent;
use crate::utils::config::NANOS_PER_MICRO;
use crate::utils::error::FormatError;
use log::{debug, info};
use serde::Serialize;
use std::path::Path;

/// Aggregate statistics for the source trace
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceSummary {
    /// Events in the document, regardless of phase
    pub total_events: usize,

    /// Events with the complete-event phase
    pub complete_events: usize,

    /// Complete events dropped for a missing, zero or negative duration
    pub skipped_non_positive: usize,

    /// Events that contributed to the total
    pub event_count: usize,

    /// Sum of contributing durations, in nanoseconds
    pub total_duration_ns: u64,
}

impl SourceSummary {
    pub fn total_seconds(&self) -> f64 {
        self.total_duration_ns as f64 / 1e9
    }
}

/// Load a trace file and summarize its durations
///
/// **Public** - SourceAnalyzer entry point
///
/// # Errors
/// Any `FormatError` from loading the document
pub fn analyze_source(path: impl AsRef<Path>) -> Result<SourceSummary, FormatError> {
    let path = path.as_ref();
    info!("Analyzing trace: {}", path.display());

    let events = load_trace_events(path)?;
    let summary = summarize_events(&events);

    info!(
        "Trace: {} contributing events, {} ns",
        summary.event_count, summary.total_duration_ns
    );

    Ok(summary)
}

/// Filter and sum an event collection
pub fn summarize_events(events: &[TraceEvent]) -> SourceSummary {
    let mut summary = SourceSummary {
        total_events: events.len(),
        ..Default::default()
    };
    let mut total_ns = 0.0_f64;

    for event in events.iter().filter(|e| e.is_complete()) {
        summary.complete_events += 1;

        match event.positive_duration() {
            Some(dur_us) => {
                summary.event_count += 1;
                total_ns += dur_us * NANOS_PER_MICRO;
            }
            None => summary.skipped_non_positive += 1,
        }
    }

    summary.total_duration_ns = total_ns.round() as u64;

    debug!(
        "{} events, {} complete, {} skipped for non-positive duration",
        summary.total_events, summary.complete_events, summary.skipped_non_positive
    );

    summary
}

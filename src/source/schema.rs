//! Trace-event document schema.
//!
//! Only the fields the duration check needs are modelled; everything
//! else in an event (name, cat, pid, tid, ts, args, ...) is ignored.

use crate::utils::config::COMPLETE_EVENT_PHASE;
use serde::{Deserialize, Deserializer};

/// Top-level trace document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceDocument {
    /// Event collection; `None` when the key is absent
    #[serde(default, rename = "traceEvents")]
    pub trace_events: Option<Vec<TraceEvent>>,
}

/// A single trace event
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TraceEvent {
    /// Phase tag (`X` for complete events); non-string tags read as `None`
    #[serde(default, deserialize_with = "phase_tag")]
    pub ph: Option<String>,

    /// Duration in microseconds (may be fractional)
    #[serde(default)]
    pub dur: Option<f64>,
}

impl TraceEvent {
    pub fn is_complete(&self) -> bool {
        self.ph.as_deref() == Some(COMPLETE_EVENT_PHASE)
    }

    /// Duration in microseconds if it is strictly positive
    pub fn positive_duration(&self) -> Option<f64> {
        self.dur.filter(|d| *d > 0.0)
    }
}

fn phase_tag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_owned))
}

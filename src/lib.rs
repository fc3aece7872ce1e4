//! pprof-verify
//!
//! Checks that converting a trace-event JSON timeline into a pprof
//! snapshot preserved the total recorded duration.
//!
//! The check sums the durations of complete (`ph == "X"`) events in the
//! source trace, reads the aggregate total the pprof inspection tool
//! reports for the converted profile, and requires the two to agree
//! within a relative tolerance (0.01 % by default).
//!
//! ## Getting Started
//!
//! ```bash
//! pprof-verify trace.json profile.pb.gz
//! ```

pub mod commands;
pub mod compare;
pub mod output;
pub mod snapshot;
pub mod source;
pub mod utils;

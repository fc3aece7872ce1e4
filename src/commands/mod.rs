//! CLI command implementations.
//!
//! Commands orchestrate the analyzers, the comparator and the output
//! writers to perform user tasks.

pub mod models;
pub mod verify;

// Re-export main command functions
pub use models::VerifyArgs;
pub use verify::{execute_verify, validate_args};

use crate::utils::config::VerifyConfig;
use std::path::PathBuf;

/// Arguments for the verify command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct VerifyArgs {
    /// Trace-event JSON input (plain or gzip)
    pub input: PathBuf,

    /// Converted pprof snapshot
    pub output: PathBuf,

    /// Resolved configuration (defaults, config file, CLI flags)
    pub config: VerifyConfig,

    /// Optional path for a JSON report
    pub report: Option<PathBuf>,
}

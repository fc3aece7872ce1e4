//! Configuration and constants for the verifier.
//!
//! Defaults live here as constants. `VerifyConfig` layers an optional
//! TOML file on top of them; `resolve_config` applies CLI overrides last.

use super::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Phase tag of a trace "complete event" (span with start and duration)
pub const COMPLETE_EVENT_PHASE: &str = "X";

/// Trace durations are microseconds, totals are nanoseconds
pub const NANOS_PER_MICRO: f64 = 1_000.0;

/// Maximum accepted discrepancy, in percent of the source total
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 0.01;

/// Default inspection tool invocation (program followed by its base args)
pub const DEFAULT_INSPECTOR_COMMAND: &[&str] = &["go", "tool", "pprof"];

/// Default upper bound on the inspection subprocess
pub const DEFAULT_INSPECTOR_TIMEOUT: Duration = Duration::from_secs(300);

/// Arguments appended after the base command, before the artifact path
pub const INSPECTOR_REPORT_ARGS: &[&str] = &["-top", "-unit=nanoseconds"];

/// What to do when the snapshot total cannot be obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTotalPolicy {
    /// Report the snapshot as unavailable and fail the run
    #[default]
    Error,
    /// Warn and treat the snapshot total as 0
    Zero,
}

/// Inspection tool settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct InspectorConfig {
    /// Program followed by its base arguments, e.g. `["go", "tool", "pprof"]`
    pub command: Vec<String>,

    /// Seconds to wait before killing the subprocess
    pub timeout_secs: u64,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_INSPECTOR_COMMAND
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout_secs: DEFAULT_INSPECTOR_TIMEOUT.as_secs(),
        }
    }
}

impl InspectorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Complete verifier configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct VerifyConfig {
    /// Pass iff the relative difference is strictly below this percentage
    pub tolerance_percent: f64,

    /// Fail instead of passing when the source total is 0 but the snapshot is not
    pub strict_zero_source: bool,

    /// Handling of a snapshot total that could not be obtained
    pub missing_total: MissingTotalPolicy,

    pub inspector: InspectorConfig,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            tolerance_percent: DEFAULT_TOLERANCE_PERCENT,
            strict_zero_source: false,
            missing_total: MissingTotalPolicy::default(),
            inspector: InspectorConfig::default(),
        }
    }
}

impl VerifyConfig {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance_percent.is_finite() || self.tolerance_percent <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance_percent must be a positive number, got {}",
                self.tolerance_percent
            )));
        }

        if self.inspector.command.is_empty() || self.inspector.command[0].trim().is_empty() {
            return Err(ConfigError::Invalid(
                "inspector.command must name a program".to_string(),
            ));
        }

        if self.inspector.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "inspector.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load configuration from a TOML file
///
/// Keys that are absent keep their defaults.
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid or has unknown keys
/// * `ConfigError::Invalid` - If a value is out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<VerifyConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse configuration from TOML text
pub fn parse_config(contents: &str) -> Result<VerifyConfig, ConfigError> {
    let config: VerifyConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Values given on the command line; `None`/`false` leaves the setting alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub tolerance_percent: Option<f64>,

    /// Whitespace-separated program and base args
    pub tool: Option<String>,

    pub timeout_secs: Option<u64>,

    pub zero_on_missing_total: bool,

    pub strict_zero_source: bool,
}

impl VerifyConfig {
    /// Apply command-line overrides on top of this config
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(tolerance) = overrides.tolerance_percent {
            self.tolerance_percent = tolerance;
        }

        if let Some(tool) = &overrides.tool {
            self.inspector.command = tool.split_whitespace().map(str::to_string).collect();
        }

        if let Some(timeout) = overrides.timeout_secs {
            self.inspector.timeout_secs = timeout;
        }

        if overrides.zero_on_missing_total {
            self.missing_total = MissingTotalPolicy::Zero;
        }

        if overrides.strict_zero_source {
            self.strict_zero_source = true;
        }

        self
    }
}

/// Layer an optional config file and command-line overrides over the defaults
///
/// Precedence: built-in defaults < config file < overrides. The result is
/// not validated here; overrides may still put a value out of range.
pub fn resolve_config(
    file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<VerifyConfig, ConfigError> {
    let base = match file {
        Some(path) => load_config(path)?,
        None => VerifyConfig::default(),
    };

    Ok(base.with_overrides(overrides))
}

use pprof_verify::commands::{execute_verify, validate_args, VerifyArgs};
use pprof_verify::compare::Verdict;
use pprof_verify::snapshot::Inspector;
use pprof_verify::utils::config::{MissingTotalPolicy, VerifyConfig};
use pprof_verify::utils::SnapshotError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct FakeInspector(&'static str);

impl Inspector for FakeInspector {
    fn run_inspection(&self, _artifact: &Path) -> Result<String, SnapshotError> {
        Ok(self.0.to_string())
    }
}

const TRACE: &str = r#"{"traceEvents":[{"ph":"X","dur":500},{"ph":"X","dur":0},{"ph":"I","dur":300}]}"#;

fn fixture(dir: &TempDir) -> VerifyArgs {
    let input = dir.path().join("trace.json");
    let output = dir.path().join("profile.pb.gz");
    std::fs::write(&input, TRACE).unwrap();
    std::fs::write(&output, b"\x1f\x8b opaque").unwrap();

    VerifyArgs {
        input,
        output,
        ..Default::default()
    }
}

#[test]
fn test_matching_totals_pass() {
    let dir = TempDir::new().unwrap();
    let args = fixture(&dir);

    let report = execute_verify(&args, &FakeInspector("... of 500000ns total")).unwrap();

    assert_eq!(report.source.event_count, 1);
    assert_eq!(report.source.total_duration_ns, 500_000);
    assert_eq!(report.snapshot_total_ns, Some(500_000));

    let comparison = report.comparison.unwrap();
    assert_eq!(comparison.diff_ns, 0);
    assert_eq!(comparison.diff_percent, 0.0);
    assert_eq!(comparison.verdict, Verdict::Pass);
    assert!(report.passed);
}

#[test]
fn test_discrepancy_fails() {
    let dir = TempDir::new().unwrap();
    let args = fixture(&dir);

    let report = execute_verify(&args, &FakeInspector("... of 400000ns total")).unwrap();

    let comparison = report.comparison.unwrap();
    assert_eq!(comparison.diff_ns, 100_000);
    assert_eq!(comparison.diff_percent, 20.0);
    assert_eq!(comparison.verdict, Verdict::Fail);
    assert!(!report.passed);
}

#[test]
fn test_unavailable_snapshot_fails_without_comparison() {
    let dir = TempDir::new().unwrap();
    let args = fixture(&dir);

    let report = execute_verify(&args, &FakeInspector("no profile")).unwrap();

    assert!(report.snapshot_total_ns.is_none());
    assert!(report.snapshot_error.is_some());
    assert!(report.comparison.is_none());
    assert!(!report.passed);
}

#[test]
fn test_zero_policy_compares_against_zero() {
    let dir = TempDir::new().unwrap();
    let mut args = fixture(&dir);
    args.config = VerifyConfig {
        missing_total: MissingTotalPolicy::Zero,
        ..Default::default()
    };

    let report = execute_verify(&args, &FakeInspector("no profile")).unwrap();

    assert_eq!(report.snapshot_total_ns, Some(0));
    assert_eq!(report.comparison.unwrap().verdict, Verdict::Fail);
    assert!(!report.passed);
}

#[test]
fn test_format_error_propagates() {
    let dir = TempDir::new().unwrap();
    let args = fixture(&dir);
    std::fs::write(&args.input, r#"{"events": []}"#).unwrap();

    let result = execute_verify(&args, &FakeInspector("of 1ns total"));
    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("traceEvents"));
}

#[test]
fn test_report_written() {
    let dir = TempDir::new().unwrap();
    let mut args = fixture(&dir);
    let report_path = dir.path().join("reports/verify.json");
    args.report = Some(report_path.clone());

    execute_verify(&args, &FakeInspector("of 500000ns total")).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(value["passed"], true);
    assert_eq!(value["source"]["total_duration_ns"], 500_000);
    assert_eq!(value["snapshot_total_ns"], 500_000);
    assert_eq!(value["comparison"]["verdict"], "pass");
    assert!(value["generated_at"].is_string());
}

#[test]
fn test_validate_args_requires_existing_files() {
    let dir = TempDir::new().unwrap();
    let args = fixture(&dir);
    assert!(validate_args(&args).is_ok());

    let missing = VerifyArgs {
        output: PathBuf::from("missing.pb.gz"),
        ..args
    };
    assert!(validate_args(&missing).is_err());
}

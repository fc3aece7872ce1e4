use pprof_verify::snapshot::{analyze_snapshot, Inspector, SnapshotSummary};
use pprof_verify::utils::config::MissingTotalPolicy;
use pprof_verify::utils::SnapshotError;
use std::path::Path;

/// Returns canned inspection output
struct FakeInspector(&'static str);

impl Inspector for FakeInspector {
    fn run_inspection(&self, _artifact: &Path) -> Result<String, SnapshotError> {
        Ok(self.0.to_string())
    }
}

/// Always fails like a missing program
struct FailingInspector;

impl Inspector for FailingInspector {
    fn run_inspection(&self, _artifact: &Path) -> Result<String, SnapshotError> {
        Err(SnapshotError::SpawnFailed {
            program: "go".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
    }
}

const TOP_REPORT: &str = "\
File: trace
Type: cpu_time
Showing nodes accounting for 500000ns, 100% of 500000ns total
      flat  flat%   sum%        cum   cum%
  500000ns   100%   100%   500000ns   100%  aten::mm
";

#[test]
fn test_total_extracted() {
    let summary = analyze_snapshot(
        "out.pb.gz",
        &FakeInspector(TOP_REPORT),
        MissingTotalPolicy::Error,
    )
    .unwrap();

    assert_eq!(
        summary,
        SnapshotSummary {
            total_duration_ns: 500_000,
            defaulted: false,
        }
    );
    assert_eq!(summary.total_seconds(), 0.0005);
}

#[test]
fn test_genuine_zero_total() {
    let summary = analyze_snapshot(
        "out.pb.gz",
        &FakeInspector("Showing nodes accounting for 0ns, 0% of 0ns total"),
        MissingTotalPolicy::Error,
    )
    .unwrap();

    assert_eq!(summary.total_duration_ns, 0);
    assert!(!summary.defaulted);
}

#[test]
fn test_missing_total_is_unavailable() {
    let result = analyze_snapshot(
        "out.pb.gz",
        &FakeInspector("failed to fetch any source profiles"),
        MissingTotalPolicy::Error,
    );

    assert!(matches!(result, Err(SnapshotError::SnapshotUnavailable(_))));
}

#[test]
fn test_missing_total_defaults_to_zero() {
    let summary = analyze_snapshot("out.pb.gz", &FakeInspector(""), MissingTotalPolicy::Zero)
        .unwrap();

    assert_eq!(summary.total_duration_ns, 0);
    assert!(summary.defaulted);
}

#[test]
fn test_spawn_failure_policies() {
    let strict = analyze_snapshot("out.pb.gz", &FailingInspector, MissingTotalPolicy::Error);
    assert!(matches!(strict, Err(SnapshotError::SpawnFailed { .. })));

    let lenient =
        analyze_snapshot("out.pb.gz", &FailingInspector, MissingTotalPolicy::Zero).unwrap();
    assert!(lenient.defaulted);
}

#[cfg(unix)]
mod subprocess {
    use pprof_verify::snapshot::{Inspector, PprofCommand};
    use pprof_verify::utils::SnapshotError;
    use std::path::Path;
    use std::time::{Duration, Instant};

    #[test]
    fn test_captures_stdout() {
        let cmd = PprofCommand::new("sh").with_args([
            "-c",
            "echo 'Showing nodes accounting for 42ns, 100% of 42ns total'",
            "sh",
        ]);

        let output = cmd.run_inspection(Path::new("out.pb.gz")).unwrap();
        assert!(output.contains("of 42ns total"));
    }

    #[test]
    fn test_passes_report_args_and_artifact() {
        // "$*" holds the arguments appended after the base command
        let cmd = PprofCommand::new("sh").with_args(["-c", "printf '%s\\n' \"$*\"", "sh"]);

        let output = cmd.run_inspection(Path::new("profile.pb.gz")).unwrap();
        assert_eq!(output.trim(), "-top -unit=nanoseconds profile.pb.gz");
    }

    #[test]
    fn test_nonzero_exit_still_returns_stdout() {
        let cmd = PprofCommand::new("sh").with_args([
            "-c",
            "echo 'of 7ns total'; echo boom >&2; exit 3",
            "sh",
        ]);

        let output = cmd.run_inspection(Path::new("out.pb.gz")).unwrap();
        assert!(output.contains("of 7ns total"));
    }

    #[test]
    fn test_timeout_kills_subprocess() {
        let cmd = PprofCommand::new("sh")
            .with_args(["-c", "exec sleep 5", "sh"])
            .with_timeout(Duration::from_millis(200));

        let started = Instant::now();
        let result = cmd.run_inspection(Path::new("out.pb.gz"));

        assert!(matches!(result, Err(SnapshotError::SubprocessTimeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    /// A live (non-zombie) process with this pid exists
    #[cfg(target_os = "linux")]
    fn is_running(pid: &str) -> bool {
        match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
            Ok(stat) => stat
                .rsplit(')')
                .next()
                .and_then(|rest| rest.split_whitespace().next())
                .is_some_and(|state| state != "Z" && state != "X"),
            Err(_) => false,
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_timeout_kills_forked_tools() {
        let dir = tempfile::TempDir::new().unwrap();
        let pid_file = dir.path().join("grandchild.pid");
        let script = format!("sleep 30 & echo $! > {}; wait", pid_file.display());
        let cmd = PprofCommand::new("sh")
            .with_args(["-c", script.as_str(), "sh"])
            .with_timeout(Duration::from_millis(500));

        let result = cmd.run_inspection(Path::new("out.pb.gz"));
        assert!(matches!(result, Err(SnapshotError::SubprocessTimeout { .. })));

        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let pid = pid.trim();

        let deadline = Instant::now() + Duration::from_secs(3);
        while is_running(pid) && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(!is_running(pid), "forked process {} outlived the timeout", pid);
    }
}

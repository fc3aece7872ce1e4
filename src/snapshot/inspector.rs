//! Inspection tool boundary.
//!
//! The snapshot artifact is opaque to us; an external tool renders a
//! textual top report from it. `Inspector` is the seam that lets tests
//! substitute canned output for the real subprocess.

use crate::utils::config::{InspectorConfig, INSPECTOR_REPORT_ARGS};
use crate::utils::error::SnapshotError;
use log::{debug, warn};
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Produces the textual top report for a snapshot artifact
pub trait Inspector {
    fn run_inspection(&self, artifact: &Path) -> Result<String, SnapshotError>;
}

/// Runs `<program> <base args> -top -unit=nanoseconds <artifact>` as a subprocess
#[derive(Debug, Clone, PartialEq)]
pub struct PprofCommand {
    program: String,
    base_args: Vec<String>,
    timeout: Duration,
}

impl PprofCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
            timeout: InspectorConfig::default().timeout(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from a validated config (first element is the program)
    pub fn from_config(config: &InspectorConfig) -> Self {
        let (program, args) = config
            .command
            .split_first()
            .map(|(p, rest)| (p.clone(), rest.to_vec()))
            .unwrap_or_default();

        Self::new(program)
            .with_args(args)
            .with_timeout(config.timeout())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full command line for `artifact`, for logging
    pub fn describe(&self, artifact: &Path) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.base_args.iter().cloned());
        parts.extend(INSPECTOR_REPORT_ARGS.iter().map(|s| s.to_string()));
        parts.push(artifact.display().to_string());
        parts.join(" ")
    }
}

impl Default for PprofCommand {
    fn default() -> Self {
        Self::from_config(&InspectorConfig::default())
    }
}

impl Inspector for PprofCommand {
    fn run_inspection(&self, artifact: &Path) -> Result<String, SnapshotError> {
        debug!("Running inspection: {}", self.describe(artifact));

        let mut command = Command::new(&self.program);
        command
            .args(&self.base_args)
            .args(INSPECTOR_REPORT_ARGS)
            .arg(artifact)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Own process group, so a timeout also reaches tools the command forks
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = command
            .spawn()
            .map_err(|source| SnapshotError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        // Drain both pipes concurrently so a chatty child cannot block on a full pipe
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let Some(status) = wait_with_deadline(&mut child, self.timeout)? else {
            kill_process_group(&mut child);
            return Err(SnapshotError::SubprocessTimeout {
                program: self.program.clone(),
                timeout: self.timeout,
            });
        };

        let stdout = join_reader(stdout);
        let stderr = join_reader(stderr);

        if !status.success() {
            warn!(
                "Inspection command exited with {}: {}",
                status,
                stderr.trim()
            );
        }

        debug!("Inspection produced {} bytes of output", stdout.len());

        Ok(stdout)
    }
}

/// Poll the child until it exits or `timeout` elapses (`None` on timeout)
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Kill the child and every process in its group, then reap the child
///
/// Once the group is gone the pipes close and the reader threads finish.
fn kill_process_group(child: &mut Child) {
    #[cfg(unix)]
    unsafe {
        // The child leads its own group (spawned with process_group(0))
        libc::killpg(child.id() as libc::pid_t, libc::SIGKILL);
    }
    let _ = child.kill();
    let _ = child.wait();
}

fn spawn_reader<R>(pipe: Option<R>) -> JoinHandle<String>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_reader(handle: JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

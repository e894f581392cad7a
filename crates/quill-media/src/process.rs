//! Subprocess execution.
//!
//! Arguments are handed to the executable as-is; no shell is involved, so
//! URLs with `&` or spaces need no quoting.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::{MediaError, Result};

/// How to run one process.
#[derive(Clone, Debug)]
pub struct ProcessOptions {
    /// Working directory.
    pub working_directory: PathBuf,
    /// Kill the process after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// Captured result of a finished process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
    /// Exit code, `-1` when killed by a signal.
    pub exit_code: i32,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl ProcessOutput {
    /// Whether the process exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external programs.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args` and wait for it to finish.
    ///
    /// A non-zero exit is reported through [`ProcessOutput::exit_code`], not as
    /// an error. Errors cover spawn failures and timeouts.
    async fn run(&self, program: &str, args: &[String], opts: &ProcessOptions)
    -> Result<ProcessOutput>;
}

/// Real subprocess execution backed by `tokio::process::Command`.
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        opts: &ProcessOptions,
    ) -> Result<ProcessOutput> {
        let start = Instant::now();

        let mut cmd = tokio::process::Command::new(program);
        let _ = cmd
            .args(args)
            .current_dir(&opts.working_directory)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(program, ?args, working_dir = %opts.working_directory.display(), "spawning process");

        let child = cmd.spawn().map_err(|source| MediaError::Spawn {
            program: program.to_string(),
            source,
        })?;

        let deadline = async {
            match opts.timeout {
                Some(timeout) => tokio::time::sleep(timeout).await,
                None => std::future::pending::<()>().await,
            }
        };

        let output = tokio::select! {
            result = child.wait_with_output() => result?,
            () = deadline => {
                let timeout_secs = opts.timeout.map_or(0, |t| t.as_secs());
                warn!(program, timeout_secs, "process timed out");
                return Err(MediaError::TimedOut {
                    program: program.to_string(),
                    timeout_secs,
                });
            }
        };

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let exit_code = output.status.code().unwrap_or(-1);

        debug!(program, exit_code, duration_ms, "process completed");

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn opts() -> ProcessOptions {
        ProcessOptions {
            working_directory: std::env::temp_dir(),
            timeout: Some(Duration::from_secs(10)),
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn run_echo_without_shell() {
        let out = TokioProcessRunner
            .run("echo", &args(&["a & b", "$HOME"]), &opts())
            .await
            .unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "a & b $HOME");
    }

    #[tokio::test]
    async fn run_reports_exit_code() {
        let out = TokioProcessRunner
            .run("sh", &args(&["-c", "echo oops >&2; exit 3"]), &opts())
            .await
            .unwrap();
        assert_eq!(out.exit_code, 3);
        assert_eq!(out.stderr.trim(), "oops");
    }

    #[tokio::test]
    async fn run_missing_program_is_spawn_error() {
        let err = TokioProcessRunner
            .run("quill-definitely-not-installed", &[], &opts())
            .await
            .unwrap_err();
        assert_matches!(err, MediaError::Spawn { .. });
    }

    #[tokio::test]
    async fn run_timeout() {
        let mut o = opts();
        o.timeout = Some(Duration::from_millis(50));
        let err = TokioProcessRunner
            .run("sleep", &args(&["10"]), &o)
            .await
            .unwrap_err();
        assert_matches!(err, MediaError::TimedOut { .. });
    }
}

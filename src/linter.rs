//! External linter invocation.
//!
//! Wraps the `markdownlint` CLI as a subprocess. The `Linter` trait is the
//! seam between the tool dispatcher and process execution, so dispatcher
//! behavior can be tested with a scripted double instead of a real binary.

use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

/// Default linter executable, resolved via PATH.
pub const DEFAULT_LINTER_BIN: &str = "markdownlint";

/// Default wall-clock bound on a single linter invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Bound on the `--version` availability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether an invocation checks or rewrites the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintMode {
    Check,
    Fix,
}

impl LintMode {
    /// Gerund for error messages ("Error linting markdown: ...").
    pub fn verb(self) -> &'static str {
        match self {
            LintMode::Check => "linting",
            LintMode::Fix => "fixing",
        }
    }
}

/// Captured result of a finished linter process.
///
/// A non-zero exit code is the normal way the linter reports findings, so it
/// lives here rather than in `InvokeError`.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Diagnostic body: stdout when non-blank, else stderr when non-blank.
    pub fn diagnostics(&self) -> Option<&str> {
        if !self.stdout.trim().is_empty() {
            Some(self.stdout.trim_end())
        } else if !self.stderr.trim().is_empty() {
            Some(self.stderr.trim_end())
        } else {
            None
        }
    }
}

/// Ways an invocation can fail without the linter ever reporting a verdict.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("linter executable not found")]
    NotInstalled,
    #[error("linter timed out after {0}s")]
    TimedOut(u64),
    #[error("failed to run linter: {0}")]
    Io(#[from] io::Error),
}

/// Seam between the tool dispatcher and subprocess execution.
#[async_trait]
pub trait Linter: Send + Sync {
    /// Run the linter against `file`, capturing output after termination.
    async fn invoke(
        &self,
        file: &Path,
        config: Option<&Path>,
        mode: LintMode,
    ) -> Result<ProcessResult, InvokeError>;

    /// Probe whether the linter executable can be located and run.
    async fn check_available(&self) -> bool;
}

/// Production `Linter` backed by the markdownlint CLI.
#[derive(Debug, Clone)]
pub struct CliLinter {
    bin: String,
    timeout: Duration,
}

impl CliLinter {
    pub fn new(bin: impl Into<String>, timeout: Duration) -> Self {
        Self {
            bin: bin.into(),
            timeout,
        }
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Build the argument vector: `<file> [--fix] [--config <path>]`.
    ///
    /// Arguments are passed literally, never through a shell, so crafted
    /// paths cannot inject options or commands.
    fn command(&self, file: &Path, config: Option<&Path>, mode: LintMode) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.arg(file);
        if mode == LintMode::Fix {
            cmd.arg("--fix");
        }
        if let Some(config) = config {
            cmd.arg("--config").arg(config);
        }
        cmd.stdin(Stdio::null());
        cmd.kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Linter for CliLinter {
    async fn invoke(
        &self,
        file: &Path,
        config: Option<&Path>,
        mode: LintMode,
    ) -> Result<ProcessResult, InvokeError> {
        let mut cmd = self.command(file, config, mode);

        tracing::debug!(
            bin = %self.bin,
            file = %file.display(),
            config = config.map(|c| c.display().to_string()),
            mode = ?mode,
            "Invoking linter"
        );

        // kill_on_drop terminates the child when the timeout fires and the
        // output future is dropped, so timed-out requests do not leak
        // subprocesses.
        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| InvokeError::TimedOut(self.timeout.as_secs()))?
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    InvokeError::NotInstalled
                } else {
                    InvokeError::Io(e)
                }
            })?;

        let result = ProcessResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        tracing::debug!(
            exit_code = result.exit_code,
            stdout_len = result.stdout.len(),
            stderr_len = result.stderr.len(),
            "Linter finished"
        );

        Ok(result)
    }

    async fn check_available(&self) -> bool {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match tokio::time::timeout(PROBE_TIMEOUT, cmd.status()).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::warn!(bin = %self.bin, "Linter unavailable: {e}");
                false
            }
            Err(_) => {
                tracing::warn!(bin = %self.bin, "Linter version probe timed out");
                false
            }
        }
    }
}

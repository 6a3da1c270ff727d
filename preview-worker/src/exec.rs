//! Subprocess execution primitive.
//!
//! Every external command the worker runs, git operations and usage-example
//! invocations alike, goes through [`run_command`]. Output is captured in
//! full; a non-zero exit status is returned to the caller, never raised.

use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Errors from launching a subprocess.
///
/// Only failures to spawn are errors; the exit status of a command that did
/// run is part of [`CommandOutput`] and must be inspected by the caller.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The process could not be spawned.
    #[error("Failed to execute '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// A command to execute: either a shell string or an argument vector.
#[derive(Debug, Clone)]
pub enum CommandSpec {
    /// Run through `sh -c`, for usage-example templates that rely on shell
    /// features.
    Shell(String),
    /// Run directly with the given argv.
    Argv(Vec<String>),
}

impl CommandSpec {
    /// Human-readable form for logs and error messages.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Shell(cmd) => cmd.clone(),
            Self::Argv(argv) => argv.join(" "),
        }
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Everything the command wrote to stdout.
    pub stdout: String,
    /// Everything the command wrote to stderr.
    pub stderr: String,
    /// Exit code; `None` when the process was killed by a signal.
    pub status: Option<i32>,
}

impl CommandOutput {
    /// Whether the command exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Stdout and stderr joined, for error logs.
    #[must_use]
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Runs a command to completion in `cwd` and captures its output.
///
/// Both pipes are drained before the call returns, so a chatty command can
/// never deadlock on a full OS pipe buffer. There is no timeout: a hung
/// command hangs the run, matching the worker's single-flight contract.
///
/// # Errors
///
/// Returns [`ExecError`] only if the process could not be spawned.
pub async fn run_command(spec: &CommandSpec, cwd: &Path) -> Result<CommandOutput, ExecError> {
    debug!(command = %spec.display(), cwd = %cwd.display(), "Executing command");

    let mut command = match spec {
        CommandSpec::Shell(line) => {
            let mut c = Command::new("sh");
            c.args(["-c", line]);
            c
        }
        CommandSpec::Argv(argv) => {
            let mut c = Command::new(argv.first().map(String::as_str).unwrap_or(""));
            c.args(argv.iter().skip(1));
            c
        }
    };

    // .output() reads both pipes to EOF before waiting on the child.
    let output = command
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| ExecError::Spawn {
            command: spec.display(),
            source: e,
        })?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        status: output.status.code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cwd() -> PathBuf {
        std::env::temp_dir()
    }

    #[tokio::test]
    async fn captures_stdout_of_shell_command() {
        let out = run_command(&CommandSpec::Shell("echo hello".to_string()), &cwd())
            .await
            .unwrap();

        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hello");
        assert!(out.stderr.is_empty());
    }

    #[tokio::test]
    async fn captures_argv_command() {
        let out = run_command(
            &CommandSpec::Argv(vec!["echo".to_string(), "argv".to_string()]),
            &cwd(),
        )
        .await
        .unwrap();

        assert!(out.success());
        assert_eq!(out.stdout.trim(), "argv");
    }

    #[tokio::test]
    async fn nonzero_exit_is_not_an_error() {
        let out = run_command(&CommandSpec::Shell("exit 3".to_string()), &cwd())
            .await
            .unwrap();

        assert!(!out.success());
        assert_eq!(out.status, Some(3));
    }

    #[tokio::test]
    async fn missing_binary_is_spawn_error() {
        let result = run_command(
            &CommandSpec::Argv(vec!["definitely-not-a-real-binary-0xA1".to_string()]),
            &cwd(),
        )
        .await;

        assert!(matches!(result, Err(ExecError::Spawn { .. })));
    }

    #[tokio::test]
    async fn runs_in_the_given_working_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let out = run_command(&CommandSpec::Shell("pwd".to_string()), temp.path())
            .await
            .unwrap();

        let reported = PathBuf::from(out.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn combined_output_joins_both_streams() {
        let out = CommandOutput {
            stdout: "out".to_string(),
            stderr: "err".to_string(),
            status: Some(1),
        };
        assert_eq!(out.combined(), "outerr");
    }
}

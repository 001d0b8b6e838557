//! External command execution with captured output.
//!
//! Best-effort collaborators (the desktop notification tool, privileged
//! helpers) are invoked as child processes. The [`CommandRunner`] trait keeps
//! that boundary injectable for tests.

use std::future::Future;
use std::process::Stdio;

use thiserror::Error;

/// Error type for command execution.
///
/// Only covers failure to run the program at all; a non-zero exit status
/// is reported through [`CommandOutput::success`].
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program could not be spawned (not found, permission denied, ...).
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// True if the program exited with status zero.
    pub success: bool,
    /// Exit code, or `None` if terminated by a signal.
    pub code: Option<i32>,
    /// Captured standard output, lossily decoded and trimmed.
    pub stdout: String,
    /// Captured standard error, lossily decoded and trimmed.
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run with empty output.
    #[must_use]
    pub const fn succeeded() -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and error output.
    #[must_use]
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Trait for running an external program to completion.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Spawn`] if the program cannot be started.
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> impl Future<Output = Result<CommandOutput, ProcessError>> + Send;
}

/// Production [`CommandRunner`] backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    /// Creates a new runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ProcessError> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProcessError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(CommandOutput::from(output))
    }
}

/// Mock runner for testing.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// One recorded invocation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Invocation {
        /// Program name.
        pub program: String,
        /// Arguments in order.
        pub args: Vec<String>,
    }

    /// A [`CommandRunner`] that records invocations and replays scripted results.
    ///
    /// Once the script is exhausted every call succeeds.
    #[derive(Debug, Default)]
    pub struct MockRunner {
        results: Mutex<VecDeque<Result<CommandOutput, ProcessError>>>,
        calls: Mutex<Vec<Invocation>>,
    }

    impl MockRunner {
        /// Creates a runner where every call succeeds.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a runner replaying `results` in order.
        #[must_use]
        pub fn with_results(results: Vec<Result<CommandOutput, ProcessError>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Returns all recorded invocations.
        #[must_use]
        pub fn calls(&self) -> Vec<Invocation> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandRunner for MockRunner {
        async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ProcessError> {
            self.calls.lock().unwrap().push(Invocation {
                program: program.to_string(),
                args: args.to_vec(),
            });
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(CommandOutput::succeeded()))
        }
    }
}

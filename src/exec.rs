//! External command execution with testable seams.
//!
//! Every external collaborator (ffmpeg, the diarizer, the transcriber) is
//! invoked through the `CommandExecutor` trait so the stage logic can be
//! tested with mock implementations.

use crate::error::{IntervoxError, Result};
use std::collections::VecDeque;
use std::process::Command;
use std::sync::Mutex;

/// Trait for executing system commands.
///
/// Object-safe, Send + Sync for use in concurrent contexts.
/// Enables testability by allowing mock implementations.
pub trait CommandExecutor: Send + Sync {
    /// Execute a command with arguments.
    ///
    /// Returns the stdout of the command on success.
    /// Returns an error if the command fails or is not found.
    fn execute(&self, program: &str, args: &[&str]) -> Result<String> {
        self.execute_with_env(program, args, &[])
    }

    /// Execute a command with extra environment variables set on the child.
    fn execute_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<String>;
}

/// Production command executor using std::process::Command.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandExecutor;

impl SystemCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for SystemCommandExecutor {
    fn execute_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<String> {
        let mut command = Command::new(program);
        command.args(args);
        for (key, value) in env {
            command.env(key, value);
        }

        let output = command.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IntervoxError::ToolNotFound {
                    tool: program.to_string(),
                }
            } else {
                IntervoxError::CommandFailed {
                    program: program.to_string(),
                    message: format!("failed to start: {}", e),
                }
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(IntervoxError::CommandFailed {
                program: program.to_string(),
                message: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Mock command executor for tests.
///
/// Records all command executions and returns configured responses in order.
/// After the configured responses are exhausted, returns empty stdout.
#[derive(Debug, Default)]
pub struct MockCommandExecutor {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Result<String>>>,
}

/// One recorded invocation: program, arguments, extra environment.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl MockCommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a successful response to the queue.
    pub fn with_response(self, response: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
        self
    }

    /// Add an error response to the queue.
    pub fn with_error(self, error: IntervoxError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Get a specific call by index.
    pub fn call(&self, index: usize) -> Option<RecordedCall> {
        self.calls.lock().unwrap().get(index).cloned()
    }
}

impl CommandExecutor for MockCommandExecutor {
    fn execute_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            env: env
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

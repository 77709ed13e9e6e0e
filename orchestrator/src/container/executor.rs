//! Process execution for container files

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::models::ExecutionOutput;

use super::error::ExecutionError;

/// A fully resolved command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub timeout: Option<Duration>,
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs a command to completion and captures its output.
///
/// Implementations report the exit status as data; deciding whether a
/// non-zero status is a failure is left to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    async fn run(&self, command: &CommandSpec) -> Result<ExecutionOutput, ExecutionError>;
}

/// Spawns commands as child processes of the orchestrator
#[derive(Debug, Default, Clone)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessExecutor for SystemExecutor {
    async fn run(&self, command: &CommandSpec) -> Result<ExecutionOutput, ExecutionError> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .current_dir(&command.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the wait future on timeout kills the child
            .kill_on_drop(true);

        debug!(command = %command, "Spawning process");

        let start_time = Instant::now();
        let child = cmd.spawn().map_err(|source| ExecutionError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        let waited = match command.timeout {
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(waited) => waited,
                Err(_) => {
                    warn!(
                        command = %command,
                        timeout_secs = limit.as_secs(),
                        "Execution timed out, process killed"
                    );
                    return Err(ExecutionError::Timeout { after: limit });
                }
            },
            None => child.wait_with_output().await,
        };

        let output = waited.map_err(ExecutionError::Wait)?;
        let duration_ms = start_time.elapsed().as_millis() as u64;

        Ok(ExecutionOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
            duration_ms,
        })
    }
}

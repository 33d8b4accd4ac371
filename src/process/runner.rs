// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Running external commands.

use futures::future::BoxFuture;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::config::PreCommitConfig;
use crate::error::ProcessError;

use super::result::CheckResult;

/// Runs a shell command in a project path.
///
/// Implementations never fail: anything that keeps the command from
/// finishing is reported as an unsuccessful [`CheckResult`].
pub trait ProcessRunner: Send + Sync {
    /// Run `command` in `path`, or in the current directory when `path` is empty.
    fn run<'a>(&'a self, command: &'a str, path: &'a str) -> BoxFuture<'a, CheckResult>;
}

/// Runs commands through `<shell> -c`.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    timeout: Option<Duration>,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            timeout: None,
        }
    }

    /// Kill commands that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runner using the configured shell and timeout.
    pub fn from_config(config: &PreCommitConfig) -> Self {
        Self::new(config.shell.clone()).with_timeout(config.timeout())
    }

    async fn execute(&self, command: &str, path: &str) -> Result<CheckResult, ProcessError> {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if !path.is_empty() {
            cmd.current_dir(path);
        }

        tracing::debug!(
            "Running '{}' in {}",
            command,
            if path.is_empty() { "." } else { path }
        );

        let child = cmd.spawn().map_err(|e| ProcessError::SpawnFailed {
            command: command.to_string(),
            message: e.to_string(),
        })?;

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| ProcessError::TimedOut {
                    command: command.to_string(),
                    seconds: limit.as_secs(),
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|e| ProcessError::WaitFailed {
            command: command.to_string(),
            message: e.to_string(),
        })?;

        // Killed by a signal: no exit code.
        let exit_code = output.status.code().unwrap_or(-1);

        Ok(CheckResult::from_process(
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
            exit_code,
            path,
        ))
    }
}

impl ProcessRunner for ShellRunner {
    fn run<'a>(&'a self, command: &'a str, path: &'a str) -> BoxFuture<'a, CheckResult> {
        Box::pin(async move {
            self.execute(command, path).await.unwrap_or_else(|e| {
                tracing::warn!("{}", e);
                CheckResult::failure(path, e.to_string())
            })
        })
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Outcome of one external command.

use serde::Serialize;

/// Normalized result of running a command in one project path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CheckResult {
    /// Whether the command exited with status 0.
    pub success: bool,
    /// Trimmed standard output.
    pub standard_output: String,
    /// Trimmed standard error, or standard output when the command failed
    /// without writing to standard error.
    pub error_output: String,
    pub exit_code: i32,
    /// Project path the command ran in. Empty for the current directory.
    pub path: String,
    pub output_lines: Vec<String>,
    /// Error lines worth showing; see [`CheckResult::keep_error_lines`].
    pub error_lines: Vec<String>,
}

impl CheckResult {
    /// Build a result from raw process output.
    pub fn from_process(stdout: &str, stderr: &str, exit_code: i32, path: impl Into<String>) -> Self {
        let standard_output = stdout.trim().to_string();
        let mut error_output = stderr.trim().to_string();
        if exit_code != 0 && error_output.is_empty() {
            error_output = standard_output.clone();
        }

        Self {
            success: exit_code == 0,
            output_lines: split_lines(&standard_output),
            error_lines: split_lines(&error_output),
            standard_output,
            error_output,
            exit_code,
            path: path.into(),
        }
    }

    /// A failed result for a command that could not run to completion.
    pub fn failure(path: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            standard_output: String::new(),
            error_lines: vec![message.clone()],
            error_output: message,
            exit_code: -1,
            path: path.into(),
            output_lines: Vec::new(),
        }
    }

    /// Keep only error lines containing one of `markers`. No markers keeps all.
    pub fn keep_error_lines(mut self, markers: &[String]) -> Self {
        if !markers.is_empty() {
            self.error_lines
                .retain(|line| markers.iter().any(|marker| line.contains(marker.as_str())));
        }
        self
    }

    /// Path for display: the project path, or `.` for the current directory.
    pub fn display_path(&self) -> &str {
        if self.path.is_empty() {
            "."
        } else {
            &self.path
        }
    }
}

fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').map(|line| line.trim_end_matches('\r').to_string()).collect()
    }
}

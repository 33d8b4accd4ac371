// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Console progress output for hook runs.
//!
//! Everything goes to stderr so git shows it next to its own messages.

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::process::CheckResult;
use crate::rules::ValidationIssue;

use super::kind::HookKind;

/// Prints hook, task and result lines.
#[derive(Debug, Clone)]
pub struct HookReporter {
    kind: HookKind,
    quiet: bool,
}

impl HookReporter {
    pub fn new(kind: HookKind) -> Self {
        Self { kind, quiet: false }
    }

    /// A reporter that prints nothing.
    pub fn quiet(kind: HookKind) -> Self {
        Self { kind, quiet: true }
    }

    pub fn kind(&self) -> HookKind {
        self.kind
    }

    fn line(&self, text: impl AsRef<str>) {
        if !self.quiet {
            eprintln!("{}", text.as_ref());
        }
    }

    fn banner(&self) -> String {
        format!("────────────── {} ──────────────", self.kind)
    }

    /// Print the hook banner.
    pub fn start_hook(&self) {
        tracing::info!("Running {} hook", self.kind);
        self.line("");
        self.line(style(self.banner()).cyan().to_string());
    }

    /// Print the aggregate result and close the banner.
    pub fn finish_hook(&self, success: bool) {
        tracing::info!("{} hook finished, success: {}", self.kind, success);
        if success {
            self.line(format!("{} {}: checks passed", style("✔").green().bold(), self.kind));
        } else {
            self.line(format!(
                "{} {}: failed to pass the checks",
                style("✖").red().bold(),
                self.kind
            ));
        }
        self.line(style(self.banner()).cyan().to_string());
        self.line("");
    }

    /// Print that the hook did nothing.
    pub fn skip_hook(&self, reason: &str) {
        tracing::info!("{} hook skipped: {}", self.kind, reason);
        self.line(format!("{} {}: skipped ({})", style("⚠").yellow(), self.kind, reason));
    }

    /// Print the start line of a task.
    pub fn start_task(&self, text: &str) {
        self.line(format!("{} {}", style("❯").cyan(), text));
    }

    /// Print the result line of a task.
    pub fn finish_task(&self, text: &str, success: bool) {
        if success {
            self.line(format!("    {} {}", style("✔").green(), text));
        } else {
            self.line(format!("    {} {}", style("✖").red(), text));
        }
    }

    /// Print a rule violation under the current task.
    pub fn issue(&self, issue: &ValidationIssue) {
        self.line(format!("        {} {}", style("•").yellow(), issue.message));
        if let Some(ref suggestion) = issue.suggestion {
            self.line(format!("          {} {}", style("→").dim(), style(suggestion).dim()));
        }
    }

    /// Print the result of one command execution, with error lines on failure.
    pub fn check_result(&self, text: &str, result: &CheckResult) {
        let text = format!("{} ({})", text, style(result.display_path()).dim());
        self.finish_task(&text, result.success);

        if !result.success {
            let lines: Vec<String> = if result.error_lines.is_empty() {
                result.error_output.lines().map(str::to_string).collect()
            } else {
                result.error_lines.clone()
            };
            for line in lines.iter().filter(|l| !l.trim().is_empty()) {
                self.line(format!("        {} {}", style("•").yellow(), line));
            }
        }
    }

    /// A spinner for a step that runs in several projects at once.
    ///
    /// Hidden when quiet or when stderr is not a terminal.
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.quiet || !Term::stderr().is_term() {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(spinner_style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_spinner_is_hidden() {
        let reporter = HookReporter::quiet(HookKind::PreCommit);
        assert!(reporter.spinner("Building code").is_hidden());
        assert_eq!(reporter.kind(), HookKind::PreCommit);
    }

    #[test]
    fn test_banner_names_hook() {
        let reporter = HookReporter::new(HookKind::CommitMsg);
        assert!(reporter.banner().contains("commit-msg"));
    }
}

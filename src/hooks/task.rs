// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook tasks.
//!
//! A task is one line item of a hook: a message check, a pre-commit step, or
//! writing the message template. Tasks report failure through their
//! [`TaskReport`] and never abort the hook.

use futures::future::BoxFuture;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::commit::{template, CommitMessage};
use crate::config::{PreCommitStep, StepConfig};
use crate::process::{CheckResult, ProcessRunner};
use crate::rules::{MessageCheck, MessagePatterns, ValidationIssue};

use super::reporter::HookReporter;

/// What a task produced.
#[derive(Debug, Clone, Default)]
pub struct TaskReport {
    pub name: String,
    pub success: bool,
    /// One result per command execution.
    pub results: Vec<CheckResult>,
    /// Rule violations found by message checks.
    pub issues: Vec<ValidationIssue>,
}

/// One step of a hook.
pub trait HookTask: Send + Sync {
    fn name(&self) -> &str;

    /// Run the task, printing progress to `reporter`.
    fn execute<'a>(&'a self, reporter: &'a HookReporter) -> BoxFuture<'a, TaskReport>;
}

/// Runs one of the message checks.
pub struct MessageCheckTask {
    check: MessageCheck,
    message: Arc<CommitMessage>,
    patterns: Arc<MessagePatterns>,
}

impl MessageCheckTask {
    pub fn new(
        check: MessageCheck,
        message: Arc<CommitMessage>,
        patterns: Arc<MessagePatterns>,
    ) -> Self {
        Self {
            check,
            message,
            patterns,
        }
    }
}

impl HookTask for MessageCheckTask {
    fn name(&self) -> &str {
        self.check.name()
    }

    fn execute<'a>(&'a self, reporter: &'a HookReporter) -> BoxFuture<'a, TaskReport> {
        Box::pin(async move {
            reporter.start_task(self.check.description());

            let outcome = self.check.run(&self.message, &self.patterns);
            reporter.finish_task(&outcome.summary, outcome.success);
            for issue in &outcome.issues {
                reporter.issue(issue);
            }

            TaskReport {
                name: self.check.name().to_string(),
                success: outcome.success,
                results: Vec::new(),
                issues: outcome.issues,
            }
        })
    }
}

/// Runs a pre-commit step's command in each project path.
pub struct CommandTask {
    step: PreCommitStep,
    command: String,
    markers: Vec<String>,
    paths: Vec<String>,
    runner: Arc<dyn ProcessRunner>,
}

impl CommandTask {
    pub fn new(
        step: PreCommitStep,
        config: &StepConfig,
        paths: Vec<String>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            step,
            command: config.command.clone(),
            markers: config.error_markers.clone(),
            paths,
            runner,
        }
    }

    pub fn step(&self) -> PreCommitStep {
        self.step
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    fn report(&self, results: Vec<CheckResult>) -> TaskReport {
        TaskReport {
            name: self.step.as_str().to_string(),
            success: results.iter().all(|r| r.success),
            results,
            issues: Vec::new(),
        }
    }

    /// A single project, or none: run in place.
    async fn run_in_place(&self, reporter: &HookReporter) -> TaskReport {
        let path = self.paths.first().map(String::as_str).unwrap_or("");
        let result = self
            .runner
            .run(&self.command, path)
            .await
            .keep_error_lines(&self.markers);

        reporter.check_result(&self.step.finish_message(result.success), &result);
        self.report(vec![result])
    }

    /// Several projects: run all at once and report each as it finishes.
    async fn run_fan_out(&self, reporter: &HookReporter) -> TaskReport {
        let mut pending = JoinSet::new();
        for path in &self.paths {
            let runner = Arc::clone(&self.runner);
            let command = self.command.clone();
            let path = path.clone();
            pending.spawn(async move { runner.run(&command, &path).await });
        }

        let spinner = reporter.spinner(self.step.start_message());
        let mut results = Vec::with_capacity(self.paths.len());

        while let Some(joined) = pending.join_next().await {
            let result = match joined {
                Ok(result) => result.keep_error_lines(&self.markers),
                Err(e) => CheckResult::failure("", format!("{} execution failed: {}", self.step, e)),
            };

            spinner.suspend(|| {
                reporter.check_result(&self.step.finish_message(result.success), &result)
            });
            results.push(result);
        }

        spinner.finish_and_clear();
        self.report(results)
    }
}

impl HookTask for CommandTask {
    fn name(&self) -> &str {
        self.step.as_str()
    }

    fn execute<'a>(&'a self, reporter: &'a HookReporter) -> BoxFuture<'a, TaskReport> {
        Box::pin(async move {
            reporter.start_task(self.step.start_message());
            tracing::debug!("{} in {} project(s): {}", self.step, self.paths.len(), self.command);

            if self.paths.len() < 2 {
                self.run_in_place(reporter).await
            } else {
                self.run_fan_out(reporter).await
            }
        })
    }
}

/// Writes the message template into the commit message file.
pub struct TemplateTask {
    path: PathBuf,
}

impl TemplateTask {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HookTask for TemplateTask {
    fn name(&self) -> &str {
        "template"
    }

    fn execute<'a>(&'a self, reporter: &'a HookReporter) -> BoxFuture<'a, TaskReport> {
        Box::pin(async move {
            reporter.start_task("Preparing commit message template");

            let success = match template::prepend_template(&self.path) {
                Ok(()) => {
                    reporter.finish_task("Commit message template prepared", true);
                    true
                }
                Err(e) => {
                    reporter.finish_task(&e.to_string(), false);
                    false
                }
            };

            TaskReport {
                name: self.name().to_string(),
                success,
                ..TaskReport::default()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookKind;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Runner with a scripted delay and exit code per path.
    struct ScriptedRunner {
        script: HashMap<String, (u64, i32)>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedRunner {
        fn new(script: &[(&str, u64, i32)]) -> Arc<Self> {
            Arc::new(Self {
                script: script
                    .iter()
                    .map(|(path, delay, code)| (path.to_string(), (*delay, *code)))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn finished(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ProcessRunner for ScriptedRunner {
        fn run<'a>(&'a self, command: &'a str, path: &'a str) -> BoxFuture<'a, CheckResult> {
            Box::pin(async move {
                let (delay, code) = self.script.get(path).copied().unwrap_or((0, 0));
                tokio::time::sleep(Duration::from_millis(delay)).await;
                self.calls.lock().unwrap().push(path.to_string());
                let stderr = if code == 0 { "" } else { "error: build failed\nnote: details" };
                CheckResult::from_process(command, stderr, code, path)
            })
        }
    }

    fn build_step() -> StepConfig {
        StepConfig {
            enabled: true,
            command: "cargo build".to_string(),
            error_markers: vec!["error".to_string()],
        }
    }

    fn paths(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_one_failure_fails_the_step() {
        let runner = ScriptedRunner::new(&[("a", 10, 0), ("b", 20, 1), ("c", 30, 0)]);
        let task = CommandTask::new(PreCommitStep::Build, &build_step(), paths(&["a", "b", "c"]), runner);

        let report = task.execute(&HookReporter::quiet(HookKind::PreCommit)).await;

        assert!(!report.success);
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.results.iter().filter(|r| r.success).count(), 2);
    }

    #[tokio::test]
    async fn test_results_arrive_in_completion_order() {
        let runner = ScriptedRunner::new(&[("slow", 300, 0), ("mid", 150, 0), ("fast", 10, 0)]);
        let task = CommandTask::new(
            PreCommitStep::Build,
            &build_step(),
            paths(&["slow", "mid", "fast"]),
            runner,
        );

        let report = task.execute(&HookReporter::quiet(HookKind::PreCommit)).await;

        let order: Vec<_> = report.results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(order, ["fast", "mid", "slow"]);
        assert!(report.success);
    }

    #[tokio::test]
    async fn test_early_failure_cancels_nothing() {
        let runner = ScriptedRunner::new(&[("bad", 5, 1), ("good", 100, 0), ("also-good", 150, 0)]);
        let task = CommandTask::new(
            PreCommitStep::Test,
            &build_step(),
            paths(&["bad", "good", "also-good"]),
            runner.clone(),
        );

        let report = task.execute(&HookReporter::quiet(HookKind::PreCommit)).await;

        assert!(!report.success);
        assert_eq!(runner.finished(), ["bad", "good", "also-good"]);
        assert_eq!(report.results.len(), 3);
    }

    #[tokio::test]
    async fn test_single_path_runs_in_place() {
        let runner = ScriptedRunner::new(&[("only", 0, 0)]);
        let task = CommandTask::new(PreCommitStep::Format, &build_step(), paths(&["only"]), runner.clone());

        let report = task.execute(&HookReporter::quiet(HookKind::PreCommit)).await;

        assert!(report.success);
        assert_eq!(report.results[0].path, "only");
        assert_eq!(runner.finished(), ["only"]);
    }

    #[tokio::test]
    async fn test_no_paths_runs_in_current_directory() {
        let runner = ScriptedRunner::new(&[]);
        let task = CommandTask::new(PreCommitStep::Clean, &build_step(), Vec::new(), runner.clone());

        let report = task.execute(&HookReporter::quiet(HookKind::PreCommit)).await;

        assert_eq!(report.results.len(), 1);
        assert_eq!(runner.finished(), [""]);
    }

    #[tokio::test]
    async fn test_error_lines_are_filtered() {
        let runner = ScriptedRunner::new(&[("a", 0, 1)]);
        let task = CommandTask::new(PreCommitStep::Build, &build_step(), paths(&["a"]), runner);

        let report = task.execute(&HookReporter::quiet(HookKind::PreCommit)).await;

        assert_eq!(report.results[0].error_lines, ["error: build failed"]);
    }

    #[tokio::test]
    async fn test_message_check_task() {
        let patterns = Arc::new(MessagePatterns::defaults());
        let message = Arc::new(CommitMessage::parse("update stuff", &patterns));
        let task = MessageCheckTask::new(MessageCheck::Subject, message, patterns);

        let report = task.execute(&HookReporter::quiet(HookKind::CommitMsg)).await;

        assert_eq!(task.name(), "subject");
        assert!(!report.success);
        assert_eq!(report.issues[0].code, "subject-format");
    }

    #[tokio::test]
    async fn test_template_task() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        std::fs::write(&path, "").unwrap();

        let report = TemplateTask::new(&path)
            .execute(&HookReporter::quiet(HookKind::PrepareCommitMsg))
            .await;

        assert!(report.success);
        assert!(std::fs::read_to_string(&path).unwrap().contains(template::SUBJECT_TEMPLATE));
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The `pre-commit` hook: format, clean, build and test the configured projects.

use std::sync::Arc;

use crate::config::{PreCommitConfig, PreCommitStep};
use crate::process::ProcessRunner;

use super::kind::HookKind;
use super::reporter::HookReporter;
use super::runner::{HookOutcome, TaskRunner};
use super::task::CommandTask;

/// Expand glob patterns into project paths.
///
/// Entries without matches are kept verbatim, so a plain path that does not
/// exist still shows up as a failing check. Duplicates are dropped.
pub fn expand_projects(patterns: &[String]) -> Vec<String> {
    let mut projects: Vec<String> = Vec::new();

    for pattern in patterns {
        let matches: Vec<String> = match glob::glob(pattern) {
            Ok(paths) => paths
                .filter_map(|entry| entry.ok())
                .filter(|path| path.is_dir())
                .map(|path| path.to_string_lossy().into_owned())
                .collect(),
            Err(e) => {
                tracing::warn!("Invalid project pattern '{}': {}", pattern, e);
                Vec::new()
            }
        };

        let found = if matches.is_empty() {
            vec![pattern.clone()]
        } else {
            matches
        };

        for project in found {
            if !projects.contains(&project) {
                projects.push(project);
            }
        }
    }

    projects
}

/// Enabled steps in execution order, each over its projects.
pub fn tasks(config: &PreCommitConfig, runner: Arc<dyn ProcessRunner>) -> TaskRunner {
    let projects = expand_projects(&config.projects);
    let test_projects = if config.test_projects.is_empty() {
        projects.clone()
    } else {
        expand_projects(&config.test_projects)
    };

    let mut tasks = TaskRunner::new(HookKind::PreCommit);
    for step in PreCommitStep::all() {
        let step_config = config.step(*step);
        if !step_config.enabled {
            tracing::debug!("Skipping disabled step {}", step);
            continue;
        }

        let paths = match step {
            PreCommitStep::Test => test_projects.clone(),
            _ => projects.clone(),
        };
        tasks.add(CommandTask::new(*step, &step_config, paths, Arc::clone(&runner)));
    }

    tasks
}

/// Run every enabled step.
pub async fn run(
    config: &PreCommitConfig,
    runner: Arc<dyn ProcessRunner>,
    reporter: &HookReporter,
) -> HookOutcome {
    let tasks = tasks(config, runner);
    if tasks.is_empty() {
        reporter.skip_hook("no steps enabled");
        return HookOutcome::skipped(HookKind::PreCommit);
    }

    tasks.run(reporter).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StepConfig;
    use crate::process::CheckResult;
    use futures::future::BoxFuture;
    use std::sync::Mutex;

    /// Records every command and fails the ones containing "fail".
    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ProcessRunner for RecordingRunner {
        fn run<'a>(&'a self, command: &'a str, path: &'a str) -> BoxFuture<'a, CheckResult> {
            Box::pin(async move {
                self.calls
                    .lock()
                    .unwrap()
                    .push((command.to_string(), path.to_string()));
                let code = if command.contains("fail") { 1 } else { 0 };
                CheckResult::from_process("", "", code, path)
            })
        }
    }

    fn step(command: &str) -> StepConfig {
        StepConfig {
            enabled: true,
            command: command.to_string(),
            error_markers: Vec::new(),
        }
    }

    #[test]
    fn test_literal_paths_are_kept() {
        let projects = expand_projects(&["does/not/exist".to_string(), "does/not/exist".to_string()]);
        assert_eq!(projects, ["does/not/exist"]);
    }

    #[test]
    fn test_glob_expands_to_directories() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["alpha", "beta"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let pattern = format!("{}/*", dir.path().display());
        let projects = expand_projects(&[pattern]);

        assert_eq!(projects.len(), 2);
        assert!(projects[0].ends_with("alpha"));
        assert!(projects[1].ends_with("beta"));
    }

    #[test]
    fn test_disabled_steps_are_skipped() {
        let mut config = PreCommitConfig::default();
        config.clean.enabled = false;

        let tasks = tasks(&config, Arc::new(RecordingRunner::default()));
        assert_eq!(tasks.task_names(), ["format", "build", "test"]);
    }

    #[tokio::test]
    async fn test_test_projects_override_projects() {
        let config = PreCommitConfig {
            projects: vec!["app".to_string()],
            test_projects: vec!["app-tests".to_string()],
            format: step("fmt"),
            clean: StepConfig {
                enabled: false,
                ..StepConfig::default()
            },
            build: step("build"),
            test: step("test"),
            ..PreCommitConfig::default()
        };
        let runner = Arc::new(RecordingRunner::default());

        let outcome = run(&config, runner.clone(), &HookReporter::quiet(HookKind::PreCommit)).await;

        assert!(outcome.success);
        let calls = runner.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                ("fmt".to_string(), "app".to_string()),
                ("build".to_string(), "app".to_string()),
                ("test".to_string(), "app-tests".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_step_fails_hook() {
        let config = PreCommitConfig {
            build: step("build-fail"),
            ..PreCommitConfig::default()
        };

        let outcome = run(
            &config,
            Arc::new(RecordingRunner::default()),
            &HookReporter::quiet(HookKind::PreCommit),
        )
        .await;

        assert!(!outcome.success);
        assert_eq!(outcome.reports.len(), 4);
        assert!(!outcome.reports[2].success);
    }

    #[tokio::test]
    async fn test_nothing_enabled_is_skipped() {
        let off = StepConfig {
            enabled: false,
            ..StepConfig::default()
        };
        let config = PreCommitConfig {
            format: off.clone(),
            clean: off.clone(),
            build: off.clone(),
            test: off,
            ..PreCommitConfig::default()
        };

        let outcome = run(
            &config,
            Arc::new(RecordingRunner::default()),
            &HookReporter::quiet(HookKind::PreCommit),
        )
        .await;

        assert!(outcome.success);
        assert!(outcome.reports.is_empty());
    }
}

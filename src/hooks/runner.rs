// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Ordered execution of a hook's tasks.

use super::kind::HookKind;
use super::reporter::HookReporter;
use super::task::{HookTask, TaskReport};

/// Aggregate result of a hook run.
#[derive(Debug, Clone)]
pub struct HookOutcome {
    pub kind: HookKind,
    pub success: bool,
    pub reports: Vec<TaskReport>,
}

impl HookOutcome {
    /// A hook that had nothing to do.
    pub fn skipped(kind: HookKind) -> Self {
        Self {
            kind,
            success: true,
            reports: Vec::new(),
        }
    }

    /// Process exit status for git: 0 lets the commit continue.
    pub fn exit_code(&self) -> i32 {
        if self.success {
            0
        } else {
            1
        }
    }
}

/// Runs tasks one after another in the order they were added.
///
/// Every task runs even when an earlier one failed.
pub struct TaskRunner {
    kind: HookKind,
    tasks: Vec<Box<dyn HookTask>>,
}

impl TaskRunner {
    pub fn new(kind: HookKind) -> Self {
        Self {
            kind,
            tasks: Vec::new(),
        }
    }

    pub fn add(&mut self, task: impl HookTask + 'static) {
        self.tasks.push(Box::new(task));
    }

    pub fn with_task(mut self, task: impl HookTask + 'static) -> Self {
        self.add(task);
        self
    }

    /// Task names in execution order.
    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub async fn run(&self, reporter: &HookReporter) -> HookOutcome {
        reporter.start_hook();

        let mut reports = Vec::with_capacity(self.tasks.len());
        for task in &self.tasks {
            let report = task.execute(reporter).await;
            tracing::debug!("Task {} finished, success: {}", report.name, report.success);
            reports.push(report);
        }

        let success = reports.iter().all(|r| r.success);
        reporter.finish_hook(success);

        HookOutcome {
            kind: self.kind,
            success,
            reports,
        }
    }
}

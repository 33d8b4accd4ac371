// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The `prepare-commit-msg` hook: seed the editor with a message template.

use std::path::Path;

use crate::commit::template;

use super::kind::HookKind;
use super::reporter::HookReporter;
use super::runner::{HookOutcome, TaskRunner};
use super::task::TemplateTask;

/// Prepend the template unless the message came from `-m`/`-F`.
pub async fn run(path: &Path, source: Option<&str>, reporter: &HookReporter) -> HookOutcome {
    if !template::wants_template(source) {
        reporter.skip_hook("message supplied on the command line");
        return HookOutcome::skipped(HookKind::PrepareCommitMsg);
    }

    TaskRunner::new(HookKind::PrepareCommitMsg)
        .with_task(TemplateTask::new(path))
        .run(reporter)
        .await
}

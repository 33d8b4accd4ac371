// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The `commit-msg` hook: validate the message git is about to record.

use std::path::Path;
use std::sync::Arc;

use crate::commit::CommitMessage;
use crate::config::HookwiseConfig;
use crate::error::{HookError, Result};
use crate::rules::{MessageCheck, MessagePatterns};

use super::kind::HookKind;
use super::reporter::HookReporter;
use super::runner::{HookOutcome, TaskRunner};
use super::task::MessageCheckTask;

/// One task per message check, in check order.
pub fn tasks(message: Arc<CommitMessage>, patterns: Arc<MessagePatterns>) -> TaskRunner {
    MessageCheck::all()
        .iter()
        .fold(TaskRunner::new(HookKind::CommitMsg), |runner, check| {
            runner.with_task(MessageCheckTask::new(
                *check,
                Arc::clone(&message),
                Arc::clone(&patterns),
            ))
        })
}

/// Read the message file at `path` and run every check on it.
pub async fn run(path: &Path, config: &HookwiseConfig, reporter: &HookReporter) -> Result<HookOutcome> {
    let text = std::fs::read_to_string(path).map_err(|e| HookError::MessageFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let patterns = Arc::new(MessagePatterns::build_or_default(&config.rules));
    let message = Arc::new(CommitMessage::parse(&text, &patterns));
    tracing::debug!("Parsed commit message: {:?}", message);

    Ok(tasks(message, patterns).run(reporter).await)
}

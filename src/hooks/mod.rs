// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git hooks: the task model, the three hook flows, and script installation.

pub mod commit_msg;
mod kind;
mod manager;
pub mod pre_commit;
pub mod prepare_commit_msg;
mod reporter;
mod runner;
mod task;
mod templates;

pub use kind::HookKind;
pub use manager::{HookManager, HookStatus};
pub use reporter::HookReporter;
pub use runner::{HookOutcome, TaskRunner};
pub use task::{CommandTask, HookTask, MessageCheckTask, TaskReport, TemplateTask};
pub use templates::{is_hookwise_script, HookTemplate};

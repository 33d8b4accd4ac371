// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The git hooks hookwise implements.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::config::HooksConfig;
use crate::error::HookError;

/// A git hook hookwise can install and run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookKind {
    CommitMsg,
    PreCommit,
    PrepareCommitMsg,
}

impl HookKind {
    /// All hooks, in the order git runs them during a commit.
    pub fn all() -> &'static [HookKind] {
        &[
            HookKind::PreCommit,
            HookKind::PrepareCommitMsg,
            HookKind::CommitMsg,
        ]
    }

    /// File name inside `.git/hooks`.
    pub fn filename(&self) -> &'static str {
        match self {
            HookKind::CommitMsg => "commit-msg",
            HookKind::PreCommit => "pre-commit",
            HookKind::PrepareCommitMsg => "prepare-commit-msg",
        }
    }

    /// Hooks enabled for installation.
    pub fn configured(config: &HooksConfig) -> Vec<HookKind> {
        Self::all()
            .iter()
            .copied()
            .filter(|kind| match kind {
                HookKind::CommitMsg => config.commit_msg,
                HookKind::PreCommit => config.pre_commit,
                HookKind::PrepareCommitMsg => config.prepare_commit_msg,
            })
            .collect()
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.filename())
    }
}

impl FromStr for HookKind {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commit-msg" => Ok(HookKind::CommitMsg),
            "pre-commit" => Ok(HookKind::PreCommit),
            "prepare-commit-msg" => Ok(HookKind::PrepareCommitMsg),
            _ => Err(HookError::Unknown {
                hook: s.to_string(),
            }),
        }
    }
}

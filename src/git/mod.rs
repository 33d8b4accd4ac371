// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! This module provides the repository lookups hookwise needs: commit
//! messages for `check` and the hooks directory for installation.

mod repo;

pub use repo::{get_commit_message, get_commit_range, is_git_repo, open_repo, Repository};

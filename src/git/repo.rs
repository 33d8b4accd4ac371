// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{GitError, HookwiseError, Result};
use git2::{Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with the lookups hookwise needs.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            HookwiseError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                HookwiseError::Git(GitError::NotARepository)
            } else {
                HookwiseError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        Ok(Self { inner: repo })
    }

    /// The git directory (`.git`).
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// The working tree, if the repository is not bare.
    pub fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    /// Directory git looks in for hooks, honoring `core.hooksPath`.
    pub fn hooks_dir(&self) -> PathBuf {
        let configured = self
            .inner
            .config()
            .and_then(|config| config.get_path("core.hooksPath"))
            .ok();

        match configured {
            Some(path) if path.is_absolute() => path,
            Some(path) => self.workdir().unwrap_or_else(|| self.git_dir()).join(path),
            None => self.git_dir().join("hooks"),
        }
    }

    /// Resolve a reference (SHA, branch name, `HEAD~1`, ...) to a commit.
    pub fn get_commit(&self, reference: &str) -> Result<git2::Commit<'_>> {
        let invalid = |e: git2::Error| {
            tracing::debug!("Failed to resolve {}: {}", reference, e.message());
            HookwiseError::Git(GitError::InvalidReference {
                reference: reference.to_string(),
            })
        };

        self.inner
            .revparse_single(reference)
            .map_err(invalid)?
            .peel_to_commit()
            .map_err(invalid)
    }

    /// SHA and message of the commit `reference` points at.
    pub fn get_commit_message(&self, reference: &str) -> Result<(String, String)> {
        let commit = self.get_commit(reference)?;
        let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
        Ok((commit.id().to_string(), message))
    }

    /// Commits in `from..to`, newest first. A plain reference yields that commit.
    pub fn get_commits_in_range(&self, range: &str) -> Result<Vec<(Oid, String)>> {
        let Some((from, to)) = range.split_once("..") else {
            let commit = self.get_commit(range)?;
            let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
            return Ok(vec![(commit.id(), message)]);
        };

        let to = if to.is_empty() { "HEAD" } else { to };
        let walk_failed = |command: &str, e: git2::Error| {
            HookwiseError::Git(GitError::CommandFailed {
                command: command.to_string(),
                message: e.message().to_string(),
            })
        };

        let mut revwalk = self.inner.revwalk().map_err(|e| walk_failed("revwalk", e))?;
        revwalk
            .push(self.get_commit(to)?.id())
            .map_err(|e| walk_failed("revwalk.push", e))?;
        revwalk
            .hide(self.get_commit(from)?.id())
            .map_err(|e| walk_failed("revwalk.hide", e))?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid.map_err(|e| walk_failed("revwalk", e))?;
            let commit = self.inner.find_commit(oid).map_err(|_| {
                HookwiseError::Git(GitError::InvalidReference {
                    reference: oid.to_string(),
                })
            })?;
            let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
            commits.push((oid, message));
        }

        Ok(commits)
    }
}

/// Open the repository from the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current()
}

/// Check if the current directory is within a git repository.
pub fn is_git_repo() -> bool {
    Repository::open_current().is_ok()
}

/// SHA and message of a commit in the current repository.
pub fn get_commit_message(reference: &str) -> Result<(String, String)> {
    Repository::open_current()?.get_commit_message(reference)
}

/// SHAs and messages of the commits in a range of the current repository.
pub fn get_commit_range(range: &str) -> Result<Vec<(String, String)>> {
    let repo = Repository::open_current()?;
    let commits = repo.get_commits_in_range(range)?;
    Ok(commits
        .into_iter()
        .map(|(oid, msg)| (oid.to_string(), msg))
        .collect())
}

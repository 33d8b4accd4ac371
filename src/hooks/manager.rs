// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Installing and removing the hook scripts.

use crate::error::{HookError, HookwiseError, Result};
use crate::git;
use std::fs;
use std::path::{Path, PathBuf};

use super::kind::HookKind;
use super::templates::{is_hookwise_script, HookTemplate};

/// Installation state of one hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookStatus {
    /// Our script is in place.
    Installed,
    /// Some other script occupies the hook.
    Foreign,
    /// No script.
    Missing,
}

/// Manager for the scripts in a hooks directory.
pub struct HookManager {
    hooks_dir: PathBuf,
}

impl HookManager {
    /// Create a manager for the current repository's hooks directory.
    pub fn new() -> Result<Self> {
        let repo = git::open_repo()?;
        Self::with_dir(repo.hooks_dir())
    }

    /// Create a manager for an explicit hooks directory.
    pub fn with_dir(hooks_dir: impl Into<PathBuf>) -> Result<Self> {
        let hooks_dir = hooks_dir.into();

        if !hooks_dir.exists() {
            fs::create_dir_all(&hooks_dir).map_err(|e| {
                HookwiseError::Hook(HookError::InstallFailed {
                    hook: "all".to_string(),
                    message: format!("Failed to create hooks directory: {}", e),
                })
            })?;
        }

        Ok(Self { hooks_dir })
    }

    pub fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    fn hook_path(&self, kind: HookKind) -> PathBuf {
        self.hooks_dir.join(kind.filename())
    }

    fn backup_path(&self, kind: HookKind) -> PathBuf {
        self.hooks_dir.join(format!("{}.backup", kind.filename()))
    }

    /// Install one hook.
    ///
    /// A foreign script is left alone unless `force` is set, in which case it
    /// is moved to `<hook>.backup`.
    pub fn install(&self, kind: HookKind, force: bool) -> Result<()> {
        let hook_path = self.hook_path(kind);
        let install_failed = |message: String| {
            HookwiseError::Hook(HookError::InstallFailed {
                hook: kind.filename().to_string(),
                message,
            })
        };

        if self.status_of(kind)? == HookStatus::Foreign {
            if !force {
                return Err(HookwiseError::Hook(HookError::AlreadyExists {
                    hook: kind.filename().to_string(),
                }));
            }
            fs::rename(&hook_path, self.backup_path(kind))
                .map_err(|e| install_failed(format!("Failed to backup existing hook: {}", e)))?;
            tracing::info!("Backed up existing {} hook", kind);
        }

        let script = HookTemplate::new(kind).render()?;
        fs::write(&hook_path, script)
            .map_err(|e| install_failed(format!("Failed to write hook: {}", e)))?;
        make_executable(&hook_path)
            .map_err(|e| install_failed(format!("Failed to set permissions: {}", e)))?;

        tracing::debug!("Installed {} at {}", kind, hook_path.display());
        Ok(())
    }

    /// Install several hooks, stopping at the first failure.
    pub fn install_all(&self, kinds: &[HookKind], force: bool) -> Result<()> {
        for kind in kinds {
            self.install(*kind, force)?;
        }
        Ok(())
    }

    /// Remove one hook and restore the backup it replaced, if any.
    pub fn uninstall(&self, kind: HookKind) -> Result<()> {
        let hook_path = self.hook_path(kind);
        let backup_path = self.backup_path(kind);

        match self.status_of(kind)? {
            HookStatus::Missing => return Ok(()),
            HookStatus::Foreign => {
                return Err(HookwiseError::Hook(HookError::RemoveFailed {
                    hook: kind.filename().to_string(),
                    message: "Hook was not installed by hookwise".to_string(),
                }))
            }
            HookStatus::Installed => {}
        }

        fs::remove_file(&hook_path).map_err(|e| {
            HookwiseError::Hook(HookError::RemoveFailed {
                hook: kind.filename().to_string(),
                message: format!("Failed to remove hook: {}", e),
            })
        })?;

        if backup_path.exists() {
            if let Err(e) = fs::rename(&backup_path, &hook_path) {
                tracing::warn!("Failed to restore {} backup: {}", kind, e);
            }
        }

        Ok(())
    }

    /// Remove several hooks.
    pub fn uninstall_all(&self, kinds: &[HookKind]) -> Result<()> {
        for kind in kinds {
            self.uninstall(*kind)?;
        }
        Ok(())
    }

    /// State of one hook.
    pub fn status_of(&self, kind: HookKind) -> Result<HookStatus> {
        let hook_path = self.hook_path(kind);
        if !hook_path.exists() {
            return Ok(HookStatus::Missing);
        }

        let content = fs::read_to_string(&hook_path).map_err(|e| {
            HookwiseError::Hook(HookError::InstallFailed {
                hook: kind.filename().to_string(),
                message: format!("Failed to read hook: {}", e),
            })
        })?;

        Ok(if is_hookwise_script(&content) {
            HookStatus::Installed
        } else {
            HookStatus::Foreign
        })
    }

    /// State of every hook hookwise knows.
    pub fn status(&self) -> Vec<(HookKind, HookStatus)> {
        HookKind::all()
            .iter()
            .map(|kind| {
                let status = self.status_of(*kind).unwrap_or(HookStatus::Foreign);
                (*kind, status)
            })
            .collect()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for hookwise.
//!
//! Rule violations and failing project checks are not errors: they are
//! reported as unsuccessful outcomes. The types here cover the things that
//! stop a command from running at all.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for hookwise operations.
#[derive(Error, Debug)]
pub enum HookwiseError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Hook errors
    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    // External process errors
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid {component} pattern '{pattern}': {message}")]
    InvalidPattern {
        component: String,
        pattern: String,
        message: String,
    },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// Hook-related errors.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Unknown hook: {hook}")]
    Unknown { hook: String },

    #[error("Failed to install hook '{hook}': {message}")]
    InstallFailed { hook: String, message: String },

    #[error("Hook already exists: {hook}")]
    AlreadyExists { hook: String },

    #[error("Failed to remove hook '{hook}': {message}")]
    RemoveFailed { hook: String, message: String },

    #[error("Failed to read commit message file {path}: {message}")]
    MessageFile { path: PathBuf, message: String },

    #[error("Failed to render hook script: {message}")]
    Template { message: String },
}

/// External process errors.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to spawn '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    #[error("'{command}' timed out after {seconds}s")]
    TimedOut { command: String, seconds: u64 },

    #[error("'{command}' could not be awaited: {message}")]
    WaitFailed { command: String, message: String },
}

/// Result type alias for hookwise operations.
pub type Result<T> = std::result::Result<T, HookwiseError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| HookwiseError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/hookwise.toml"),
        };
        assert!(err.to_string().contains("/path/to/hookwise.toml"));
    }

    #[test]
    fn test_invalid_pattern_display() {
        let err = ConfigError::InvalidPattern {
            component: "subject".to_string(),
            pattern: "(feat".to_string(),
            message: "unclosed group".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("subject"));
        assert!(text.contains("(feat"));
    }

    #[test]
    fn test_process_error_display() {
        let err = ProcessError::TimedOut {
            command: "cargo test".to_string(),
            seconds: 30,
        };
        assert_eq!(err.to_string(), "'cargo test' timed out after 30s");
    }

    #[test]
    fn test_hookwise_error_from_hook_error() {
        let hook_err = HookError::Unknown {
            hook: "post-merge".to_string(),
        };
        let err: HookwiseError = hook_err.into();
        assert!(err.to_string().contains("post-merge"));
    }

    #[test]
    fn test_context_wraps_source() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = io.context("reading message").unwrap_err();
        assert_eq!(err.to_string(), "reading message: missing");
    }
}

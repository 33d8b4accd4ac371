// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hookwise - Conventional Commits enforcement and pre-commit checks
///
/// Git calls `hookwise hook <name>` from the installed hook scripts.
#[derive(Parser, Debug)]
#[command(name = "hookwise")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Git hooks for commit message rules and project checks", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "HOOKWISE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a git hook (called by the installed hook scripts)
    Hook(HookArgs),

    /// Validate commit messages
    Check(CheckArgs),

    /// Manage git hooks
    Hooks(HooksArgs),

    /// Initialize hookwise configuration
    Init(InitArgs),

    /// Print the effective configuration and the generated patterns
    Config,

    /// Print version information
    Version,
}

/// Arguments for the hook command.
#[derive(Parser, Debug, Clone)]
pub struct HookArgs {
    /// Hook to run
    #[command(subcommand)]
    pub hook: HookCommand,
}

/// Hooks git can invoke.
#[derive(Subcommand, Debug, Clone)]
pub enum HookCommand {
    /// Validate the commit message file
    CommitMsg {
        /// Path to the commit message file
        file: PathBuf,
    },

    /// Format, clean, build and test the configured projects
    PreCommit,

    /// Write the message template into the commit message file
    PrepareCommitMsg {
        /// Path to the commit message file
        file: PathBuf,

        /// Source of the message (message, template, merge, squash, commit)
        source: Option<String>,

        /// Commit SHA, for amend and reuse
        sha: Option<String>,
    },
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Commit or range to check
    #[arg(default_value = "HEAD")]
    pub target: String,

    /// Check all commits in a range
    #[arg(long)]
    pub range: bool,

    /// Check a message file instead of a commit
    #[arg(short, long, value_name = "PATH", conflicts_with = "range")]
    pub file: Option<PathBuf>,
}

/// Arguments for the hooks command.
#[derive(Parser, Debug, Clone)]
pub struct HooksArgs {
    /// Hook action to perform
    #[command(subcommand)]
    pub action: HooksAction,
}

/// Hook actions.
#[derive(Subcommand, Debug, Clone)]
pub enum HooksAction {
    /// Install git hooks
    Install {
        /// Specific hook to install
        #[arg(value_name = "HOOK")]
        hook: Option<String>,

        /// Replace hooks not installed by hookwise (they are backed up)
        #[arg(short, long)]
        force: bool,
    },

    /// Uninstall git hooks
    Uninstall {
        /// Specific hook to uninstall
        #[arg(value_name = "HOOK")]
        hook: Option<String>,
    },

    /// Show hook status
    Status,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            target: "HEAD".to_string(),
            range: false,
            file: None,
        }
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hookwise - Git hooks for Conventional Commits and project checks
//!
//! Hookwise installs three git hooks and implements them natively:
//!
//! - **commit-msg**: parses the message into subject, body and footers and
//!   validates each part against regexes synthesized from the configured rules
//! - **pre-commit**: runs format, clean, build and test commands over the
//!   configured projects, in parallel when there are several
//! - **prepare-commit-msg**: seeds the editor with a message template
//!
//! # Example
//!
//! ```no_run
//! use hookwise::config::HookwiseConfig;
//! use hookwise::rules::RuleEngine;
//!
//! let config = HookwiseConfig::load();
//! let engine = RuleEngine::new(&config.rules);
//!
//! let result = engine.validate_string("feat(parser): Add footer continuation");
//! println!("{}", result.summary());
//! ```

pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod hooks;
pub mod process;
pub mod rules;

pub use config::HookwiseConfig;
pub use error::{HookwiseError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of hookwise.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// The build date (if available).
    pub const BUILD_DATE: Option<&str> = option_env!("VERGEN_BUILD_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message template written by the prepare-commit-msg hook.

use std::fs;
use std::path::Path;

use crate::error::{HookError, Result};

/// Placeholder subject line.
pub const SUBJECT_TEMPLATE: &str = "<type>(optional scope): <description> <optional ISS-XXX>";

/// Placeholder body line.
pub const BODY_TEMPLATE: &str = "<optional body>";

/// Placeholder footer line.
pub const FOOTER_TEMPLATE: &str = "<key-word>: <footer description>";

/// The template text, without a trailing newline.
pub fn message_template() -> String {
    [
        "# Commit template based on: https://www.conventionalcommits.org/en/v1.0.0/",
        SUBJECT_TEMPLATE,
        "",
        "# Optional body.",
        BODY_TEMPLATE,
        "",
        "# Optional footers, as many as you want.",
        FOOTER_TEMPLATE,
        FOOTER_TEMPLATE,
    ]
    .join("\n")
}

/// Whether the template should be written for this commit message source.
///
/// Git passes `message` when the user gave `-m` or `-F`.
pub fn wants_template(source: Option<&str>) -> bool {
    source != Some("message")
}

/// Put the template in front of whatever the message file already holds.
pub fn prepend_template(path: &Path) -> Result<()> {
    let file_error = |e: std::io::Error| HookError::MessageFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let existing = fs::read_to_string(path).map_err(file_error)?;
    let content = format!("{}\n{}", message_template(), existing);
    fs::write(path, content).map_err(file_error)?;

    tracing::debug!("Wrote commit template to {}", path.display());
    Ok(())
}

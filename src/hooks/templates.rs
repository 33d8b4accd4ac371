// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Shell scripts written into `.git/hooks`.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{HookError, Result};

use super::kind::HookKind;

/// Marker line identifying scripts hookwise installed.
pub const HOOK_MARKER: &str = "# Hookwise Git Hook";

const HOOK_SCRIPT: &str = r#"#!/bin/sh
# Hookwise Git Hook
# Generated by hookwise v{{version}}
# Remove with: hookwise hooks uninstall {{hook}}

if ! command -v {{binary}} >/dev/null 2>&1; then
    echo "hookwise: '{{binary}}' not found in PATH, skipping {{hook}}" >&2
    exit 0
fi

exec {{binary}} hook {{hook}} "$@"
"#;

#[derive(Serialize)]
struct ScriptContext<'a> {
    version: &'a str,
    hook: &'a str,
    binary: &'a str,
}

/// The script that forwards a git hook to `hookwise hook <name>`.
#[derive(Debug, Clone, Copy)]
pub struct HookTemplate {
    kind: HookKind,
}

impl HookTemplate {
    pub fn new(kind: HookKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> HookKind {
        self.kind
    }

    /// Render the script text.
    pub fn render(&self) -> Result<String> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        let context = ScriptContext {
            version: crate::version::VERSION,
            hook: self.kind.filename(),
            binary: "hookwise",
        };

        registry
            .render_template(HOOK_SCRIPT, &context)
            .map_err(|e| {
                HookError::Template {
                    message: e.to_string(),
                }
                .into()
            })
    }
}

/// True when the script content was written by hookwise.
pub fn is_hookwise_script(content: &str) -> bool {
    content.contains(HOOK_MARKER) || content.contains("Generated by hookwise")
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::HookwiseConfig;

/// Get the default configuration.
pub fn default_config() -> HookwiseConfig {
    HookwiseConfig::default()
}

/// Generate an example configuration file.
///
/// Every value shown is the built-in default.
pub fn example_config() -> &'static str {
    r#"# Hookwise Configuration File
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Subject: <type>(<scope>)!: <description>
[rules.subject]
allowed_types = ["feat", "fix", "chore", "test", "docs", "build", "ci", "style", "refactor", "perf", "revert"]
# Scopes are regex fragments. The default accepts any 2-20 character scope.
# allowed_scopes = ["core", "cli", "config"]
require_type = true
require_scope = false

[rules.subject.description]
required = true
letter_case = "sentence"   # any | lower | upper | sentence | title
min_length = 10
max_length = 70            # 0 means no limit
allowed_special_chars = "" # empty means the built-in set
may_end_with_period = false
must_end_with_period = false

[rules.body]
required = false
letter_case = "any"
min_length = 0
max_length = 0
may_end_with_period = true

[rules.footer]
required = false
# Keywords are regex fragments. A line "<keyword>: ..." starts a footer.
allowed_keywords = ["BREAKING CHANGE", "BREAKING-CHANGE", "[a-z]+(?:-[a-z]+)*"]

[rules.footer.description]
required = true
letter_case = "sentence"
min_length = 10
max_length = 0
may_end_with_period = true

# Pre-commit checks run in order: format, clean, build, test.
# With two or more projects each step runs in all of them concurrently.
[pre_commit]
projects = []              # paths or glob patterns; empty runs once in the repository
test_projects = []         # empty reuses projects
shell = "sh"
timeout_secs = 0           # 0 means no timeout

[pre_commit.format]
enabled = true
command = "cargo fmt --check"

[pre_commit.clean]
enabled = true
command = "cargo clean"

[pre_commit.build]
enabled = true
command = "cargo build"
error_markers = ["error", "warning"]

[pre_commit.test]
enabled = true
command = "cargo test"

# Hook scripts written by `hookwise hooks install`
[hooks]
commit_msg = true
pre_commit = true
prepare_commit_msg = true
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.rules.subject.description.max_length, 70);
        assert!(config.hooks.commit_msg);
    }

    #[test]
    fn test_example_config_parseable() {
        let example = example_config();
        let config: HookwiseConfig =
            toml::from_str(example).expect("Example config should parse");
        assert_eq!(config.rules.subject.allowed_types.len(), 11);
        assert_eq!(config.pre_commit.build.error_markers, vec!["error", "warning"]);
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config: HookwiseConfig = toml::from_str(example_config()).unwrap();
        let defaults = default_config();
        assert_eq!(config.rules.footer, defaults.rules.footer);
        assert_eq!(config.rules.body, defaults.rules.body);
        assert_eq!(
            config.rules.subject.description,
            defaults.rules.subject.description
        );
    }
}

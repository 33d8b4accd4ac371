// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from hookwise.toml.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::rules::pattern::{letter_case_fragment, HYPHENATED_WORDS};

/// The main configuration structure for hookwise.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct HookwiseConfig {
    /// Commit message rules.
    pub rules: CommitRules,

    /// Pre-commit checks.
    pub pre_commit: PreCommitConfig,

    /// Which hook scripts `hooks install` writes.
    pub hooks: HooksConfig,
}

impl HookwiseConfig {
    /// Load configuration from the default locations, falling back to defaults.
    pub fn load() -> Self {
        super::loader::load_config_or_default(None)
    }

    /// Load configuration from a specific path, falling back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        super::loader::load_config_or_default(Some(path))
    }
}

/// Letter case a commit message component must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterCase {
    /// No case restriction.
    #[default]
    Any,
    /// only lowercase letters
    Lower,
    /// ONLY UPPERCASE LETTERS
    Upper,
    /// First letter uppercase, the rest free.
    Sentence,
    /// Every Word Starts Uppercase
    Title,
}

impl std::fmt::Display for LetterCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LetterCase::Any => "any",
            LetterCase::Lower => "lower",
            LetterCase::Upper => "upper",
            LetterCase::Sentence => "sentence",
            LetterCase::Title => "title",
        };
        f.write_str(name)
    }
}

/// Shape constraints for one text component (subject description, body,
/// footer description).
///
/// A required component always has a minimum length of at least one; the
/// constructor and deserialization both enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ComponentRulesDef")]
pub struct ComponentRules {
    /// Whether the component must be present.
    pub required: bool,

    /// Letter case rule.
    pub letter_case: LetterCase,

    /// Minimum length in characters.
    pub min_length: usize,

    /// Maximum length in characters. 0 means no limit.
    pub max_length: usize,

    /// Allowed special characters. Empty means the built-in set.
    #[serde(serialize_with = "special_chars::serialize")]
    pub allowed_special_chars: Vec<char>,

    /// Whether the component may end with a period.
    pub may_end_with_period: bool,

    /// Whether the component must end with a period.
    pub must_end_with_period: bool,
}

impl ComponentRules {
    /// Create component rules. Special characters default to the built-in
    /// set and the component may end with a period.
    pub fn new(required: bool, letter_case: LetterCase, min_length: usize, max_length: usize) -> Self {
        Self {
            required,
            letter_case,
            min_length: if required { min_length.max(1) } else { min_length },
            max_length,
            allowed_special_chars: Vec::new(),
            may_end_with_period: true,
            must_end_with_period: false,
        }
    }

    /// Restrict the special characters the component may contain.
    pub fn with_special_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.allowed_special_chars = chars.into_iter().collect();
        self
    }

    /// Set whether the component may end with a period.
    pub fn may_end_with_period(mut self, allowed: bool) -> Self {
        self.may_end_with_period = allowed;
        self
    }

    /// Set whether the component must end with a period.
    pub fn must_end_with_period(mut self, required: bool) -> Self {
        self.must_end_with_period = required;
        self
    }

    /// Whether a separate length check is needed after matching.
    ///
    /// Title case patterns are unbounded, so the maximum is enforced on the
    /// matched text instead.
    pub fn needs_length_check(&self) -> bool {
        self.letter_case == LetterCase::Title && self.max_length > 0
    }
}

impl Default for ComponentRules {
    fn default() -> Self {
        Self::new(false, LetterCase::Any, 0, 0)
    }
}

/// Wire shape of [`ComponentRules`]; every field optional.
#[derive(Deserialize)]
#[serde(default)]
struct ComponentRulesDef {
    required: bool,
    letter_case: LetterCase,
    min_length: usize,
    max_length: usize,
    #[serde(deserialize_with = "special_chars::deserialize")]
    allowed_special_chars: Vec<char>,
    may_end_with_period: bool,
    must_end_with_period: bool,
}

impl Default for ComponentRulesDef {
    fn default() -> Self {
        let rules = ComponentRules::default();
        Self {
            required: rules.required,
            letter_case: rules.letter_case,
            min_length: rules.min_length,
            max_length: rules.max_length,
            allowed_special_chars: rules.allowed_special_chars,
            may_end_with_period: rules.may_end_with_period,
            must_end_with_period: rules.must_end_with_period,
        }
    }
}

impl From<ComponentRulesDef> for ComponentRules {
    fn from(def: ComponentRulesDef) -> Self {
        ComponentRules::new(def.required, def.letter_case, def.min_length, def.max_length)
            .with_special_chars(def.allowed_special_chars)
            .may_end_with_period(def.may_end_with_period)
            .must_end_with_period(def.must_end_with_period)
    }
}

/// Special characters are written as a single string in TOML, e.g. `"-_."`.
mod special_chars {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(chars: &[char], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&chars.iter().collect::<String>())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<char>, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(text.chars().collect())
    }
}

/// Rules for the whole commit message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommitRules {
    /// Subject line rules.
    pub subject: SubjectRules,

    /// Body rules.
    pub body: ComponentRules,

    /// Footer rules.
    pub footer: FooterRules,
}

impl Default for CommitRules {
    fn default() -> Self {
        Self {
            subject: SubjectRules::default(),
            body: ComponentRules::new(false, LetterCase::Any, 0, 0),
            footer: FooterRules::default(),
        }
    }
}

/// Subject line rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubjectRules {
    /// Allowed commit types, matched literally.
    pub allowed_types: Vec<String>,

    /// Allowed scopes. Each entry is a regex fragment.
    pub allowed_scopes: Vec<String>,

    /// Whether the type is required.
    pub require_type: bool,

    /// Whether the scope is required.
    pub require_scope: bool,

    /// Rules for the text after the `: ` divider.
    pub description: ComponentRules,
}

impl Default for SubjectRules {
    fn default() -> Self {
        Self {
            allowed_types: [
                "feat", "fix", "chore", "test", "docs", "build", "ci", "style", "refactor", "perf",
                "revert",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            allowed_scopes: vec![letter_case_fragment(LetterCase::Any, 2, 20, &[])],
            require_type: true,
            require_scope: false,
            description: ComponentRules::new(true, LetterCase::Sentence, 10, 70)
                .may_end_with_period(false),
        }
    }
}

/// Footer rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FooterRules {
    /// Whether at least one footer is required.
    pub required: bool,

    /// Keywords that start a footer. Each entry is a regex fragment.
    pub allowed_keywords: Vec<String>,

    /// Rules for the text after the `: ` divider.
    pub description: ComponentRules,
}

impl Default for FooterRules {
    fn default() -> Self {
        Self {
            required: false,
            allowed_keywords: vec![
                "BREAKING CHANGE".to_string(),
                "BREAKING-CHANGE".to_string(),
                HYPHENATED_WORDS.to_string(),
            ],
            description: ComponentRules::new(true, LetterCase::Sentence, 10, 0),
        }
    }
}

/// A pre-commit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreCommitStep {
    Format,
    Clean,
    Build,
    Test,
}

impl PreCommitStep {
    /// All steps in execution order.
    pub fn all() -> &'static [PreCommitStep] {
        &[
            PreCommitStep::Format,
            PreCommitStep::Clean,
            PreCommitStep::Build,
            PreCommitStep::Test,
        ]
    }

    /// Short name used in task and log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            PreCommitStep::Format => "format",
            PreCommitStep::Clean => "clean",
            PreCommitStep::Build => "build",
            PreCommitStep::Test => "test",
        }
    }

    /// Progress line shown when the step starts.
    pub fn start_message(&self) -> &'static str {
        match self {
            PreCommitStep::Format => "Formatting code",
            PreCommitStep::Clean => "Cleaning code",
            PreCommitStep::Build => "Building code",
            PreCommitStep::Test => "Testing code",
        }
    }

    /// Result line shown when one execution of the step completes.
    pub fn finish_message(&self, success: bool) -> String {
        let (noun, done) = match self {
            PreCommitStep::Format => ("Format", "finished"),
            PreCommitStep::Clean => ("Clean", "finished"),
            PreCommitStep::Build => ("Build", "finished"),
            PreCommitStep::Test => ("Tests", "passed"),
        };
        format!("{} {}", noun, if success { done } else { "failed" })
    }

    /// Command used when the configuration leaves it empty.
    pub fn default_command(&self) -> &'static str {
        match self {
            PreCommitStep::Format => "cargo fmt --check",
            PreCommitStep::Clean => "cargo clean",
            PreCommitStep::Build => "cargo build",
            PreCommitStep::Test => "cargo test",
        }
    }
}

impl std::fmt::Display for PreCommitStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pre-commit hook configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreCommitConfig {
    /// Project paths or glob patterns checked by format, clean and build.
    pub projects: Vec<String>,

    /// Project paths or glob patterns checked by test. Empty means `projects`.
    pub test_projects: Vec<String>,

    /// Shell used to run step commands.
    pub shell: String,

    /// Per-command timeout in seconds. 0 means no timeout.
    pub timeout_secs: u64,

    pub format: StepConfig,
    pub clean: StepConfig,
    pub build: StepConfig,
    pub test: StepConfig,
}

impl Default for PreCommitConfig {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            test_projects: Vec::new(),
            shell: "sh".to_string(),
            timeout_secs: 0,
            format: StepConfig::default(),
            clean: StepConfig::default(),
            build: StepConfig {
                error_markers: vec!["error".to_string(), "warning".to_string()],
                ..StepConfig::default()
            },
            test: StepConfig::default(),
        }
    }
}

impl PreCommitConfig {
    /// Effective settings for a step, with the default command filled in.
    pub fn step(&self, step: PreCommitStep) -> StepConfig {
        let configured = match step {
            PreCommitStep::Format => &self.format,
            PreCommitStep::Clean => &self.clean,
            PreCommitStep::Build => &self.build,
            PreCommitStep::Test => &self.test,
        };

        let mut effective = configured.clone();
        if effective.command.trim().is_empty() {
            effective.command = step.default_command().to_string();
        }
        effective
    }

    /// Timeout applied to every command, if any.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Settings for one pre-commit step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StepConfig {
    /// Whether the step runs.
    pub enabled: bool,

    /// Shell command. Runs inside each project path.
    pub command: String,

    /// Only error lines containing one of these markers are shown.
    /// Empty keeps every line.
    pub error_markers: Vec<String>,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: String::new(),
            error_markers: Vec::new(),
        }
    }
}

/// Hooks configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HooksConfig {
    /// Install the commit-msg hook.
    pub commit_msg: bool,

    /// Install the pre-commit hook.
    pub pre_commit: bool,

    /// Install the prepare-commit-msg hook.
    pub prepare_commit_msg: bool,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            commit_msg: true,
            pre_commit: true,
            prepare_commit_msg: true,
        }
    }
}

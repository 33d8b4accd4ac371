// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use crate::commit::CommitMessage;
use crate::config::CommitRules;
use crate::error::Result;
use crate::git;

use super::checks::MessageCheck;
use super::pattern::MessagePatterns;
use super::validator::ValidationResult;

/// Validates commit messages against one set of compiled patterns.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    patterns: MessagePatterns,
}

impl RuleEngine {
    /// Create an engine for the given rules, falling back to the built-in
    /// rules when they do not compile.
    pub fn new(rules: &CommitRules) -> Self {
        Self::with_patterns(MessagePatterns::build_or_default(rules))
    }

    /// Create an engine from already compiled patterns.
    pub fn with_patterns(patterns: MessagePatterns) -> Self {
        Self { patterns }
    }

    /// The compiled patterns.
    pub fn patterns(&self) -> &MessagePatterns {
        &self.patterns
    }

    /// Parse message text with this engine's footer keywords.
    pub fn parse(&self, text: &str) -> CommitMessage {
        CommitMessage::parse(text, &self.patterns)
    }

    /// Run every check on a parsed message.
    pub fn validate(&self, message: &CommitMessage) -> ValidationResult {
        let mut result = ValidationResult::new(message.text());
        result.outcomes = MessageCheck::all()
            .iter()
            .map(|check| check.run(message, &self.patterns))
            .collect();
        result
    }

    /// Validate a commit message string.
    pub fn validate_string(&self, message: &str) -> ValidationResult {
        self.validate(&self.parse(message))
    }

    /// Check a specific commit by reference.
    pub fn check_commit(&self, reference: &str) -> Result<ValidationResult> {
        let (sha, message) = git::get_commit_message(reference)?;
        let mut result = self.validate_string(&message);
        result.commit_sha = Some(sha);
        Ok(result)
    }

    /// Check a range of commits.
    pub fn check_range(&self, range: &str) -> Result<Vec<ValidationResult>> {
        let commits = git::get_commit_range(range)?;

        Ok(commits
            .into_iter()
            .map(|(oid, message)| {
                let mut result = self.validate_string(&message);
                result.commit_sha = Some(oid);
                result
            })
            .collect())
    }
}

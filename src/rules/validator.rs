// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation result types.

use crate::cli::args::OutputFormat;
use console::style;
use serde::Serialize;

use super::checks::MessageCheck;

/// A single validation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<String>,
    /// Line number where the issue was found.
    pub line: Option<usize>,
}

impl ValidationIssue {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            line: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Format the issue for terminal output.
    pub fn format(&self) -> String {
        let mut output = format!(
            "{} {} {}",
            style("✗").red().bold(),
            style(&self.code).red(),
            self.message
        );

        if let Some(ref suggestion) = self.suggestion {
            output.push_str(&format!(
                "\n  {} {}",
                style("→").dim(),
                style(suggestion).dim()
            ));
        }

        output
    }
}

/// Outcome of one message check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub check: MessageCheck,
    pub success: bool,
    /// One-line result shown next to the check.
    pub summary: String,
    pub issues: Vec<ValidationIssue>,
}

impl CheckOutcome {
    /// Build the outcome of a check from the issues it found.
    pub fn from_issues(check: MessageCheck, issues: Vec<ValidationIssue>) -> Self {
        let success = issues.is_empty();
        Self {
            check,
            success,
            summary: check.summary(success).to_string(),
            issues,
        }
    }
}

/// Result of validating a commit message.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// The message text that was checked.
    pub message: String,
    /// Commit SHA if validating an existing commit.
    pub commit_sha: Option<String>,
    /// One outcome per check, in the order they ran.
    pub outcomes: Vec<CheckOutcome>,
}

impl ValidationResult {
    /// Create a new validation result.
    pub fn new(message: String) -> Self {
        Self {
            message,
            commit_sha: None,
            outcomes: Vec::new(),
        }
    }

    /// Check if every check passed.
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }

    /// All issues across checks.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.outcomes.iter().flat_map(|o| o.issues.iter())
    }

    /// Get the total number of issues.
    pub fn issue_count(&self) -> usize {
        self.errors().count()
    }

    /// The outcome of a specific check, if it ran.
    pub fn outcome(&self, check: MessageCheck) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.check == check)
    }

    /// Print the result to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => self.print_json(),
            _ => self.print_text(),
        }
    }

    /// Print in text format.
    fn print_text(&self) {
        let status = if self.is_valid() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        let first_line = self.message.lines().next().unwrap_or("");

        match self.commit_sha {
            Some(ref sha) => {
                let short_sha = &sha[..7.min(sha.len())];
                println!("{} {} {}", status, style(short_sha).cyan(), first_line);
            }
            None => println!("{} {}", status, first_line),
        }

        for error in self.errors() {
            println!("  {}", error.format());
        }
    }

    /// Print in JSON format.
    fn print_json(&self) {
        let json = serde_json::json!({
            "valid": self.is_valid(),
            "commit": self.commit_sha,
            "message": self.message,
            "checks": self.outcomes,
        });

        println!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_default()
        );
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            "Valid".to_string()
        } else {
            format!("Invalid ({} errors)", self.issue_count())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing(check: MessageCheck) -> CheckOutcome {
        CheckOutcome::from_issues(
            check,
            vec![ValidationIssue::new("test-error", "Test error").at_line(1)],
        )
    }

    #[test]
    fn test_validation_result_valid() {
        let mut result = ValidationResult::new("feat: Add the parser".to_string());
        result
            .outcomes
            .push(CheckOutcome::from_issues(MessageCheck::Subject, Vec::new()));
        assert!(result.is_valid());
        assert_eq!(result.issue_count(), 0);
        assert_eq!(result.summary(), "Valid");
    }

    #[test]
    fn test_validation_result_with_errors() {
        let mut result = ValidationResult::new("test".to_string());
        result.outcomes.push(failing(MessageCheck::Subject));
        result
            .outcomes
            .push(CheckOutcome::from_issues(MessageCheck::Body, Vec::new()));

        assert!(!result.is_valid());
        assert_eq!(result.issue_count(), 1);
        assert!(result.summary().contains("Invalid"));
        assert!(result.outcome(MessageCheck::Body).unwrap().success);
    }

    #[test]
    fn test_outcome_summary_follows_success() {
        let outcome = failing(MessageCheck::Subject);
        assert!(!outcome.success);
        assert_eq!(outcome.summary, "Subject of the commit message is incorrect.");
    }

    #[test]
    fn test_validation_issue_format() {
        let issue = ValidationIssue::new("test", "Test message").with_suggestion("Fix it");

        let formatted = issue.format();
        assert!(formatted.contains("test"));
        assert!(formatted.contains("Test message"));
        assert!(formatted.contains("Fix it"));
    }

    #[test]
    fn test_outcome_serializes_check_name() {
        let json = serde_json::to_value(failing(MessageCheck::BlankLines)).unwrap();
        assert_eq!(json["check"], "blank-lines");
        assert_eq!(json["success"], false);
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The four message checks.
//!
//! Each check is a pure function of a parsed [`CommitMessage`] and the
//! compiled [`MessagePatterns`]. A check never stops at the first problem:
//! every issue it finds is collected so the author sees all of them at once.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::commit::CommitMessage;
use crate::config::{ComponentRules, LetterCase};

use super::pattern::MessagePatterns;
use super::validator::{CheckOutcome, ValidationIssue};

lazy_static! {
    /// Separates `<type>(<scope>)` or a footer keyword from its description.
    static ref DIVIDER: Regex = Regex::new(r":\s").unwrap();
}

/// Longest footer excerpt quoted in an issue.
const EXCERPT_LENGTH: usize = 50;

/// A structural check on a commit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageCheck {
    Subject,
    Body,
    Footer,
    BlankLines,
}

impl MessageCheck {
    /// All checks in the order the commit-msg hook runs them.
    pub fn all() -> &'static [MessageCheck] {
        &[
            MessageCheck::Subject,
            MessageCheck::Body,
            MessageCheck::Footer,
            MessageCheck::BlankLines,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MessageCheck::Subject => "subject",
            MessageCheck::Body => "body",
            MessageCheck::Footer => "footer",
            MessageCheck::BlankLines => "blank-lines",
        }
    }

    /// Progress line shown when the check starts.
    pub fn description(&self) -> &'static str {
        match self {
            MessageCheck::Subject => "Verifying commit message subject format",
            MessageCheck::Body => "Verifying commit message body format",
            MessageCheck::Footer => "Verifying commit message footers",
            MessageCheck::BlankLines => "Verifying blank lines between sections",
        }
    }

    /// Result line shown when the check finishes.
    pub fn summary(&self, success: bool) -> &'static str {
        match (self, success) {
            (MessageCheck::Subject, true) => "Subject of the commit message is correct.",
            (MessageCheck::Subject, false) => "Subject of the commit message is incorrect.",
            (MessageCheck::Body, true) => "Body of the commit message is correct.",
            (MessageCheck::Body, false) => "Body of the commit message is incorrect.",
            (MessageCheck::Footer, true) => "Footers are correct.",
            (MessageCheck::Footer, false) => "Footers are incorrect.",
            (MessageCheck::BlankLines, true) => "Blank lines are present.",
            (MessageCheck::BlankLines, false) => "Blank lines are missing.",
        }
    }

    /// Run this check.
    pub fn run(&self, message: &CommitMessage, patterns: &MessagePatterns) -> CheckOutcome {
        match self {
            MessageCheck::Subject => check_subject(message, patterns),
            MessageCheck::Body => check_body(message, patterns),
            MessageCheck::Footer => check_footer(message, patterns),
            MessageCheck::BlankLines => check_blank_lines(message),
        }
    }
}

impl std::fmt::Display for MessageCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The subject must match the subject pattern.
pub fn check_subject(message: &CommitMessage, patterns: &MessagePatterns) -> CheckOutcome {
    let rules = &patterns.rules().subject;
    let subject = message.subject();
    let mut issues = Vec::new();

    if !patterns.subject().is_match(subject) {
        let types = rules.allowed_types.join(", ");
        issues.push(
            ValidationIssue::new(
                "subject-format",
                format!("Subject '{}' does not match <type>(<scope>): <description>", subject),
            )
            .with_suggestion(format!(
                "Use one of [{}] and a description in {} case, {}",
                types,
                rules.description.letter_case,
                describe_length(&rules.description)
            ))
            .at_line(1),
        );
    } else if let Some(issue) =
        description_length_issue("subject", after_divider(subject), &rules.description)
    {
        issues.push(issue.at_line(1));
    }

    CheckOutcome::from_issues(MessageCheck::Subject, issues)
}

/// A required body must be present; a present body must match the body pattern.
pub fn check_body(message: &CommitMessage, patterns: &MessagePatterns) -> CheckOutcome {
    let rules = &patterns.rules().body;
    let body = message.body();
    let mut issues = Vec::new();

    if body.trim().is_empty() {
        if rules.required {
            issues.push(
                ValidationIssue::new("body-missing", "The commit message must contain a body.")
                    .with_suggestion("Add a body after a blank line below the subject"),
            );
        }
    } else if !patterns.body().is_match(body) {
        issues.push(
            ValidationIssue::new("body-format", "Body does not match the configured format")
                .with_suggestion(format!(
                    "Write the body in {} case, {}",
                    rules.letter_case,
                    describe_length(rules)
                )),
        );
    } else if let Some(issue) = description_length_issue("body", after_divider(body), rules) {
        issues.push(issue);
    }

    CheckOutcome::from_issues(MessageCheck::Body, issues)
}

/// Every footer must match the footer pattern. All footers are checked.
pub fn check_footer(message: &CommitMessage, patterns: &MessagePatterns) -> CheckOutcome {
    let rules = &patterns.rules().footer;
    let mut issues = Vec::new();

    if rules.required && message.footers().is_empty() {
        issues.push(
            ValidationIssue::new(
                "footer-missing",
                "There must be at least one footer in the commit message.",
            )
            .with_suggestion(format!(
                "Add a footer such as '{}: <description>'",
                rules
                    .allowed_keywords
                    .first()
                    .map(String::as_str)
                    .unwrap_or("BREAKING CHANGE")
            )),
        );
    }

    for footer in message.footers().iter().filter(|f| !f.trim().is_empty()) {
        if !patterns.footer().is_match(footer) {
            issues.push(
                ValidationIssue::new(
                    "footer-format",
                    format!("Footer '{}' does not match <keyword>: <description>", excerpt(footer)),
                )
                .with_suggestion(format!(
                    "Write the footer description in {} case, {}",
                    rules.description.letter_case,
                    describe_length(&rules.description)
                )),
            );
        } else if let Some(issue) =
            description_length_issue("footer", after_divider(footer), &rules.description)
        {
            issues.push(issue);
        }
    }

    CheckOutcome::from_issues(MessageCheck::Footer, issues)
}

/// A blank line must follow the subject, and the body when footers follow it.
pub fn check_blank_lines(message: &CommitMessage) -> CheckOutcome {
    let has_body = !message.body().is_empty();
    let has_footers = !message.footers().is_empty();
    let mut issues = Vec::new();

    if (has_body || has_footers) && !message.blank_line_after_subject() {
        issues.push(
            ValidationIssue::new(
                "blank-line-after-subject",
                "Blank line after subject is missing.",
            )
            .at_line(2),
        );
    }

    if has_body && has_footers && !message.blank_line_after_body() {
        issues.push(ValidationIssue::new(
            "blank-line-after-body",
            "Blank line after body is missing.",
        ));
    }

    CheckOutcome::from_issues(MessageCheck::BlankLines, issues)
}

/// Text after the first `: ` divider, or all of it when there is none.
fn after_divider(text: &str) -> &str {
    DIVIDER.find(text).map(|m| &text[m.end()..]).unwrap_or(text)
}

/// Title case patterns cannot bound length, so the maximum is checked here.
fn description_length_issue(
    component: &str,
    description: &str,
    rules: &ComponentRules,
) -> Option<ValidationIssue> {
    if !rules.needs_length_check() {
        return None;
    }

    let length = description.chars().count();
    (length > rules.max_length).then(|| {
        ValidationIssue::new(
            format!("{}-max-length", component),
            format!(
                "Description is too long: {} characters (max: {})",
                length, rules.max_length
            ),
        )
        .with_suggestion(format!(
            "Shorten the description to {} characters or less",
            rules.max_length
        ))
    })
}

fn describe_length(rules: &ComponentRules) -> String {
    match (rules.min_length, rules.max_length) {
        (0, 0) => "any length".to_string(),
        (min, 0) => format!("at least {} characters", min),
        (min, max) if rules.letter_case == LetterCase::Title => {
            format!("{} to {} characters, every word capitalized", min, max)
        }
        (min, max) => format!("{} to {} characters", min, max),
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_LENGTH {
        text.to_string()
    } else {
        let head: String = text.chars().take(EXCERPT_LENGTH - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommitRules;

    fn message(lines: &[&str], patterns: &MessagePatterns) -> CommitMessage {
        CommitMessage::from_lines(lines.iter().copied(), patterns)
    }

    fn title_patterns(max: usize) -> MessagePatterns {
        let mut rules = CommitRules::default();
        rules.subject.description = ComponentRules::new(true, LetterCase::Title, 1, max);
        MessagePatterns::build(&rules).unwrap()
    }

    #[test]
    fn test_subject_passes() {
        let patterns = MessagePatterns::defaults();
        let msg = message(&["feat(core): Add the message parser"], &patterns);
        let outcome = check_subject(&msg, &patterns);
        assert!(outcome.success, "{:?}", outcome.issues);
        assert_eq!(outcome.summary, "Subject of the commit message is correct.");
    }

    #[test]
    fn test_subject_without_type_fails() {
        let patterns = MessagePatterns::defaults();
        let msg = message(&["update stuff"], &patterns);
        let outcome = check_subject(&msg, &patterns);
        assert!(!outcome.success);
        assert_eq!(outcome.issues[0].code, "subject-format");
        assert_eq!(outcome.issues[0].line, Some(1));
    }

    #[test]
    fn test_title_subject_length_checked_after_divider() {
        let patterns = title_patterns(20);

        let msg = message(&["feat: Short Title Here"], &patterns);
        assert!(check_subject(&msg, &patterns).success);

        let msg = message(&["feat: This Title Is Far Too Long For The Limit"], &patterns);
        let outcome = check_subject(&msg, &patterns);
        assert!(!outcome.success);
        assert_eq!(outcome.issues[0].code, "subject-max-length");
    }

    #[test]
    fn test_title_body_length_checked_after_divider() {
        let mut rules = CommitRules::default();
        rules.body = ComponentRules::new(true, LetterCase::Title, 1, 16);
        let patterns = MessagePatterns::build(&rules).unwrap();

        let msg = message(&["feat: Add the message parser", "", "Note: Some Title Words"], &patterns);
        let outcome = check_body(&msg, &patterns);
        assert!(outcome.success, "{:?}", outcome.issues);

        let msg = message(
            &["feat: Add the message parser", "", "Note: Some Much Longer Title Words"],
            &patterns,
        );
        let outcome = check_body(&msg, &patterns);
        assert!(!outcome.success);
        assert_eq!(outcome.issues[0].code, "body-max-length");
    }

    #[test]
    fn test_title_footer_length_checked_after_divider() {
        let mut rules = CommitRules::default();
        rules.footer.description = ComponentRules::new(true, LetterCase::Title, 1, 10);
        let patterns = MessagePatterns::build(&rules).unwrap();

        let msg = message(&["feat: Add the message parser", "", "refs: Short One"], &patterns);
        let outcome = check_footer(&msg, &patterns);
        assert!(outcome.success, "{:?}", outcome.issues);

        let msg = message(&["feat: Add the message parser", "", "refs: Far Too Long Title"], &patterns);
        let outcome = check_footer(&msg, &patterns);
        assert!(!outcome.success);
        assert_eq!(outcome.issues[0].code, "footer-max-length");
    }

    #[test]
    fn test_title_without_limit_skips_length_check() {
        let patterns = title_patterns(0);
        let msg = message(&["feat: This Title Is Far Too Long For Any Limit"], &patterns);
        assert!(check_subject(&msg, &patterns).success);
    }

    #[test]
    fn test_body_optional_and_empty_passes() {
        let patterns = MessagePatterns::defaults();
        let msg = message(&["feat: Add the message parser"], &patterns);
        assert!(check_body(&msg, &patterns).success);
    }

    #[test]
    fn test_required_body_missing() {
        let mut rules = CommitRules::default();
        rules.body = ComponentRules::new(true, LetterCase::Any, 1, 0);
        let patterns = MessagePatterns::build(&rules).unwrap();

        let msg = message(&["feat: Add the message parser", "", "   "], &patterns);
        let outcome = check_body(&msg, &patterns);
        assert!(!outcome.success);
        assert_eq!(outcome.issues[0].code, "body-missing");
    }

    #[test]
    fn test_body_format() {
        let mut rules = CommitRules::default();
        rules.body = ComponentRules::new(true, LetterCase::Sentence, 1, 0);
        let patterns = MessagePatterns::build(&rules).unwrap();

        let msg = message(&["feat: Add the message parser", "", "Explains the change."], &patterns);
        assert!(check_body(&msg, &patterns).success);

        let msg = message(&["feat: Add the message parser", "", "explains the change."], &patterns);
        let outcome = check_body(&msg, &patterns);
        assert!(!outcome.success);
        assert_eq!(outcome.issues[0].code, "body-format");
    }

    #[test]
    fn test_footer_required_but_missing() {
        let mut rules = CommitRules::default();
        rules.footer.required = true;
        let patterns = MessagePatterns::build(&rules).unwrap();

        let msg = message(&["feat: Add the message parser"], &patterns);
        let outcome = check_footer(&msg, &patterns);
        assert!(!outcome.success);
        assert_eq!(outcome.issues[0].code, "footer-missing");
    }

    #[test]
    fn test_every_footer_is_checked() {
        let patterns = MessagePatterns::defaults();
        let msg = message(
            &[
                "feat: Add the message parser",
                "",
                "reviewed-by: someone lowercase",
                "BREAKING CHANGE: The configuration file moved.",
                "acked-by: another lowercase one",
            ],
            &patterns,
        );
        let outcome = check_footer(&msg, &patterns);
        assert!(!outcome.success);
        assert_eq!(outcome.issues.len(), 2);
        assert!(outcome.issues.iter().all(|i| i.code == "footer-format"));
    }

    #[test]
    fn test_footer_excerpt_is_truncated() {
        let long = "x".repeat(80);
        let text = excerpt(&long);
        assert_eq!(text.chars().count(), EXCERPT_LENGTH);
        assert!(text.ends_with("..."));
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_blank_lines_vacuous() {
        let patterns = MessagePatterns::defaults();
        let msg = message(&["update stuff"], &patterns);
        assert!(check_blank_lines(&msg).success);
    }

    #[test]
    fn test_blank_line_after_subject_missing() {
        let patterns = MessagePatterns::defaults();
        let msg = message(&["feat: Add the message parser", "Body right away"], &patterns);
        let outcome = check_blank_lines(&msg);
        assert!(!outcome.success);
        assert_eq!(outcome.issues[0].code, "blank-line-after-subject");
    }

    #[test]
    fn test_blank_line_after_body_missing() {
        let patterns = MessagePatterns::defaults();
        let msg = message(
            &[
                "feat: Add the message parser",
                "",
                "Body text",
                "BREAKING CHANGE: The configuration file moved.",
            ],
            &patterns,
        );
        let outcome = check_blank_lines(&msg);
        assert!(!outcome.success);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].code, "blank-line-after-body");
    }

    #[test]
    fn test_footers_without_body_need_only_subject_gap() {
        let patterns = MessagePatterns::defaults();
        let msg = message(
            &[
                "feat: Add the message parser",
                "",
                "BREAKING CHANGE: The configuration file moved.",
            ],
            &patterns,
        );
        assert!(check_blank_lines(&msg).success);
    }

    #[test]
    fn test_check_order() {
        let names: Vec<_> = MessageCheck::all().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["subject", "body", "footer", "blank-lines"]);
    }
}

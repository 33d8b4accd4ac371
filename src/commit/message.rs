// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.
//!
//! Parsing never fails. Malformed input produces empty components and all
//! judgement is left to the checks in [`crate::rules`].

use serde::Serialize;

use crate::rules::MessagePatterns;

/// Footer markers that flag a breaking change.
const BREAKING_MARKERS: [&str; 2] = ["BREAKING CHANGE", "BREAKING-CHANGE"];

/// A commit message split into subject, body and footers.
///
/// Built once from the message lines and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CommitMessage {
    raw_lines: Vec<String>,
    subject: String,
    body: String,
    footers: Vec<String>,
    blank_line_after_subject: bool,
    blank_line_after_body: bool,
    breaking_change: Option<String>,
}

/// Parser state carried across footer lines.
#[derive(Default)]
struct FooterFold {
    entries: Vec<String>,
}

impl FooterFold {
    fn push(mut self, line: &str, patterns: &MessagePatterns) -> Self {
        if line.is_empty() {
            return self;
        }

        if patterns.is_footer_start(line) {
            self.entries.push(line.to_string());
        } else if let Some(last) = self.entries.last_mut() {
            last.push('\n');
            last.push_str(line.trim());
        } else {
            tracing::debug!("Dropping footer continuation without a footer: {:?}", line);
        }

        self
    }
}

impl CommitMessage {
    /// Parse message file content. Lines starting with `#` are comments.
    pub fn parse(text: &str, patterns: &MessagePatterns) -> Self {
        Self::from_lines(strip_comments(text), patterns)
    }

    /// Build a message from lines that are already free of comments.
    pub fn from_lines<I, S>(lines: I, patterns: &MessagePatterns) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw_lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let subject = raw_lines.first().cloned().unwrap_or_default();

        let (blank_line_after_subject, remaining) = match raw_lines.len() {
            n if n > 2 && raw_lines[1].is_empty() => (true, &raw_lines[2..]),
            n if n > 1 => (false, &raw_lines[1..]),
            _ => (false, &raw_lines[..0]),
        };

        let first_footer = remaining
            .iter()
            .position(|line| patterns.is_footer_start(line))
            .unwrap_or(remaining.len());
        let (body_lines, footer_lines) = remaining.split_at(first_footer);

        let (body, blank_line_after_body) = match body_lines.split_last() {
            Some((last, rest)) if last.is_empty() => (rest.join("\n"), true),
            _ => (body_lines.join("\n"), false),
        };

        let footers = footer_lines
            .iter()
            .fold(FooterFold::default(), |fold, line| fold.push(line, patterns))
            .entries;

        let breaking_change = footers
            .iter()
            .find(|footer| BREAKING_MARKERS.iter().any(|marker| footer.contains(marker)))
            .cloned();

        let message = Self {
            raw_lines,
            subject,
            body,
            footers,
            blank_line_after_subject,
            blank_line_after_body,
            breaking_change,
        };

        tracing::debug!("Subject: {:?}", message.subject);
        tracing::debug!("Body: {:?}", message.body);
        tracing::debug!("Footers: {:?}", message.footers);
        tracing::debug!("Breaking change: {:?}", message.breaking_change);

        message
    }

    /// The lines the message was built from.
    pub fn raw_lines(&self) -> &[String] {
        &self.raw_lines
    }

    /// The first line.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Lines between the subject and the first footer, newline-joined.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Footer entries, each with its continuation lines.
    pub fn footers(&self) -> &[String] {
        &self.footers
    }

    pub fn blank_line_after_subject(&self) -> bool {
        self.blank_line_after_subject
    }

    pub fn blank_line_after_body(&self) -> bool {
        self.blank_line_after_body
    }

    /// The first footer announcing a breaking change, if any.
    pub fn breaking_change(&self) -> Option<&str> {
        self.breaking_change.as_deref()
    }

    /// Whether the message declares a breaking change, by footer or by `!`.
    pub fn is_breaking(&self) -> bool {
        self.breaking_change.is_some() || self.subject_marks_breaking()
    }

    fn subject_marks_breaking(&self) -> bool {
        self.subject
            .split_once(": ")
            .map(|(header, _)| header.ends_with('!'))
            .unwrap_or(false)
    }

    /// The message text as parsed, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.raw_lines.join("\n")
    }
}

/// Drop git comment lines.
pub fn strip_comments(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Matcher synthesis.
//!
//! Turns [`CommitRules`] into the regexes used to split and validate a
//! commit message. Synthesis is a pure function of the rules: the same rules
//! always produce the same pattern text, which is compiled once and then
//! shared read-only for the rest of the process.
//!
//! Every description fragment has the shape `(<text><terminal>)`, where the
//! terminal character class carries the period and letter case constraints
//! on the last character. Explicit length bounds are adjusted for the fixed
//! characters around the repeated run (a Sentence case leading capital, the
//! terminal, a mandatory final period) so that `min_length..=max_length`
//! bounds the whole description.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use std::fmt;

use crate::config::{CommitRules, ComponentRules, LetterCase};
use crate::error::ConfigError;

/// Footer keyword fragment matching lowercase hyphenated words, e.g. `reviewed-by`.
pub const HYPHENATED_WORDS: &str = "[a-z]+(?:-[a-z]+)*";

/// Special characters allowed when a component does not restrict them.
pub const SPECIAL_CHARS: &str = r"!@#$%^&*()_=+~`'[{}*¿?|:;,.><\-]/";

/// Compiled programs above this size are rejected.
const SIZE_LIMIT: usize = 32 * (1 << 20);

lazy_static! {
    static ref DEFAULT_PATTERNS: MessagePatterns = MessagePatterns::build(&CommitRules::default())
        .expect("built-in commit rules must compile");
}

/// How many times a character class may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    ZeroOrMore,
    OneOrMore,
    Between(usize, usize),
}

impl Repetition {
    /// Repetition for a `min`/`max` pair where a `max` of 0 means unbounded.
    pub fn from_lengths(min: usize, max: usize) -> Self {
        match (min, max) {
            (0, 0) => Repetition::ZeroOrMore,
            (_, 0) => Repetition::OneOrMore,
            (min, max) => Repetition::Between(min, max),
        }
    }
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repetition::ZeroOrMore => f.write_str("*"),
            Repetition::OneOrMore => f.write_str("+"),
            Repetition::Between(min, max) => write!(f, "{{{},{}}}", min, max),
        }
    }
}

/// Escape special characters for use inside a character class.
fn class_chars(allowed: &[char]) -> String {
    if allowed.is_empty() {
        regex::escape(SPECIAL_CHARS)
    } else {
        regex::escape(&allowed.iter().collect::<String>())
    }
}

fn text_fragment(letter_case: LetterCase, repetition: Repetition, allowed: &[char]) -> String {
    let specials = class_chars(allowed);
    match letter_case {
        LetterCase::Lower => format!(r"[a-z\s{}]{}", specials, repetition),
        LetterCase::Upper => format!(r"[A-Z\s{}]{}", specials, repetition),
        LetterCase::Sentence => format!(r"[A-Z][\w\s{}]{}", specials, repetition),
        LetterCase::Title => format!(
            r"([A-Z][\w{0}]*)(?:\s[A-Z][\w{0}]*)*",
            specials
        ),
        LetterCase::Any => format!(r"[\w\s{}]{}", specials, repetition),
    }
}

/// Fragment matching text of the given letter case, repeated per `min`/`max`.
///
/// Used directly for scope fragments. Title case ignores the bounds.
pub fn letter_case_fragment(
    letter_case: LetterCase,
    min_length: usize,
    max_length: usize,
    allowed: &[char],
) -> String {
    text_fragment(
        letter_case,
        Repetition::from_lengths(min_length, max_length),
        allowed,
    )
}

/// Repetition of the free run inside a description fragment.
fn description_repetition(rules: &ComponentRules) -> Repetition {
    match Repetition::from_lengths(rules.min_length, rules.max_length) {
        Repetition::Between(min, max) => {
            let fixed = usize::from(rules.letter_case == LetterCase::Sentence)
                + 1
                + usize::from(rules.must_end_with_period);
            Repetition::Between(min.saturating_sub(fixed), max.saturating_sub(fixed))
        }
        unbounded => unbounded,
    }
}

/// Fragment validating a description component.
///
/// Optional components wrap the whole fragment in `?`, so the empty string
/// always satisfies `^` + fragment.
pub fn description_pattern(rules: &ComponentRules) -> String {
    let optional = if rules.required { "" } else { "?" };
    let excluded_case = match rules.letter_case {
        LetterCase::Lower => "A-Z",
        LetterCase::Upper => "a-z",
        _ => "",
    };
    let text = text_fragment(
        rules.letter_case,
        description_repetition(rules),
        &rules.allowed_special_chars,
    );

    if rules.must_end_with_period {
        format!(r"({}[^{}\s]\.$){}", text, excluded_case, optional)
    } else {
        let period = if rules.may_end_with_period { "" } else { "." };
        format!(r"({}[^{}{}\s]){}$", text, period, excluded_case, optional)
    }
}

/// Pattern text for the subject line.
pub fn subject_pattern(rules: &CommitRules) -> String {
    let subject = &rules.subject;
    let types = subject
        .allowed_types
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    let scopes = subject.allowed_scopes.join("|");

    let type_marker = if subject.require_type { "" } else { "?" };
    let scope_marker = if subject.require_scope { "" } else { "?" };
    let divider_marker = if subject.require_type || subject.require_scope {
        ""
    } else {
        "?"
    };

    format!(
        r"^({}){}(\(\b({})\b\)){}!?(:\s){}{}",
        types,
        type_marker,
        scopes,
        scope_marker,
        divider_marker,
        description_pattern(&subject.description)
    )
}

/// Pattern text for the body.
pub fn body_pattern(rules: &CommitRules) -> String {
    format!("^{}", description_pattern(&rules.body))
}

fn keyword_alternation(rules: &CommitRules) -> String {
    format!("^({})", rules.footer.allowed_keywords.join("|"))
}

/// Pattern text detecting the first line of a footer.
pub fn footer_keyword_pattern(rules: &CommitRules) -> String {
    format!("{}:", keyword_alternation(rules))
}

/// Pattern text validating a whole footer.
pub fn footer_pattern(rules: &CommitRules) -> String {
    format!(
        r"{}:\s{}",
        keyword_alternation(rules),
        description_pattern(&rules.footer.description)
    )
}

fn compile(component: &str, pattern: String) -> Result<Regex, ConfigError> {
    RegexBuilder::new(&pattern)
        .size_limit(SIZE_LIMIT)
        .build()
        .map_err(|e| ConfigError::InvalidPattern {
            component: component.to_string(),
            pattern,
            message: e.to_string(),
        })
}

/// The compiled matchers for one set of rules.
#[derive(Debug, Clone)]
pub struct MessagePatterns {
    rules: CommitRules,
    subject: Regex,
    body: Regex,
    footer_keyword: Regex,
    footer: Regex,
}

impl MessagePatterns {
    /// Synthesize and compile all matchers for the given rules.
    pub fn build(rules: &CommitRules) -> Result<Self, ConfigError> {
        let patterns = Self {
            rules: rules.clone(),
            subject: compile("subject", subject_pattern(rules))?,
            body: compile("body", body_pattern(rules))?,
            footer_keyword: compile("footer keyword", footer_keyword_pattern(rules))?,
            footer: compile("footer", footer_pattern(rules))?,
        };

        tracing::debug!("Subject regex: {}", patterns.subject.as_str());
        tracing::debug!("Body regex: {}", patterns.body.as_str());
        tracing::debug!("Footer regex: {}", patterns.footer.as_str());

        Ok(patterns)
    }

    /// Matchers for the built-in rules.
    pub fn defaults() -> Self {
        DEFAULT_PATTERNS.clone()
    }

    /// Build matchers, falling back to the built-in rules when the
    /// configured fragments do not compile.
    pub fn build_or_default(rules: &CommitRules) -> Self {
        Self::build(rules).unwrap_or_else(|e| {
            tracing::warn!("{}; using default commit rules", e);
            Self::defaults()
        })
    }

    /// The rules these matchers were built from.
    pub fn rules(&self) -> &CommitRules {
        &self.rules
    }

    pub fn subject(&self) -> &Regex {
        &self.subject
    }

    pub fn body(&self) -> &Regex {
        &self.body
    }

    pub fn footer_keyword(&self) -> &Regex {
        &self.footer_keyword
    }

    pub fn footer(&self) -> &Regex {
        &self.footer
    }

    /// Whether a line starts a new footer.
    pub fn is_footer_start(&self, line: &str) -> bool {
        self.footer_keyword.is_match(line)
    }
}

impl Default for MessagePatterns {
    fn default() -> Self {
        Self::defaults()
    }
}

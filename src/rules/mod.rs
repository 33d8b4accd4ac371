// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! The configured [`CommitRules`](crate::config::CommitRules) are compiled
//! once into [`MessagePatterns`], which the four [`MessageCheck`]s apply to a
//! parsed commit message.

pub mod checks;
mod engine;
pub mod pattern;
mod validator;

pub use checks::MessageCheck;
pub use engine::RuleEngine;
pub use pattern::MessagePatterns;
pub use validator::{CheckOutcome, ValidationIssue, ValidationResult};

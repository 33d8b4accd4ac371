// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit module for message parsing and the message template.

mod message;
pub mod template;

pub use message::{strip_comments, CommitMessage};

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI module for hookwise.
//!
//! This module handles command-line argument parsing and command dispatch.

pub mod args;
mod dispatch;

pub use args::{Cli, Commands, OutputFormat};
pub use dispatch::run;

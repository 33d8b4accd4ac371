// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for hookwise.
//!
//! This module holds the commit message rules and pre-commit settings, and
//! loads them from hookwise.toml with the built-in defaults as fallback.

pub mod default;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{find_config_file, load_config, load_config_from, load_config_or_default};
pub use schema::*;

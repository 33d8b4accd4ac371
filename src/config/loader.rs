// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading.
//!
//! A broken or missing configuration never stops a hook: the problem is
//! logged and the built-in rules are used instead.

use crate::error::{ConfigError, HookwiseError, Result};
use std::path::{Path, PathBuf};

use super::schema::HookwiseConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["hookwise.toml", ".hookwise.toml", ".config/hookwise.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join("hookwise").join("config.toml");
        if user_config.is_file() {
            return Some(user_config);
        }
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<HookwiseConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(HookwiseConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<HookwiseConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(HookwiseError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        HookwiseError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Load configuration, logging any failure and falling back to defaults.
pub fn load_config_or_default(path: Option<&Path>) -> HookwiseConfig {
    let loaded = match path {
        Some(path) => load_config_from(path),
        None => load_config(),
    };

    loaded.unwrap_or_else(|e| {
        tracing::warn!("{}; using default configuration", e);
        HookwiseConfig::default()
    })
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<HookwiseConfig> {
    toml::from_str(content).map_err(|e| {
        HookwiseError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

//! Shell configuration.
//!
//! Centralizes the constants used throughout the shell and the
//! [`ShellConfig`] a host can load from TOML.

use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use crate::core::error::ConfigError;

// =============================================================================
// Commands
// =============================================================================

/// First token that opens a session.
pub const DEFAULT_LOGIN_TRIGGER: &str = "trtlshell";

/// Command that closes a session.
pub const LOGOUT_COMMAND: &str = "exit";

// =============================================================================
// Filesystem
// =============================================================================

/// Directory under `/` holding every user's home.
pub const DEFAULT_HOME_ROOT: &str = "home";

// =============================================================================
// Output
// =============================================================================

/// `date` output, e.g. `Mon Jan 2 15:04:05 -0700 2006`.
pub const DEFAULT_DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %z %Y";

/// Reply to a host-level help request.
pub const DEFAULT_HELP_TEXT: &str =
    "if you have to ask you'll never know (but type 'exit' to escape)";

/// Reply for a malformed invocation of `command`.
pub fn usage_message(command: &str) -> String {
    format!("really? you don't know how to use {}", command)
}

/// Inline `cat` placeholder for a path that is not a readable file.
pub fn missing_file_message(path: &str) -> String {
    format!("'{}' does not exist or is not a file.", path)
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Settings a host may override. Every field has a default.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// First token that opens a session, compared in lowercase
    pub login_trigger: String,
    /// Directory under `/` holding home directories
    pub home_root: String,
    /// chrono format string for `date`
    pub date_format: String,
    /// Reply to a host help request
    pub help_text: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            login_trigger: DEFAULT_LOGIN_TRIGGER.to_string(),
            home_root: DEFAULT_HOME_ROOT.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            help_text: DEFAULT_HELP_TEXT.to_string(),
        }
    }
}

impl ShellConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(input)?;
        config.login_trigger = config.login_trigger.to_lowercase();
        if StrftimeItems::new(&config.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::DateFormat(config.date_format));
        }
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&input)
    }
}

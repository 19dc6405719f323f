//! Service layer configuration
//!
//! Tunable limits consumed by the services' precondition checks. Values can
//! be loaded from a TOML file; missing keys fall back to the defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Limits applied by the service layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForumConfig {
    /// Maximum length of names and titles (categories, forums, threads, groups)
    pub max_name_length: usize,
    /// Maximum length of post and message bodies
    pub max_content_length: usize,
    /// Maximum length of a private message subject
    pub max_subject_length: usize,
    /// Maximum number of answers a poll may carry
    pub max_poll_answers: usize,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            max_name_length: 255,
            max_content_length: 65_535,
            max_subject_length: 255,
            max_poll_answers: 10,
        }
    }
}

impl ForumConfig {
    /// Load configuration from a TOML file, falling back to defaults for
    /// keys the file does not set
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

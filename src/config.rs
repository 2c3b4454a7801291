//! Configuration loading and management.
//!
//! The policy is loaded once at startup, validated, and shared immutably for
//! the life of the process. A reload is the host's problem (restart or an
//! explicit reconfiguration event), not this crate's.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Router policy.
#[derive(Debug, Clone, Deserialize)]
pub struct LfsConfig {
    /// Chat phrases that trigger the command. Matched case-insensitively
    /// against the first token of a chat line.
    #[serde(default = "default_trigger_phrases")]
    pub trigger_phrases: Vec<String>,
    /// Seconds that must pass before the same player can trigger again.
    #[serde(default = "default_rate_limit_secs")]
    pub rate_limit_secs: u32,
    /// Warn leaders of locked squads only, or of every squad on the team.
    #[serde(default = "default_true")]
    pub locked_only: bool,
    /// Publish a summary record to the external rich sink after a dispatch.
    #[serde(default)]
    pub summary_sink_enabled: bool,
}

fn default_trigger_phrases() -> Vec<String> {
    vec!["!lfs".to_string()]
}

fn default_rate_limit_secs() -> u32 {
    60
}

/// Returns `true` (for serde defaults).
fn default_true() -> bool {
    true
}

impl Default for LfsConfig {
    fn default() -> Self {
        Self {
            trigger_phrases: default_trigger_phrases(),
            rate_limit_secs: default_rate_limit_secs(),
            locked_only: true,
            summary_sink_enabled: false,
        }
    }
}

impl LfsConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Normalize trigger phrases to lowercase and reject unusable values.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.trigger_phrases.retain(|p| !p.trim().is_empty());
        if self.trigger_phrases.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one trigger phrase is required".to_string(),
            ));
        }
        for phrase in &mut self.trigger_phrases {
            *phrase = phrase.trim().to_lowercase();
        }
        if self.rate_limit_secs == 0 {
            return Err(ConfigError::Invalid(
                "rate_limit_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The first configured trigger phrase, used in usage replies.
    pub fn primary_phrase(&self) -> &str {
        self.trigger_phrases
            .first()
            .map(String::as_str)
            .unwrap_or("!lfs")
    }
}

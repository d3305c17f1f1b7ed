//! Credential configuration persistence.
//!
//! A single flat JSON object at a fixed relative path. Loaded once at
//! startup, overwritten wholesale on save — last writer wins, no locking.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Stored credentials. All fields are plain strings; the file carries
/// exactly these keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github_user: String,
    #[serde(default)]
    pub github_repo: String,
    #[serde(default)]
    pub github_token: String,
    #[serde(default = "default_branch")]
    pub github_branch: String,
    #[serde(default)]
    pub openai_api_key: String,
}

fn default_branch() -> String {
    "main".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_user: String::new(),
            github_repo: String::new(),
            github_token: String::new(),
            github_branch: default_branch(),
            openai_api_key: String::new(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    /// File exists but could not be read, or could not be written
    Io(String),
    /// File exists but is not valid JSON for the expected shape
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load from `path`. An absent file is not an error — it yields the
    /// default (empty) configuration. A malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        serde_json::from_str(&json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Overwrite the file entirely. No temp-file swap: a crash mid-write
    /// can corrupt the file, which is accepted for this tool's stakes.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, json).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Fill empty secret fields from the environment (after dotenvy has
    /// loaded any .env file). The config file takes precedence.
    pub fn apply_env_fallback(&mut self) {
        if self.github_token.is_empty()
            && let Ok(token) = std::env::var("GITHUB_TOKEN")
        {
            self.github_token = token;
        }
        if self.openai_api_key.is_empty()
            && let Ok(key) = std::env::var("OPENAI_API_KEY")
        {
            self.openai_api_key = key;
        }
    }

    /// All four GitHub fields present — the connect action requires this.
    pub fn github_complete(&self) -> bool {
        !self.github_user.is_empty()
            && !self.github_repo.is_empty()
            && !self.github_token.is_empty()
            && !self.github_branch.is_empty()
    }
}

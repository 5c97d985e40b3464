//! Configuration loading
//!
//! Configuration is read from `$XDG_CONFIG_HOME/transcript-viewer/config.toml`
//! (~/.config/transcript-viewer/config.toml). A missing file means defaults.
//!
//! ```toml
//! claude_dir = "/data/claude"
//!
//! [logging]
//! level = "info"
//!
//! [search]
//! min_query_length = 3
//!
//! [limits]
//! max_file_size_mb = 100
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::utils::{get_claude_dir, xdg_config_home};

const APP_DIR: &str = "transcript-viewer";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Overrides `~/.claude`
    #[serde(default)]
    pub claude_dir: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    /// Queries shorter than this (in characters) return no results
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,

    /// Characters of context kept on each side of a match in snippets
    #[serde(default = "default_snippet_context_chars")]
    pub snippet_context_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_length: default_min_query_length(),
            snippet_context_chars: default_snippet_context_chars(),
        }
    }
}

fn default_min_query_length() -> usize {
    2
}

fn default_snippet_context_chars() -> usize {
    30
}

/// Resource limits applied while reading the Claude directory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_projects")]
    pub max_projects: usize,

    #[serde(default = "default_max_sessions_per_project")]
    pub max_sessions_per_project: usize,

    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_projects: default_max_projects(),
            max_sessions_per_project: default_max_sessions_per_project(),
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

impl LimitsConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

fn default_max_projects() -> usize {
    1000
}

fn default_max_sessions_per_project() -> usize {
    1000
}

fn default_max_file_size_mb() -> u64 {
    50
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// `$XDG_CONFIG_HOME/transcript-viewer/config.toml`, when a home directory is known
    pub fn config_path() -> Option<PathBuf> {
        xdg_config_home().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Picks the Claude directory: CLI flag, then config, then `~/.claude`.
    pub fn resolve_claude_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = cli_override {
            return Ok(dir.to_path_buf());
        }
        match &self.claude_dir {
            Some(dir) => Ok(dir.clone()),
            None => get_claude_dir(),
        }
    }
}

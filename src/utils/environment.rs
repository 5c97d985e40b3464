use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Returns `$HOME`, falling back to the platform home directory.
pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from).or_else(dirs::home_dir)
}

/// Get the Claude directory path (~/.claude)
pub fn get_claude_dir() -> Result<PathBuf> {
    claude_dir_under(home_dir().as_deref())
}

/// Returns `$XDG_CONFIG_HOME` or ~/.config
pub fn xdg_config_home() -> Option<PathBuf> {
    xdg_config_home_from(env::var_os("XDG_CONFIG_HOME").map(PathBuf::from), home_dir())
}

fn claude_dir_under(home: Option<&Path>) -> Result<PathBuf> {
    let home = home.context("HOME environment variable not set")?;
    Ok(home.join(".claude"))
}

fn xdg_config_home_from(xdg: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    xdg.filter(|p| !p.as_os_str().is_empty()).or_else(|| home.map(|h| h.join(".config")))
}

//! Config and data directory resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Application directory name under `~/.config` and `~/.local/share`.
const APP_DIR: &str = "movierec";

fn home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home))
}

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Otherwise returns `~/.config/movierec/config.toml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join("config.toml"));
    }
    Ok(home()?.join(".config").join(APP_DIR).join("config.toml"))
}

/// Resolves the data directory holding the session file and TUI log.
///
/// - If `dir` is `Some`, returns `dir` itself.
/// - Otherwise returns `~/.local/share/movierec`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_data_dir(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.clone());
    }
    Ok(home()?.join(".local").join("share").join(APP_DIR))
}

/// `{data dir}/session.json`.
#[must_use]
pub fn resolve_session_path(data_dir: &Path) -> PathBuf {
    data_dir.join("session.json")
}

/// `{data dir}/movierec.log`.
#[must_use]
pub fn resolve_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join("movierec.log")
}

//! Application configuration module.
//!
//! Manages the TOML config file (API root, UI tuning) and resolves where
//! the session file and TUI log live.

mod api_url;
#[allow(clippy::module_inception)]
mod config;
mod paths;

pub use api_url::{API_URL_ENV, resolve_api_url};
#[allow(clippy::module_name_repetitions)]
pub use config::{ApiConfig, AppConfig, UiConfig};
pub use paths::{resolve_config_path, resolve_data_dir, resolve_log_path, resolve_session_path};

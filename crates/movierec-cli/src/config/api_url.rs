//! API root resolution.

use anyhow::Result;
use movierec_api::{DEFAULT_BASE_URL, normalize_base_url};
use url::Url;

use super::AppConfig;

/// Environment variable naming the API root, read at runtime and at build time.
pub const API_URL_ENV: &str = "MOVIEREC_API_URL";

/// API root baked in at build time, if any.
const BUILD_TIME_API_URL: Option<&str> = option_env!("MOVIEREC_API_URL");

/// Resolves the API root.
///
/// Order: `--api-url`, runtime `MOVIEREC_API_URL`, `[api] base_url`,
/// build-time `MOVIEREC_API_URL`, then the local development default.
/// The winner is normalized to end with `/`.
///
/// # Errors
///
/// Returns an error if the chosen value is not an absolute URL.
pub fn resolve_api_url(
    flag: Option<&str>,
    env_value: Option<&str>,
    config: &AppConfig,
) -> Result<Url> {
    let chosen = [flag, env_value, config.api.base_url.as_deref(), BUILD_TIME_API_URL]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_BASE_URL);
    tracing::debug!(api_url = chosen, "resolved API root");
    normalize_base_url(chosen)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::ApiConfig;

    fn config_with(base_url: Option<&str>) -> AppConfig {
        AppConfig {
            api: ApiConfig {
                base_url: base_url.map(String::from),
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_flag_wins() {
        // Arrange
        let config = config_with(Some("https://config.example.com/api/"));

        // Act
        let url = resolve_api_url(
            Some("https://flag.example.com/api"),
            Some("https://env.example.com/api/"),
            &config,
        )
        .unwrap();

        // Assert
        assert_eq!(url.as_str(), "https://flag.example.com/api/");
    }

    #[test]
    fn test_env_before_config() {
        // Arrange
        let config = config_with(Some("https://config.example.com/api/"));

        // Act
        let url = resolve_api_url(None, Some("https://env.example.com/api/"), &config).unwrap();

        // Assert
        assert_eq!(url.as_str(), "https://env.example.com/api/");
    }

    #[test]
    fn test_config_used_when_no_override() {
        // Arrange
        let config = config_with(Some("https://config.example.com/api"));

        // Act
        let url = resolve_api_url(None, Some("  "), &config).unwrap();

        // Assert
        assert_eq!(url.as_str(), "https://config.example.com/api/");
    }

    #[test]
    fn test_fallback_is_absolute() {
        // Arrange & Act
        let url = resolve_api_url(None, None, &AppConfig::default()).unwrap();

        // Assert
        assert!(url.as_str().ends_with('/'));
        assert!(url.has_host());
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        // Arrange & Act
        let result = resolve_api_url(Some("not a url"), None, &AppConfig::default());

        // Assert
        assert!(result.is_err());
    }
}

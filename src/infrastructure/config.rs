//! Application configuration management.
//!
//! Configuration is loaded once at startup from environment variables, with
//! clear errors for missing or invalid values.

use std::env;

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

/// Application configuration.
///
/// Values are loaded from environment variables using
/// [`AppConfig::from_env`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the remote case API.
    pub case_api_base_url: String,
    /// Optional bearer token presented to the case API.
    pub case_api_token: Option<String>,
    /// HTTP server host address.
    pub app_host: String,
    /// HTTP server port.
    pub app_port: u16,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CASE_API_BASE_URL`: base URL of the case API (required)
    /// - `CASE_API_TOKEN`: bearer token for the case API (optional)
    /// - `APP_HOST`: server host (optional, default: "0.0.0.0")
    /// - `APP_PORT`: server port (optional, default: 8080)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if a required variable is not
    /// set, or [`ConfigError::InvalidValue`] if a value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env if present; absence is not an error.
        dotenvy::dotenv().ok();

        let case_api_base_url = get_required_env("CASE_API_BASE_URL")?;
        let case_api_token = env::var("CASE_API_TOKEN").ok().filter(|t| !t.is_empty());
        let app_host = get_optional_env("APP_HOST", "0.0.0.0");
        let app_port = get_optional_env_parsed("APP_PORT", 8080)?;

        Ok(Self {
            case_api_base_url,
            case_api_token,
            app_host,
            app_port,
        })
    }

    /// Creates a configuration programmatically; used by tests.
    #[must_use]
    pub fn for_testing(case_api_base_url: impl Into<String>) -> Self {
        Self {
            case_api_base_url: case_api_base_url.into(),
            case_api_token: None,
            app_host: "127.0.0.1".to_string(),
            app_port: 0,
        }
    }
}

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_optional_env_parsed<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|error: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: error.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn for_testing_uses_ephemeral_port() {
        let config = AppConfig::for_testing("http://127.0.0.1:9");

        assert_eq!(config.app_port, 0);
        assert_eq!(config.case_api_base_url, "http://127.0.0.1:9");
        assert!(config.case_api_token.is_none());
    }

    #[rstest]
    fn missing_required_variable_is_reported_by_name() {
        let error = get_required_env("PROVIDER_PORTAL_TEST_UNSET_VARIABLE").unwrap_err();
        assert_eq!(
            error,
            ConfigError::MissingEnvVar("PROVIDER_PORTAL_TEST_UNSET_VARIABLE".to_string())
        );
    }
}

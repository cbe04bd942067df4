//! Client configuration and loading.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Default path of the ask endpoint.
pub const DEFAULT_ASK_PATH: &str = "/api/ask";

/// Default path of the dataset upload endpoint.
pub const DEFAULT_DATASET_PATH: &str = "/api/datasets";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 30.0;

/// Settings for an AI Help Center client.
///
/// ```toml
/// base_url = "https://help.example.com"
/// ask_path = "/api/ask"
/// dataset_path = "/api/datasets"
/// timeout_seconds = 30   # 0 disables the timeout
///
/// [default_headers]
/// Authorization = "Bearer <token>"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub ask_path: String,
    pub dataset_path: String,
    /// Headers sent with every request, layered over `Content-Type`.
    pub default_headers: BTreeMap<String, String>,
    /// Request timeout in seconds. `0` means no timeout.
    pub timeout_seconds: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            ask_path: DEFAULT_ASK_PATH.to_string(),
            dataset_path: DEFAULT_DATASET_PATH.to_string(),
            default_headers: BTreeMap::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given service URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: ClientConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!("Loading client configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn with_ask_path(mut self, path: impl Into<String>) -> Self {
        self.ask_path = path.into();
        self
    }

    pub fn with_dataset_path(mut self, path: impl Into<String>) -> Self {
        self.dataset_path = path.into();
        self
    }

    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Set the request timeout. `None` disables it.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout_seconds = timeout.map_or(0.0, |t| t.as_secs_f64());
        self
    }

    /// The request timeout, or `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_seconds > 0.0 {
            Duration::try_from_secs_f64(self.timeout_seconds).ok()
        } else {
            None
        }
    }

    /// The base URL with surrounding whitespace and trailing slashes removed.
    pub fn normalized_base_url(&self) -> ConfigResult<String> {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Invalid(
                "base_url is required to initialize the client".to_string(),
            ));
        }
        Ok(trimmed.trim_end_matches('/').to_string())
    }

    /// Check the configuration for values the client cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        self.normalized_base_url()?;

        if !self.timeout_seconds.is_finite() || self.timeout_seconds < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "timeout_seconds must be a non-negative number, got {}",
                self.timeout_seconds
            )));
        }
        if Duration::try_from_secs_f64(self.timeout_seconds).is_err() {
            return Err(ConfigError::Invalid(format!(
                "timeout_seconds is too large, got {}",
                self.timeout_seconds
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::new("https://help.example.com");
        assert_eq!(config.ask_path, "/api/ask");
        assert_eq!(config.dataset_path, "/api/datasets");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn test_normalized_base_url() {
        let config = ClientConfig::new("  https://x.test//  ");
        assert_eq!(config.normalized_base_url().unwrap(), "https://x.test");
    }

    #[test]
    fn test_empty_base_url_is_invalid() {
        for base_url in ["", "   "] {
            let err = ClientConfig::new(base_url).validate().unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
        }
    }

    #[test]
    fn test_timeout_sentinel() {
        let config = ClientConfig::new("https://x.test").with_timeout(None);
        assert_eq!(config.timeout_seconds, 0.0);
        assert_eq!(config.timeout(), None);

        let config = config.with_timeout(Some(Duration::from_millis(1500)));
        assert_eq!(config.timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_negative_timeout_is_invalid() {
        let mut config = ClientConfig::new("https://x.test");
        config.timeout_seconds = -1.0;
        assert!(config.validate().is_err());

        config.timeout_seconds = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unrepresentable_timeout_is_invalid() {
        let mut config = ClientConfig::new("https://x.test");
        config.timeout_seconds = 1e30;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_from_toml_str() {
        let config = ClientConfig::from_toml_str(
            r#"
            base_url = "https://help.example.com/"
            timeout_seconds = 5

            [default_headers]
            Authorization = "Bearer abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.default_headers["Authorization"], "Bearer abc");
        // Defaults should still work
        assert_eq!(config.ask_path, "/api/ask");
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
            base_url = "https://help.example.com"
            dataset_path = "v2/datasets"
            "#
        )
        .unwrap();

        let config = ClientConfig::load_from(temp_file.path()).unwrap();
        assert_eq!(config.dataset_path, "v2/datasets");
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ClientConfig::load_from("/nonexistent/aichat.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }
}

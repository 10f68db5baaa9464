//! Application configuration
//!
//! Settings come from the environment with sensible defaults, and can be
//! adjusted with the builder methods.

use crate::{PastportError, Result};
use reqwest::Url;
use std::time::Duration;

/// Base URL of the backend service
pub const BASE_URL_ENV: &str = "PASTPORT_API_BASE_URL";

/// Request timeout in whole seconds (`0` disables it)
pub const TIMEOUT_ENV: &str = "PASTPORT_REQUEST_TIMEOUT_SECS";

/// Set to `1`/`true` to run without touching audio devices
pub const DISABLE_AUDIO_ENV: &str = "PASTPORT_DISABLE_AUDIO";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Configuration for the whole client
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Backend base URL; endpoint paths are resolved against it
    pub api_base_url: String,

    /// Upper bound on a single request, `None` for no limit
    pub request_timeout: Option<Duration>,

    /// Whether to open the microphone
    pub enable_audio_input: bool,

    /// Whether to open the speakers for replay
    pub enable_audio_output: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            enable_audio_input: true,
            enable_audio_output: true,
        }
    }
}

impl AppConfig {
    /// Load the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                PastportError::ConfigError(format!("{TIMEOUT_ENV} must be a whole number, got {raw:?}"))
            })?;
            config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(raw) = lookup(DISABLE_AUDIO_ENV) {
            if matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes") {
                config = config.without_audio_input().without_audio_output();
            }
        }

        Ok(config)
    }

    /// Set the backend base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Let requests run for as long as the transport allows
    pub fn without_request_timeout(mut self) -> Self {
        self.request_timeout = None;
        self
    }

    /// Disable audio input (typed messages only)
    pub fn without_audio_input(mut self) -> Self {
        self.enable_audio_input = false;
        self
    }

    /// Disable audio output (no replay)
    pub fn without_audio_output(mut self) -> Self {
        self.enable_audio_output = false;
        self
    }

    /// Parse the base URL, making sure it can be used as a join root
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.api_base_url).map_err(|e| {
            PastportError::ConfigError(format!("Invalid base URL {:?}: {}", self.api_base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(PastportError::ConfigError(format!(
                "Base URL must use http or https, got {:?}",
                url.scheme()
            )));
        }

        // Url::join replaces the last segment unless the path ends with '/'
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;

        if self.request_timeout == Some(Duration::ZERO) {
            return Err(PastportError::ConfigError(
                "Request timeout must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Some(DEFAULT_REQUEST_TIMEOUT));
        assert!(config.enable_audio_input);
        assert!(config.enable_audio_output);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::default()
            .with_base_url("https://pastport.example.com")
            .without_request_timeout()
            .without_audio_input()
            .without_audio_output();

        assert_eq!(config.api_base_url, "https://pastport.example.com");
        assert!(config.request_timeout.is_none());
        assert!(!config.enable_audio_input);
        assert!(!config.enable_audio_output);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (BASE_URL_ENV, " http://10.0.0.5:9000 "),
            (TIMEOUT_ENV, "15"),
            (DISABLE_AUDIO_ENV, "true"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://10.0.0.5:9000");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
        assert!(!config.enable_audio_input);
        assert!(!config.enable_audio_output);
    }

    #[test]
    fn test_zero_timeout_disables_limit() {
        let config = AppConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "0")])).unwrap();
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "soon")]));
        assert!(matches!(result, Err(PastportError::ConfigError(_))));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = AppConfig::default().with_base_url("http://localhost:8000/backend");
        let url = config.base_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/backend/");
        assert_eq!(
            url.join("api/chat").unwrap().as_str(),
            "http://localhost:8000/backend/api/chat"
        );
    }

    #[test]
    fn test_validate_rejects_non_http_urls() {
        assert!(AppConfig::default().with_base_url("not a url").validate().is_err());
        assert!(AppConfig::default().with_base_url("ftp://host/").validate().is_err());
    }
}

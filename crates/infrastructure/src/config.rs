//! Identity provider configuration.
//!
//! Loaded from `NUMBERLAND_FIREBASE_*` environment variables with the
//! `config` crate. A missing or placeholder API key means the provider is
//! not configured; callers decide whether to fall back to offline mode.

use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "NUMBERLAND_FIREBASE";

/// API key value shipped in sample env files.
pub const PLACEHOLDER_API_KEY: &str = "placeholder-api-key";

/// Identity Toolkit REST base URL.
pub const DEFAULT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration sources could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// No usable API key was provided.
    #[error("identity provider is not configured: set {ENV_PREFIX}_API_KEY")]
    NotConfigured,

    /// The HTTP client for the provider could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The endpoint is not a valid URL.
    #[error("invalid endpoint {endpoint}: {message}")]
    InvalidEndpoint {
        /// The configured endpoint.
        endpoint: String,
        /// Parser message.
        message: String,
    },
}

/// Firebase project settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FirebaseConfig {
    /// Web API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Auth domain, e.g. `project.firebaseapp.com`.
    #[serde(default)]
    pub auth_domain: Option<String>,
    /// Project id.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Storage bucket.
    #[serde(default)]
    pub storage_bucket: Option<String>,
    /// Messaging sender id.
    #[serde(default)]
    pub messaging_sender_id: Option<String>,
    /// App id.
    #[serde(default)]
    pub app_id: Option<String>,
    /// Identity Toolkit base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            auth_domain: None,
            project_id: None,
            storage_bucket: None,
            messaging_sender_id: None,
            app_id: None,
            endpoint: default_endpoint(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FirebaseConfig {
    /// Creates a config with only an API key set.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Loads the config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if a variable has the wrong type.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads the config from an environment source. Tests pass a source
    /// backed by a map instead of the real environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if a value has the wrong type.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Returns true if a real API key is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .map(str::trim)
            .is_some_and(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY)
    }

    /// The API key, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for a missing or placeholder key.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured);
        }
        self.api_key
            .as_deref()
            .map(str::trim)
            .ok_or(ConfigError::NotConfigured)
    }

    /// Builds the URL of an Identity Toolkit method such as `signUp`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the endpoint is malformed.
    pub fn method_url(&self, method: &str) -> Result<url::Url, ConfigError> {
        let api_key = self.require_api_key()?;
        let base = self.endpoint.trim_end_matches('/');
        let mut url = url::Url::parse(&format!("{base}/accounts:{method}")).map_err(|e| {
            ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                message: e.to_string(),
            }
        })?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    /// Request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn loads_from_prefixed_variables() {
        let config = FirebaseConfig::load(env(&[
            ("NUMBERLAND_FIREBASE_API_KEY", "abc123"),
            ("NUMBERLAND_FIREBASE_PROJECT_ID", "numberland"),
            ("NUMBERLAND_FIREBASE_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.project_id.as_deref(), Some("numberland"));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.is_configured());
    }

    #[test]
    fn empty_environment_is_not_configured() {
        let config = FirebaseConfig::load(env(&[])).unwrap();
        assert_eq!(config, FirebaseConfig::default());
        assert!(!config.is_configured());
        assert!(matches!(
            config.require_api_key(),
            Err(ConfigError::NotConfigured)
        ));
    }

    #[test]
    fn placeholder_key_is_not_configured() {
        assert!(!FirebaseConfig::with_api_key(PLACEHOLDER_API_KEY).is_configured());
        assert!(!FirebaseConfig::with_api_key("   ").is_configured());
    }

    #[test]
    fn method_url_carries_key() {
        let config = FirebaseConfig {
            endpoint: "http://localhost:9099/v1/".to_string(),
            ..FirebaseConfig::with_api_key("k-1")
        };
        let url = config.method_url("signUp").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9099/v1/accounts:signUp?key=k-1");
    }

    #[test]
    fn bad_endpoint_is_reported() {
        let config = FirebaseConfig {
            endpoint: "not a url".to_string(),
            ..FirebaseConfig::with_api_key("k")
        };
        assert!(matches!(
            config.method_url("signUp"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }
}

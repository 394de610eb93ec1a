//! Numberland Infrastructure - Adapters and implementations
//!
//! Concrete implementations of the ports defined in the application layer:
//! identity providers, the system clock, and environment configuration.

pub mod adapters;
pub mod auth;
pub mod config;

use std::sync::Arc;

use numberland_application::IdentityProvider;

pub use adapters::SystemClock;
pub use auth::{FirebaseIdentityProvider, IdentitySession, OfflineIdentityProvider};
pub use config::{ConfigError, FirebaseConfig};

/// Builds the identity provider for `config`.
///
/// An unconfigured project falls back to [`OfflineIdentityProvider`] unless
/// `require_provider` is set.
///
/// # Errors
///
/// Returns [`ConfigError::NotConfigured`] when `require_provider` is set and
/// no API key is available.
pub fn connect(
    config: FirebaseConfig,
    require_provider: bool,
) -> Result<Arc<dyn IdentityProvider>, ConfigError> {
    if config.is_configured() {
        let provider = FirebaseIdentityProvider::new(config)?;
        tracing::info!(endpoint = %provider.config().endpoint, "using identity toolkit provider");
        return Ok(Arc::new(provider));
    }
    if require_provider {
        return Err(ConfigError::NotConfigured);
    }
    tracing::warn!("identity provider not configured, running offline");
    Ok(Arc::new(OfflineIdentityProvider::new()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_falls_back_to_offline() {
        let provider = connect(FirebaseConfig::default(), false).unwrap();
        assert_eq!(provider.name(), "offline");
    }

    #[test]
    fn unconfigured_fails_when_required() {
        let result = connect(FirebaseConfig::with_api_key("placeholder-api-key"), true);
        assert!(matches!(result, Err(ConfigError::NotConfigured)));
    }

    #[test]
    fn configured_uses_rest_provider() {
        let provider = connect(FirebaseConfig::with_api_key("real-key"), true).unwrap();
        assert_eq!(provider.name(), "firebase");
    }
}

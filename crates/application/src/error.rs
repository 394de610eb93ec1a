//! Application error types

use thiserror::Error;

use crate::auth::LoginError;

/// Errors surfaced to the host driving the login flow.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A login form submit failed.
    #[error("login failed: {0}")]
    Login(#[from] LoginError),

    /// The identity provider is missing or misconfigured.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Returns true for deployment defects rather than user errors.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        match self {
            Self::Configuration(_) => true,
            Self::Login(err) => err.is_configuration(),
        }
    }

    /// Text for the user, `None` for deployment defects.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Login(err) if !err.is_configuration() => {
                Some(err.user_message().unwrap_or_else(|| err.to_string()))
            }
            _ => None,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use numberland_domain::{ProviderError, ValidationError};

    #[test]
    fn configuration_detection() {
        assert!(ApplicationError::Configuration("missing key".to_string()).is_configuration());
        let not_configured = LoginError::Provider {
            message: "Failed to sign in. Please try again.",
            source: ProviderError::not_configured("x"),
        };
        let err = ApplicationError::from(not_configured);
        assert!(err.is_configuration());
        assert_eq!(err.user_message(), None);
        assert!(
            !ApplicationError::from(LoginError::Validation(ValidationError::NameRequired))
                .is_configuration()
        );
    }

    #[test]
    fn login_errors_keep_form_message() {
        let err = ApplicationError::from(LoginError::Validation(ValidationError::EmailRequired));
        assert_eq!(err.to_string(), "login failed: Email is required");
        assert_eq!(err.user_message().as_deref(), Some("Email is required"));
    }
}

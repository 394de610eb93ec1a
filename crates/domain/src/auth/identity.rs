//! Identities issued by the external identity provider.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::user::{DEFAULT_STUDENT_NAME, Student, Teacher, User};

/// An identity established by the identity provider.
///
/// Anonymous sign-ins carry only an id; credential sign-ins also carry the
/// account email and, when set, a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Opaque provider-issued user id.
    pub id: String,
    /// Display name stored with the account.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Account email, absent for anonymous identities.
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    /// Creates an anonymous identity.
    #[must_use]
    pub fn anonymous(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            email: None,
        }
    }

    /// Creates an email identity.
    #[must_use]
    pub fn with_email(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            email: Some(email.into()),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Returns true if the identity has no email attached.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.email.is_none()
    }

    /// Builds a bare user profile for an identity reported by the provider.
    ///
    /// Email identities become teachers, anonymous ones become students with
    /// an empty class code.
    #[must_use]
    pub fn to_user(&self, now: chrono::DateTime<chrono::Utc>) -> User {
        match &self.email {
            Some(email) => Teacher::new(&self.id, self.display_name.as_deref(), email).into(),
            None => {
                let name = self
                    .display_name
                    .as_deref()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or(DEFAULT_STUDENT_NAME);
                Student::new(&self.id, name, "", now).into()
            }
        }
    }
}

/// Classification of identity provider failures.
///
/// Only the first three codes have dedicated user messages; everything else
/// is kept in [`ProviderErrorCode::Other`] for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorCode {
    /// No account exists for the given email.
    UserNotFound,
    /// The password does not match.
    WrongPassword,
    /// The email is malformed.
    InvalidEmail,
    /// The provider could not be reached.
    Network,
    /// The provider is not initialized or misconfigured.
    NotConfigured,
    /// Any other provider code, kept verbatim.
    Other(String),
}

impl ProviderErrorCode {
    /// Parses a provider code such as `auth/user-not-found`. The `auth/`
    /// prefix is optional; unknown codes keep it so they read the same
    /// whichever adapter produced them.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().trim_start_matches("auth/") {
            "user-not-found" => Self::UserNotFound,
            "wrong-password" => Self::WrongPassword,
            "invalid-email" => Self::InvalidEmail,
            "network-request-failed" => Self::Network,
            "app-not-initialized" | "invalid-api-key" => Self::NotConfigured,
            other => Self::Other(format!("auth/{other}")),
        }
    }

    /// The canonical code string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::UserNotFound => "auth/user-not-found",
            Self::WrongPassword => "auth/wrong-password",
            Self::InvalidEmail => "auth/invalid-email",
            Self::Network => "auth/network-request-failed",
            Self::NotConfigured => "auth/app-not-initialized",
            Self::Other(code) => code,
        }
    }
}

impl std::fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by identity provider calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("identity provider error ({code}): {message}")]
pub struct ProviderError {
    /// Classified failure cause.
    pub code: ProviderErrorCode,
    /// Raw provider message, for logs only.
    pub message: String,
}

impl ProviderError {
    /// Creates an error with the given code.
    #[must_use]
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Network, message)
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NotConfigured, message)
    }

    /// Returns true if the provider was never set up.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.code, ProviderErrorCode::NotConfigured)
    }
}

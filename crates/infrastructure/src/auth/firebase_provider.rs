//! Identity provider backed by the Firebase Identity Toolkit REST API.
//!
//! Anonymous sign-in posts to `accounts:signUp` with no credentials;
//! teacher sign-in posts to `accounts:signInWithPassword`. Tokens are kept
//! in memory only and dropped on sign-out.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use numberland_application::{AuthListener, IdentityProvider, Subscription};
use numberland_domain::{Identity, ProviderError, ProviderErrorCode};

use super::IdentitySession;
use crate::config::{ConfigError, FirebaseConfig};

const SIGN_UP: &str = "signUp";
const SIGN_IN_WITH_PASSWORD: &str = "signInWithPassword";
const INTERNAL_ERROR: &str = "internal-error";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    return_secure_token: bool,
}

/// Successful `signUp` / `signInWithPassword` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Seconds, sent as a string.
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Tokens for the signed-in account.
#[derive(Clone)]
struct SessionTokens {
    id_token: String,
    refresh_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokens")
            .field("id_token", &"[REDACTED]")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Identity provider talking to the Identity Toolkit REST API.
pub struct FirebaseIdentityProvider {
    config: FirebaseConfig,
    http_client: reqwest::Client,
    session: IdentitySession,
    tokens: Mutex<Option<SessionTokens>>,
}

impl FirebaseIdentityProvider {
    /// Creates a provider for a configured project.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for a missing or placeholder
    /// API key, or [`ConfigError::HttpClient`] if the HTTP client cannot be
    /// built.
    pub fn new(config: FirebaseConfig) -> Result<Self, ConfigError> {
        config.require_api_key()?;
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self {
            config,
            http_client,
            session: IdentitySession::new(),
            tokens: Mutex::new(None),
        })
    }

    /// Provider configuration.
    #[must_use]
    pub const fn config(&self) -> &FirebaseConfig {
        &self.config
    }

    /// ID token of the signed-in account, if any and not expired.
    #[must_use]
    pub fn id_token(&self) -> Option<String> {
        let tokens = self.tokens.lock();
        tokens
            .as_ref()
            .filter(|t| t.expires_at.is_none_or(|at| at > Utc::now()))
            .map(|t| t.id_token.clone())
    }

    async fn call(&self, method: &str, request: &SignInRequest<'_>) -> Result<Identity, ProviderError> {
        let url = self
            .config
            .method_url(method)
            .map_err(|e| ProviderError::not_configured(e.to_string()))?;

        tracing::debug!(method, "identity toolkit request");
        let response = self
            .http_client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e: reqwest::Error| ProviderError::network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let error = parse_error(&error_text);
            tracing::warn!(method, %status, code = %error.code, "identity toolkit rejected request");
            return Err(error);
        }

        let body: SignInResponse = response.json().await.map_err(|e: reqwest::Error| {
            ProviderError::new(
                ProviderErrorCode::from_code(INTERNAL_ERROR),
                format!("Failed to parse sign-in response: {e}"),
            )
        })?;

        let identity = self.store(body);
        self.session.set(Some(identity.clone()));
        Ok(identity)
    }

    fn store(&self, body: SignInResponse) -> Identity {
        let expires_at = body
            .expires_in
            .as_deref()
            .and_then(|s| s.parse::<u64>().ok())
            .and_then(|secs| chrono::Duration::from_std(Duration::from_secs(secs)).ok())
            .map(|ttl| Utc::now() + ttl);

        *self.tokens.lock() = Some(SessionTokens {
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at,
        });

        Identity {
            id: body.local_id,
            display_name: body.display_name.filter(|n| !n.trim().is_empty()),
            email: body.email.filter(|e| !e.is_empty()),
        }
    }
}

/// Maps an Identity Toolkit error body to a classified provider error.
///
/// Messages look like `EMAIL_NOT_FOUND` or
/// `TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been ...`.
fn parse_error(body: &str) -> ProviderError {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return ProviderError::new(
            ProviderErrorCode::from_code(INTERNAL_ERROR),
            format!("Sign-in request failed: {body}"),
        );
    };

    let message = envelope.error.message;
    let token = message
        .split(':')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let code = match token.as_str() {
        "EMAIL_NOT_FOUND" => "user-not-found".to_string(),
        "INVALID_PASSWORD" => "wrong-password".to_string(),
        "INVALID_EMAIL" => "invalid-email".to_string(),
        "INVALID_LOGIN_CREDENTIALS" => "invalid-credential".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "too-many-requests".to_string(),
        t if t.starts_with("API_KEY") || t.contains("API key not valid") => {
            "invalid-api-key".to_string()
        }
        other => other.to_lowercase().replace('_', "-"),
    };

    ProviderError::new(ProviderErrorCode::from_code(&code), message)
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn sign_in_anonymously(&self) -> Result<Identity, ProviderError> {
        self.call(
            SIGN_UP,
            &SignInRequest {
                email: None,
                password: None,
                return_secure_token: true,
            },
        )
        .await
    }

    async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ProviderError> {
        self.call(
            SIGN_IN_WITH_PASSWORD,
            &SignInRequest {
                email: Some(email),
                password: Some(password),
                return_secure_token: true,
            },
        )
        .await
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.tokens.lock().take();
        self.session.set(None);
        Ok(())
    }

    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription {
        self.session.listen(listener)
    }

    fn name(&self) -> &'static str {
        "firebase"
    }
}

impl std::fmt::Debug for FirebaseIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseIdentityProvider")
            .field("endpoint", &self.config.endpoint)
            .field("project_id", &self.config.project_id)
            .field("session", &self.session)
            .field("tokens", &*self.tokens.lock())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn error_body(message: &str) -> String {
        serde_json::json!({ "error": { "code": 400, "message": message } }).to_string()
    }

    #[test]
    fn unconfigured_key_is_rejected() {
        let result = FirebaseIdentityProvider::new(FirebaseConfig::default());
        assert!(matches!(result, Err(ConfigError::NotConfigured)));
    }

    #[test]
    fn maps_known_error_messages() {
        assert_eq!(
            parse_error(&error_body("EMAIL_NOT_FOUND")).code,
            ProviderErrorCode::UserNotFound
        );
        assert_eq!(
            parse_error(&error_body("INVALID_PASSWORD")).code,
            ProviderErrorCode::WrongPassword
        );
        assert_eq!(
            parse_error(&error_body("INVALID_EMAIL")).code,
            ProviderErrorCode::InvalidEmail
        );
        assert_eq!(
            parse_error(&error_body(
                "API key not valid. Please pass a valid API key."
            ))
            .code,
            ProviderErrorCode::NotConfigured
        );
    }

    #[test]
    fn keeps_first_token_of_detailed_message() {
        let error = parse_error(&error_body(
            "TOO_MANY_ATTEMPTS_TRY_LATER : Access has been temporarily disabled",
        ));
        assert_eq!(
            error.code,
            ProviderErrorCode::Other("auth/too-many-requests".to_string())
        );
        assert!(error.message.contains("temporarily disabled"));
    }

    #[test]
    fn rest_codes_match_sdk_style_codes() {
        for (message, code) in [
            ("TOO_MANY_ATTEMPTS_TRY_LATER", "auth/too-many-requests"),
            ("USER_DISABLED", "auth/user-disabled"),
            ("INVALID_LOGIN_CREDENTIALS", "auth/invalid-credential"),
        ] {
            let parsed = parse_error(&error_body(message)).code;
            assert_eq!(parsed, ProviderErrorCode::from_code(code));
            assert_eq!(parsed.as_str(), code);
        }
    }

    #[test]
    fn configured_provider_builds_client() {
        let config = FirebaseConfig {
            request_timeout_secs: 5,
            ..FirebaseConfig::with_api_key("test-key")
        };
        let provider = FirebaseIdentityProvider::new(config).unwrap();
        assert_eq!(provider.config().request_timeout_secs, 5);
    }

    #[test]
    fn unknown_messages_become_other_codes() {
        let error = parse_error(&error_body("WEAK_PASSWORD"));
        assert_eq!(
            error.code,
            ProviderErrorCode::Other("auth/weak-password".to_string())
        );
    }

    #[test]
    fn unparseable_body_is_internal_error() {
        let error = parse_error("<html>bad gateway</html>");
        assert_eq!(
            error.code,
            ProviderErrorCode::from_code(INTERNAL_ERROR)
        );
    }

    #[test]
    fn sign_in_request_serializes_camel_case() {
        let anonymous = serde_json::to_value(SignInRequest {
            email: None,
            password: None,
            return_secure_token: true,
        })
        .unwrap();
        assert_eq!(anonymous, serde_json::json!({ "returnSecureToken": true }));

        let credentials = serde_json::to_value(SignInRequest {
            email: Some("t@school.org"),
            password: Some("secret1"),
            return_secure_token: true,
        })
        .unwrap();
        assert_eq!(credentials["email"], "t@school.org");
        assert_eq!(credentials["returnSecureToken"], true);
    }

    #[test]
    fn stores_tokens_from_response() {
        let provider =
            FirebaseIdentityProvider::new(FirebaseConfig::with_api_key("test-key")).unwrap();
        let body: SignInResponse = serde_json::from_value(serde_json::json!({
            "localId": "uid-1",
            "email": "t@school.org",
            "displayName": "",
            "idToken": "id-token",
            "refreshToken": "refresh",
            "expiresIn": "3600"
        }))
        .unwrap();

        let identity = provider.store(body);
        assert_eq!(identity, Identity::with_email("uid-1", "t@school.org"));
        assert_eq!(provider.id_token().as_deref(), Some("id-token"));
    }

    #[tokio::test]
    async fn sign_out_clears_tokens_and_session() {
        let provider =
            FirebaseIdentityProvider::new(FirebaseConfig::with_api_key("test-key")).unwrap();
        let body: SignInResponse = serde_json::from_value(serde_json::json!({
            "localId": "anon",
            "idToken": "tok"
        }))
        .unwrap();
        let identity = provider.store(body);
        provider.session.set(Some(identity));

        provider.sign_out().await.unwrap();
        assert_eq!(provider.id_token(), None);
        assert_eq!(provider.session.current(), None);
    }
}

//! In-process identity provider used when no backend is configured.
//!
//! Anonymous sign-ins always succeed with a fresh `offline-` id. Credential
//! sign-ins succeed for any well-formed email unless accounts have been
//! registered, in which case the email must exist and the password match.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use numberland_application::{AuthListener, IdentityProvider, Subscription};
use numberland_domain::{Identity, ProviderError, ProviderErrorCode, generate_offline_id};

use super::IdentitySession;

#[derive(Debug, Clone)]
struct Account {
    password: String,
    display_name: Option<String>,
}

/// Identity provider that never leaves the process.
#[derive(Debug, Default)]
pub struct OfflineIdentityProvider {
    session: IdentitySession,
    accounts: HashMap<String, Account>,
    /// Ids handed out per email so repeat sign-ins return the same user.
    issued: Mutex<HashMap<String, String>>,
}

impl OfflineIdentityProvider {
    /// Creates a provider with no registered accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a teacher account. Once any account exists, credential
    /// sign-ins are checked against the registered set.
    #[must_use]
    pub fn with_account(
        mut self,
        email: &str,
        password: impl Into<String>,
        display_name: Option<&str>,
    ) -> Self {
        self.accounts.insert(
            email.trim().to_lowercase(),
            Account {
                password: password.into(),
                display_name: display_name.map(str::to_string),
            },
        );
        self
    }

    /// Currently signed-in identity.
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.session.current()
    }

    fn id_for(&self, email: &str) -> String {
        self.issued
            .lock()
            .entry(email.to_string())
            .or_insert_with(generate_offline_id)
            .clone()
    }
}

#[async_trait]
impl IdentityProvider for OfflineIdentityProvider {
    async fn sign_in_anonymously(&self) -> Result<Identity, ProviderError> {
        let identity = Identity::anonymous(generate_offline_id());
        tracing::debug!(id = %identity.id, "offline anonymous sign-in");
        self.session.set(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ProviderError> {
        let key = email.trim().to_lowercase();
        if !key.contains('@') {
            return Err(ProviderError::new(
                ProviderErrorCode::InvalidEmail,
                "The email address is badly formatted.",
            ));
        }

        let mut display_name = None;
        if !self.accounts.is_empty() {
            let Some(account) = self.accounts.get(&key) else {
                return Err(ProviderError::new(
                    ProviderErrorCode::UserNotFound,
                    "There is no user record corresponding to this identifier.",
                ));
            };
            if account.password != password {
                return Err(ProviderError::new(
                    ProviderErrorCode::WrongPassword,
                    "The password is invalid.",
                ));
            }
            display_name.clone_from(&account.display_name);
        }

        let mut identity = Identity::with_email(self.id_for(&key), key);
        if let Some(name) = display_name {
            identity = identity.display_name(name);
        }
        tracing::debug!(id = %identity.id, "offline credential sign-in");
        self.session.set(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.session.set(None);
        Ok(())
    }

    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription {
        self.session.listen(listener)
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn anonymous_ids_are_offline_and_unique() {
        let provider = OfflineIdentityProvider::new();
        let a = provider.sign_in_anonymously().await.unwrap();
        let b = provider.sign_in_anonymously().await.unwrap();

        assert!(a.id.starts_with("offline-"));
        assert!(a.is_anonymous());
        assert_ne!(a.id, b.id);
        assert_eq!(provider.current(), Some(b));
    }

    #[tokio::test]
    async fn open_mode_accepts_any_email() {
        let provider = OfflineIdentityProvider::new();
        let first = provider
            .sign_in_with_credentials("T@School.org", "whatever")
            .await
            .unwrap();
        let again = provider
            .sign_in_with_credentials("t@school.org", "different")
            .await
            .unwrap();

        assert_eq!(first.email.as_deref(), Some("t@school.org"));
        assert_eq!(first.id, again.id);
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let provider = OfflineIdentityProvider::new();
        let err = provider
            .sign_in_with_credentials("not-an-email", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err.code, ProviderErrorCode::InvalidEmail);
        assert_eq!(provider.current(), None);
    }

    #[tokio::test]
    async fn registered_accounts_are_checked() {
        let provider = OfflineIdentityProvider::new().with_account(
            "frizzle@school.org",
            "magicbus",
            Some("Ms. Frizzle"),
        );

        let missing = provider
            .sign_in_with_credentials("nobody@school.org", "magicbus")
            .await
            .unwrap_err();
        assert_eq!(missing.code, ProviderErrorCode::UserNotFound);

        let wrong = provider
            .sign_in_with_credentials("frizzle@school.org", "nope")
            .await
            .unwrap_err();
        assert_eq!(wrong.code, ProviderErrorCode::WrongPassword);

        let ok = provider
            .sign_in_with_credentials("frizzle@school.org", "magicbus")
            .await
            .unwrap();
        assert_eq!(ok.display_name.as_deref(), Some("Ms. Frizzle"));
    }

    #[tokio::test]
    async fn sign_out_notifies_listeners() {
        let provider = OfflineIdentityProvider::new();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let _sub = provider.on_auth_state_changed(Box::new(move |identity| {
            let _ = tx.send(identity);
        }));

        let identity = provider.sign_in_anonymously().await.unwrap();
        provider.sign_out().await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), None);
        assert_eq!(rx.recv().await.unwrap(), Some(identity));
        assert_eq!(rx.recv().await.unwrap(), None);
    }
}

//! Identity provider port.
//!
//! The external service that verifies credentials and issues identities.
//! Adapters live in the infrastructure crate; the store and login forms
//! only ever talk to this trait.

use async_trait::async_trait;
use numberland_domain::{Identity, ProviderError};

/// Callback invoked with the provider's current identity, `None` when
/// nobody is signed in.
pub type AuthListener = Box<dyn Fn(Option<Identity>) + Send + Sync>;

/// Handle returned by [`IdentityProvider::on_auth_state_changed`].
///
/// Deregisters the listener exactly once: either through
/// [`Subscription::unsubscribe`] or when the handle is dropped.
#[must_use = "dropping a subscription deregisters the listener"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wraps the function that deregisters the listener.
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with nothing to deregister.
    pub const fn noop() -> Self {
        Self { unsubscribe: None }
    }

    /// Returns true until the listener has been deregistered.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }

    /// Deregisters the listener.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Port for the external identity service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Establishes an anonymous identity (student sign-in).
    ///
    /// # Errors
    /// Returns a [`ProviderError`] on network or service failure.
    async fn sign_in_anonymously(&self) -> Result<Identity, ProviderError>;

    /// Verifies an email and password (teacher sign-in).
    ///
    /// # Errors
    /// Returns a [`ProviderError`] carrying a classified code.
    async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ProviderError>;

    /// Ends the provider session.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if the provider could not sign out.
    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Registers a listener for identity changes.
    ///
    /// Notifications are delivered in the order the provider emits them.
    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription;

    /// Short adapter name used in logs.
    fn name(&self) -> &'static str {
        "identity-provider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting() -> (Arc<AtomicUsize>, Subscription) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let sub = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (count, sub)
    }

    #[test]
    fn explicit_unsubscribe_runs_once() {
        let (count, sub) = counting();
        assert!(sub.is_active());
        sub.unsubscribe();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_unsubscribes() {
        let (count, sub) = counting();
        drop(sub);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn noop_is_inactive() {
        let sub = Subscription::noop();
        assert!(!sub.is_active());
        sub.unsubscribe();
    }
}

//! Session-wide authentication state store.
//!
//! The store owns the single [`AuthState`] of the session. Every change
//! goes through [`reduce`] under the sender side of a `watch` channel, so
//! transitions are serialized and observers only ever see whole snapshots.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;

use numberland_domain::{AuthAction, AuthState, Identity, User, reduce};

use crate::ports::{Clock, IdentityProvider, Subscription};

struct Inner {
    state: watch::Sender<AuthState>,
    provider: Arc<dyn IdentityProvider>,
    clock: Arc<dyn Clock>,
    subscription: Mutex<Option<Subscription>>,
    /// Form sign-ins waiting on the provider.
    sign_ins: AtomicUsize,
}

impl Inner {
    fn apply(&self, action: AuthAction) -> AuthState {
        tracing::debug!(action = action.name(), "auth dispatch");
        let mut next = AuthState::initial();
        self.state.send_modify(|state| {
            *state = reduce(std::mem::take(state), action);
            next = state.clone();
        });
        next
    }

    /// Applies a provider notification.
    ///
    /// A notification for the user already in the store keeps the local
    /// profile, which may carry more than the provider knows (class code,
    /// typed name).
    ///
    /// While a form sign-in is in flight, a notification for a user not yet
    /// in the store is left to the form, which dispatches the full profile
    /// once the provider call returns.
    fn apply_identity(&self, identity: Option<Identity>) {
        let now = self.clock.now();
        let pending = self.sign_ins.load(Ordering::SeqCst) > 0;
        self.state.send_if_modified(|state| {
            if let Some(identity) = &identity {
                let known = state.user.as_ref().is_some_and(|u| u.id() == identity.id);
                if pending && !known {
                    tracing::debug!(id = %identity.id, "sign-in in flight, deferring to form");
                    return false;
                }
            }
            let user = identity.map(|identity| match state.user.take() {
                Some(current) if current.id() == identity.id => current,
                _ => identity.to_user(now),
            });
            tracing::debug!(
                action = "SET_USER",
                signed_in = user.is_some(),
                "auth state changed"
            );
            *state = reduce(std::mem::take(state), AuthAction::SetUser(user));
            true
        });
    }
}

/// Marks a form sign-in as in flight until dropped.
pub(crate) struct SignInGuard {
    inner: Arc<Inner>,
}

impl Drop for SignInGuard {
    fn drop(&mut self) {
        self.inner.sign_ins.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.get_mut().take() {
            tracing::debug!("auth store dropped, releasing provider listener");
            subscription.unsubscribe();
        }
    }
}

/// Shared handle to the session's auth state.
///
/// Cloning is cheap; all clones observe and update the same state.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<Inner>,
}

impl AuthStore {
    /// Creates the store and registers its listener with `provider`.
    ///
    /// The state starts as [`AuthState::initial`] (loading) until the
    /// provider reports the current identity.
    pub fn new(provider: Arc<dyn IdentityProvider>, clock: Arc<dyn Clock>) -> Self {
        let (state, _) = watch::channel(AuthState::initial());
        let inner = Arc::new(Inner {
            state,
            provider,
            clock,
            subscription: Mutex::new(None),
            sign_ins: AtomicUsize::new(0),
        });

        let weak: Weak<Inner> = Arc::downgrade(&inner);
        let subscription = inner
            .provider
            .on_auth_state_changed(Box::new(move |identity| {
                if let Some(inner) = weak.upgrade() {
                    inner.apply_identity(identity);
                }
            }));
        *inner.subscription.lock() = Some(subscription);

        tracing::debug!(provider = inner.provider.name(), "auth store started");
        Self { inner }
    }

    /// Applies `action` and returns the resulting snapshot.
    ///
    /// The new state is computed before this returns; observers are woken
    /// but may read it later.
    pub fn dispatch(&self, action: AuthAction) -> AuthState {
        self.inner.apply(action)
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    /// Signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user.clone()
    }

    /// Returns an observer that sees every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state.subscribe()
    }

    /// Waits until the first identity check has resolved.
    pub async fn ready(&self) -> AuthState {
        let mut rx = self.subscribe();
        rx.wait_for(|state| !state.loading)
            .await
            .map_or_else(|_| self.state(), |state| state.clone())
    }

    /// Identity provider the store listens to.
    #[must_use]
    pub fn provider(&self) -> &Arc<dyn IdentityProvider> {
        &self.inner.provider
    }

    /// Clock used to stamp sign-ins.
    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.inner.clock
    }

    /// Signs out of the provider and clears the local session.
    ///
    /// A failed remote sign-out is logged and otherwise ignored; the local
    /// state always ends as `{ user: None, loading: false, error: None }`.
    pub async fn logout(&self) -> AuthState {
        if let Err(err) = self.inner.provider.sign_out().await {
            tracing::warn!(
                provider = self.inner.provider.name(),
                error = %err,
                "remote sign-out failed, clearing local session"
            );
        }
        self.dispatch(AuthAction::Logout)
    }

    /// Deregisters the provider listener. Later calls do nothing.
    pub fn shutdown(&self) {
        let subscription = self.inner.subscription.lock().take();
        if let Some(subscription) = subscription {
            tracing::debug!("auth store shut down");
            subscription.unsubscribe();
        }
    }

    /// Registers a form sign-in for the lifetime of the returned guard.
    pub(crate) fn begin_sign_in(&self) -> SignInGuard {
        self.inner.sign_ins.fetch_add(1, Ordering::SeqCst);
        SignInGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Returns true while the provider listener is registered.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.inner.subscription.lock().is_some()
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("state", &*self.inner.state.borrow())
            .field("provider", &self.inner.provider.name())
            .finish_non_exhaustive()
    }
}

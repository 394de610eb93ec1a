//! Local view of the provider session and its change listeners.
//!
//! Listeners are called synchronously by the operation that changed the
//! identity, one change at a time, so each one sees changes in emission
//! order and the store never holds a notification that an earlier local
//! action has already superseded.

use std::sync::Arc;

use parking_lot::Mutex;

use numberland_application::{AuthListener, Subscription};
use numberland_domain::Identity;

#[derive(Default)]
struct SessionInner {
    current: Option<Identity>,
    listeners: Vec<(u64, Arc<AuthListener>)>,
    next_id: u64,
}

/// The identity currently signed in to a provider, plus its listeners.
///
/// Listeners must not call back into the session that notifies them.
#[derive(Clone, Default)]
pub struct IdentitySession {
    inner: Arc<Mutex<SessionInner>>,
    /// Held while listeners run; serializes deliveries.
    delivery: Arc<Mutex<()>>,
}

impl IdentitySession {
    /// Creates a signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently signed-in identity.
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.inner.lock().current.clone()
    }

    /// Replaces the identity and notifies every listener before returning.
    pub fn set(&self, identity: Option<Identity>) {
        let _delivery = self.delivery.lock();
        let listeners = {
            let mut inner = self.inner.lock();
            inner.current.clone_from(&identity);
            inner.listeners.clone()
        };
        for (_, listener) in listeners {
            listener(identity.clone());
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Registers `listener` and calls it with the current identity before
    /// returning. It then receives every change until the returned
    /// subscription is released.
    pub fn listen(&self, listener: AuthListener) -> Subscription {
        let listener = Arc::new(listener);
        let _delivery = self.delivery.lock();
        let (id, current) = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Arc::clone(&listener)));
            (id, inner.current.clone())
        };
        listener(current);

        let inner = Arc::clone(&self.inner);
        Subscription::new(move || {
            inner.lock().listeners.retain(|(other, _)| *other != id);
            tracing::debug!(listener = id, "auth listener removed");
        })
    }
}

impl std::fmt::Debug for IdentitySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("IdentitySession")
            .field("current", &inner.current)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    type Seen = Arc<Mutex<Vec<Option<Identity>>>>;

    fn recording(session: &IdentitySession) -> (Seen, Subscription) {
        let seen: Seen = Arc::default();
        let sink = Arc::clone(&seen);
        let sub = session.listen(Box::new(move |identity| sink.lock().push(identity)));
        (seen, sub)
    }

    #[test]
    fn listener_gets_current_before_listen_returns() {
        let session = IdentitySession::new();
        session.set(Some(Identity::anonymous("a")));

        let (seen, _sub) = recording(&session);
        assert_eq!(*seen.lock(), vec![Some(Identity::anonymous("a"))]);
    }

    #[test]
    fn changes_are_delivered_in_order() {
        let session = IdentitySession::new();
        let (seen, _sub) = recording(&session);

        session.set(Some(Identity::anonymous("a")));
        session.set(None);
        session.set(Some(Identity::anonymous("b")));

        assert_eq!(
            *seen.lock(),
            vec![
                None,
                Some(Identity::anonymous("a")),
                None,
                Some(Identity::anonymous("b")),
            ]
        );
    }

    #[test]
    fn unsubscribe_removes_listener() {
        let session = IdentitySession::new();
        let (seen, sub) = recording(&session);
        assert_eq!(session.listener_count(), 1);

        sub.unsubscribe();
        assert_eq!(session.listener_count(), 0);
        session.set(Some(Identity::anonymous("ignored")));
        assert_eq!(*seen.lock(), vec![None]);
        assert_eq!(session.current(), Some(Identity::anonymous("ignored")));
    }

    #[test]
    fn works_without_a_runtime() {
        let session = IdentitySession::new();
        let (seen, sub) = recording(&session);
        session.set(Some(Identity::anonymous("x")));
        assert!(sub.is_active());
        assert_eq!(seen.lock().len(), 2);
    }
}

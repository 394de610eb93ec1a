//! Scriptable identity provider for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::Notify;

use numberland_domain::{Identity, ProviderError};

use crate::ports::{AuthListener, Clock, IdentityProvider, Subscription};

pub(crate) struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        DateTime::<Utc>::from_timestamp(1_750_000_000, 0).unwrap_or_default(),
    ))
}

pub(crate) struct FakeProvider {
    pub anonymous: Mutex<Result<Identity, ProviderError>>,
    pub credentials: Mutex<Result<Identity, ProviderError>>,
    pub sign_out_result: Mutex<Result<(), ProviderError>>,
    pub sign_in_calls: AtomicUsize,
    pub sign_out_calls: AtomicUsize,
    pub subscribe_calls: AtomicUsize,
    pub unsubscribe_calls: Arc<AtomicUsize>,
    pub hold: Mutex<Option<Arc<Notify>>>,
    listener: Arc<Mutex<Option<AuthListener>>>,
}

impl FakeProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            anonymous: Mutex::new(Ok(Identity::anonymous("anon-1"))),
            credentials: Mutex::new(Ok(
                Identity::with_email("teacher-1", "t@school.org").display_name("Ms. Frizzle")
            )),
            sign_out_result: Mutex::new(Ok(())),
            sign_in_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
            subscribe_calls: AtomicUsize::new(0),
            unsubscribe_calls: Arc::new(AtomicUsize::new(0)),
            hold: Mutex::new(None),
            listener: Arc::new(Mutex::new(None)),
        })
    }

    /// Makes sign-in calls wait until the returned handle is notified.
    pub fn hold_sign_in(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.hold.lock() = Some(Arc::clone(&notify));
        notify
    }

    pub fn emit(&self, identity: Option<Identity>) {
        if let Some(listener) = self.listener.lock().as_ref() {
            listener(identity);
        }
    }

    pub fn sign_ins(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn unsubscribes(&self) -> usize {
        self.unsubscribe_calls.load(Ordering::SeqCst)
    }

    async fn wait_if_held(&self) {
        let hold = self.hold.lock().clone();
        if let Some(notify) = hold {
            notify.notified().await;
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn sign_in_anonymously(&self) -> Result<Identity, ProviderError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_if_held().await;
        self.anonymous.lock().clone()
    }

    async fn sign_in_with_credentials(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<Identity, ProviderError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_if_held().await;
        self.credentials.lock().clone()
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.sign_out_result.lock().clone()
    }

    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        *self.listener.lock() = Some(listener);
        let slot = Arc::clone(&self.listener);
        let unsubscribes = Arc::clone(&self.unsubscribe_calls);
        Subscription::new(move || {
            unsubscribes.fetch_add(1, Ordering::SeqCst);
            slot.lock().take();
        })
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

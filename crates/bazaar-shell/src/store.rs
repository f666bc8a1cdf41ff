//! # Store Facade
//!
//! The only way to change application state. Wraps `ApplicationState` from
//! bazaar-core and carries out the follow-ups its mutations return.
//!
//! ## Commit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.show_alert("warn", "Y")                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌─────────────── lock ───────────────────────────────────────────┐     │
//! │  │ state.commit(ShowAlert)  ──► FollowUp::ScheduleDismiss(t2)     │     │
//! │  │ abort task(t1)                                                 │     │
//! │  │ spawn task(t2): sleep(delay) → commit(DismissAlert(t2))        │     │
//! │  │ snapshot                                                       │     │
//! │  └────────────────────────────────────────────────────────────────┘     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  observers.on_transition(SHOW_ALERT)   (lock released)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! State and the dismiss task handle sit behind one `Mutex`, so a mutation and
//! its timer bookkeeping are a single atomic step. Mutations cannot fail, so a
//! poisoned lock is recovered instead of propagated.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::time::Duration;

use bazaar_core::{
    ApplicationState, CustomerProfile, DismissTicket, FollowUp, KeyValueStorage, MemoryStorage,
    Mutation, ProductSummary, StateSnapshot, USER_INFORMATION_KEY,
};
use chrono::Utc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::ShellConfig;
use crate::error::{ShellError, ShellResult};
use crate::observer::{Transition, TransitionObserver};

/// State plus the handle of the one dismiss task allowed to exist.
struct Shared {
    state: ApplicationState,
    dismiss_task: Option<JoinHandle<()>>,
    sequence: u64,
}

struct Inner {
    shared: Mutex<Shared>,
    observers: RwLock<Vec<Arc<dyn TransitionObserver>>>,
    runtime: Handle,
    dismiss_delay: Duration,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(self: &Arc<Self>, mutation: Mutation) {
        let name = mutation.name();

        let (follow_up, transition) = {
            let mut shared = self.lock();
            let follow_up = match shared.state.commit(mutation) {
                Some(FollowUp::ScheduleDismiss(ticket)) => {
                    self.schedule_dismiss(&mut shared, ticket);
                    None
                }
                other => other,
            };

            // A fired or voided ticket leaves nothing for the task to do.
            if shared.state.pending_dismiss().is_none() {
                shared.dismiss_task = None;
            }

            shared.sequence += 1;
            let transition = Transition {
                sequence: shared.sequence,
                mutation: name,
                at: Utc::now(),
                snapshot: shared.state.snapshot(),
            };
            (follow_up, transition)
        };

        self.notify(&transition);

        if let Some(FollowUp::ShowModal { message, cause }) = follow_up {
            info!(reason = cause.reason(), "Customer info unavailable, asking for login");
            debug!(error = %cause, "Customer info load failed");
            self.commit(Mutation::SetModalOpen(true));
            self.commit(Mutation::SetModalMessage(message));
        }
    }

    /// Replaces the pending dismiss task with one for `ticket`.
    fn schedule_dismiss(self: &Arc<Self>, shared: &mut Shared, ticket: DismissTicket) {
        if let Some(previous) = shared.dismiss_task.take() {
            previous.abort();
            debug!("Replaced pending alert dismiss timer");
        }

        let inner: Weak<Inner> = Arc::downgrade(self);
        let deadline = Instant::now() + self.dismiss_delay;
        shared.dismiss_task = Some(self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(inner) = inner.upgrade() {
                inner.commit(Mutation::DismissAlert(ticket));
            }
        }));
    }

    /// Observers run on a copy of the list, so they may register others.
    fn notify(&self, transition: &Transition) {
        let observers: Vec<Arc<dyn TransitionObserver>> = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for observer in &observers {
            observer.on_transition(transition);
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let shared = self.shared.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = shared.dismiss_task.take() {
            task.abort();
        }
    }
}

/// The application store: state, mutation entry points and getters.
///
/// `S` backs session storage, where the webview keeps the login response.
pub struct Store<S: KeyValueStorage = MemoryStorage> {
    inner: Arc<Inner>,
    session: Mutex<S>,
}

impl<S: KeyValueStorage> Store<S> {
    /// Creates the store on the current tokio runtime.
    pub fn new(config: &ShellConfig, session: S) -> ShellResult<Self> {
        let runtime = Handle::try_current().map_err(|_| ShellError::NoRuntime)?;
        Ok(Self::with_runtime(config, session, runtime))
    }

    /// Creates the store with dismiss timers running on `runtime`.
    pub fn with_runtime(config: &ShellConfig, session: S, runtime: Handle) -> Self {
        info!(backend_url = %config.backend_url, "Creating application store");
        Store {
            inner: Arc::new(Inner {
                shared: Mutex::new(Shared {
                    state: ApplicationState::new(config.backend_url.clone()),
                    dismiss_task: None,
                    sequence: 0,
                }),
                observers: RwLock::new(Vec::new()),
                runtime,
                dismiss_delay: config.dismiss_delay(),
            }),
            session: Mutex::new(session),
        }
    }

    /// Registers an observer for all future transitions.
    pub fn add_observer(&self, observer: Arc<dyn TransitionObserver>) {
        self.inner
            .observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    /// Commits any mutation. The named methods below are thin wrappers.
    pub fn commit(&self, mutation: Mutation) {
        self.inner.commit(mutation);
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn snapshot(&self) -> StateSnapshot {
        self.inner.lock().state.snapshot()
    }

    /// `getShowProduct`.
    pub fn show_product(&self) -> ProductSummary {
        self.inner.lock().state.show_product().clone()
    }

    pub fn customer_info(&self) -> Option<CustomerProfile> {
        self.inner.lock().state.customer_info().cloned()
    }

    pub fn backend_url(&self) -> String {
        self.inner.lock().state.backend_url().to_string()
    }

    /// Whether a dismiss timer is currently scheduled.
    pub fn has_pending_dismiss(&self) -> bool {
        let shared = self.inner.lock();
        shared.state.pending_dismiss().is_some() && shared.dismiss_task.is_some()
    }

    // =========================================================================
    // UI Flags
    // =========================================================================

    pub fn toggle_drawer(&self) {
        self.commit(Mutation::ToggleDrawer);
    }

    pub fn set_modal_open(&self, open: bool) {
        self.commit(Mutation::SetModalOpen(open));
    }

    pub fn set_modal_type(&self, modal_type: impl Into<String>) {
        self.commit(Mutation::SetModalType(modal_type.into()));
    }

    pub fn set_modal_message(&self, message: impl Into<String>) {
        self.commit(Mutation::SetModalMessage(message.into()));
    }

    /// Replaces the selected product; fields are not merged.
    pub fn set_show_product(&self, product: ProductSummary) {
        self.commit(Mutation::SetShowProduct(product));
    }

    // =========================================================================
    // Alerts
    // =========================================================================

    /// Shows the alert and (re)starts its dismiss timer.
    pub fn show_alert(&self, alert_type: impl Into<String>, message: impl Into<String>) {
        self.commit(Mutation::ShowAlert {
            alert_type: alert_type.into(),
            message: message.into(),
        });
    }

    /// Shows the alert again with its last type and message.
    pub fn reopen_alert(&self) {
        self.commit(Mutation::ReopenAlert);
    }

    /// Manual open/close. A pending timer keeps running.
    pub fn set_alert_open(&self, open: bool) {
        self.commit(Mutation::SetAlertOpen(open));
    }

    pub fn set_button_alert_visible(&self, visible: bool) {
        self.commit(Mutation::SetButtonAlertVisible(visible));
    }

    // =========================================================================
    // Session
    // =========================================================================

    pub fn set_logged_in(&self, logged_in: bool) {
        self.commit(Mutation::SetLoggedIn(logged_in));
    }

    pub fn set_otp_valid(&self, valid: bool) {
        self.commit(Mutation::SetOtpValid(valid));
    }

    /// Refreshes the customer profile from session storage.
    ///
    /// Without a usable record the profile is cleared and the login-required
    /// modal is opened. A storage read error is treated as "nothing stored".
    pub fn load_customer_info(&self) {
        let stored = {
            let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
            session.get_item(USER_INFORMATION_KEY).unwrap_or_else(|e| {
                warn!(error = %e, "Session storage read failed");
                None
            })
        };
        self.commit(Mutation::LoadCustomerInfo { stored });
    }

    /// Writes to session storage (the webview mirrors its login response here).
    pub fn set_session_item(&self, key: &str, value: &str) -> ShellResult<()> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_item(key, value)
            .map_err(ShellError::storage)
    }

    pub fn remove_session_item(&self, key: &str) -> ShellResult<()> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_item(key)
            .map_err(ShellError::storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::time::sleep;

    fn store() -> Store {
        Store::new(&ShellConfig::default(), MemoryStorage::new()).unwrap()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(u64, &'static str)>>,
    }

    impl TransitionObserver for Recorder {
        fn on_transition(&self, transition: &Transition) {
            self.seen
                .lock()
                .unwrap()
                .push((transition.sequence, transition.mutation));
        }
    }

    impl Recorder {
        fn names(&self) -> Vec<&'static str> {
            self.seen.lock().unwrap().iter().map(|(_, n)| *n).collect()
        }
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        let result = Store::new(&ShellConfig::default(), MemoryStorage::new());
        assert!(matches!(result, Err(ShellError::NoRuntime)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_dismisses_after_delay() {
        let store = store();
        store.show_alert("success", "Saved");
        assert!(store.snapshot().is_alert_open);
        assert!(store.has_pending_dismiss());

        sleep(ms(1999)).await;
        assert!(store.snapshot().is_alert_open);

        sleep(ms(2)).await;
        assert!(!store.snapshot().is_alert_open);
        assert!(!store.has_pending_dismiss());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_alert_restarts_timer() {
        let store = store();

        store.show_alert("error", "X");
        sleep(ms(500)).await;
        store.show_alert("warn", "Y");

        sleep(ms(500)).await; // t = 1000
        let snap = store.snapshot();
        assert!(snap.is_alert_open);
        assert_eq!(snap.alert_type, "warn");
        assert_eq!(snap.alert_message, "Y");

        sleep(ms(1499)).await; // t = 2499, first timer would have fired at 2000
        assert!(store.snapshot().is_alert_open);

        sleep(ms(2)).await; // t = 2501
        assert!(!store.snapshot().is_alert_open);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_close_then_stale_timer_is_harmless() {
        let store = store();
        store.show_alert("info", "Copied");
        store.set_alert_open(false);
        assert!(!store.snapshot().is_alert_open);
        assert!(store.has_pending_dismiss());

        sleep(ms(2100)).await;
        assert!(!store.snapshot().is_alert_open);
        assert!(!store.has_pending_dismiss());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_does_not_close_reopened_alert() {
        let store = store();
        store.show_alert("info", "first");
        sleep(ms(1500)).await;
        store.set_alert_open(false);
        store.show_alert("info", "second");

        sleep(ms(1000)).await; // past the first timer's deadline
        assert!(store.snapshot().is_alert_open);
        assert_eq!(store.snapshot().alert_message, "second");

        sleep(ms(1100)).await;
        assert!(!store.snapshot().is_alert_open);
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_delay_is_used() {
        let config = ShellConfig {
            alert_dismiss_ms: 300,
            ..ShellConfig::default()
        };
        let store = Store::new(&config, MemoryStorage::new()).unwrap();
        store.show_alert("info", "quick");

        sleep(ms(301)).await;
        assert!(!store.snapshot().is_alert_open);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reopen_alert_keeps_single_timer() {
        let store = store();
        store.show_alert("info", "hello");
        sleep(ms(1000)).await;
        store.reopen_alert();

        sleep(ms(1500)).await; // t = 2500
        assert!(store.snapshot().is_alert_open);
        sleep(ms(600)).await; // t = 3100
        assert!(!store.snapshot().is_alert_open);
    }

    #[tokio::test]
    async fn test_toggle_drawer_twice_restores() {
        let store = store();
        let before = store.snapshot().is_drawer_open;
        store.toggle_drawer();
        assert_ne!(store.snapshot().is_drawer_open, before);
        store.toggle_drawer();
        assert_eq!(store.snapshot().is_drawer_open, before);
    }

    #[tokio::test]
    async fn test_load_customer_info_from_session() {
        let session = MemoryStorage::new().with_item("userInformation", r#"{"customer":{"id":1}}"#);
        let store = Store::new(&ShellConfig::default(), session).unwrap();

        store.load_customer_info();

        assert_eq!(store.customer_info().unwrap().as_value(), &json!({"id": 1}));
        let snap = store.snapshot();
        assert!(!snap.is_modal_open);
        assert!(snap.modal_message.is_empty());
    }

    #[tokio::test]
    async fn test_load_customer_info_without_session_opens_modal() {
        let store = store();
        let recorder = Arc::new(Recorder::default());
        store.add_observer(recorder.clone());

        store.load_customer_info();

        let snap = store.snapshot();
        assert!(snap.customer_info.is_none());
        assert!(snap.is_modal_open);
        assert_eq!(snap.modal_message, "로그인이 필요한 서비스입니다.");

        // The modal is raised by two separate follow-up mutations.
        assert_eq!(
            recorder.names(),
            vec!["LOAD_CUSTOMER_INFO", "SET_MODAL_OPEN", "SET_MODAL_MESSAGE"]
        );
    }

    #[tokio::test]
    async fn test_logout_clears_customer_on_next_load() {
        let store = store();
        store
            .set_session_item("userInformation", r#"{"customer":{"id":9}}"#)
            .unwrap();
        store.load_customer_info();
        assert!(store.customer_info().is_some());

        store.remove_session_item("userInformation").unwrap();
        store.load_customer_info();
        assert!(store.customer_info().is_none());
        assert!(store.snapshot().is_modal_open);
    }

    #[tokio::test]
    async fn test_set_show_product_roundtrip() {
        let store = store();
        let first: ProductSummary = serde_json::from_value(json!({"id": 3, "title": "Desk"})).unwrap();
        let second: ProductSummary = serde_json::from_value(json!({"id": 7})).unwrap();

        store.set_show_product(first);
        store.set_show_product(second.clone());

        assert_eq!(store.show_product(), second);
        assert_eq!(
            serde_json::to_value(store.show_product()).unwrap(),
            json!({"id": 7})
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_observers_see_every_transition_in_order() {
        let store = store();
        let recorder = Arc::new(Recorder::default());
        store.add_observer(recorder.clone());

        store.set_logged_in(true);
        store.set_otp_valid(true);
        store.show_alert("info", "hi");
        sleep(ms(2001)).await;

        assert_eq!(
            recorder.names(),
            vec!["SET_LOGGED_IN", "SET_OTP_VALID", "SHOW_ALERT", "DISMISS_ALERT"]
        );
        let sequences: Vec<u64> = recorder.seen.lock().unwrap().iter().map(|(s, _)| *s).collect();
        assert_eq!(sequences, vec![1, 2, 3, 4]);

        let snap = store.snapshot();
        assert!(snap.is_logged_in);
        assert!(snap.is_otp_valid);
    }

    /// Registers `late` the first time it sees a transition.
    struct Registrar {
        store: Weak<Store>,
        late: Arc<Recorder>,
        done: Mutex<bool>,
    }

    impl TransitionObserver for Registrar {
        fn on_transition(&self, _transition: &Transition) {
            let mut done = self.done.lock().unwrap();
            if !*done {
                *done = true;
                if let Some(store) = self.store.upgrade() {
                    store.add_observer(self.late.clone());
                }
            }
        }
    }

    #[tokio::test]
    async fn test_observer_can_register_observer_during_notification() {
        let store = Arc::new(store());
        let late = Arc::new(Recorder::default());
        store.add_observer(Arc::new(Registrar {
            store: Arc::downgrade(&store),
            late: late.clone(),
            done: Mutex::new(false),
        }));

        store.toggle_drawer();
        assert!(late.names().is_empty());

        store.set_modal_open(true);
        assert_eq!(late.names(), vec!["SET_MODAL_OPEN"]);
    }

    #[tokio::test]
    async fn test_backend_url_from_config() {
        let config = ShellConfig {
            backend_url: "http://localhost:8081".into(),
            ..ShellConfig::default()
        };
        let store = Store::new(&config, MemoryStorage::new()).unwrap();
        assert_eq!(store.backend_url(), "http://localhost:8081");
    }
}

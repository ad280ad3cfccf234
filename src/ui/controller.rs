// src/ui/controller.rs - View-state controller behind the login form

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::auth::{Authenticator, Credentials};
use crate::config::PortalConfig;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::ui::state::{login_state_reducer, LoginAction, LoginState};
use crate::utils::time::{Clock, Greeting};
use crate::validation::{self, Field, ValidationErrors};

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Both fields passed and the credentials went to the authenticator
    Accepted,
    /// At least one field failed; the messages are now in the state
    Rejected(ValidationErrors),
    /// The controller was already disposed
    Ignored,
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// State shared with the toast timer; the timer only holds a `Weak` to it
struct SharedState {
    state: Mutex<LoginState>,
    disposed: AtomicBool,
    publisher: watch::Sender<LoginState>,
}

impl SharedState {
    fn new(initial: LoginState) -> Self {
        let (publisher, _) = watch::channel(initial.clone());
        Self {
            state: Mutex::new(initial),
            disposed: AtomicBool::new(false),
            publisher,
        }
    }

    /// Applies an action and publishes the new snapshot if anything changed.
    /// A disposed state ignores every action.
    fn dispatch(&self, action: LoginAction) -> bool {
        self.dispatch_all([action])
    }

    /// Applies actions in order under one lock and publishes at most one
    /// snapshot, so subscribers never see the intermediate states.
    fn dispatch_all<I>(&self, actions: I) -> bool
    where
        I: IntoIterator<Item = LoginAction>,
    {
        // The flag is read under the state lock; `close` flips it under the same lock.
        let mut state = self.state.lock();
        if self.disposed.load(Ordering::Acquire) {
            tracing::debug!("Ignoring actions on disposed login form");
            return false;
        }

        let next = actions
            .into_iter()
            .fold(state.clone(), |current, action| login_state_reducer(&current, action));
        if next == *state {
            return false;
        }

        *state = next.clone();
        self.publisher.send_replace(next);
        true
    }

    /// Marks the state disposed. Returns `false` if it already was. Once this
    /// returns, no dispatch can change the state.
    fn close(&self) -> bool {
        let _state = self.state.lock();
        !self.disposed.swap(true, Ordering::AcqRel)
    }
}

struct ControllerInner {
    shared: Arc<SharedState>,
    authenticator: Arc<dyn Authenticator>,
    scheduler: Arc<dyn Scheduler>,
    toast_timer: Mutex<Option<TimerHandle>>,
    greeting: Greeting,
}

impl ControllerInner {
    fn dispose(&self) {
        if !self.shared.close() {
            return;
        }

        if let Some(handle) = self.toast_timer.lock().take() {
            if self.scheduler.cancel(handle) {
                tracing::debug!(%handle, "Cancelled pending toast reveal");
            }
        }
        tracing::debug!("Login form disposed");
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Owns the login form's ephemeral state.
///
/// Cloning is cheap and every clone drives the same form. The pending toast
/// timer is cancelled by [`LoginController::dispose`] or when the last clone
/// is dropped; after that every operation is a no-op.
#[derive(Clone)]
pub struct LoginController {
    inner: Arc<ControllerInner>,
}

impl fmt::Debug for LoginController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginController")
            .field("state", &*self.inner.shared.state.lock())
            .field("greeting", &self.inner.greeting)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl LoginController {
    /// Mounts a fresh form: picks the greeting from `clock` and schedules the
    /// welcome toast to appear after the configured delay.
    pub fn mount(
        config: &PortalConfig,
        clock: &dyn Clock,
        authenticator: Arc<dyn Authenticator>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        let greeting = Greeting::from_clock(clock);
        let initial = login_state_reducer(
            &LoginState::default(),
            LoginAction::SetToastMessage(greeting.welcome_message(&config.portal.hospital_name)),
        );

        let shared = Arc::new(SharedState::new(initial));
        let delay = config.toast.delay();

        let weak: Weak<SharedState> = Arc::downgrade(&shared);
        let toast_timer = match scheduler.schedule_once(
            delay,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.dispatch(LoginAction::ShowToast);
                }
            }),
        ) {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "Could not schedule welcome toast");
                None
            }
        };

        tracing::debug!(%greeting, ?delay, "Login form mounted");

        Self {
            inner: Arc::new(ControllerInner {
                shared,
                authenticator,
                scheduler,
                toast_timer: Mutex::new(toast_timer),
                greeting,
            }),
        }
    }

    /// Current state snapshot
    pub fn snapshot(&self) -> LoginState {
        self.inner.shared.state.lock().clone()
    }

    /// Receiver notified with a new snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.inner.shared.publisher.subscribe()
    }

    pub fn greeting(&self) -> Greeting {
        self.inner.greeting
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.shared.disposed.load(Ordering::Acquire)
    }

    /// Overwrites a field; validation only runs on submit
    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.inner
            .shared
            .dispatch(LoginAction::SetField(field, value.into()));
    }

    /// Validates both fields and, if they pass, hands the credentials to the
    /// authenticator. Error messages from the previous attempt are replaced.
    pub fn submit(&self) -> SubmitOutcome {
        if self.is_disposed() {
            tracing::debug!("Ignoring submit on disposed login form");
            return SubmitOutcome::Ignored;
        }

        let LoginState { fields, toggles, .. } = self.snapshot();
        let report = validation::validate(&fields);
        let errors = report.errors();
        self.inner.shared.dispatch_all([
            LoginAction::ClearErrors,
            LoginAction::SetErrors(errors.clone()),
        ]);

        if !report.is_valid() {
            tracing::debug!(
                username_error = ?report.username,
                password_error = ?report.password,
                "Login form rejected"
            );
            return SubmitOutcome::Rejected(errors);
        }

        let credentials = Credentials::new(fields.username, fields.password, toggles.remember_me);
        self.inner.authenticator.authenticate(&credentials);
        SubmitOutcome::Accepted
    }

    pub fn toggle_show_password(&self) {
        self.inner.shared.dispatch(LoginAction::ToggleShowPassword);
    }

    /// Sets the remember-me flag to the checkbox value
    pub fn toggle_remember_me(&self, checked: bool) {
        self.inner.shared.dispatch(LoginAction::SetRememberMe(checked));
    }

    pub fn toggle_dark_mode(&self) {
        self.inner.shared.dispatch(LoginAction::ToggleDarkMode);
    }

    pub fn dismiss_toast(&self) {
        self.inner.shared.dispatch(LoginAction::DismissToast);
    }

    /// Secondary toast trigger, fired when the social icons finish animating in.
    /// Idempotent; the reveal timer stays scheduled.
    pub fn reveal_toast(&self) {
        self.inner.shared.dispatch(LoginAction::ShowToast);
    }

    /// Cancels the pending toast reveal and freezes the state
    pub fn dispose(&self) {
        self.inner.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::error::{Error, Result};
    use crate::scheduler::{ManualScheduler, TimerCallback};
    use crate::utils::time::FixedClock;

    #[derive(Default)]
    struct RecordingAuthenticator {
        calls: Mutex<Vec<Credentials>>,
    }

    impl Authenticator for RecordingAuthenticator {
        fn authenticate(&self, credentials: &Credentials) {
            self.calls.lock().push(credentials.clone());
        }
    }

    /// Fires timers even after they were cancelled
    #[derive(Default)]
    struct LeakyScheduler {
        inner: ManualScheduler,
    }

    impl Scheduler for LeakyScheduler {
        fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> Result<TimerHandle> {
            self.inner.schedule_once(delay, callback)
        }

        fn cancel(&self, _handle: TimerHandle) -> bool {
            false
        }
    }

    /// Hands the reveal callback to the test instead of running it; the timer
    /// counts as already fired, so `cancel` reports false
    #[derive(Default)]
    struct CapturingScheduler {
        handles: ManualScheduler,
        callback: Mutex<Option<TimerCallback>>,
    }

    impl Scheduler for CapturingScheduler {
        fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> Result<TimerHandle> {
            let handle = self.handles.schedule_once(delay, Box::new(|| {}))?;
            *self.callback.lock() = Some(callback);
            Ok(handle)
        }

        fn cancel(&self, _handle: TimerHandle) -> bool {
            false
        }
    }

    struct FailingScheduler;

    impl Scheduler for FailingScheduler {
        fn schedule_once(&self, _delay: Duration, _callback: TimerCallback) -> Result<TimerHandle> {
            Err(Error::scheduler("no timers"))
        }

        fn cancel(&self, _handle: TimerHandle) -> bool {
            false
        }
    }

    struct Harness {
        controller: LoginController,
        scheduler: Arc<ManualScheduler>,
        authenticator: Arc<RecordingAuthenticator>,
    }

    fn mount_at(hour: u32) -> Harness {
        let scheduler = Arc::new(ManualScheduler::new());
        let authenticator = Arc::new(RecordingAuthenticator::default());
        let controller = LoginController::mount(
            &PortalConfig::default(),
            &FixedClock::at_hour(hour).unwrap(),
            authenticator.clone(),
            scheduler.clone(),
        );
        Harness {
            controller,
            scheduler,
            authenticator,
        }
    }

    fn mount() -> Harness {
        mount_at(9)
    }

    #[test]
    fn test_mount_sets_greeting_and_hides_toast() {
        let h = mount_at(20);
        let state = h.controller.snapshot();

        assert_eq!(h.controller.greeting(), Greeting::Evening);
        assert_eq!(state.toast.message, "Good Evening, Welcome to the Hopewell Hospital!");
        assert!(!state.toast.visible);
        assert_eq!(h.scheduler.pending_count(), 1);
    }

    #[test]
    fn test_toast_appears_after_delay() {
        let h = mount();

        h.scheduler.advance(Duration::from_millis(2499));
        assert!(!h.controller.snapshot().toast.visible);

        h.scheduler.advance(Duration::from_millis(1));
        assert!(h.controller.snapshot().toast.visible);
        assert_eq!(h.scheduler.pending_count(), 0);
    }

    #[test]
    fn test_secondary_trigger_wins_and_timer_is_noop() {
        let h = mount();
        let mut rx = h.controller.subscribe();

        h.controller.reveal_toast();
        assert!(h.controller.snapshot().toast.visible);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        h.controller.reveal_toast();
        h.scheduler.advance(Duration::from_millis(2500));
        assert!(h.controller.snapshot().toast.visible);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_dismiss_hides_toast_regardless_of_trigger() {
        let h = mount();
        h.scheduler.advance(Duration::from_millis(2500));
        h.controller.dismiss_toast();
        assert!(!h.controller.snapshot().toast.visible);

        let h = mount();
        h.controller.reveal_toast();
        h.controller.dismiss_toast();
        assert!(!h.controller.snapshot().toast.visible);
    }

    #[test]
    fn test_dispose_cancels_toast_timer() {
        let h = mount();
        let mut rx = h.controller.subscribe();

        h.scheduler.advance(Duration::from_millis(1000));
        h.controller.dispose();
        assert!(h.controller.is_disposed());
        assert_eq!(h.scheduler.pending_count(), 0);

        assert_eq!(h.scheduler.advance(Duration::from_secs(5)), 0);
        assert!(!h.controller.snapshot().toast.visible);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_dropping_last_clone_cancels_timer() {
        let h = mount();
        let clone = h.controller.clone();
        drop(h.controller);
        assert_eq!(h.scheduler.pending_count(), 1);
        assert!(!clone.is_disposed());

        drop(clone);
        assert_eq!(h.scheduler.pending_count(), 0);
    }

    #[test]
    fn test_stale_timer_after_dispose_is_harmless() {
        let scheduler = Arc::new(LeakyScheduler::default());
        let controller = LoginController::mount(
            &PortalConfig::default(),
            &FixedClock::at_hour(9).unwrap(),
            Arc::new(RecordingAuthenticator::default()),
            scheduler.clone(),
        );
        let mut rx = controller.subscribe();

        controller.dispose();
        assert_eq!(scheduler.inner.advance(Duration::from_secs(3)), 1);
        assert!(!controller.snapshot().toast.visible);
        assert!(!rx.has_changed().unwrap());

        // Timer outliving the controller entirely
        let controller = LoginController::mount(
            &PortalConfig::default(),
            &FixedClock::at_hour(9).unwrap(),
            Arc::new(RecordingAuthenticator::default()),
            scheduler.clone(),
        );
        drop(controller);
        assert_eq!(scheduler.inner.advance(Duration::from_secs(3)), 1);
    }

    #[test]
    fn test_operations_after_dispose_are_noops() {
        let h = mount();
        h.controller.dispose();
        h.controller.dispose();

        h.controller.set_field(Field::Username, "alice");
        h.controller.toggle_dark_mode();
        h.controller.reveal_toast();
        assert_eq!(h.controller.submit(), SubmitOutcome::Ignored);

        let state = h.controller.snapshot();
        assert!(state.fields.username.is_empty());
        assert!(!state.toggles.dark_mode);
        assert!(!state.toast.visible);
        assert!(h.authenticator.calls.lock().is_empty());
    }

    #[test]
    fn test_schedule_failure_does_not_block_mount() {
        let controller = LoginController::mount(
            &PortalConfig::default(),
            &FixedClock::at_hour(13).unwrap(),
            Arc::new(RecordingAuthenticator::default()),
            Arc::new(FailingScheduler),
        );

        assert_eq!(controller.greeting(), Greeting::Afternoon);
        controller.reveal_toast();
        assert!(controller.snapshot().toast.visible);
        controller.dispose();
    }

    #[test]
    fn test_set_field_does_not_validate() {
        let h = mount();
        h.controller.set_field(Field::Username, "a");
        h.controller.set_field(Field::Password, "x");

        let state = h.controller.snapshot();
        assert_eq!(state.fields.username, "a");
        assert_eq!(state.fields.password, "x");
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_invalid_submit_stores_errors() {
        let h = mount();
        h.controller.set_field(Field::Username, "al");
        h.controller.set_field(Field::Password, "secret1!");

        let outcome = h.controller.submit();
        let expected = ValidationErrors {
            username_error: Some("Username must be at least 3 characters long.".to_string()),
            password_error: Some("Password must contain at least one uppercase letter.".to_string()),
        };
        assert_eq!(outcome, SubmitOutcome::Rejected(expected.clone()));
        assert_eq!(h.controller.snapshot().errors, expected);
        assert!(h.authenticator.calls.lock().is_empty());
    }

    #[test]
    fn test_valid_submit_forwards_credentials() {
        let h = mount();
        h.controller.submit();
        assert!(!h.controller.snapshot().errors.is_empty());

        h.controller.set_field(Field::Username, "bob");
        h.controller.set_field(Field::Password, "Secret1!");
        h.controller.toggle_remember_me(true);

        assert!(h.controller.submit().is_accepted());
        assert!(h.controller.snapshot().errors.is_empty());
        assert_eq!(
            *h.authenticator.calls.lock(),
            vec![Credentials::new("bob", "Secret1!", true)]
        );
    }

    #[test]
    fn test_toggles() {
        let h = mount();

        h.controller.toggle_show_password();
        h.controller.toggle_dark_mode();
        h.controller.toggle_remember_me(true);
        let toggles = h.controller.snapshot().toggles;
        assert!(toggles.show_password && toggles.dark_mode && toggles.remember_me);

        h.controller.toggle_show_password();
        h.controller.toggle_remember_me(false);
        let toggles = h.controller.snapshot().toggles;
        assert!(!toggles.show_password);
        assert!(toggles.dark_mode);
        assert!(!toggles.remember_me);
    }

    #[test]
    fn test_subscribers_see_changes_only() {
        let h = mount();
        let mut rx = h.controller.subscribe();

        h.controller.toggle_remember_me(false);
        assert!(!rx.has_changed().unwrap());

        h.controller.toggle_dark_mode();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().toggles.dark_mode);
    }

    #[test]
    fn test_in_flight_timer_cannot_outlive_dispose() {
        let scheduler = Arc::new(CapturingScheduler::default());
        let controller = LoginController::mount(
            &PortalConfig::default(),
            &FixedClock::at_hour(9).unwrap(),
            Arc::new(RecordingAuthenticator::default()),
            scheduler.clone(),
        );
        let callback = scheduler.callback.lock().take().unwrap();

        // Timer thread starts while the state is locked and has to wait for it
        let guard = controller.inner.shared.state.lock();
        let timer = std::thread::spawn(callback);
        std::thread::sleep(Duration::from_millis(50));
        drop(guard);

        controller.dispose();
        let after_dispose = controller.snapshot();
        timer.join().unwrap();

        assert_eq!(controller.snapshot(), after_dispose);
    }

    #[test]
    fn test_submit_publishes_one_snapshot() {
        let h = mount();
        let mut rx = h.controller.subscribe();

        h.controller.set_field(Field::Username, "al");
        rx.borrow_and_update();

        h.controller.submit();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().errors.username_error.is_some());

        // Same errors again: cleared and re-set under one lock, nothing published
        h.controller.submit();
        assert!(!rx.has_changed().unwrap());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test(start_paused = true)]
    async fn test_toast_appears_with_tokio_scheduler() {
        let scheduler = Arc::new(crate::scheduler::TokioScheduler::from_current().unwrap());
        let controller = LoginController::mount(
            &PortalConfig::default(),
            &FixedClock::at_hour(9).unwrap(),
            Arc::new(RecordingAuthenticator::default()),
            scheduler.clone(),
        );
        let mut updates = controller.subscribe();

        tokio::time::sleep(Duration::from_millis(2400)).await;
        assert!(!controller.snapshot().toast.visible);

        updates.changed().await.unwrap();
        assert!(updates.borrow_and_update().toast.visible);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test(start_paused = true)]
    async fn test_dispose_cancels_tokio_timer() {
        let scheduler = Arc::new(crate::scheduler::TokioScheduler::from_current().unwrap());
        let controller = LoginController::mount(
            &PortalConfig::default(),
            &FixedClock::at_hour(9).unwrap(),
            Arc::new(RecordingAuthenticator::default()),
            scheduler.clone(),
        );

        tokio::time::sleep(Duration::from_millis(1000)).await;
        controller.dispose();
        assert_eq!(scheduler.pending_count(), 0);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!controller.snapshot().toast.visible);
    }
}

// src/scheduler.rs

//! One-shot timers with explicit cancellation
//!
//! A scheduled callback fires at most once. Every schedule call returns a
//! [`TimerHandle`] that the owner keeps and cancels on disposal, so no timer
//! can outlive the state it mutates without the owner knowing about it.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

#[cfg(not(target_arch = "wasm32"))]
use crate::error::Error;
use crate::error::Result;

/// Work run when a timer fires
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Identifies a scheduled timer for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

#[derive(Debug, Default)]
struct HandleAllocator(AtomicU64);

impl HandleAllocator {
    fn next(&self) -> TimerHandle {
        TimerHandle(self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Scheduler collaborator used for delayed UI actions
#[cfg(not(target_arch = "wasm32"))]
pub trait Scheduler: Send + Sync {
    fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> Result<TimerHandle>;

    /// Returns `true` if the timer was still pending
    fn cancel(&self, handle: TimerHandle) -> bool;
}

#[cfg(target_arch = "wasm32")]
pub trait Scheduler {
    fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> Result<TimerHandle>;

    /// Returns `true` if the timer was still pending
    fn cancel(&self, handle: TimerHandle) -> bool;
}

/// Tokio-backed scheduler for native builds
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct TokioScheduler {
    runtime: tokio::runtime::Handle,
    handles: HandleAllocator,
    pending: std::sync::Arc<Mutex<HashMap<TimerHandle, tokio_util::sync::CancellationToken>>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl TokioScheduler {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self {
            runtime,
            handles: HandleAllocator::default(),
            pending: std::sync::Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Binds to the runtime of the calling context
    pub fn from_current() -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| Error::scheduler("No Tokio runtime available").caused_by(e))?;
        Ok(Self::new(runtime))
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Scheduler for TokioScheduler {
    fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> Result<TimerHandle> {
        let handle = self.handles.next();
        let token = tokio_util::sync::CancellationToken::new();
        self.pending.lock().insert(handle, token.clone());

        let pending = self.pending.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!(%handle, "Timer cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    // A concurrent cancel that already removed the entry wins.
                    if pending.lock().remove(&handle).is_some() {
                        tracing::trace!(%handle, "Timer fired");
                        callback();
                    }
                }
            }
        });

        Ok(handle)
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        match self.pending.lock().remove(&handle) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }
}

/// Browser-backed scheduler for wasm32 builds
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct GlooScheduler {
    handles: HandleAllocator,
    pending: std::rc::Rc<std::cell::RefCell<HashMap<TimerHandle, gloo_timers::callback::Timeout>>>,
}

#[cfg(target_arch = "wasm32")]
impl GlooScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(target_arch = "wasm32")]
impl Scheduler for GlooScheduler {
    fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> Result<TimerHandle> {
        let handle = self.handles.next();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);

        let pending = self.pending.clone();
        let timeout = gloo_timers::callback::Timeout::new(millis, move || {
            let fired = pending.borrow_mut().remove(&handle);
            if let Some(timeout) = fired {
                // Dropping a running Timeout would free its own closure.
                let _ = timeout.forget();
                callback();
            }
        });
        self.pending.borrow_mut().insert(handle, timeout);

        Ok(handle)
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        let removed = self.pending.borrow_mut().remove(&handle);
        match removed {
            Some(timeout) => {
                timeout.cancel();
                true
            }
            None => false,
        }
    }
}

/// Scheduler backed by the platform's event loop
#[cfg(not(target_arch = "wasm32"))]
pub fn default_scheduler() -> Result<std::sync::Arc<dyn Scheduler>> {
    Ok(std::sync::Arc::new(TokioScheduler::from_current()?))
}

/// Scheduler backed by the platform's event loop
#[cfg(target_arch = "wasm32")]
pub fn default_scheduler() -> Result<std::sync::Arc<dyn Scheduler>> {
    Ok(std::sync::Arc::new(GlooScheduler::new()))
}

struct ManualTimer {
    deadline: Duration,
    callback: TimerCallback,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    timers: HashMap<TimerHandle, ManualTimer>,
}

/// Virtual-time scheduler; timers fire only when [`ManualScheduler::advance`] is called
#[derive(Default)]
pub struct ManualScheduler {
    handles: HandleAllocator,
    state: Mutex<ManualState>,
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("pending", &state.timers.len())
            .finish()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    pub fn pending_count(&self) -> usize {
        self.state.lock().timers.len()
    }

    /// Moves virtual time forward and runs every timer that became due, in
    /// deadline order. Returns the number of callbacks run.
    pub fn advance(&self, by: Duration) -> usize {
        let mut due = {
            let mut state = self.state.lock();
            state.now += by;
            let now = state.now;

            let handles: Vec<TimerHandle> = state
                .timers
                .iter()
                .filter(|(_, timer)| timer.deadline <= now)
                .map(|(handle, _)| *handle)
                .collect();

            handles
                .into_iter()
                .filter_map(|handle| state.timers.remove(&handle).map(|timer| (handle, timer)))
                .collect::<Vec<_>>()
        };

        due.sort_by_key(|(handle, timer)| (timer.deadline, *handle));

        // Callbacks run without the lock so they may schedule or cancel.
        let fired = due.len();
        for (handle, timer) in due {
            tracing::trace!(%handle, "Manual timer fired");
            (timer.callback)();
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, delay: Duration, callback: TimerCallback) -> Result<TimerHandle> {
        let handle = self.handles.next();
        let mut state = self.state.lock();
        let deadline = state.now + delay;
        state.timers.insert(handle, ManualTimer { deadline, callback });
        Ok(handle)
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        self.state.lock().timers.remove(&handle).is_some()
    }
}

// src/scheduler/timing.rs
// =============================================================================
// Debounce and throttle wrappers.
//
// - Debounced: every call restarts the wait; only the last call in a burst
//   reaches the wrapped function, with that call's arguments.
// - Throttled: the first call goes through immediately; calls inside the
//   limit window are dropped, not queued.
//
// Both use tokio's clock, so tests can drive them with a paused runtime.
// =============================================================================

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::lock;

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Wraps `func` so that it only runs `wait` after the most recent call.
pub fn debounce<A, F>(func: F, wait: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced {
        func: Arc::new(func),
        wait,
        pending: Mutex::new(None),
    }
}

/// A debounced callback. See [`debounce`].
pub struct Debounced<A> {
    func: Callback<A>,
    wait: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debounced<A> {
    /// Cancels the pending invocation, if any, and schedules a new one with
    /// `args` after the wait period. Must be called inside a tokio runtime.
    pub fn call(&self, args: A) {
        let func = Arc::clone(&self.func);
        let wait = self.wait;
        let task = tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            func(args);
        });

        if let Some(previous) = lock(&self.pending).replace(task) {
            previous.abort();
        }
    }

    /// Drops the pending invocation without running it.
    pub fn cancel(&self) {
        if let Some(task) = lock(&self.pending).take() {
            task.abort();
        }
    }

    /// True while an invocation is scheduled and has not run yet.
    pub fn is_pending(&self) -> bool {
        lock(&self.pending)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

/// Wraps `func` so that it runs at most once per `limit`.
pub fn throttle<A, F>(func: F, limit: Duration) -> Throttled<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Throttled {
        func: Box::new(func),
        limit,
        last_run: Mutex::new(None),
    }
}

/// A throttled callback. See [`throttle`].
pub struct Throttled<A> {
    func: Box<dyn Fn(A) + Send + Sync>,
    limit: Duration,
    last_run: Mutex<Option<Instant>>,
}

impl<A> Throttled<A> {
    /// Runs the wrapped function now unless it already ran less than `limit`
    /// ago. Returns whether it ran.
    pub fn call(&self, args: A) -> bool {
        let now = Instant::now();
        {
            let mut last_run = lock(&self.last_run);
            if let Some(previous) = *last_run {
                if now.duration_since(previous) < self.limit {
                    return false;
                }
            }
            *last_run = Some(now);
        }

        (self.func)(args);
        true
    }
}

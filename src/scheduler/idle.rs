// src/scheduler/idle.rs
// =============================================================================
// Idle-slot scheduling on top of the tokio runtime.
//
// An "idle slot" is the moment the runtime comes back to us after we hand
// control back to it with a cooperative yield. If other tasks are ready they
// run first, so a busy runtime delays the slot. A timeout caps the wait: the
// callback runs when the slot arrives or when the timeout fires, whichever is
// sooner.
// =============================================================================

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::DEFAULT_IDLE_TIMEOUT;

/// How an idle wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleSlot {
    /// The runtime handed control back before the timeout.
    Granted,
    /// The timeout elapsed first.
    TimedOut,
}

/// Waits for the next idle slot, or for `timeout`, whichever comes first.
pub async fn idle(timeout: Duration) -> IdleSlot {
    match tokio::time::timeout(timeout, tokio::task::yield_now()).await {
        Ok(()) => IdleSlot::Granted,
        Err(_) => IdleSlot::TimedOut,
    }
}

/// Runs `callback` after `delay`. Fire-and-forget: there is no handle.
pub fn defer<F>(callback: F, delay: Duration)
where
    F: FnOnce() + Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        callback();
    });
}

/// Runs `callback` at the next idle slot, or after `timeout` at the latest.
///
/// The returned handle cancels the callback if it has not fired yet. The
/// callback itself is synchronous, so once it has started it always runs to
/// completion.
pub fn on_idle<F>(callback: F, timeout: Duration) -> IdleHandle
where
    F: FnOnce() + Send + 'static,
{
    let task = tokio::spawn(async move {
        idle(timeout).await;
        callback();
    });

    IdleHandle { task }
}

/// Cancellation handle for a callback scheduled with [`on_idle`].
#[derive(Debug)]
pub struct IdleHandle {
    task: JoinHandle<()>,
}

impl IdleHandle {
    /// Prevents the callback from running if it has not fired yet.
    /// Has no effect once it has fired.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// True once the callback has run or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the scheduled callback. Returns `true` if it ran and `false`
    /// if it was cancelled first. A panic inside the callback is re-raised.
    pub async fn join(self) -> bool {
        match self.task.await {
            Ok(()) => true,
            Err(err) if err.is_cancelled() => false,
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}

/// Reports whether the runtime took longer than `threshold` to grant an idle
/// slot.
///
/// Advisory only: it samples a single yield, so it says something about the
/// moment it ran and nothing about the runtime's load in general.
pub async fn is_main_thread_busy(threshold: Duration) -> bool {
    let started = Instant::now();
    let slot = idle(DEFAULT_IDLE_TIMEOUT.max(threshold)).await;
    slot == IdleSlot::TimedOut || started.elapsed() > threshold
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does cancel() work without a flag?
//    - JoinHandle::abort() stops a task at its next .await
//    - The only .await in the task is the idle wait, before the callback
//    - So an abort either lands before the callback or not at all
//
// 2. What does yield_now() do?
//    - It puts the current task at the back of the runtime's queue
//    - Other ready tasks get to run first, then we are polled again
//    - That "polled again" moment is our idle slot
//
// 3. Why tokio::time::Instant instead of std::time::Instant?
//    - Tests pause tokio's clock; only tokio's Instant follows it
// -----------------------------------------------------------------------------

// src/scheduler/mod.rs
// =============================================================================
// Small helpers that push work off the caller's path instead of running it
// inline.
//
// Submodules:
// - idle: wait for an idle slot, run a callback when idle, defer by a delay
// - timing: debounce and throttle wrappers around a callback
// - chunks: run operations or process items in bounded groups
//
// Everything that spawns a task needs to be called from inside a tokio
// runtime. Nothing here is shared between callers: each wrapper owns its own
// pending task and cancellation handle.
// =============================================================================

mod chunks;
mod idle;
mod timing;

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub use chunks::{batch_operations, process_in_chunks};
pub use idle::{defer, idle, is_main_thread_busy, on_idle, IdleHandle, IdleSlot};
pub use timing::{debounce, throttle, Debounced, Throttled};

/// How long `on_idle` waits for an idle slot before running anyway.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Operations run per idle slot by `batch_operations`.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Items processed per chunk by `process_in_chunks`.
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Wait above which `is_main_thread_busy` reports the runtime as busy.
pub const DEFAULT_BUSY_THRESHOLD: Duration = Duration::from_millis(50);

// A panicking callback must not wedge the wrapper for every later call, so a
// poisoned lock is simply taken over.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

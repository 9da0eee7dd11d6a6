// src/scheduler/chunks.rs
// =============================================================================
// Running a long list of work in bounded groups.
//
// - batch_operations: waits for an idle slot before each group of operations
// - process_in_chunks: maps items chunk by chunk, sleeping between chunks
//
// A group size of zero is rejected up front; nothing runs in that case.
// =============================================================================

use std::time::Duration;

use anyhow::{bail, Result};

use super::{idle, DEFAULT_IDLE_TIMEOUT};

/// Runs `operations` in order, `batch_size` at a time, waiting for an idle
/// slot before each batch.
///
/// Every operation runs exactly once. An empty list waits for nothing.
/// Returns how many operations ran.
pub async fn batch_operations<I, F>(operations: I, batch_size: usize) -> Result<usize>
where
    I: IntoIterator<Item = F>,
    F: FnOnce(),
{
    if batch_size == 0 {
        bail!("batch size must be at least 1");
    }

    let mut pending = operations.into_iter().peekable();
    let mut ran = 0;

    while pending.peek().is_some() {
        idle(DEFAULT_IDLE_TIMEOUT).await;

        for operation in pending.by_ref().take(batch_size) {
            operation();
            ran += 1;
        }
    }

    Ok(ran)
}

/// Applies `processor` to every item, `chunk_size` items per chunk, and
/// returns the results in input order.
///
/// When `delay` is non-zero the task sleeps that long between chunks (not
/// after the last one).
pub async fn process_in_chunks<T, R, F>(
    items: Vec<T>,
    mut processor: F,
    chunk_size: usize,
    delay: Duration,
) -> Result<Vec<R>>
where
    F: FnMut(T) -> R,
{
    if chunk_size == 0 {
        bail!("chunk size must be at least 1");
    }

    let mut results = Vec::with_capacity(items.len());
    let mut remaining = items.into_iter().peekable();

    while remaining.peek().is_some() {
        results.extend(remaining.by_ref().take(chunk_size).map(&mut processor));

        if !delay.is_zero() && remaining.peek().is_some() {
            tokio::time::sleep(delay).await;
        }
    }

    Ok(results)
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded, age-limited FIFO buffer for serialized event payloads.
//!
//! The queue is the only structure shared between producer threads and the
//! drain cycle, so every operation serializes on one internal mutex.
//! Expiration is lazy: there is no background sweep, instead every read pass
//! first drops entries older than `max_age_days`. Overflow is handled by
//! silently evicting the oldest entries — under pressure the newest data is
//! the data worth keeping.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use crate::clock::{Clock, SystemClock};

/// A single buffered payload with its enqueue timestamp.
///
/// Immutable once created; owned exclusively by the queue until dequeued
/// or purged.
#[derive(Debug, Clone)]
struct QueueEntry {
    queued_at: DateTime<Utc>,
    payload: String,
}

#[derive(Debug)]
struct QueueInner {
    entries: VecDeque<QueueEntry>,
    /// Maximum entry count; zero or negative means unbounded.
    max_size: i32,
    /// Maximum entry age in days; negative means no expiration.
    max_age_days: i32,
}

/// Thread-safe dispatch queue with size and age limits.
///
/// Invariants:
/// - entries are ordered by enqueue time (FIFO);
/// - `len() <= max_size` is enforced immediately after any enqueue and after
///   any [`reset_limits`](DispatchQueue::reset_limits) whenever `max_size > 1`;
/// - no read ever observes an entry older than `max_age_days`.
pub struct DispatchQueue<C: Clock = SystemClock> {
    clock: C,
    inner: Mutex<QueueInner>,
}

impl DispatchQueue<SystemClock> {
    /// Creates a queue with the given limits, using the system clock.
    ///
    /// `max_size <= 0` means unbounded; `max_age_days < 0` means entries
    /// never expire.
    pub fn new(max_size: i32, max_age_days: i32) -> Self {
        Self::with_clock(SystemClock, max_size, max_age_days)
    }
}

impl<C: Clock> DispatchQueue<C> {
    /// Creates a queue with a custom clock source.
    pub fn with_clock(clock: C, max_size: i32, max_age_days: i32) -> Self {
        DispatchQueue {
            clock,
            inner: Mutex::new(QueueInner {
                entries: VecDeque::new(),
                max_size,
                max_age_days,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Appends a payload with the current timestamp.
    ///
    /// If the queue is bounded and now exceeds its limit, expired entries are
    /// purged first and then the oldest entries are dropped until the queue
    /// fits. Overflow is not an error.
    pub fn enqueue(&self, payload: impl Into<String>) {
        let now = self.clock.now();
        let mut inner = self.lock();
        inner.entries.push_back(QueueEntry {
            queued_at: now,
            payload: payload.into(),
        });
        if inner.max_size > 1 && inner.entries.len() > inner.max_size as usize {
            purge_expired(&mut inner, now);
            purge_excess(&mut inner);
        }
    }

    /// Pops the oldest non-expired payload, if any.
    pub fn try_dequeue(&self) -> Option<String> {
        let now = self.clock.now();
        let mut inner = self.lock();
        purge_expired(&mut inner, now);
        inner.entries.pop_front().map(|e| e.payload)
    }

    /// Returns true if no non-expired entries remain.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the live entry count, after purging expired entries.
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        let mut inner = self.lock();
        purge_expired(&mut inner, now);
        inner.entries.len()
    }

    /// Atomically replaces both limits, then applies them to the buffered
    /// content: expired entries are purged and, when `max_size > 1`, the
    /// oldest entries are dropped until the queue fits.
    ///
    /// A policy update can legitimately shrink the queue below what is
    /// already buffered. `max_size == 1` is treated as unbounded, like zero.
    pub fn reset_limits(&self, max_size: i32, max_age_days: i32) {
        let now = self.clock.now();
        let mut inner = self.lock();
        inner.max_size = max_size;
        inner.max_age_days = max_age_days;
        purge_expired(&mut inner, now);
        purge_excess(&mut inner);
    }

    /// Read-only materialization of the current (post-purge) payloads in
    /// FIFO order. Used for persistence on suspend.
    pub fn snapshot(&self) -> Vec<String> {
        let now = self.clock.now();
        let mut inner = self.lock();
        purge_expired(&mut inner, now);
        inner.entries.iter().map(|e| e.payload.clone()).collect()
    }

    /// Re-enqueues recovered payloads in order, applying the same limits as
    /// [`enqueue`](DispatchQueue::enqueue). Used on resume.
    pub fn restore(&self, payloads: impl IntoIterator<Item = String>) {
        for payload in payloads {
            self.enqueue(payload);
        }
    }

    /// Current maximum size (`<= 0` means unbounded).
    pub fn max_size(&self) -> i32 {
        self.lock().max_size
    }

    /// Current maximum age in days (`< 0` means no expiration).
    pub fn max_age_days(&self) -> i32 {
        self.lock().max_age_days
    }
}

/// Drops entries from the front whose age exceeds the configured limit.
///
/// Entries are in enqueue order, so the scan can stop at the first entry
/// that is still fresh.
fn purge_expired(inner: &mut QueueInner, now: DateTime<Utc>) {
    if inner.max_age_days < 0 {
        return;
    }
    let max_age = Duration::days(i64::from(inner.max_age_days));
    while let Some(front) = inner.entries.front() {
        if front.queued_at + max_age < now {
            inner.entries.pop_front();
        } else {
            break;
        }
    }
}

/// Drops oldest entries until the queue fits `max_size`.
fn purge_excess(inner: &mut QueueInner) {
    if inner.max_size <= 1 {
        return;
    }
    let max = inner.max_size as usize;
    while inner.entries.len() > max {
        inner.entries.pop_front();
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;

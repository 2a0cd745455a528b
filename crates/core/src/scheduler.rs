// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative drain scheduler.
//!
//! The engine does not own a timer thread. Instead the scheduler tracks
//! whether periodic draining should currently run; the host drives the
//! actual timer and calls
//! [`TransportController::tick`](crate::controller::TransportController::tick)
//! at [`interval`](DrainScheduler::interval) while
//! [`is_running`](DrainScheduler::is_running) reports true. The controller
//! starts the scheduler on a favorable drain attempt and a tick stops it
//! again once the queue runs dry or connectivity drops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Default spacing between drain cycles.
pub const DEFAULT_DRAIN_INTERVAL: Duration = Duration::from_millis(200);

/// Start/stop state for the periodic drain timer.
#[derive(Debug)]
pub struct DrainScheduler {
    interval: Duration,
    running: AtomicBool,
}

impl DrainScheduler {
    /// Creates a stopped scheduler with the default interval.
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_DRAIN_INTERVAL)
    }

    /// Creates a stopped scheduler with a custom tick interval.
    pub fn with_interval(interval: Duration) -> Self {
        DrainScheduler {
            interval,
            running: AtomicBool::new(false),
        }
    }

    /// The spacing the host should use between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether periodic draining should currently run.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub(crate) fn start(&self) {
        self.running.store(true, Ordering::Release);
    }

    pub(crate) fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }
}

impl Default for DrainScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

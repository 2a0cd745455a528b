// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn starts_stopped_with_default_interval() {
    let scheduler = DrainScheduler::new();
    assert!(!scheduler.is_running());
    assert_eq!(scheduler.interval(), DEFAULT_DRAIN_INTERVAL);
    assert_eq!(DEFAULT_DRAIN_INTERVAL, Duration::from_millis(200));
}

#[test]
fn start_and_stop_toggle_running() {
    let scheduler = DrainScheduler::new();
    scheduler.start();
    assert!(scheduler.is_running());
    scheduler.stop();
    assert!(!scheduler.is_running());
}

#[test]
fn start_is_idempotent() {
    let scheduler = DrainScheduler::new();
    scheduler.start();
    scheduler.start();
    assert!(scheduler.is_running());
    scheduler.stop();
    scheduler.stop();
    assert!(!scheduler.is_running());
}

#[test]
fn custom_interval() {
    let scheduler = DrainScheduler::with_interval(Duration::from_secs(5));
    assert_eq!(scheduler.interval(), Duration::from_secs(5));
}

#[test]
fn default_matches_new() {
    let scheduler = DrainScheduler::default();
    assert!(!scheduler.is_running());
    assert_eq!(scheduler.interval(), DEFAULT_DRAIN_INTERVAL);
}

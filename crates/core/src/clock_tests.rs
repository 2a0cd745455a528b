// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use std::sync::Mutex;

struct FixedClock(Mutex<DateTime<Utc>>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

#[test]
fn system_clock_returns_reasonable_time() {
    let clock = SystemClock;
    let now = clock.now();
    // Should be after Jan 1, 2020
    assert!(now > Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
}

#[test]
fn clock_ref_delegation() {
    let start = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
    let clock = FixedClock(Mutex::new(start));
    let clock_ref: &FixedClock = &clock;

    assert_eq!(clock_ref.now(), start);

    let later = start + chrono::Duration::hours(1);
    *clock.0.lock().unwrap() = later;
    assert_eq!(clock_ref.now(), later);
}

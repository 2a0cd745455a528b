// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

/// Controllable platform probe.
#[derive(Default)]
struct StubProbe {
    online: AtomicBool,
    wifi: AtomicBool,
    battery_saver: AtomicBool,
    online_queries: AtomicUsize,
}

impl StubProbe {
    fn set_online(&self, value: bool) {
        self.online.store(value, Ordering::SeqCst);
    }

    fn set_wifi(&self, value: bool) {
        self.wifi.store(value, Ordering::SeqCst);
    }
}

impl ConnectivityProbe for StubProbe {
    fn is_online(&self) -> bool {
        self.online_queries.fetch_add(1, Ordering::SeqCst);
        self.online.load(Ordering::SeqCst)
    }

    fn is_on_wifi(&self) -> bool {
        self.wifi.load(Ordering::SeqCst)
    }

    fn is_battery_saver(&self) -> bool {
        self.battery_saver.load(Ordering::SeqCst)
    }
}

#[test]
fn is_online_probes_when_nothing_cached() {
    let probe = StubProbe::default();
    probe.set_online(true);
    let monitor = ConnectivityMonitor::new(&probe);
    assert!(monitor.is_online());

    probe.set_online(false);
    // Not cached: the second read probes again and sees the change.
    assert!(!monitor.is_online());
}

#[test]
fn notification_path_caches_the_online_flag() {
    let probe = StubProbe::default();
    probe.set_online(true);
    let monitor = ConnectivityMonitor::new(&probe);
    monitor.network_changed();

    // The cached value now answers reads without consulting the probe.
    probe.set_online(false);
    let queries_before = probe.online_queries.load(Ordering::SeqCst);
    assert!(monitor.is_online());
    assert_eq!(probe.online_queries.load(Ordering::SeqCst), queries_before);
}

#[test]
fn wifi_is_always_probed() {
    let probe = StubProbe::default();
    let monitor = ConnectivityMonitor::new(&probe);
    assert!(!monitor.is_on_wifi());
    probe.set_wifi(true);
    assert!(monitor.is_on_wifi());
}

#[test]
fn battery_saver_defaults_to_false() {
    struct MinimalProbe;
    impl ConnectivityProbe for MinimalProbe {
        fn is_online(&self) -> bool {
            true
        }
        fn is_on_wifi(&self) -> bool {
            true
        }
    }
    let monitor = ConnectivityMonitor::new(MinimalProbe);
    assert!(!monitor.is_battery_saver());
}

#[test]
fn notifies_only_on_transition() {
    let probe = StubProbe::default();
    probe.set_online(true);
    let monitor = ConnectivityMonitor::new(&probe);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = monitor.subscribe(move |online| sink.lock().unwrap().push(online));

    monitor.network_changed(); // None -> true: transition
    monitor.network_changed(); // true -> true: no notification
    probe.set_online(false);
    monitor.network_changed(); // true -> false: transition
    monitor.network_changed(); // false -> false: no notification

    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
}

#[test]
fn all_subscribers_are_notified() {
    let probe = StubProbe::default();
    probe.set_online(true);
    let monitor = ConnectivityMonitor::new(&probe);

    let count = Arc::new(AtomicUsize::new(0));
    let a = Arc::clone(&count);
    let b = Arc::clone(&count);
    let _sub_a = monitor.subscribe(move |_| {
        a.fetch_add(1, Ordering::SeqCst);
    });
    let _sub_b = monitor.subscribe(move |_| {
        b.fetch_add(1, Ordering::SeqCst);
    });

    monitor.network_changed();
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn unsubscribed_handle_stops_receiving() {
    let probe = StubProbe::default();
    probe.set_online(true);
    let monitor = ConnectivityMonitor::new(&probe);

    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let sub = monitor.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(monitor.subscriber_count(), 1);

    monitor.unsubscribe(sub);
    assert_eq!(monitor.subscriber_count(), 0);

    monitor.network_changed();
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn handles_are_distinct_per_registration() {
    let probe = StubProbe::default();
    let monitor = ConnectivityMonitor::new(&probe);

    // The same closure shape registered twice yields two registrations,
    // each removable through its own handle only.
    let first = monitor.subscribe(|_| {});
    let second = monitor.subscribe(|_| {});
    assert_ne!(first, second);
    assert_eq!(monitor.subscriber_count(), 2);

    monitor.unsubscribe(first);
    assert_eq!(monitor.subscriber_count(), 1);
    monitor.unsubscribe(second);
    assert_eq!(monitor.subscriber_count(), 0);
}

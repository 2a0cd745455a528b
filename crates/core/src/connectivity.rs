// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity monitoring: platform probe plus change notifications.
//!
//! The platform's network and power queries live behind
//! [`ConnectivityProbe`]. The monitor caches the online flag computed by the
//! change-notification path, classifies the link on demand, and fans out
//! transitions to registered subscribers. Subscriptions are handle-based so
//! unregistration never depends on callback equality.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Platform network and power state queries.
///
/// Implementations wrap whatever the host OS exposes; they should be cheap
/// enough to call on every drain attempt.
pub trait ConnectivityProbe: Send + Sync {
    /// Whether the device currently has internet access.
    fn is_online(&self) -> bool;

    /// Whether the current connection is unmetered/unrestricted.
    fn is_on_wifi(&self) -> bool;

    /// Whether a power-saving mode is active. Defaults to `false` on
    /// platforms without a power-state query.
    fn is_battery_saver(&self) -> bool {
        false
    }
}

impl<P: ConnectivityProbe> ConnectivityProbe for &P {
    fn is_online(&self) -> bool {
        (*self).is_online()
    }

    fn is_on_wifi(&self) -> bool {
        (*self).is_on_wifi()
    }

    fn is_battery_saver(&self) -> bool {
        (*self).is_battery_saver()
    }
}

impl<P: ConnectivityProbe> ConnectivityProbe for std::sync::Arc<P> {
    fn is_online(&self) -> bool {
        (**self).is_online()
    }

    fn is_on_wifi(&self) -> bool {
        (**self).is_on_wifi()
    }

    fn is_battery_saver(&self) -> bool {
        (**self).is_battery_saver()
    }
}

/// Handle returned by [`ConnectivityMonitor::subscribe`].
///
/// Unsubscribing consumes the handle, so a registration can be removed at
/// most once and removal never depends on comparing callbacks.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Callback = Box<dyn Fn(bool) + Send>;

/// Tracks reachability and publishes online/offline transitions.
pub struct ConnectivityMonitor<P: ConnectivityProbe> {
    probe: P,
    /// Online flag as last computed by the change-notification path.
    cached_online: Mutex<Option<bool>>,
    subscribers: Mutex<Vec<(u64, Callback)>>,
    next_id: AtomicU64,
}

impl<P: ConnectivityProbe> ConnectivityMonitor<P> {
    /// Creates a monitor over the given platform probe.
    pub fn new(probe: P) -> Self {
        ConnectivityMonitor {
            probe,
            cached_online: Mutex::new(None),
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn cache(&self) -> MutexGuard<'_, Option<bool>> {
        self.cached_online.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn registry(&self) -> MutexGuard<'_, Vec<(u64, Callback)>> {
        self.subscribers.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether the device is online: the cached value if the notification
    /// path has computed one, otherwise a live platform query.
    pub fn is_online(&self) -> bool {
        if let Some(online) = *self.cache() {
            return online;
        }
        self.probe.is_online()
    }

    /// Whether the connection is unmetered. Always computed on demand; link
    /// classification can change without an address change.
    pub fn is_on_wifi(&self) -> bool {
        self.probe.is_on_wifi()
    }

    /// Whether a power-saving mode is active.
    pub fn is_battery_saver(&self) -> bool {
        self.probe.is_battery_saver()
    }

    /// Registers a callback for online/offline transitions.
    ///
    /// The callback receives the new online flag. It runs under the registry
    /// lock, so it must not call back into subscribe/unsubscribe.
    pub fn subscribe(&self, callback: impl Fn(bool) + Send + 'static) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.registry().push((id, Box::new(callback)));
        Subscription(id)
    }

    /// Removes a registration. A handle whose registration is already gone
    /// is a no-op.
    pub fn unsubscribe(&self, subscription: Subscription) {
        self.registry().retain(|(id, _)| *id != subscription.0);
    }

    /// Host entry point for OS network-change notifications.
    ///
    /// Re-queries the platform, updates the cache, and notifies every
    /// subscriber — but only when the cached value actually changed.
    /// Delivery is serialized against concurrent subscribe/unsubscribe.
    pub fn network_changed(&self) {
        let online = self.probe.is_online();
        let previous = {
            let mut cache = self.cache();
            let previous = *cache;
            *cache = Some(online);
            previous
        };

        let registry = self.registry();
        if previous != Some(online) {
            tracing::debug!(online, "connectivity transition");
            for (_, callback) in registry.iter() {
                callback(online);
            }
        }
    }

    /// Number of live registrations.
    pub fn subscriber_count(&self) -> usize {
        self.registry().len()
    }
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;

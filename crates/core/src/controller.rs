// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport controller: readiness state machine and drain cycles.
//!
//! The controller owns one dispatch queue and one remote-policy snapshot,
//! tracks the lifecycle of the delivery surface, and decides on every drain
//! attempt whether buffered events may currently be sent. It is driven from
//! a single thread (state transitions are `&mut self`); producers on other
//! threads share the queue handle and enqueue directly.
//!
//! Host glue is responsible for translating platform callbacks into the
//! controller entry points: surface load outcomes into
//! [`surface_loaded`](TransportController::surface_loaded) /
//! [`surface_failed`](TransportController::surface_failed), OS network
//! notifications into
//! [`connectivity_changed`](TransportController::connectivity_changed), and
//! the periodic timer into [`tick`](TransportController::tick) while the
//! scheduler reports running.
//!
//! The monitor's observer registry is the bridge for the network leg: the
//! host subscribes once, forwards each transition, keeps the handle, and
//! unsubscribes on teardown.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use beacon_core::{
//!     ConnectivityMonitor, ConnectivityProbe, DeliverySink, DispatchQueue,
//!     TransportController,
//! };
//!
//! # struct Probe;
//! # impl ConnectivityProbe for Probe {
//! #     fn is_online(&self) -> bool { true }
//! #     fn is_on_wifi(&self) -> bool { true }
//! # }
//! # struct Sink;
//! # impl DeliverySink for Sink {
//! #     fn open(&mut self) {}
//! #     fn fetch_policy(&mut self) -> Option<String> { None }
//! #     fn send(&mut self, _batch: &str) {}
//! # }
//! let monitor = Arc::new(ConnectivityMonitor::new(Probe));
//! let controller = Arc::new(Mutex::new(TransportController::new(
//!     Sink,
//!     Arc::new(DispatchQueue::new(0, -1)),
//!     Arc::clone(&monitor),
//! )));
//!
//! let bridged = Arc::clone(&controller);
//! let subscription = monitor.subscribe(move |online| {
//!     bridged.lock().unwrap().connectivity_changed(online);
//! });
//!
//! controller.lock().unwrap().start();
//! // ... surface_loaded / tick arrive from the host's own callbacks ...
//!
//! monitor.unsubscribe(subscription);
//! controller.lock().unwrap().shutdown();
//! ```

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::connectivity::{ConnectivityMonitor, ConnectivityProbe};
use crate::policy::RemotePolicy;
use crate::queue::DispatchQueue;
use crate::scheduler::DrainScheduler;
use crate::sink::DeliverySink;
use crate::storage::{QueueStore, QUEUE_STORAGE_KEY};

/// Lifecycle state of the delivery surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportStatus {
    /// Surface has not been opened yet.
    Unknown,
    /// Surface open is in flight.
    Loading,
    /// Surface is ready and policy is loaded.
    Loaded,
    /// Surface failed to open, typically because the device was offline.
    /// Retried on the next connectivity-regained signal.
    Failure,
    /// Policy disabled dispatch. Terminal for the session: the queue still
    /// accepts enqueues but never drains.
    Disabled,
}

/// Runtime decision of whether buffered events may currently be sent.
///
/// Computed fresh on every drain attempt, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Dispatch may proceed.
    Enabled,
    /// Dispatch is held back by connectivity or power constraints; the
    /// queue keeps buffering.
    Deferred,
    /// Dispatch is off (no policy yet, or policy disabled it).
    Disabled,
}

/// Owns the queue, the policy snapshot, and the readiness state machine.
pub struct TransportController<S, P, C = SystemClock>
where
    S: DeliverySink,
    P: ConnectivityProbe,
    C: Clock,
{
    sink: S,
    queue: Arc<DispatchQueue<C>>,
    connectivity: Arc<ConnectivityMonitor<P>>,
    scheduler: DrainScheduler,
    status: TransportStatus,
    policy: Option<RemotePolicy>,
}

impl<S, P, C> TransportController<S, P, C>
where
    S: DeliverySink,
    P: ConnectivityProbe,
    C: Clock,
{
    /// Creates a controller in the `Unknown` state with a default scheduler.
    ///
    /// Nothing happens until [`start`](TransportController::start) is called;
    /// initialization is an explicit lifecycle step.
    pub fn new(
        sink: S,
        queue: Arc<DispatchQueue<C>>,
        connectivity: Arc<ConnectivityMonitor<P>>,
    ) -> Self {
        Self::with_scheduler(sink, queue, connectivity, DrainScheduler::new())
    }

    /// Creates a controller with a custom drain scheduler.
    pub fn with_scheduler(
        sink: S,
        queue: Arc<DispatchQueue<C>>,
        connectivity: Arc<ConnectivityMonitor<P>>,
        scheduler: DrainScheduler,
    ) -> Self {
        TransportController {
            sink,
            queue,
            connectivity,
            scheduler,
            status: TransportStatus::Unknown,
            policy: None,
        }
    }

    /// Begins the session: opens the delivery surface if the device is
    /// currently online, otherwise stays `Unknown` until a connectivity
    /// notification arrives.
    pub fn start(&mut self) {
        if self.connectivity.is_online() {
            self.open_surface();
        }
    }

    fn open_surface(&mut self) {
        tracing::info!("opening delivery surface");
        self.status = TransportStatus::Loading;
        self.sink.open();
    }

    /// Host signal: the delivery surface finished loading successfully.
    ///
    /// Fetches the remote policy (defaults when absent or blank), and either
    /// applies it to the queue and goes `Loaded` — attempting a drain right
    /// away — or parks in `Disabled` for the rest of the session.
    pub fn surface_loaded(&mut self) {
        let policy = match self.sink.fetch_policy() {
            Some(doc) if !doc.trim().is_empty() => RemotePolicy::parse_current(&doc),
            _ => RemotePolicy::default(),
        };

        if policy.is_enabled {
            self.queue
                .reset_limits(policy.offline_dispatch_limit, policy.dispatch_expiration_days);
            self.policy = Some(policy);
            self.status = TransportStatus::Loaded;
            tracing::info!("delivery surface loaded, dispatch enabled");
            self.process_queue();
        } else {
            self.policy = Some(policy);
            self.status = TransportStatus::Disabled;
            tracing::info!("delivery surface loaded, dispatch disabled by policy");
        }
    }

    /// Host signal: the delivery surface failed to load.
    ///
    /// Recovery is automatic on the next connectivity-regained signal; no
    /// timer-based retry.
    pub fn surface_failed(&mut self) {
        tracing::warn!("delivery surface failed to load");
        self.status = TransportStatus::Failure;
    }

    /// Accepts an event payload from the application.
    ///
    /// Dropped without buffering once the policy has disabled dispatch;
    /// otherwise enqueued and followed by a drain attempt.
    pub fn submit(&mut self, payload: impl Into<String>) {
        if self.policy.as_ref().is_some_and(|p| !p.is_enabled) {
            return;
        }
        self.queue.enqueue(payload);
        self.process_queue();
    }

    /// Host signal: OS-level connectivity changed.
    ///
    /// Regaining connectivity retries a failed (or never-attempted) surface
    /// open, or attempts a drain when already loaded. Going offline needs no
    /// action; the next tick observes it and stops the scheduler.
    pub fn connectivity_changed(&mut self, online: bool) {
        if !online {
            return;
        }
        match self.status {
            TransportStatus::Unknown | TransportStatus::Failure => self.open_surface(),
            TransportStatus::Loaded => self.process_queue(),
            _ => {}
        }
    }

    /// Derives the current dispatch mode from policy and connectivity.
    pub fn dispatch_mode(&self) -> DispatchMode {
        let policy = match &self.policy {
            Some(p) if p.is_enabled => p,
            _ => return DispatchMode::Disabled,
        };

        let online = self.connectivity.is_online()
            && (!policy.wifi_only_sending || self.connectivity.is_on_wifi());
        let conserve = policy.battery_saver_respect && self.connectivity.is_battery_saver();

        if online && !conserve {
            DispatchMode::Enabled
        } else {
            DispatchMode::Deferred
        }
    }

    /// Attempts to begin periodic draining.
    ///
    /// Starts the scheduler only when the surface is loaded, the mode is
    /// `Enabled`, a cycle is not already running, and there is something to
    /// drain. A failed surface is re-opened here when the device is online
    /// again (an offline launch leaves the surface unloaded).
    fn process_queue(&mut self) {
        if self.status != TransportStatus::Loaded
            || self.dispatch_mode() != DispatchMode::Enabled
            || self.scheduler.is_running()
            || self.queue.is_empty()
        {
            if self.status == TransportStatus::Failure && self.connectivity.is_online() {
                self.open_surface();
            }
            return;
        }
        self.scheduler.start();
    }

    /// Runs one drain cycle. Called by the host timer while the scheduler
    /// reports running.
    ///
    /// Dequeues up to one batch, concatenates the payloads in FIFO order,
    /// and submits them in a single fire-and-forget send. When this tick
    /// observes an empty queue, fewer entries than a full batch, or lost
    /// connectivity, it stops the scheduler — after still draining whatever
    /// is available, which is what flushes the trailing short batch.
    pub fn tick(&mut self) {
        let batch_size = match &self.policy {
            // Remote documents can carry a non-positive batch size; a drain
            // cycle always moves at least one entry.
            Some(p) => p.event_batch_size.max(1) as usize,
            None => {
                self.scheduler.stop();
                return;
            }
        };

        if self.queue.len() < batch_size || !self.connectivity.is_online() {
            self.scheduler.stop();
        }

        let mut batch = String::new();
        for _ in 0..batch_size {
            match self.queue.try_dequeue() {
                Some(payload) => batch.push_str(&payload),
                None => break,
            }
        }

        if !batch.trim().is_empty() {
            tracing::debug!(len = batch.len(), "dispatching batch");
            self.sink.send(&batch);
        }
    }

    /// Persists the queue snapshot for suspend. Returns whether the save
    /// succeeded; a failure is non-fatal but means buffered events are lost
    /// if the process is torn down.
    pub fn suspend(&self, store: &dyn QueueStore) -> bool {
        let snapshot = self.queue.snapshot();
        tracing::info!(entries = snapshot.len(), "persisting queue for suspend");
        store.save(&snapshot, QUEUE_STORAGE_KEY)
    }

    /// Restores persisted payloads, in original order, ahead of new
    /// activity. An absent or empty snapshot restores nothing.
    pub fn resume(&self, store: &dyn QueueStore) {
        if let Some(items) = store.load(QUEUE_STORAGE_KEY) {
            tracing::info!(entries = items.len(), "restoring persisted queue");
            self.queue.restore(items);
        }
    }

    /// Stops periodic draining. The host separately drops its monitor
    /// subscriptions and timer; teardown is explicit, not automatic.
    pub fn shutdown(&mut self) {
        self.scheduler.stop();
    }

    /// Current transport status.
    pub fn status(&self) -> TransportStatus {
        self.status
    }

    /// The active policy snapshot, if one has been loaded.
    pub fn policy(&self) -> Option<&RemotePolicy> {
        self.policy.as_ref()
    }

    /// Shared handle to the queue, for producers on other threads.
    pub fn queue(&self) -> Arc<DispatchQueue<C>> {
        Arc::clone(&self.queue)
    }

    /// The drain scheduler the host timer should observe.
    pub fn scheduler(&self) -> &DrainScheduler {
        &self.scheduler
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! beacon-core: client-side telemetry dispatch engine.
//!
//! Accepts discrete tracking events from an application, buffers them in a
//! bounded, age-limited queue when delivery is not possible, and drains them
//! in batches once it is — honoring a remotely-configured policy for batch
//! size, expiration, and connectivity/battery constraints.
//!
//! The host supplies the platform capabilities as trait implementations:
//! a [`DeliverySink`] for the actual transport, a [`ConnectivityProbe`] for
//! network/power queries, and a [`QueueStore`] for durable persistence
//! across suspend/resume. Everything else — the readiness state machine,
//! the dispatch-mode decision, batching, and policy parsing — lives here.

pub mod clock;
pub mod connectivity;
pub mod controller;
pub mod error;
pub mod payload;
pub mod policy;
pub mod queue;
pub mod scheduler;
pub mod settings;
pub mod sink;
pub mod storage;
pub mod tracker;

pub use clock::{Clock, SystemClock};
pub use connectivity::{ConnectivityMonitor, ConnectivityProbe, Subscription};
pub use controller::{DispatchMode, TransportController, TransportStatus};
pub use error::{Error, Result};
pub use payload::{to_flat_json, TrackedValue, Variables};
pub use policy::{RemotePolicy, CURRENT_MAJOR_VERSION};
pub use queue::DispatchQueue;
pub use scheduler::{DrainScheduler, DEFAULT_DRAIN_INTERVAL};
pub use settings::{Environment, Settings};
pub use sink::DeliverySink;
pub use storage::{JsonFileStore, QueueStore, QUEUE_STORAGE_KEY};
pub use tracker::Tracker;

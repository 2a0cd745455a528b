// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Programmatic event-producer facade.
//!
//! The tracker turns `(event name, variables)` pairs into serialized
//! dispatch payloads and hands them to the transport controller. Variables
//! layer in three scopes: global (settings lifetime), session (until
//! cleared), and per-call, with later scopes winning on key collisions.
//!
//! UI-driven production — attribute scanning, navigation hooks — is out of
//! scope here; hosts that have it feed the same `track_custom_event` entry
//! point.

use crate::clock::{Clock, SystemClock};
use crate::connectivity::ConnectivityProbe;
use crate::controller::TransportController;
use crate::payload::{to_flat_json, TrackedValue, Variables};
use crate::settings::Settings;
use crate::sink::DeliverySink;
use crate::storage::QueueStore;

/// High-level tracking API over a transport controller.
pub struct Tracker<S, P, C = SystemClock>
where
    S: DeliverySink,
    P: ConnectivityProbe,
    C: Clock,
{
    settings: Settings,
    session_variables: Variables,
    controller: TransportController<S, P, C>,
}

impl<S, P, C> Tracker<S, P, C>
where
    S: DeliverySink,
    P: ConnectivityProbe,
    C: Clock,
{
    /// Creates a tracker over a configured controller.
    pub fn new(settings: Settings, controller: TransportController<S, P, C>) -> Self {
        Tracker {
            settings,
            session_variables: Variables::new(),
            controller,
        }
    }

    /// Sets a session-scoped variable, persisted across calls until
    /// [`clear_variables`](Tracker::clear_variables).
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<TrackedValue>) {
        self.session_variables.insert(name.into(), value.into());
    }

    /// Replaces the session-scoped variables wholesale.
    pub fn set_variables(&mut self, variables: Variables) {
        self.session_variables = variables;
    }

    /// Clears all session-scoped variables.
    pub fn clear_variables(&mut self) {
        self.session_variables.clear();
    }

    /// Sets a global variable, persisted for the settings lifetime.
    pub fn set_global_variable(&mut self, name: impl Into<String>, value: impl Into<TrackedValue>) {
        self.settings
            .base_variables
            .insert(name.into(), value.into());
    }

    /// Replaces the global variables wholesale.
    pub fn set_global_variables(&mut self, variables: Variables) {
        self.settings.base_variables = variables;
    }

    /// Reports a click/link event.
    ///
    /// The item name is injected under the configured click id parameter;
    /// per-call variables are not persisted.
    pub fn track_item_clicked(&mut self, item_name: &str, mut variables: Variables) {
        variables.insert(self.settings.click_id_param.clone(), item_name.into());
        let event = self.settings.click_event_name.clone();
        self.track_custom_event(&event, variables);
    }

    /// Reports a page/screen view event.
    ///
    /// The view name is injected under the configured view id parameter and
    /// also persisted as a session variable, so subsequent events on the
    /// same screen carry it.
    pub fn track_screen_viewed(&mut self, view_name: &str, mut variables: Variables) {
        variables.insert(self.settings.view_id_param.clone(), view_name.into());
        self.set_variable(self.settings.view_id_param.clone(), view_name);
        let event = self.settings.view_event_name.clone();
        self.track_custom_event(&event, variables);
    }

    /// Reports a custom event with the layered variable scopes applied.
    ///
    /// The emitted script carries a completion-callback argument; its body is
    /// empty because completion reporting belongs to a host-injected bridge
    /// object, not to this library.
    pub fn track_custom_event(&mut self, event_name: &str, variables: Variables) {
        let mut merged = self.settings.base_variables.clone();
        merged.extend(self.session_variables.clone());
        merged.extend(variables);

        let json = to_flat_json(&merged);
        let script = format!("utag.track('{event_name}',{json}, function() {{}});");
        self.controller.submit(script);
    }

    // Lifecycle pass-throughs, so hosts can wire platform callbacks to the
    // tracker without reaching into the controller.

    /// See [`TransportController::start`].
    pub fn start(&mut self) {
        self.controller.start();
    }

    /// See [`TransportController::surface_loaded`].
    pub fn surface_loaded(&mut self) {
        self.controller.surface_loaded();
    }

    /// See [`TransportController::surface_failed`].
    pub fn surface_failed(&mut self) {
        self.controller.surface_failed();
    }

    /// See [`TransportController::connectivity_changed`].
    pub fn connectivity_changed(&mut self, online: bool) {
        self.controller.connectivity_changed(online);
    }

    /// See [`TransportController::tick`].
    pub fn tick(&mut self) {
        self.controller.tick();
    }

    /// See [`TransportController::suspend`].
    pub fn suspend(&self, store: &dyn QueueStore) -> bool {
        self.controller.suspend(store)
    }

    /// See [`TransportController::resume`].
    pub fn resume(&self, store: &dyn QueueStore) {
        self.controller.resume(store)
    }

    /// See [`TransportController::shutdown`].
    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }

    /// The settings this tracker was configured with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The underlying transport controller.
    pub fn controller(&self) -> &TransportController<S, P, C> {
        &self.controller
    }

    /// Mutable access to the underlying transport controller.
    pub fn controller_mut(&mut self) -> &mut TransportController<S, P, C> {
        &mut self.controller
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;

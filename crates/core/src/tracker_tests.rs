// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use super::*;
use crate::connectivity::ConnectivityMonitor;
use crate::controller::TransportStatus;
use crate::queue::DispatchQueue;
use crate::settings::Environment;

struct OnlineProbe;

impl ConnectivityProbe for OnlineProbe {
    fn is_online(&self) -> bool {
        true
    }

    fn is_on_wifi(&self) -> bool {
        true
    }
}

#[derive(Clone, Default)]
struct RecordingSink {
    sent: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl DeliverySink for RecordingSink {
    fn open(&mut self) {}

    fn fetch_policy(&mut self) -> Option<String> {
        None
    }

    fn send(&mut self, batch: &str) {
        self.sent.lock().unwrap().push(batch.to_string());
    }
}

type TestTracker = Tracker<RecordingSink, OnlineProbe>;

/// Tracker whose submissions buffer without draining, so tests can inspect
/// the exact serialized payloads via the queue snapshot.
fn buffering_tracker() -> TestTracker {
    tracker_with_sink(RecordingSink::default())
}

fn tracker_with_sink(sink: RecordingSink) -> TestTracker {
    let settings = Settings::new("acme", "mobileapp", Environment::Dev).unwrap();
    let controller = TransportController::new(
        sink,
        Arc::new(DispatchQueue::new(0, -1)),
        Arc::new(ConnectivityMonitor::new(OnlineProbe)),
    );
    Tracker::new(settings, controller)
}

fn payloads(tracker: &TestTracker) -> Vec<String> {
    tracker.controller().queue().snapshot()
}

#[test]
fn custom_event_with_no_variables() {
    let mut tracker = buffering_tracker();
    tracker.track_custom_event("custom", Variables::new());
    assert_eq!(payloads(&tracker), vec!["utag.track('custom',{ }, function() {});"]);
}

#[test]
fn custom_event_serializes_variables() {
    let mut tracker = buffering_tracker();

    let mut vars = Variables::new();
    vars.insert("color".to_string(), "blue".into());
    tracker.track_custom_event("cart_add", vars);

    assert_eq!(
        payloads(&tracker),
        vec![r#"utag.track('cart_add',{ "color": "blue" }, function() {});"#]
    );
}

#[test]
fn per_call_variables_override_session_which_override_global() {
    let mut tracker = buffering_tracker();
    tracker.set_global_variable("tier", "global");
    tracker.set_variable("tier", "session");

    let mut vars = Variables::new();
    vars.insert("tier".to_string(), "call".into());
    tracker.track_custom_event("e", vars);

    assert_eq!(
        payloads(&tracker),
        vec![r#"utag.track('e',{ "tier": "call" }, function() {});"#]
    );
}

#[test]
fn scopes_merge_when_keys_differ() {
    let mut tracker = buffering_tracker();
    tracker.set_global_variable("app_version", "2.0");
    tracker.set_variable("user_id", 42_i64);

    let mut vars = Variables::new();
    vars.insert("action".to_string(), "tap".into());
    tracker.track_custom_event("e", vars);

    assert_eq!(
        payloads(&tracker),
        vec![
            r#"utag.track('e',{ "action": "tap","app_version": "2.0","user_id": "42" }, function() {});"#,
        ]
    );
}

#[test]
fn per_call_variables_are_not_persisted() {
    let mut tracker = buffering_tracker();

    let mut vars = Variables::new();
    vars.insert("once".to_string(), "only".into());
    tracker.track_custom_event("first", vars);
    tracker.track_custom_event("second", Variables::new());

    assert_eq!(
        payloads(&tracker),
        vec![
            r#"utag.track('first',{ "once": "only" }, function() {});"#,
            "utag.track('second',{ }, function() {});",
        ]
    );
}

#[test]
fn item_click_injects_the_link_id() {
    let mut tracker = buffering_tracker();
    tracker.track_item_clicked("buy_button", Variables::new());

    assert_eq!(
        payloads(&tracker),
        vec![r#"utag.track('link',{ "link_id": "buy_button" }, function() {});"#]
    );
}

#[test]
fn screen_view_injects_and_persists_the_title() {
    let mut tracker = buffering_tracker();
    tracker.track_screen_viewed("Home", Variables::new());
    tracker.track_custom_event("scroll", Variables::new());

    assert_eq!(
        payloads(&tracker),
        vec![
            r#"utag.track('view',{ "screen_title": "Home" }, function() {});"#,
            r#"utag.track('scroll',{ "screen_title": "Home" }, function() {});"#,
        ]
    );
}

#[test]
fn clear_variables_drops_session_scope_only() {
    let mut tracker = buffering_tracker();
    tracker.set_global_variable("kept", "yes");
    tracker.set_variable("dropped", "yes");
    tracker.clear_variables();
    tracker.track_custom_event("e", Variables::new());

    assert_eq!(
        payloads(&tracker),
        vec![r#"utag.track('e',{ "kept": "yes" }, function() {});"#]
    );
}

#[test]
fn set_variables_replaces_the_session_scope() {
    let mut tracker = buffering_tracker();
    tracker.set_variable("old", "gone");

    let mut replacement = Variables::new();
    replacement.insert("fresh".to_string(), "here".into());
    tracker.set_variables(replacement);
    tracker.track_custom_event("e", Variables::new());

    assert_eq!(
        payloads(&tracker),
        vec![r#"utag.track('e',{ "fresh": "here" }, function() {});"#]
    );
}

#[test]
fn variable_values_are_entity_encoded() {
    let mut tracker = buffering_tracker();

    let mut vars = Variables::new();
    vars.insert("q".to_string(), "cats & dogs".into());
    tracker.track_custom_event("search", vars);

    assert_eq!(
        payloads(&tracker),
        vec![r#"utag.track('search',{ "q": "cats &amp; dogs" }, function() {});"#]
    );
}

#[test]
fn lifecycle_drives_an_event_through_to_the_sink() {
    let sink = RecordingSink::default();
    let mut tracker = tracker_with_sink(sink.clone());

    tracker.start();
    tracker.surface_loaded();
    assert_eq!(tracker.controller().status(), TransportStatus::Loaded);

    tracker.track_custom_event("launch", Variables::new());
    assert!(tracker.controller().scheduler().is_running());

    tracker.tick();
    assert_eq!(sink.sent(), vec!["utag.track('launch',{ }, function() {});"]);
    assert!(tracker.controller().queue().is_empty());

    tracker.shutdown();
    assert!(!tracker.controller().scheduler().is_running());
}

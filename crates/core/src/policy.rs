// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote policy document parsing with versioned defaults.
//!
//! The delivery surface exposes a JSON configuration object keyed by library
//! major version. Parsing never fails: a malformed document, a missing
//! version key, or an uncoercible field all degrade to documented defaults.
//! A policy fetch must never block or crash event collection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The major version key this library looks up in the policy document.
pub const CURRENT_MAJOR_VERSION: &str = "4";

/// Remotely-configured dispatch policy.
///
/// Immutable once constructed; the controller fetches a fresh snapshot on
/// every transport-ready transition, replacing the prior one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePolicy {
    /// Master switch; false disables dispatch for the session.
    pub is_enabled: bool,
    /// Whether to defer dispatch while the device is in battery saver.
    pub battery_saver_respect: bool,
    /// Queue entry expiration in days; negative means no expiration.
    pub dispatch_expiration_days: i32,
    /// Number of payloads delivered per drain cycle.
    pub event_batch_size: i32,
    /// Maximum queued entries while offline; non-positive means unbounded.
    pub offline_dispatch_limit: i32,
    /// Whether dispatch requires an unmetered (Wi-Fi) connection.
    pub wifi_only_sending: bool,

    // Reserved flags, parsed but not currently acted on.
    pub ivar_tracking: bool,
    pub mobile_companion: bool,
    pub ui_auto_tracking: bool,
}

impl Default for RemotePolicy {
    fn default() -> Self {
        RemotePolicy {
            is_enabled: true,
            battery_saver_respect: true,
            dispatch_expiration_days: -1,
            event_batch_size: 1,
            offline_dispatch_limit: -1,
            wifi_only_sending: false,
            ivar_tracking: true,
            mobile_companion: true,
            ui_auto_tracking: true,
        }
    }
}

impl RemotePolicy {
    /// Parses the policy sub-document matching the given major version.
    ///
    /// Missing fields inherit the [`Default`] record value. Boolean fields
    /// accept a JSON bool or a bool-parseable string (anything else yields
    /// `false`); integer fields accept a JSON number or an int-parseable
    /// string (anything else yields `-1`, the "no limit" sentinel). If the
    /// document is malformed or carries no object for the version key, the
    /// default policy is returned.
    pub fn parse(document: &str, major_version: &str) -> RemotePolicy {
        let root: Value = match serde_json::from_str(document) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("malformed policy document, using defaults: {}", e);
                return RemotePolicy::default();
            }
        };

        let version = match root.get(major_version) {
            Some(v) if v.is_object() => v,
            _ => {
                tracing::debug!(
                    "no policy object for version {}, using defaults",
                    major_version
                );
                return RemotePolicy::default();
            }
        };

        let mut policy = RemotePolicy::default();
        if let Some(v) = version.get("_is_enabled") {
            policy.is_enabled = as_bool(v);
        }
        if let Some(v) = version.get("battery_saver") {
            policy.battery_saver_respect = as_bool(v);
        }
        if let Some(v) = version.get("dispatch_expiration") {
            policy.dispatch_expiration_days = as_int(v);
        }
        if let Some(v) = version.get("event_batch_size") {
            policy.event_batch_size = as_int(v);
        }
        if let Some(v) = version.get("offline_dispatch_limit") {
            policy.offline_dispatch_limit = as_int(v);
        }
        if let Some(v) = version.get("wifi_only_sending") {
            policy.wifi_only_sending = as_bool(v);
        }
        if let Some(v) = version.get("ivar_tracking") {
            policy.ivar_tracking = as_bool(v);
        }
        if let Some(v) = version.get("mobile_companion") {
            policy.mobile_companion = as_bool(v);
        }
        if let Some(v) = version.get("ui_auto_tracking") {
            policy.ui_auto_tracking = as_bool(v);
        }
        policy
    }

    /// Parses the policy for [`CURRENT_MAJOR_VERSION`].
    pub fn parse_current(document: &str) -> RemotePolicy {
        Self::parse(document, CURRENT_MAJOR_VERSION)
    }
}

/// Coerces a JSON value to bool: native bool, or a bool-parseable string.
/// Anything else yields `false`.
fn as_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().to_ascii_lowercase().parse().unwrap_or(false),
        _ => false,
    }
}

/// Coerces a JSON value to an i32: native number, or an int-parseable
/// string. Anything else yields `-1`, meaning "unbounded/no limit".
fn as_int(value: &Value) -> i32 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(|v| v as i32)
            .unwrap_or(-1),
        Value::String(s) => s.trim().parse().unwrap_or(-1),
        _ => -1,
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Event variables and the flat-JSON wire format.
//!
//! The delivery surface expects a flat object in which every key and value
//! is a string with HTML entities encoded, and an empty map serializes to
//! `"{ }"`. That exact shape is a wire contract, so emission is hand-built
//! here rather than delegated to a generic serializer.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A tagged event variable value with deterministic string coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackedValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for TrackedValue {
    /// The string every value coerces to on the wire. `Null` coerces to the
    /// empty string, matching how absent values were emitted upstream.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackedValue::Str(s) => f.write_str(s),
            TrackedValue::Int(i) => write!(f, "{i}"),
            TrackedValue::Float(v) => write!(f, "{v}"),
            TrackedValue::Bool(b) => write!(f, "{b}"),
            TrackedValue::Null => Ok(()),
        }
    }
}

impl From<&str> for TrackedValue {
    fn from(s: &str) -> Self {
        TrackedValue::Str(s.to_string())
    }
}

impl From<String> for TrackedValue {
    fn from(s: String) -> Self {
        TrackedValue::Str(s)
    }
}

impl From<i64> for TrackedValue {
    fn from(i: i64) -> Self {
        TrackedValue::Int(i)
    }
}

impl From<f64> for TrackedValue {
    fn from(v: f64) -> Self {
        TrackedValue::Float(v)
    }
}

impl From<bool> for TrackedValue {
    fn from(b: bool) -> Self {
        TrackedValue::Bool(b)
    }
}

/// Ordered variable map. `BTreeMap` keeps emission deterministic.
pub type Variables = BTreeMap<String, TrackedValue>;

/// HTML-entity encodes the five characters that are unsafe inside the
/// script-invocation payload.
pub fn html_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serializes variables to the flat wire object.
///
/// Every key/value is coerced to a string and entity-encoded. An empty map
/// yields `"{ }"` — equivalent to "nothing to report" on the receiving end.
pub fn to_flat_json(variables: &Variables) -> String {
    if variables.is_empty() {
        return "{ }".to_string();
    }

    let mut body = String::new();
    for (key, value) in variables {
        if !body.is_empty() {
            body.push(',');
        }
        body.push_str(&format!(
            "\"{}\": \"{}\"",
            html_encode(key),
            html_encode(&value.to_string())
        ));
    }
    format!("{{ {body} }}")
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;

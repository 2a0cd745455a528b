// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Host configuration: account identity, environment, and event naming.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::payload::Variables;

/// Version string reported to the delivery surface.
pub const LIBRARY_VERSION: &str = "1.1";

/// Default event name for click metrics.
pub const DEFAULT_CLICK_EVENT_NAME: &str = "link";
/// Default variable name carrying the click identifier.
pub const DEFAULT_CLICK_ID_PARAM: &str = "link_id";
/// Default event name for view metrics.
pub const DEFAULT_VIEW_EVENT_NAME: &str = "view";
/// Default variable name carrying the view identifier.
pub const DEFAULT_VIEW_ID_PARAM: &str = "screen_title";

const TRACKER_HOST: &str = "tags.tiqcdn.com";

/// The reporting environment a profile dispatches into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Dev,
    Qa,
    Prod,
}

impl Environment {
    /// Wire string used in the tracker URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Qa => "qa",
            Environment::Prod => "prod",
        }
    }
}

/// Host-supplied configuration for the dispatch engine.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Account name for the reporting company.
    pub account: String,
    /// Reporting profile for the application.
    pub profile: String,
    /// Reporting environment.
    pub environment: Environment,
    /// Whether tracking traffic runs over https.
    pub use_ssl: bool,
    /// Static variables merged into every tracked event.
    pub base_variables: Variables,
    /// Event name reported for view metrics.
    pub view_event_name: String,
    /// Variable name carrying the view identifier.
    pub view_id_param: String,
    /// Event name reported for click metrics.
    pub click_event_name: String,
    /// Variable name carrying the click identifier.
    pub click_id_param: String,
}

impl Settings {
    /// Creates settings with the required identity fields and defaults for
    /// the rest.
    ///
    /// A blank account or profile is the one fatal misconfiguration in the
    /// engine: it is reported here, once, and nowhere else.
    pub fn new(
        account: impl Into<String>,
        profile: impl Into<String>,
        environment: Environment,
    ) -> Result<Self> {
        let account = account.into();
        let profile = profile.into();
        if account.trim().is_empty() || profile.trim().is_empty() {
            tracing::error!(
                "account and profile are required when initializing settings"
            );
            return Err(Error::InvalidSettings(
                "account and profile must be non-empty".to_string(),
            ));
        }

        Ok(Settings {
            account,
            profile,
            environment,
            use_ssl: false,
            base_variables: Variables::new(),
            view_event_name: DEFAULT_VIEW_EVENT_NAME.to_string(),
            view_id_param: DEFAULT_VIEW_ID_PARAM.to_string(),
            click_event_name: DEFAULT_CLICK_EVENT_NAME.to_string(),
            click_id_param: DEFAULT_CLICK_ID_PARAM.to_string(),
        })
    }

    /// The URL of the mobile tracking page for this account/profile.
    pub fn tracker_url(&self, clock: &impl Clock) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        format!(
            "{scheme}://{TRACKER_HOST}/utag/{}/{}/{}/mobile.html{}",
            self.account,
            self.profile,
            self.environment.as_str(),
            query_params(clock.now()),
        )
    }
}

fn query_params(now: DateTime<Utc>) -> String {
    format!(
        "?platform=windows&library_version={LIBRARY_VERSION}&timestamp_unix={}",
        now.timestamp()
    )
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Relay configuration.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{EventSetRevision, PresentationOptions};

/// File name used when the config lives in the host's data directory.
pub const CONFIG_FILE: &str = "airship-relay.json";

/// Persistent relay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// When false, takeoff is refused and no collaborators are built.
    pub enabled: bool,
    /// Which wire-name set events are emitted under.
    pub event_revision: EventSetRevision,
    /// Let the SDK show its own message center UI instead of emitting a
    /// show-inbox event.
    pub auto_launch_message_center: bool,
    /// Per preference-center override: `true` lets the SDK show its own UI.
    pub auto_launch_preference_centers: HashMap<String, bool>,
    /// How notifications are presented while the app is in the foreground.
    pub foreground_presentation_options: PresentationOptions,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            event_revision: EventSetRevision::Current,
            auto_launch_message_center: true,
            auto_launch_preference_centers: HashMap::new(),
            foreground_presentation_options: PresentationOptions::default(),
            log_filter: "info".into(),
        }
    }
}

impl RelayConfig {
    /// Read a config file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Read a config file, falling back to defaults if it is absent or
    /// unreadable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Whether the SDK should display the given preference center itself.
    pub fn auto_launches_preference_center(&self, preference_center_id: &str) -> bool {
        self.auto_launch_preference_centers
            .get(preference_center_id)
            .copied()
            .unwrap_or(false)
    }
}

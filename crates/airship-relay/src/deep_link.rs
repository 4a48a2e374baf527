// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Deep-link action.
//
// Registered with the SDK's action registry in place of the default deep-link
// action. Resolves the action argument to a URI and hands it to a delegate
// exactly once. No retry, no ordering beyond that single hand-off.

use std::sync::{Arc, Weak};

use serde_json::Value;
use tracing::{debug, warn};

use airship_core::error::{RelayError, Result};

/// Receiver of resolved deep links.
pub trait DeepLinkDelegate: Send + Sync {
    fn deep_link_received(&self, deep_link: &str);
}

/// Action that forwards incoming deep links to a weakly held delegate.
#[derive(Default)]
pub struct DeepLinkAction {
    delegate: Option<Weak<dyn DeepLinkDelegate>>,
}

impl DeepLinkAction {
    pub fn new() -> Self {
        Self { delegate: None }
    }

    pub fn set_delegate(&mut self, delegate: &Arc<dyn DeepLinkDelegate>) {
        self.delegate = Some(Arc::downgrade(delegate));
    }

    /// Whether the action can run with this argument.
    pub fn accepts(&self, argument: &Value) -> bool {
        resolve(argument).is_some()
    }

    /// Resolve the argument and forward it. Accepts a URI string or an object
    /// carrying it under `deepLink` or `url`.
    pub fn perform(&self, argument: &Value) -> Result<()> {
        let deep_link = resolve(argument)
            .ok_or_else(|| RelayError::InvalidArgument(format!("not a deep link: {argument}")))?;

        let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) else {
            warn!("deep link received with no delegate attached");
            return Err(RelayError::Bridge("deep link delegate not attached".into()));
        };

        debug!(deep_link, "forwarding deep link");
        delegate.deep_link_received(deep_link);
        Ok(())
    }
}

fn resolve(argument: &Value) -> Option<&str> {
    let raw = match argument {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map
            .get("deepLink")
            .or_else(|| map.get("url"))
            .and_then(Value::as_str)?,
        _ => return None,
    };
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

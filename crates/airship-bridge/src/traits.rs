// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the relay's collaborators.

use airship_core::error::Result;
use airship_core::{Event, InboxMessage};

/// The cross-runtime transport that pushes events into JavaScript.
///
/// The relay holds channels weakly and calls `emit` while holding its own
/// lock, so implementations must not call back into the relay from `emit`.
pub trait BridgeChannel: Send + Sync {
    /// Human-readable channel name (e.g. "RCTBridge", "ReactContext").
    fn channel_name(&self) -> &str;

    /// Whether the JS runtime behind the channel can accept events right now
    /// (e.g. an active catalyst instance on Android).
    fn is_ready(&self) -> bool {
        true
    }

    /// Deliver one event to its JS listeners.
    fn emit(&self, event: &Event) -> Result<()>;

    /// Tell JS that events of `event_type` are waiting to be taken.
    fn signal_pending(&self, signal_name: &str, event_type: &str) -> Result<()>;
}

/// Named hooks the relay invokes on registration changes.
///
/// Hooks run outside the relay lock, so they may call back into the relay
/// (typically `take_pending_events`).
pub trait RelayObserver: Send + Sync {
    /// A listener registration for `event_type` went from absent to present.
    /// `pending` is the backlog size at that moment.
    fn on_listener_added(&self, event_type: &str, pending: usize);

    /// The last listener for `event_type` was removed.
    fn on_listeners_cleared(&self, _event_type: &str) {}
}

/// Message center operations provided by the native SDK.
pub trait MessageCenterSdk: Send + Sync {
    /// Look up an inbox message. `Ok(None)` when the inbox has no such id.
    fn message(&self, message_id: &str) -> Result<Option<InboxMessage>>;

    /// All messages currently in the inbox.
    fn messages(&self) -> Result<Vec<InboxMessage>>;

    fn unread_count(&self) -> Result<usize>;

    /// Mark the given messages read. Unknown ids are ignored.
    fn mark_read(&self, message_ids: &[String]) -> Result<()>;

    /// Delete the given messages. Unknown ids are ignored.
    fn delete(&self, message_ids: &[String]) -> Result<()>;

    /// Fetch the inbox from the server. `Ok(false)` when the refresh did not
    /// complete.
    fn refresh(&self) -> Result<bool>;

    /// Show the SDK's own message center UI, optionally on one message.
    fn display(&self, message_id: Option<&str>) -> Result<()>;

    fn dismiss(&self) -> Result<()>;
}

/// Preference center operations provided by the native SDK.
pub trait PreferenceCenterSdk: Send + Sync {
    /// Show the SDK's own preference center UI.
    fn display_preference_center(&self, preference_center_id: &str) -> Result<()>;
}

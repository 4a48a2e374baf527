// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Event-type catalogue.
//
// The wire names below are the contract between the native layer and the
// JavaScript layer. Renaming one is a breaking change for every app that
// listens for it, so the name set is versioned explicitly by revision
// instead of being edited in place.

use serde::{Deserialize, Serialize};

/// Versioned set of event wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSetRevision {
    /// `com.urbanairship.*` names, including the chat events.
    Legacy,
    /// `com.airship.*` names. Canonical.
    #[default]
    Current,
}

impl EventSetRevision {
    /// Name of the signal raised on the bridge when events are waiting.
    pub fn pending_signal_name(&self) -> &'static str {
        match self {
            Self::Legacy => "com.urbanairship.onPendingEvent",
            Self::Current => "com.airship.pending_events",
        }
    }
}

/// Every event the relay can carry from the SDK to JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PushReceived,
    NotificationResponse,
    /// Channel registration (channel created / updated).
    Registration,
    PushTokenReceived,
    DeepLink,
    /// Message center inbox contents changed.
    InboxUpdated,
    /// Request to display the message center (optionally a single message).
    ShowInbox,
    NotificationOptInStatus,
    OpenPreferenceCenter,
    ConversationUpdated,
    OpenChat,
}

impl EventType {
    pub const ALL: [EventType; 11] = [
        Self::PushReceived,
        Self::NotificationResponse,
        Self::Registration,
        Self::PushTokenReceived,
        Self::DeepLink,
        Self::InboxUpdated,
        Self::ShowInbox,
        Self::NotificationOptInStatus,
        Self::OpenPreferenceCenter,
        Self::ConversationUpdated,
        Self::OpenChat,
    ];

    /// Wire name under the given revision, or `None` when the revision does
    /// not carry this event.
    pub fn wire_name(&self, revision: EventSetRevision) -> Option<&'static str> {
        match revision {
            EventSetRevision::Legacy => match self {
                Self::PushReceived => Some("com.urbanairship.push_received"),
                Self::NotificationResponse => Some("com.urbanairship.notification_response"),
                Self::Registration => Some("com.urbanairship.registration"),
                Self::PushTokenReceived => None,
                Self::DeepLink => Some("com.urbanairship.deep_link"),
                Self::InboxUpdated => Some("com.urbanairship.inbox_updated"),
                Self::ShowInbox => Some("com.urbanairship.show_inbox"),
                Self::NotificationOptInStatus => {
                    Some("com.urbanairship.notification_opt_in_status")
                }
                Self::OpenPreferenceCenter => Some("com.urbanairship.open_preference_center"),
                Self::ConversationUpdated => Some("com.urbanairship.conversation_updated"),
                Self::OpenChat => Some("com.urbanairship.open_chat"),
            },
            EventSetRevision::Current => match self {
                Self::PushReceived => Some("com.airship.push_received"),
                Self::NotificationResponse => Some("com.airship.notification_response"),
                Self::Registration => Some("com.airship.channel_created"),
                Self::PushTokenReceived => Some("com.airship.push_token_received"),
                Self::DeepLink => Some("com.airship.deep_link"),
                Self::InboxUpdated => Some("com.airship.message_center_updated"),
                Self::ShowInbox => Some("com.airship.display_message_center"),
                Self::NotificationOptInStatus => Some("com.airship.notification_opt_in_status"),
                Self::OpenPreferenceCenter => Some("com.airship.display_preference_center"),
                Self::ConversationUpdated | Self::OpenChat => None,
            },
        }
    }

    /// Resolve a wire name back to its event type and revision.
    pub fn parse(name: &str) -> Option<(EventType, EventSetRevision)> {
        [EventSetRevision::Current, EventSetRevision::Legacy]
            .into_iter()
            .find_map(|revision| {
                Self::ALL
                    .into_iter()
                    .find(|ty| ty.wire_name(revision) == Some(name))
                    .map(|ty| (ty, revision))
            })
    }

    /// Whether events of this type are handled by the foreground JS
    /// context or may be processed by a headless background task.
    pub fn default_class(&self) -> crate::DeliveryClass {
        match self {
            Self::PushReceived | Self::OpenPreferenceCenter | Self::OpenChat => {
                crate::DeliveryClass::Background
            }
            _ => crate::DeliveryClass::Foreground,
        }
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Airship relay: events and the payloads the SDK
// hands us.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Event body: a JSON object whose keys must cross the bridge unchanged.
pub type EventBody = Map<String, Value>;

/// Unique identifier for a relayed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which JavaScript context is expected to consume an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryClass {
    /// The running app's JS context.
    #[default]
    Foreground,
    /// May be processed by a headless background task.
    Background,
}

/// A single event travelling from the SDK to JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    /// Wire name, e.g. `com.airship.push_received`.
    pub name: String,
    pub body: EventBody,
    pub class: DeliveryClass,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Build a foreground event. A missing body is sent as `{}`.
    pub fn new(name: impl Into<String>, body: Option<EventBody>) -> Self {
        Self {
            id: EventId::new(),
            name: name.into(),
            body: body.unwrap_or_default(),
            class: DeliveryClass::Foreground,
            created_at: Utc::now(),
        }
    }

    pub fn with_class(mut self, class: DeliveryClass) -> Self {
        self.class = class;
        self
    }
}

/// Turn a serializable payload into an event body.
///
/// Payloads that do not serialize to a JSON object produce an empty body.
pub fn to_body<T: Serialize>(payload: &T) -> EventBody {
    match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Notification content as reported by the SDK.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Platform notification identifier (`id` or `id:tag` on Android).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,
    #[serde(default)]
    pub extras: Map<String, Value>,
}

/// A user interaction with a posted notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification: PushPayload,
    /// Tapped action button, if any. `None` means the notification itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    pub is_foreground: bool,
}

/// Message center inbox message, as far as the relay needs to know it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxMessage {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_url: Option<String>,
    pub sent_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    pub is_read: bool,
    #[serde(default)]
    pub extras: Map<String, Value>,
}

impl InboxMessage {
    pub fn is_expired(&self) -> bool {
        self.expiration_date.is_some_and(|exp| exp <= Utc::now())
    }
}

/// Foreground notification presentation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationOptions {
    pub alert: bool,
    pub badge: bool,
    pub sound: bool,
    pub list: bool,
    pub banner: bool,
}

impl PresentationOptions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

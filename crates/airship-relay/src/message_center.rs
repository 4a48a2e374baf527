// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Message center adapter.
//
// Wraps the SDK's inbox for the JS module: lookups and mutations fail with
// `MessageNotFound`, refreshes with `InboxRefreshFailed`, and both reach JS
// as rejections with stable codes. Display requests and inbox changes become
// relay events unless the SDK is left to show its own UI.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use airship_bridge::MessageCenterSdk;
use airship_core::error::{RelayError, Result};
use airship_core::{EventBody, EventType, InboxMessage};

use crate::emitter::TypedEmitter;

/// JS-facing message center operations.
pub struct MessageCenter {
    sdk: Arc<dyn MessageCenterSdk>,
    emitter: TypedEmitter,
    auto_launch: AtomicBool,
}

impl MessageCenter {
    pub fn new(sdk: Arc<dyn MessageCenterSdk>, emitter: TypedEmitter, auto_launch: bool) -> Self {
        Self {
            sdk,
            emitter,
            auto_launch: AtomicBool::new(auto_launch),
        }
    }

    pub fn set_auto_launch(&self, enabled: bool) {
        self.auto_launch.store(enabled, Ordering::SeqCst);
    }

    pub fn auto_launch(&self) -> bool {
        self.auto_launch.load(Ordering::SeqCst)
    }

    // -- Display delegate ----------------------------------------------------

    /// Show the message center, optionally on one message.
    ///
    /// With auto-launch on the SDK shows its own UI; otherwise the app gets
    /// a show-inbox event and renders its own.
    pub fn display(&self, message_id: Option<&str>) -> Result<()> {
        if self.auto_launch() {
            debug!(?message_id, "displaying SDK message center");
            return self.sdk.display(message_id);
        }

        let mut body = EventBody::new();
        if let Some(id) = message_id {
            body.insert("messageId".into(), Value::from(id));
        }
        self.emitter.emit(EventType::ShowInbox, body);
        Ok(())
    }

    pub fn dismiss(&self) -> Result<()> {
        self.sdk.dismiss()
    }

    /// The SDK reports the inbox changed; publish the new counts.
    pub fn inbox_updated(&self) -> Result<()> {
        let count = self.sdk.messages()?.len();
        let unread = self.sdk.unread_count()?;

        let mut body = EventBody::new();
        body.insert("messageUnreadCount".into(), Value::from(unread));
        body.insert("messageCount".into(), Value::from(count));
        self.emitter.emit(EventType::InboxUpdated, body);
        Ok(())
    }

    // -- Inbox operations ----------------------------------------------------

    pub fn messages(&self) -> Result<Vec<InboxMessage>> {
        self.sdk.messages()
    }

    pub fn unread_count(&self) -> Result<usize> {
        self.sdk.unread_count()
    }

    pub fn message(&self, message_id: &str) -> Result<InboxMessage> {
        self.sdk
            .message(message_id)?
            .ok_or_else(|| RelayError::MessageNotFound(message_id.to_string()))
    }

    #[instrument(skip(self))]
    pub fn mark_read(&self, message_id: &str) -> Result<()> {
        self.message(message_id)?;
        self.sdk.mark_read(&[message_id.to_string()])?;
        info!("message marked read");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn delete(&self, message_id: &str) -> Result<()> {
        self.message(message_id)?;
        self.sdk.delete(&[message_id.to_string()])?;
        info!("message deleted");
        Ok(())
    }

    /// Force an inbox fetch.
    pub fn refresh(&self) -> Result<()> {
        match self.sdk.refresh() {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!("inbox did not refresh");
                Err(RelayError::InboxRefreshFailed("inbox did not refresh".into()))
            }
            Err(RelayError::PlatformUnavailable) => Err(RelayError::PlatformUnavailable),
            Err(e) => Err(RelayError::InboxRefreshFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::EventRelay;
    use airship_bridge::memory::InMemoryMessageCenter;
    use airship_bridge::stub::StubPlatform;
    use airship_core::rejection::reject;
    use airship_core::EventSetRevision;
    use chrono::Utc;

    fn message(id: &str, read: bool) -> InboxMessage {
        InboxMessage {
            id: id.into(),
            title: id.into(),
            body_url: Some(format!("https://dl.example.com/{id}")),
            sent_date: Utc::now(),
            expiration_date: None,
            is_read: read,
            extras: serde_json::Map::new(),
        }
    }

    fn center(auto_launch: bool) -> (Arc<EventRelay>, Arc<InMemoryMessageCenter>, MessageCenter) {
        let relay = Arc::new(EventRelay::default());
        let sdk = Arc::new(InMemoryMessageCenter::new(vec![
            message("m1", false),
            message("m2", true),
        ]));
        let emitter = TypedEmitter::new(Arc::clone(&relay), EventSetRevision::Current);
        let center = MessageCenter::new(sdk.clone(), emitter, auto_launch);
        (relay, sdk, center)
    }

    #[test]
    fn display_with_auto_launch_uses_sdk() {
        let (relay, sdk, center) = center(true);
        center.display(Some("m1")).unwrap();
        assert_eq!(sdk.displayed(), vec![Some("m1".to_string())]);
        assert!(relay.pending_types().is_empty());
    }

    #[test]
    fn display_without_auto_launch_emits_event() {
        let (relay, sdk, center) = center(false);
        center.display(Some("m1")).unwrap();
        center.display(None).unwrap();
        assert!(sdk.displayed().is_empty());

        let events = relay.take_pending_events("com.airship.display_message_center");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].body["messageId"], "m1");
        assert!(events[1].body.is_empty());
    }

    #[test]
    fn inbox_updated_publishes_counts() {
        let (relay, _, center) = center(true);
        center.inbox_updated().unwrap();
        let events = relay.take_pending_events("com.airship.message_center_updated");
        assert_eq!(events[0].body["messageUnreadCount"], 1);
        assert_eq!(events[0].body["messageCount"], 2);
    }

    #[test]
    fn unknown_message_rejects_with_stable_code() {
        let (_, _, center) = center(true);
        let err = center.mark_read("nope").unwrap_err();
        assert_eq!(reject(&err).code, "STATUS_MESSAGE_NOT_FOUND");
        let err = center.delete("nope").unwrap_err();
        assert!(matches!(err, RelayError::MessageNotFound(id) if id == "nope"));
    }

    #[test]
    fn mark_read_and_delete() {
        let (_, sdk, center) = center(true);
        center.mark_read("m1").unwrap();
        assert_eq!(center.unread_count().unwrap(), 0);
        center.delete("m2").unwrap();
        assert_eq!(sdk.messages().unwrap().len(), 1);
    }

    #[test]
    fn failed_refresh_rejects() {
        let (_, sdk, center) = center(true);
        center.refresh().unwrap();
        sdk.set_refresh_succeeds(false);
        let err = center.refresh().unwrap_err();
        assert_eq!(reject(&err).code, "STATUS_DID_NOT_REFRESH");
    }

    #[test]
    fn stub_platform_is_unsupported() {
        let relay = Arc::new(EventRelay::default());
        let emitter = TypedEmitter::new(relay, EventSetRevision::Current);
        let center = MessageCenter::new(Arc::new(StubPlatform), emitter, true);
        assert_eq!(reject(&center.refresh().unwrap_err()).code, "UNSUPPORTED");
        assert!(center.message("m1").is_err());
    }
}

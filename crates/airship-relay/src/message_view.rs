// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Message and embedded view wrappers.
//
// The native view owns the web content; this type owns the load lifecycle of
// one message and reports it through the relay as the React Native direct
// events `onLoadStarted`, `onLoadFinished`, `onLoadError` and `onClose`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tracing::{debug, warn};

use airship_bridge::MessageCenterSdk;
use airship_core::{Event, EventBody, InboxMessage};

use crate::relay::EventRelay;

pub const EVENT_LOAD_STARTED: &str = "onLoadStarted";
pub const EVENT_LOAD_FINISHED: &str = "onLoadFinished";
pub const EVENT_LOAD_ERROR: &str = "onLoadError";
pub const EVENT_CLOSE: &str = "onClose";

/// Why a message could not be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// Missing, expired, or the SDK is not ready.
    MessageNotAvailable,
    /// The inbox fetch failed; trying again may help.
    FailedToFetchMessage,
    /// The message body failed to load in the web view.
    MessageLoadFailed,
}

impl LoadError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MessageNotAvailable => "MESSAGE_NOT_AVAILABLE",
            Self::FailedToFetchMessage => "FAILED_TO_FETCH_MESSAGE",
            Self::MessageLoadFailed => "MESSAGE_LOAD_FAILED",
        }
    }

    pub fn retryable(&self) -> bool {
        matches!(self, Self::FailedToFetchMessage)
    }
}

/// What the native view should do after `load`.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Load this message's body into the web view.
    Render(InboxMessage),
    /// Nothing to render; `onLoadError` was already sent.
    Failed(LoadError),
}

#[derive(Default)]
struct ViewState {
    message: Option<InboxMessage>,
    /// Id requested by the last `load`, kept even when it failed.
    requested_id: Option<String>,
    body_failed: bool,
}

/// Lifecycle of one message view.
pub struct MessageView {
    view_tag: i64,
    relay: Arc<EventRelay>,
    sdk: Arc<dyn MessageCenterSdk>,
    state: Mutex<ViewState>,
}

impl MessageView {
    /// `view_tag` is the host's view identifier; it travels in every event
    /// body so JS can route events to the right component.
    pub fn new(view_tag: i64, relay: Arc<EventRelay>, sdk: Arc<dyn MessageCenterSdk>) -> Self {
        Self {
            view_tag,
            relay,
            sdk,
            state: Mutex::new(ViewState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn message_id(&self) -> Option<String> {
        self.lock().requested_id.clone()
    }

    /// Start loading `message_id`, superseding any previous load.
    pub fn load(&self, message_id: &str) -> LoadOutcome {
        {
            let mut state = self.lock();
            *state = ViewState {
                requested_id: Some(message_id.to_string()),
                ..Default::default()
            };
        }
        self.notify(EVENT_LOAD_STARTED, message_id, None);

        let message = match self.sdk.message(message_id) {
            Ok(Some(message)) => Some(message),
            Ok(None) => match self.sdk.refresh() {
                Ok(true) => match self.sdk.message(message_id) {
                    Ok(found) => found,
                    Err(e) => {
                        warn!(message_id, "lookup after refresh failed: {e}");
                        None
                    }
                },
                Ok(false) => return self.fail(message_id, LoadError::FailedToFetchMessage),
                Err(e) => {
                    warn!(message_id, "inbox fetch failed: {e}");
                    return self.fail(message_id, LoadError::FailedToFetchMessage);
                }
            },
            Err(e) => {
                warn!(message_id, "message lookup failed: {e}");
                None
            }
        };

        match message {
            Some(message) if !message.is_expired() => {
                let mut state = self.lock();
                if state.requested_id.as_deref() == Some(message_id) {
                    state.message = Some(message.clone());
                }
                debug!(message_id, "rendering message");
                LoadOutcome::Render(message)
            }
            _ => self.fail(message_id, LoadError::MessageNotAvailable),
        }
    }

    /// The web view reported an error for `failing_url`. Only failures of
    /// the message body itself count.
    pub fn received_error(&self, failing_url: &str) {
        let mut state = self.lock();
        let is_body = state
            .message
            .as_ref()
            .and_then(|m| m.body_url.as_deref())
            .is_some_and(|url| url == failing_url);
        if is_body {
            state.body_failed = true;
        }
    }

    /// The web view finished loading. Marks the message read on success.
    pub fn page_finished(&self) {
        let (message_id, body_failed) = {
            let state = self.lock();
            match state.message.as_ref() {
                Some(message) => (message.id.clone(), state.body_failed),
                None => return,
            }
        };

        if body_failed {
            self.fail(&message_id, LoadError::MessageLoadFailed);
            return;
        }

        if let Err(e) = self.sdk.mark_read(&[message_id.clone()]) {
            warn!(message_id = %message_id, "failed to mark message read: {e}");
        }
        self.notify(EVENT_LOAD_FINISHED, &message_id, None);
    }

    /// The message asked to be closed (e.g. via its JS interface).
    pub fn close(&self) {
        let message_id = self.lock().message.as_ref().map(|m| m.id.clone());
        if let Some(message_id) = message_id {
            self.notify(EVENT_CLOSE, &message_id, None);
        }
    }

    fn fail(&self, message_id: &str, error: LoadError) -> LoadOutcome {
        {
            let mut state = self.lock();
            if state.requested_id.as_deref() == Some(message_id) {
                state.message = None;
            }
        }
        self.notify(EVENT_LOAD_ERROR, message_id, Some(error));
        LoadOutcome::Failed(error)
    }

    fn notify(&self, event_name: &str, message_id: &str, error: Option<LoadError>) {
        let mut body = EventBody::new();
        body.insert("viewTag".into(), Value::from(self.view_tag));
        body.insert("messageId".into(), Value::from(message_id));
        if let Some(error) = error {
            body.insert("error".into(), Value::from(error.code()));
            body.insert("retryable".into(), Value::from(error.retryable()));
        }
        self.relay.send(Event::new(event_name, Some(body)));
    }
}

/// Embedded content placeholder. Rendering belongs to the SDK; the wrapper
/// only tracks which embedded id is shown.
#[derive(Debug, Default)]
pub struct EmbeddedView {
    embedded_id: Option<String>,
}

impl EmbeddedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn embedded_id(&self) -> Option<&str> {
        self.embedded_id.as_deref()
    }

    /// Switch to `embedded_id`. Returns false when it is already shown.
    pub fn load(&mut self, embedded_id: &str) -> bool {
        if self.embedded_id.as_deref() == Some(embedded_id) {
            return false;
        }
        self.embedded_id = Some(embedded_id.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airship_bridge::memory::InMemoryMessageCenter;
    use airship_bridge::stub::StubPlatform;
    use chrono::{Duration, Utc};
    use std::sync::Weak;

    fn message(id: &str) -> InboxMessage {
        InboxMessage {
            id: id.into(),
            title: id.into(),
            body_url: Some(format!("https://dl.example.com/{id}")),
            sent_date: Utc::now(),
            expiration_date: None,
            is_read: false,
            extras: serde_json::Map::new(),
        }
    }

    fn view_with(sdk: Arc<InMemoryMessageCenter>) -> (Arc<EventRelay>, MessageView) {
        let relay = Arc::new(EventRelay::default());
        let view = MessageView::new(7, Arc::clone(&relay), sdk);
        (relay, view)
    }

    #[test]
    fn successful_load_marks_read() {
        let sdk = Arc::new(InMemoryMessageCenter::new(vec![message("m1")]));
        let (relay, view) = view_with(sdk.clone());

        assert!(matches!(view.load("m1"), LoadOutcome::Render(m) if m.id == "m1"));
        view.page_finished();

        assert_eq!(relay.take_pending_events(EVENT_LOAD_STARTED).len(), 1);
        let finished = relay.take_pending_events(EVENT_LOAD_FINISHED);
        assert_eq!(finished[0].body["messageId"], "m1");
        assert_eq!(finished[0].body["viewTag"], 7);
        assert!(sdk.message("m1").unwrap().unwrap().is_read);
    }

    #[test]
    fn missing_message_after_refresh_is_not_available() {
        let sdk = Arc::new(InMemoryMessageCenter::default());
        let (relay, view) = view_with(sdk);
        assert_eq!(view.load("gone"), LoadOutcome::Failed(LoadError::MessageNotAvailable));

        let errors = relay.take_pending_events(EVENT_LOAD_ERROR);
        assert_eq!(errors[0].body["error"], "MESSAGE_NOT_AVAILABLE");
        assert_eq!(errors[0].body["retryable"], false);
    }

    #[test]
    fn failed_fetch_is_retryable() {
        let sdk = Arc::new(InMemoryMessageCenter::default());
        sdk.set_refresh_succeeds(false);
        let (relay, view) = view_with(sdk);
        assert_eq!(view.load("m1"), LoadOutcome::Failed(LoadError::FailedToFetchMessage));

        let errors = relay.take_pending_events(EVENT_LOAD_ERROR);
        assert_eq!(errors[0].body["error"], "FAILED_TO_FETCH_MESSAGE");
        assert_eq!(errors[0].body["retryable"], true);
    }

    #[test]
    fn expired_message_is_not_available() {
        let mut expired = message("old");
        expired.expiration_date = Some(Utc::now() - Duration::hours(1));
        let sdk = Arc::new(InMemoryMessageCenter::new(vec![expired]));
        let (_, view) = view_with(sdk);
        assert_eq!(view.load("old"), LoadOutcome::Failed(LoadError::MessageNotAvailable));
    }

    #[test]
    fn body_error_fails_the_load() {
        let sdk = Arc::new(InMemoryMessageCenter::new(vec![message("m1")]));
        let (relay, view) = view_with(sdk.clone());
        view.load("m1");
        view.received_error("https://cdn.example.com/style.css");
        view.received_error("https://dl.example.com/m1");
        view.page_finished();

        assert!(relay.take_pending_events(EVENT_LOAD_FINISHED).is_empty());
        let errors = relay.take_pending_events(EVENT_LOAD_ERROR);
        assert_eq!(errors[0].body["error"], "MESSAGE_LOAD_FAILED");
        assert!(!sdk.message("m1").unwrap().unwrap().is_read);
    }

    #[test]
    fn close_reports_current_message() {
        let sdk = Arc::new(InMemoryMessageCenter::new(vec![message("m1"), message("m2")]));
        let (relay, view) = view_with(sdk);
        view.load("m1");
        view.load("m2");
        view.close();
        assert_eq!(view.message_id().as_deref(), Some("m2"));
        assert_eq!(relay.take_pending_events(EVENT_CLOSE)[0].body["messageId"], "m2");
    }

    #[test]
    fn unavailable_platform_is_not_available() {
        let relay = Arc::new(EventRelay::default());
        let view = MessageView::new(1, relay, Arc::new(StubPlatform));
        assert_eq!(view.load("m1"), LoadOutcome::Failed(LoadError::MessageNotAvailable));
    }

    /// Starts a newer load on the view from inside the first refresh.
    struct SupersedingSdk {
        inner: InMemoryMessageCenter,
        view: Mutex<Weak<MessageView>>,
        next_id: &'static str,
    }

    impl MessageCenterSdk for SupersedingSdk {
        fn message(&self, message_id: &str) -> airship_core::error::Result<Option<InboxMessage>> {
            self.inner.message(message_id)
        }
        fn messages(&self) -> airship_core::error::Result<Vec<InboxMessage>> {
            self.inner.messages()
        }
        fn unread_count(&self) -> airship_core::error::Result<usize> {
            self.inner.unread_count()
        }
        fn mark_read(&self, message_ids: &[String]) -> airship_core::error::Result<()> {
            self.inner.mark_read(message_ids)
        }
        fn delete(&self, message_ids: &[String]) -> airship_core::error::Result<()> {
            self.inner.delete(message_ids)
        }
        fn refresh(&self) -> airship_core::error::Result<bool> {
            let view = std::mem::take(&mut *self.view.lock().unwrap());
            if let Some(view) = view.upgrade() {
                view.load(self.next_id);
            }
            Ok(false)
        }
        fn display(&self, message_id: Option<&str>) -> airship_core::error::Result<()> {
            self.inner.display(message_id)
        }
        fn dismiss(&self) -> airship_core::error::Result<()> {
            self.inner.dismiss()
        }
    }

    #[test]
    fn stale_failure_keeps_newer_message() {
        let sdk = Arc::new(SupersedingSdk {
            inner: InMemoryMessageCenter::new(vec![message("m2")]),
            view: Mutex::new(Weak::new()),
            next_id: "m2",
        });
        let relay = Arc::new(EventRelay::default());
        let view = Arc::new(MessageView::new(9, Arc::clone(&relay), sdk.clone()));
        *sdk.view.lock().unwrap() = Arc::downgrade(&view);

        assert_eq!(view.load("gone"), LoadOutcome::Failed(LoadError::FailedToFetchMessage));
        assert_eq!(view.message_id().as_deref(), Some("m2"));

        view.page_finished();
        view.close();
        assert_eq!(relay.take_pending_events(EVENT_LOAD_FINISHED)[0].body["messageId"], "m2");
        assert_eq!(relay.take_pending_events(EVENT_CLOSE)[0].body["messageId"], "m2");
        assert!(sdk.inner.message("m2").unwrap().unwrap().is_read);
    }

    #[test]
    fn embedded_view_ignores_same_id() {
        let mut view = EmbeddedView::new();
        assert!(view.load("home_banner"));
        assert!(!view.load("home_banner"));
        assert!(view.load("footer"));
        assert_eq!(view.embedded_id(), Some("footer"));
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Runtime bootstrap.
//
// Builds the single relay and every collaborator that feeds it, once, at app
// launch. The host keeps the returned `RelayRuntime` for the life of the
// process and hands out the `Arc`s; nothing is looked up globally.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use airship_bridge::stub::StubPlatform;
use airship_bridge::{MessageCenterSdk, PreferenceCenterSdk};
use airship_core::config::CONFIG_FILE;
use airship_core::error::{RelayError, Result};
use airship_core::RelayConfig;

use crate::chat::ChatDelegate;
use crate::deep_link::{DeepLinkAction, DeepLinkDelegate};
use crate::delegate::AirshipDelegate;
use crate::emitter::TypedEmitter;
use crate::message_center::MessageCenter;
use crate::message_view::MessageView;
use crate::relay::EventRelay;

/// The relay plus its collaborators, wired together.
pub struct RelayRuntime {
    config: RelayConfig,
    relay: Arc<EventRelay>,
    sdk: Arc<dyn MessageCenterSdk>,
    delegate: Arc<AirshipDelegate>,
    message_center: Arc<MessageCenter>,
    chat: Arc<ChatDelegate>,
    deep_link_action: DeepLinkAction,
}

impl RelayRuntime {
    /// Build the runtime against a native platform implementation.
    ///
    /// Fails with `Disabled` when the config turns the integration off.
    /// Installs no tracing subscriber; hosts without their own call
    /// [`crate::logging::init`] with `config.log_filter`.
    #[instrument(skip_all, fields(revision = ?config.event_revision))]
    pub fn take_off<P>(config: RelayConfig, platform: Arc<P>) -> Result<Self>
    where
        P: MessageCenterSdk + PreferenceCenterSdk + 'static,
    {
        if !config.enabled {
            warn!("relay integration disabled, skipping takeoff");
            return Err(RelayError::Disabled);
        }

        let relay = Arc::new(EventRelay::new(config.event_revision));
        let emitter = TypedEmitter::new(Arc::clone(&relay), config.event_revision);

        let sdk: Arc<dyn MessageCenterSdk> = platform.clone();
        let preference_center: Arc<dyn PreferenceCenterSdk> = platform;

        let delegate = Arc::new(AirshipDelegate::new(
            emitter.clone(),
            preference_center,
            config.clone(),
        ));
        let message_center = Arc::new(MessageCenter::new(
            Arc::clone(&sdk),
            emitter.clone(),
            config.auto_launch_message_center,
        ));
        let chat = Arc::new(ChatDelegate::new(emitter));

        let mut deep_link_action = DeepLinkAction::new();
        let deep_link_delegate: Arc<dyn DeepLinkDelegate> = delegate.clone();
        deep_link_action.set_delegate(&deep_link_delegate);

        info!("relay runtime ready");
        Ok(Self {
            config,
            relay,
            sdk,
            delegate,
            message_center,
            chat,
            deep_link_action,
        })
    }

    /// Take off with the config stored in `data_dir`, or defaults.
    pub fn from_data_dir<P>(data_dir: impl AsRef<Path>, platform: Arc<P>) -> Result<Self>
    where
        P: MessageCenterSdk + PreferenceCenterSdk + 'static,
    {
        let config = RelayConfig::load_or_default(data_dir.as_ref().join(CONFIG_FILE));
        Self::take_off(config, platform)
    }

    /// Take off without a native SDK (desktop, CI). SDK calls report
    /// `PlatformUnavailable`; the relay itself works normally.
    pub fn stub(config: RelayConfig) -> Result<Self> {
        Self::take_off(config, Arc::new(StubPlatform))
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn relay(&self) -> &Arc<EventRelay> {
        &self.relay
    }

    pub fn delegate(&self) -> &Arc<AirshipDelegate> {
        &self.delegate
    }

    pub fn message_center(&self) -> &Arc<MessageCenter> {
        &self.message_center
    }

    pub fn chat(&self) -> &Arc<ChatDelegate> {
        &self.chat
    }

    pub fn deep_link_action(&self) -> &DeepLinkAction {
        &self.deep_link_action
    }

    /// A message view for the host view identified by `view_tag`.
    pub fn message_view(&self, view_tag: i64) -> MessageView {
        MessageView::new(view_tag, Arc::clone(&self.relay), Arc::clone(&self.sdk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airship_bridge::memory::{InMemoryMessageCenter, RecordingChannel};
    use airship_bridge::BridgeChannel;
    use airship_core::{EventSetRevision, PushPayload};
    use serde_json::json;

    #[test]
    fn disabled_config_refuses_takeoff() {
        let config = RelayConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(matches!(RelayRuntime::stub(config), Err(RelayError::Disabled)));
    }

    #[test]
    fn deep_link_action_reaches_relay() {
        let runtime = RelayRuntime::stub(RelayConfig::default()).unwrap();
        runtime.deep_link_action().perform(&json!("app://promo")).unwrap();
        let events = runtime.relay().take_pending_events("com.airship.deep_link");
        assert_eq!(events[0].body["deepLink"], "app://promo");
    }

    #[test]
    fn config_is_read_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        RelayConfig {
            event_revision: EventSetRevision::Legacy,
            auto_launch_message_center: false,
            ..Default::default()
        }
        .save(dir.path().join(CONFIG_FILE))
        .unwrap();

        let runtime =
            RelayRuntime::from_data_dir(dir.path(), Arc::new(InMemoryMessageCenter::default()))
                .unwrap();
        runtime.message_center().display(None).unwrap();
        assert!(runtime.relay().has_pending("com.urbanairship.show_inbox"));
    }

    #[test]
    fn callbacks_before_js_are_flushed_then_live() {
        let runtime = RelayRuntime::stub(RelayConfig::default()).unwrap();
        let relay = runtime.relay();

        // SDK fires before the JS runtime is up.
        runtime.delegate().push_received(&PushPayload {
            alert: Some("first".into()),
            ..Default::default()
        });

        let recording = Arc::new(RecordingChannel::new());
        let channel: Arc<dyn BridgeChannel> = recording.clone();
        relay.attach_bridge(&channel);
        relay.add_listener("com.airship.push_received");

        let backlog = relay.take_pending_events("com.airship.push_received");
        assert_eq!(backlog.len(), 1);
        assert_eq!(backlog[0].body["alert"], "first");

        runtime.delegate().push_received(&PushPayload {
            alert: Some("second".into()),
            ..Default::default()
        });
        assert_eq!(recording.emitted()[0].body["alert"], "second");
        assert!(!relay.has_pending("com.airship.push_received"));
    }

    #[test]
    fn message_view_shares_relay() {
        let runtime = RelayRuntime::stub(RelayConfig::default()).unwrap();
        let view = runtime.message_view(3);
        view.load("m1");
        assert!(runtime.relay().has_pending(crate::message_view::EVENT_LOAD_ERROR));
    }
}

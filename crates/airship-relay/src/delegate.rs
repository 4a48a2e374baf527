// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SDK delegate.
//
// One method per SDK callback. Each turns the callback into a catalogue event
// with a stable body shape and hands it to the relay. Nothing here keeps
// state beyond configuration.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, instrument};

use airship_bridge::PreferenceCenterSdk;
use airship_core::error::Result;
use airship_core::{
    DeliveryClass, EventBody, EventType, NotificationResponse, PresentationOptions, PushPayload,
    RelayConfig, to_body,
};

use crate::deep_link::DeepLinkDelegate;
use crate::emitter::TypedEmitter;

fn object(value: Value) -> EventBody {
    match value {
        Value::Object(map) => map,
        _ => EventBody::new(),
    }
}

/// Receives push, registration, opt-in, deep-link and preference-center
/// callbacks from the SDK.
pub struct AirshipDelegate {
    emitter: TypedEmitter,
    preference_center: Arc<dyn PreferenceCenterSdk>,
    config: RelayConfig,
}

impl AirshipDelegate {
    pub fn new(
        emitter: TypedEmitter,
        preference_center: Arc<dyn PreferenceCenterSdk>,
        config: RelayConfig,
    ) -> Self {
        Self {
            emitter,
            preference_center,
            config,
        }
    }

    /// A push arrived, in the foreground or as a background delivery.
    pub fn push_received(&self, payload: &PushPayload) {
        self.emitter.emit(EventType::PushReceived, to_body(payload));
    }

    /// The user tapped a notification or one of its action buttons.
    pub fn notification_response(&self, response: &NotificationResponse) {
        let class = if response.is_foreground {
            DeliveryClass::Foreground
        } else {
            DeliveryClass::Background
        };
        self.emitter
            .emit_as(EventType::NotificationResponse, to_body(response), class);
    }

    /// The channel was created or its registration changed.
    pub fn channel_created(&self, channel_id: &str, registration_token: Option<&str>) {
        let mut body = object(json!({ "channelId": channel_id }));
        if let Some(token) = registration_token {
            body.insert("registrationToken".into(), Value::from(token));
        }
        self.emitter.emit(EventType::Registration, body);
    }

    pub fn push_token_received(&self, push_token: &str) {
        self.emitter.emit(
            EventType::PushTokenReceived,
            object(json!({ "pushToken": push_token })),
        );
    }

    pub fn notification_opt_in_changed(&self, opt_in: bool) {
        self.emitter.emit(
            EventType::NotificationOptInStatus,
            object(json!({ "optIn": opt_in })),
        );
    }

    /// The SDK asks the app to open a preference center.
    ///
    /// Preference centers configured for auto-launch are shown by the SDK;
    /// all others become an event for the app to handle.
    #[instrument(skip(self))]
    pub fn open_preference_center(&self, preference_center_id: &str) -> Result<()> {
        if self.config.auto_launches_preference_center(preference_center_id) {
            debug!("preference center auto-launched by SDK");
            return self
                .preference_center
                .display_preference_center(preference_center_id);
        }
        self.emitter.emit(
            EventType::OpenPreferenceCenter,
            object(json!({ "preferenceCenterId": preference_center_id })),
        );
        Ok(())
    }

    /// How a notification arriving in the foreground is presented.
    pub fn foreground_presentation_options(&self) -> PresentationOptions {
        self.config.foreground_presentation_options
    }
}

impl DeepLinkDelegate for AirshipDelegate {
    fn deep_link_received(&self, deep_link: &str) {
        self.emitter
            .emit(EventType::DeepLink, object(json!({ "deepLink": deep_link })));
    }
}

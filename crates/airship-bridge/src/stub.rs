// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub SDK for desktop/CI builds where the native Airship SDK is absent.
//
// Every trait method returns `PlatformUnavailable`; real implementations are
// supplied by the native host.

use airship_core::error::{RelayError, Result};
use airship_core::InboxMessage;

use crate::traits::*;

/// No-op SDK used when no native host is present.
pub struct StubPlatform;

impl MessageCenterSdk for StubPlatform {
    fn message(&self, _message_id: &str) -> Result<Option<InboxMessage>> {
        tracing::warn!("MessageCenterSdk::message called on stub platform");
        Err(RelayError::PlatformUnavailable)
    }

    fn messages(&self) -> Result<Vec<InboxMessage>> {
        tracing::warn!("MessageCenterSdk::messages called on stub platform");
        Err(RelayError::PlatformUnavailable)
    }

    fn unread_count(&self) -> Result<usize> {
        Err(RelayError::PlatformUnavailable)
    }

    fn mark_read(&self, _message_ids: &[String]) -> Result<()> {
        Err(RelayError::PlatformUnavailable)
    }

    fn delete(&self, _message_ids: &[String]) -> Result<()> {
        Err(RelayError::PlatformUnavailable)
    }

    fn refresh(&self) -> Result<bool> {
        tracing::warn!("MessageCenterSdk::refresh called on stub platform");
        Err(RelayError::PlatformUnavailable)
    }

    fn display(&self, _message_id: Option<&str>) -> Result<()> {
        tracing::warn!("MessageCenterSdk::display called on stub platform");
        Err(RelayError::PlatformUnavailable)
    }

    fn dismiss(&self) -> Result<()> {
        Err(RelayError::PlatformUnavailable)
    }
}

impl PreferenceCenterSdk for StubPlatform {
    fn display_preference_center(&self, _preference_center_id: &str) -> Result<()> {
        tracing::warn!("PreferenceCenterSdk::display_preference_center called on stub platform");
        Err(RelayError::PlatformUnavailable)
    }
}

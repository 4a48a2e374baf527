// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory channel and message center.
//
// Used by desktop hosts and by tests to observe exactly what the relay pushes
// across the bridge without a JS runtime or native SDK.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use airship_core::error::{RelayError, Result};
use airship_core::{Event, InboxMessage};

use crate::traits::*;

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Bridge channel that records every emitted event and pending signal.
pub struct RecordingChannel {
    emitted: Mutex<Vec<Event>>,
    signals: Mutex<Vec<(String, String)>>,
    ready: AtomicBool,
    fail_emits: AtomicBool,
}

impl Default for RecordingChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self {
            emitted: Mutex::new(Vec::new()),
            signals: Mutex::new(Vec::new()),
            ready: AtomicBool::new(true),
            fail_emits: AtomicBool::new(false),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Make subsequent `emit` calls fail, as a torn-down JS runtime would.
    pub fn set_failing(&self, failing: bool) {
        self.fail_emits.store(failing, Ordering::SeqCst);
    }

    /// Events emitted so far, in emission order.
    pub fn emitted(&self) -> Vec<Event> {
        locked(&self.emitted).clone()
    }

    /// Names of emitted events, in emission order.
    pub fn emitted_names(&self) -> Vec<String> {
        locked(&self.emitted).iter().map(|e| e.name.clone()).collect()
    }

    /// `(signal name, event type)` pairs, in signal order.
    pub fn signals(&self) -> Vec<(String, String)> {
        locked(&self.signals).clone()
    }
}

impl BridgeChannel for RecordingChannel {
    fn channel_name(&self) -> &str {
        "in-memory"
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn emit(&self, event: &Event) -> Result<()> {
        if self.fail_emits.load(Ordering::SeqCst) {
            return Err(RelayError::Bridge("JS runtime unavailable".into()));
        }
        locked(&self.emitted).push(event.clone());
        Ok(())
    }

    fn signal_pending(&self, signal_name: &str, event_type: &str) -> Result<()> {
        locked(&self.signals).push((signal_name.to_string(), event_type.to_string()));
        Ok(())
    }
}

/// Message center backed by a plain vector of messages.
pub struct InMemoryMessageCenter {
    messages: Mutex<Vec<InboxMessage>>,
    refresh_succeeds: AtomicBool,
    displayed: Mutex<Vec<Option<String>>>,
    preference_centers: Mutex<Vec<String>>,
}

impl Default for InMemoryMessageCenter {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryMessageCenter {
    pub fn new(messages: Vec<InboxMessage>) -> Self {
        Self {
            messages: Mutex::new(messages),
            refresh_succeeds: AtomicBool::new(true),
            displayed: Mutex::new(Vec::new()),
            preference_centers: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, message: InboxMessage) {
        locked(&self.messages).push(message);
    }

    pub fn set_refresh_succeeds(&self, succeeds: bool) {
        self.refresh_succeeds.store(succeeds, Ordering::SeqCst);
    }

    /// Arguments of every `display` call, in order.
    pub fn displayed(&self) -> Vec<Option<String>> {
        locked(&self.displayed).clone()
    }

    pub fn displayed_preference_centers(&self) -> Vec<String> {
        locked(&self.preference_centers).clone()
    }
}

impl MessageCenterSdk for InMemoryMessageCenter {
    fn message(&self, message_id: &str) -> Result<Option<InboxMessage>> {
        Ok(locked(&self.messages)
            .iter()
            .find(|m| m.id == message_id)
            .cloned())
    }

    fn messages(&self) -> Result<Vec<InboxMessage>> {
        Ok(locked(&self.messages).clone())
    }

    fn unread_count(&self) -> Result<usize> {
        Ok(locked(&self.messages).iter().filter(|m| !m.is_read).count())
    }

    fn mark_read(&self, message_ids: &[String]) -> Result<()> {
        for message in locked(&self.messages).iter_mut() {
            if message_ids.contains(&message.id) {
                message.is_read = true;
            }
        }
        Ok(())
    }

    fn delete(&self, message_ids: &[String]) -> Result<()> {
        locked(&self.messages).retain(|m| !message_ids.contains(&m.id));
        Ok(())
    }

    fn refresh(&self) -> Result<bool> {
        Ok(self.refresh_succeeds.load(Ordering::SeqCst))
    }

    fn display(&self, message_id: Option<&str>) -> Result<()> {
        locked(&self.displayed).push(message_id.map(str::to_string));
        Ok(())
    }

    fn dismiss(&self) -> Result<()> {
        Ok(())
    }
}

impl PreferenceCenterSdk for InMemoryMessageCenter {
    fn display_preference_center(&self, preference_center_id: &str) -> Result<()> {
        locked(&self.preference_centers).push(preference_center_id.to_string());
        Ok(())
    }
}

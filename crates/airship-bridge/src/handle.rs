// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Weak, non-owning reference to the bridge channel.
//
// The host runtime owns its channel and may tear it down at any time (JS
// reload, activity destroyed). The relay only ever borrows it for a single
// delivery, so a dropped channel shows up here as "detached".

use std::sync::{Arc, Weak};

use crate::traits::BridgeChannel;

/// Attached/detached holder for a weakly referenced [`BridgeChannel`].
#[derive(Default)]
pub struct BridgeHandle {
    channel: Option<Weak<dyn BridgeChannel>>,
}

impl BridgeHandle {
    pub fn detached() -> Self {
        Self { channel: None }
    }

    pub fn attach(&mut self, channel: &Arc<dyn BridgeChannel>) {
        self.channel = Some(Arc::downgrade(channel));
    }

    pub fn detach(&mut self) {
        self.channel = None;
    }

    /// The channel, if one is attached and still alive.
    pub fn upgrade(&self) -> Option<Arc<dyn BridgeChannel>> {
        self.channel.as_ref().and_then(Weak::upgrade)
    }

    /// The channel, if attached, alive, and ready to accept events.
    pub fn ready(&self) -> Option<Arc<dyn BridgeChannel>> {
        self.upgrade().filter(|channel| channel.is_ready())
    }

    pub fn is_attached(&self) -> bool {
        self.upgrade().is_some()
    }
}

impl std::fmt::Debug for BridgeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.upgrade() {
            Some(channel) => write!(f, "BridgeHandle(attached: {})", channel.channel_name()),
            None => write!(f, "BridgeHandle(detached)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::RecordingChannel;

    #[test]
    fn attach_and_detach() {
        let channel: Arc<dyn BridgeChannel> = Arc::new(RecordingChannel::new());
        let mut handle = BridgeHandle::detached();
        assert!(!handle.is_attached());

        handle.attach(&channel);
        assert!(handle.is_attached());
        assert!(handle.ready().is_some());

        handle.detach();
        assert!(handle.upgrade().is_none());
    }

    #[test]
    fn dropped_channel_reads_as_detached() {
        let channel: Arc<dyn BridgeChannel> = Arc::new(RecordingChannel::new());
        let mut handle = BridgeHandle::detached();
        handle.attach(&channel);
        drop(channel);
        assert!(!handle.is_attached());
        assert_eq!(format!("{handle:?}"), "BridgeHandle(detached)");
    }

    #[test]
    fn not_ready_channel_is_not_returned() {
        let recording = Arc::new(RecordingChannel::new());
        recording.set_ready(false);
        let channel: Arc<dyn BridgeChannel> = recording.clone();
        let mut handle = BridgeHandle::detached();
        handle.attach(&channel);
        assert!(handle.is_attached());
        assert!(handle.ready().is_none());
    }
}

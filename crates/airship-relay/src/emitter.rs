// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed front door to the relay: turns an `EventType` into the wire name of
// the configured revision before sending.

use std::sync::Arc;

use tracing::debug;

use airship_core::{DeliveryClass, Event, EventBody, EventSetRevision, EventType};

use crate::relay::EventRelay;

/// Sends catalogue events under one event-set revision.
#[derive(Clone)]
pub struct TypedEmitter {
    relay: Arc<EventRelay>,
    revision: EventSetRevision,
}

impl TypedEmitter {
    pub fn new(relay: Arc<EventRelay>, revision: EventSetRevision) -> Self {
        Self { relay, revision }
    }

    pub fn relay(&self) -> &Arc<EventRelay> {
        &self.relay
    }

    pub fn revision(&self) -> EventSetRevision {
        self.revision
    }

    /// Send with the event type's default delivery class. Returns false when
    /// the revision has no name for this type and the event was dropped.
    pub fn emit(&self, event_type: EventType, body: EventBody) -> bool {
        self.emit_as(event_type, body, event_type.default_class())
    }

    pub fn emit_as(&self, event_type: EventType, body: EventBody, class: DeliveryClass) -> bool {
        match event_type.wire_name(self.revision) {
            Some(name) => {
                self.relay.send(Event::new(name, Some(body)).with_class(class));
                true
            }
            None => {
                debug!(?event_type, revision = ?self.revision, "event not part of this event set, dropped");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_under_configured_revision() {
        let relay = Arc::new(EventRelay::default());
        let emitter = TypedEmitter::new(Arc::clone(&relay), EventSetRevision::Legacy);

        assert!(emitter.emit(EventType::InboxUpdated, EventBody::new()));
        assert_eq!(relay.pending_count("com.urbanairship.inbox_updated"), 1);

        assert!(!emitter.emit(EventType::PushTokenReceived, EventBody::new()));
        assert!(relay.pending_types().len() == 1);
    }

    #[test]
    fn default_class_is_applied() {
        let relay = Arc::new(EventRelay::default());
        let emitter = TypedEmitter::new(Arc::clone(&relay), EventSetRevision::Current);
        emitter.emit(EventType::PushReceived, EventBody::new());

        let events = relay.take_pending_events("com.airship.push_received");
        assert_eq!(events[0].class, DeliveryClass::Background);
    }
}

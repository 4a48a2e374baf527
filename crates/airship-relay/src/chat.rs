// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Chat callbacks. Only the legacy event set names these events; under the
// current set they are dropped.

use serde_json::Value;

use airship_core::{EventBody, EventType};

use crate::emitter::TypedEmitter;

/// Forwards conversation and open-chat callbacks from the chat SDK.
pub struct ChatDelegate {
    emitter: TypedEmitter,
}

impl ChatDelegate {
    pub fn new(emitter: TypedEmitter) -> Self {
        Self { emitter }
    }

    pub fn conversation_updated(&self) -> bool {
        let mut body = EventBody::new();
        body.insert("event".into(), Value::from("Conversation updated"));
        self.emitter.emit(EventType::ConversationUpdated, body)
    }

    /// The SDK asks the app to open its chat UI, optionally prefilled.
    pub fn open_chat(&self, message: Option<&str>) -> bool {
        let mut body = EventBody::new();
        if let Some(message) = message {
            body.insert("message".into(), Value::from(message));
        }
        self.emitter.emit(EventType::OpenChat, body)
    }
}

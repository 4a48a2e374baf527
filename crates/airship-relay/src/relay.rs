// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The event relay.
//
// SDK callbacks arrive on whatever thread the host picks; JS listener
// registration arrives on the JS thread, usually after the first callbacks
// already fired. The relay buffers events per type until a listener exists
// and a bridge channel is attached, then lets JS take the backlog in order.
//
// One mutex guards the pending queues, the listener counts and the bridge
// handle. Direct delivery emits while holding it, which makes per-type order
// total: an event is either emitted before the next send starts, or queued
// behind everything already queued.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use airship_bridge::{BridgeChannel, BridgeHandle, RelayObserver};
use airship_core::{DeliveryClass, Event, EventBody, EventSetRevision};

/// Capacity of the pending-signal broadcast. Lagging subscribers lose
/// signals, never events.
const PENDING_SIGNAL_CAPACITY: usize = 256;

#[derive(Default)]
struct RelayState {
    /// Per-type backlog, insertion ordered. Absent means empty.
    pending: HashMap<String, VecDeque<Event>>,
    /// Per-type listener count. Absent means zero.
    listeners: HashMap<String, usize>,
    bridge: BridgeHandle,
}

impl RelayState {
    fn backlog(&self, event_type: &str) -> usize {
        self.pending.get(event_type).map_or(0, VecDeque::len)
    }

    fn listener_count(&self, event_type: &str) -> usize {
        self.listeners.get(event_type).copied().unwrap_or(0)
    }

    fn pending_types(&self) -> Vec<String> {
        self.pending
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(ty, _)| ty.clone())
            .collect()
    }
}

/// Process-wide relay between SDK callbacks and JS listeners.
///
/// Constructed once by the host and shared as `Arc<EventRelay>`. No
/// operation fails: a missing listener or bridge means the event queues.
pub struct EventRelay {
    state: Mutex<RelayState>,
    observers: Mutex<Vec<Arc<dyn RelayObserver>>>,
    revision: EventSetRevision,
    pending_signal: broadcast::Sender<String>,
}

impl Default for EventRelay {
    fn default() -> Self {
        Self::new(EventSetRevision::default())
    }
}

impl EventRelay {
    pub fn new(revision: EventSetRevision) -> Self {
        let (pending_signal, _) = broadcast::channel(PENDING_SIGNAL_CAPACITY);
        Self {
            state: Mutex::new(RelayState::default()),
            observers: Mutex::new(Vec::new()),
            revision,
            pending_signal,
        }
    }

    /// Revision whose pending-signal name is used on the bridge.
    pub fn revision(&self) -> EventSetRevision {
        self.revision
    }

    fn lock(&self) -> MutexGuard<'_, RelayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn observers(&self) -> Vec<Arc<dyn RelayObserver>> {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // -- Sending -------------------------------------------------------------

    /// Send an event of `event_type`. A missing body is sent as `{}`.
    pub fn send_event(&self, event_type: &str, body: Option<EventBody>) {
        self.send(Event::new(event_type, body));
    }

    /// Deliver a pre-built event now if a listener and a ready bridge exist
    /// and nothing of the same type is already waiting; otherwise queue it.
    pub fn send(&self, event: Event) {
        let mut state = self.lock();
        let event_type = event.name.clone();

        if state.listener_count(&event_type) > 0 && state.backlog(&event_type) == 0 {
            if let Some(channel) = state.bridge.ready() {
                match channel.emit(&event) {
                    Ok(()) => {
                        debug!(event_type = %event_type, event_id = %event.id, "event delivered");
                        return;
                    }
                    Err(e) => {
                        warn!(event_type = %event_type, "bridge emit failed, queueing: {e}");
                    }
                }
            }
        }

        let queue = state.pending.entry(event_type.clone()).or_default();
        queue.push_back(event);
        let pending = queue.len();
        let channel = state.bridge.ready();
        drop(state);

        debug!(event_type = %event_type, pending, "event queued");
        self.raise_pending_signal(channel.as_deref(), &event_type);
    }

    // -- Listener registration -----------------------------------------------

    /// Register one JS listener for `event_type`.
    ///
    /// The first registration fires [`EventRelay::on_listener_added`].
    pub fn add_listener(&self, event_type: &str) {
        let listeners = {
            let mut state = self.lock();
            let count = state.listeners.entry(event_type.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        debug!(event_type, listeners, "listener added");
        if listeners == 1 {
            self.on_listener_added(event_type);
        }
    }

    /// Drop `count` JS listeners for `event_type`, saturating at zero. At
    /// zero, later sends of this type queue again.
    pub fn remove_listeners(&self, event_type: &str, count: usize) {
        let cleared = {
            let mut state = self.lock();
            match state.listeners.get_mut(event_type) {
                Some(listeners) => {
                    *listeners = listeners.saturating_sub(count);
                    if *listeners == 0 {
                        state.listeners.remove(event_type);
                        true
                    } else {
                        false
                    }
                }
                None => false,
            }
        };

        if cleared {
            debug!(event_type, "last listener removed");
            for observer in self.observers() {
                observer.on_listeners_cleared(event_type);
            }
        }
    }

    /// Hook for a listener registration going from absent to present.
    ///
    /// Observers run outside the relay lock and see the backlog size; once
    /// they return, `take_pending_events` yields every queued event exactly
    /// once. If a backlog exists the bridge is also signalled.
    pub fn on_listener_added(&self, event_type: &str) {
        let (pending, channel) = {
            let state = self.lock();
            (state.backlog(event_type), state.bridge.ready())
        };

        for observer in self.observers() {
            observer.on_listener_added(event_type, pending);
        }

        if pending > 0 {
            info!(event_type, pending, "listener added with pending events");
            self.raise_pending_signal(channel.as_deref(), event_type);
        }
    }

    pub fn add_observer(&self, observer: Arc<dyn RelayObserver>) {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    // -- Draining ------------------------------------------------------------

    /// Remove and return every queued event of `event_type`, oldest first.
    /// Unknown types and repeat calls yield an empty vec.
    pub fn take_pending_events(&self, event_type: &str) -> Vec<Event> {
        let taken: Vec<Event> = self
            .lock()
            .pending
            .remove(event_type)
            .map(Vec::from)
            .unwrap_or_default();

        if !taken.is_empty() {
            debug!(event_type, count = taken.len(), "pending events taken");
        }
        taken
    }

    /// Like [`EventRelay::take_pending_events`] but only removes events of
    /// `class`; the rest stay queued in their original order.
    pub fn take_pending_events_of(&self, event_type: &str, class: DeliveryClass) -> Vec<Event> {
        let mut state = self.lock();
        let Some(queue) = state.pending.get_mut(event_type) else {
            return Vec::new();
        };

        let (taken, kept): (Vec<Event>, Vec<Event>) = std::mem::take(queue)
            .into_iter()
            .partition(|event| event.class == class);
        if kept.is_empty() {
            state.pending.remove(event_type);
        } else {
            *queue = kept.into();
        }
        taken
    }

    // -- Inspection ----------------------------------------------------------

    pub fn has_pending(&self, event_type: &str) -> bool {
        self.pending_count(event_type) > 0
    }

    pub fn pending_count(&self, event_type: &str) -> usize {
        self.lock().backlog(event_type)
    }

    /// Event types that currently have a backlog, in no particular order.
    pub fn pending_types(&self) -> Vec<String> {
        self.lock().pending_types()
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.lock().listener_count(event_type)
    }

    pub fn is_listening(&self, event_type: &str) -> bool {
        self.listener_count(event_type) > 0
    }

    // -- Bridge --------------------------------------------------------------

    /// Attach the host's bridge channel. The relay keeps only a weak
    /// reference; dropping the channel detaches it implicitly.
    ///
    /// Any existing backlog is signalled immediately.
    pub fn attach_bridge(&self, channel: &Arc<dyn BridgeChannel>) {
        let pending_types = {
            let mut state = self.lock();
            state.bridge.attach(channel);
            state.pending_types()
        };

        info!(channel = channel.channel_name(), pending_types = pending_types.len(), "bridge attached");
        for event_type in pending_types {
            self.raise_pending_signal(Some(channel.as_ref()), &event_type);
        }
    }

    pub fn detach_bridge(&self) {
        self.lock().bridge.detach();
        info!("bridge detached");
    }

    pub fn is_bridge_attached(&self) -> bool {
        self.lock().bridge.is_attached()
    }

    /// Re-signal every backlog, e.g. when the host app returns to the
    /// foreground and JS may have missed earlier signals.
    pub fn on_host_resume(&self) {
        let (pending_types, channel) = {
            let state = self.lock();
            (state.pending_types(), state.bridge.ready())
        };
        for event_type in pending_types {
            self.raise_pending_signal(channel.as_deref(), &event_type);
        }
    }

    /// Receive the event-type name every time events become pending.
    pub fn subscribe_pending(&self) -> broadcast::Receiver<String> {
        self.pending_signal.subscribe()
    }

    fn raise_pending_signal(&self, channel: Option<&dyn BridgeChannel>, event_type: &str) {
        if let Some(channel) = channel {
            if let Err(e) = channel.signal_pending(self.revision.pending_signal_name(), event_type) {
                warn!(event_type, "failed to signal pending events: {e}");
            }
        }
        // No subscribers is fine.
        let _ = self.pending_signal.send(event_type.to_string());
    }
}

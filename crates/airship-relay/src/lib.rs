// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Airship relay: buffers native SDK callbacks until the JavaScript layer
// listens, and adapts the message center, message views and deep links to
// the same event contract.

pub mod chat;
pub mod deep_link;
pub mod delegate;
pub mod emitter;
pub mod logging;
pub mod message_center;
pub mod message_view;
pub mod relay;
pub mod runtime;

pub use relay::EventRelay;
pub use runtime::RelayRuntime;

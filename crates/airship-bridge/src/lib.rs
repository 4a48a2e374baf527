// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Airship relay: seams to the host runtime and the native SDK.
//!
//! The relay never talks to React Native or the Airship SDK directly. It
//! sees the JavaScript side as a [`traits::BridgeChannel`] held through a
//! weak [`handle::BridgeHandle`], and the message center as a
//! [`traits::MessageCenterSdk`]. Native hosts implement these traits; the
//! `stub` and `memory` modules stand in for them on desktop and CI.

pub mod handle;
pub mod memory;
pub mod stub;
pub mod traits;

pub use handle::BridgeHandle;
pub use traits::{BridgeChannel, MessageCenterSdk, PreferenceCenterSdk, RelayObserver};

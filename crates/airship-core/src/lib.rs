// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Airship relay: event model, wire names, errors and configuration shared
// across all crates.

pub mod config;
pub mod error;
pub mod events;
pub mod rejection;
pub mod types;

pub use config::RelayConfig;
pub use error::RelayError;
pub use events::{EventSetRevision, EventType};
pub use types::*;

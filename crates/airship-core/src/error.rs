// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the Airship relay.
//
// The relay itself never fails: a missing listener or an unknown event type
// is a queueing or empty-result condition, not an error. Everything here
// originates at the SDK or host boundary.

use thiserror::Error;

/// Top-level error type for all relay-adjacent operations.
#[derive(Debug, Error)]
pub enum RelayError {
    // -- Message center --
    #[error("message not found: {0}")]
    MessageNotFound(String),

    #[error("inbox refresh failed: {0}")]
    InboxRefreshFailed(String),

    // -- Caller input --
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // -- Platform bridge --
    #[error("bridge channel error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    #[error("relay integration is disabled")]
    Disabled,

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RelayError>;

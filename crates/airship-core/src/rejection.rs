// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Promise rejections for the JavaScript caller.
//
// Every error that crosses into JS is turned into a stable code plus a
// message string. Apps switch on the code, so codes never change once
// shipped; messages may.

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

pub const STATUS_MESSAGE_NOT_FOUND: &str = "STATUS_MESSAGE_NOT_FOUND";
pub const STATUS_DID_NOT_REFRESH: &str = "STATUS_DID_NOT_REFRESH";
pub const STATUS_INVALID_ARGUMENT: &str = "STATUS_INVALID_ARGUMENT";
pub const STATUS_BRIDGE_ERROR: &str = "STATUS_BRIDGE_ERROR";
pub const STATUS_UNSUPPORTED: &str = "UNSUPPORTED";
pub const STATUS_DISABLED: &str = "STATUS_DISABLED";
pub const STATUS_IO_ERROR: &str = "STATUS_IO_ERROR";
pub const STATUS_SERIALIZATION_ERROR: &str = "STATUS_SERIALIZATION_ERROR";

/// A rejected JS operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub code: String,
    pub message: String,
}

impl Rejection {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl From<&RelayError> for Rejection {
    fn from(err: &RelayError) -> Self {
        reject(err)
    }
}

/// Map an error to the rejection surfaced to JavaScript.
pub fn reject(err: &RelayError) -> Rejection {
    match err {
        RelayError::MessageNotFound(_) => {
            Rejection::new(STATUS_MESSAGE_NOT_FOUND, "Message not found.")
        }
        RelayError::InboxRefreshFailed(_) => {
            Rejection::new(STATUS_DID_NOT_REFRESH, "Inbox failed to refresh")
        }
        RelayError::InvalidArgument(detail) => {
            Rejection::new(STATUS_INVALID_ARGUMENT, format!("Invalid argument: {detail}"))
        }
        RelayError::Bridge(detail) => {
            Rejection::new(STATUS_BRIDGE_ERROR, format!("Bridge error: {detail}"))
        }
        RelayError::PlatformUnavailable => {
            Rejection::new(STATUS_UNSUPPORTED, "Not supported on this platform.")
        }
        RelayError::Disabled => {
            Rejection::new(STATUS_DISABLED, "Airship integration is disabled.")
        }
        RelayError::Io(e) => Rejection::new(STATUS_IO_ERROR, e.to_string()),
        RelayError::Serialization(e) => Rejection::new(STATUS_SERIALIZATION_ERROR, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_center_codes_are_stable() {
        let r = reject(&RelayError::MessageNotFound("m1".into()));
        assert_eq!(r.code, "STATUS_MESSAGE_NOT_FOUND");
        assert_eq!(r.message, "Message not found.");

        let r = reject(&RelayError::InboxRefreshFailed("timeout".into()));
        assert_eq!(r.code, "STATUS_DID_NOT_REFRESH");
        assert_eq!(r.message, "Inbox failed to refresh");
    }

    #[test]
    fn platform_unavailable_is_unsupported() {
        let r: Rejection = (&RelayError::PlatformUnavailable).into();
        assert_eq!(r.code, STATUS_UNSUPPORTED);
    }

    #[test]
    fn io_errors_keep_detail() {
        let err = RelayError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let r = reject(&err);
        assert_eq!(r.code, STATUS_IO_ERROR);
        assert!(r.message.contains("gone"));
    }
}

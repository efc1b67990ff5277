//! Request decoding errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a request line could not be turned into a [`crate::Request`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Malformed payload, missing field or out-of-range value
    #[error("{0}")]
    Invalid(String),

    /// First token or `command` field is not a known command
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

impl RequestError {
    /// Error for a line that hit [`crate::MAX_LINE_LEN`] without a newline.
    pub fn line_too_long() -> Self {
        Self::Invalid(format!("request line exceeds {} bytes", crate::MAX_LINE_LEN))
    }

    /// Wire error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Invalid(_) => ErrorCode::InvalidRequest,
            Self::UnknownCommand(_) => ErrorCode::UnknownCommand,
        }
    }
}

/// Error codes carried in the `error` field of JSON replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// `INVALID_REQUEST`
    InvalidRequest,
    /// `UNKNOWN_COMMAND`
    UnknownCommand,
}

impl ErrorCode {
    /// Wire spelling of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::UnknownCommand => "UNKNOWN_COMMAND",
        }
    }
}

//! Oracle error types.

use thiserror::Error;

/// Failures talking to the chat-completions endpoint.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Connection failure, timeout, or other transport fault.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Response body was not a chat-completions envelope.
    #[error("unreadable response envelope: {0}")]
    Envelope(String),
}

/// Failures reducing a reply text to a symbol mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    /// No `{ ... }` region in the reply.
    #[error("No JSON found")]
    NoObject {
        /// The reply text as received.
        raw: String,
    },

    /// The brace region did not decode to an object of scalar values.
    #[error("invalid JSON object: {reason}")]
    Malformed {
        /// The brace-delimited substring.
        object: String,
        reason: String,
    },
}

impl ReplyError {
    /// Text retained alongside the error for inspection.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::NoObject { raw } => raw,
            Self::Malformed { object, .. } => object,
        }
    }
}

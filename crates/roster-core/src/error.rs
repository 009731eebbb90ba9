//! Error types for the roster library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, protocol, parse, cache and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for roster operations.
///
/// Remote failures ([`Error::Transport`], [`Error::Protocol`],
/// [`Error::Parse`]) are expected to be absorbed at operation boundaries.
/// [`Error::Cache`] has no fallback below it and is surfaced to callers.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-success HTTP responses from a remote service.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Malformed or incomplete remote payloads.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Local store failures (I/O, locking, corrupt entries).
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Input validation errors (invalid id, URL, coordinates).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Location access was not granted.
    #[error("location permission denied")]
    PermissionDenied,
}

impl Error {
    /// Returns true for failures that originate from a remote service.
    ///
    /// These degrade to "show what we have" instead of failing the caller.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Protocol(_) | Error::Parse(_)
        )
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Protocol-level errors from remote responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server, if it sent one.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if the server rejected our credentials (e.g. a bad API key).
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Errors decoding a remote payload.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body was not valid JSON or did not match the expected shape.
    #[error("malformed {what}: {message}")]
    Malformed { what: &'static str, message: String },

    /// A required field was missing or empty.
    #[error("missing field '{field}' in {what}")]
    MissingField {
        what: &'static str,
        field: &'static str,
    },

    /// A field was present but its value could not be interpreted.
    #[error("invalid value for '{field}' in {what}: {value}")]
    InvalidValue {
        what: &'static str,
        field: &'static str,
        value: String,
    },
}

/// Local store errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem I/O failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// A stored entry could not be decoded.
    #[error("corrupt entry {path}: {message}")]
    Corrupt { path: String, message: String },

    /// Any other store failure.
    #[error("{message}")]
    Other { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid user id format.
    #[error("invalid user id '{value}': {reason}")]
    UserId { value: String, reason: String },

    /// Invalid service URL format.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// Coordinates outside the valid range.
    #[error("invalid coordinates ({latitude}, {longitude}): {reason}")]
    Coordinates {
        latitude: f64,
        longitude: f64,
        reason: String,
    },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failures_are_classified() {
        assert!(Error::from(TransportError::Timeout).is_remote());
        assert!(Error::from(ProtocolError::new(500, None)).is_remote());
        assert!(
            Error::from(ParseError::MissingField {
                what: "user",
                field: "login.uuid"
            })
            .is_remote()
        );
        assert!(
            !Error::from(CacheError::Other {
                message: "disk full".to_string()
            })
            .is_remote()
        );
        assert!(!Error::PermissionDenied.is_remote());
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::new(401, Some("Invalid API key".to_string()));
        assert_eq!(err.to_string(), "HTTP 401: Invalid API key");
        assert!(err.is_auth_error());
        assert_eq!(ProtocolError::new(502, None).to_string(), "HTTP 502");
    }
}

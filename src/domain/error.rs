//! Error types for the storefront client.
//!
//! This module defines the centralized error type [`ShopError`] and a type alias
//! [`Result`] used throughout the crate. Variants follow the failure taxonomy of
//! the storefront flows: network failures (including timeouts), non-success
//! server responses, client-side validation failures and missing posts.

use std::time::Duration;
use thiserror::Error;

/// The main error type for storefront client operations.
///
/// Remote failures are never retried. Callers decide per flow whether a
/// failure is surfaced to the user or logged and swallowed; see
/// [`ShopError::is_network_failure`] and [`ShopError::server_message`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShopError {
    /// The request never produced a response (connection refused, DNS, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete within the configured bound.
    ///
    /// Handled on the same path as [`ShopError::Network`].
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The backend answered with a non-success status.
    ///
    /// `message` carries the `error`/`message` field of the response body when
    /// the backend provided one.
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, if any.
        message: Option<String>,
    },

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Client-side validation rejected the input before any request was made.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A success response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl ShopError {
    /// Returns `true` for failures where no response was obtained.
    #[must_use]
    pub const fn is_network_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }

    /// Returns the server-provided message, if this is a server error carrying one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShopError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<reqwest::Error> for ShopError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("timed out: {err}"))
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Server {
                status: status.as_u16(),
                message: None,
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// A specialized `Result` type for storefront operations.
pub type Result<T> = std::result::Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_counts_as_network_failure() {
        assert!(ShopError::Timeout(Duration::from_secs(8)).is_network_failure());
        assert!(ShopError::Network("refused".into()).is_network_failure());
        assert!(!ShopError::NotFound("post".into()).is_network_failure());
    }

    #[test]
    fn server_message_only_for_server_errors() {
        let err = ShopError::Server {
            status: 400,
            message: Some("Comment too long".into()),
        };
        assert_eq!(err.server_message(), Some("Comment too long"));
        assert_eq!(ShopError::Validation("email".into()).server_message(), None);
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = ShopError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "Server error (500): no message");
        assert_eq!(
            ShopError::Timeout(Duration::from_millis(250)).to_string(),
            "Request timed out after 250ms"
        );
    }
}

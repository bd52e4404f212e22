//! # Common Error Types
//!
//! Consolidated error handling for the signals client.
//!
//! This module provides a centralized error type [`ApiError`] that covers every failure a
//! caller of the client can observe.
//!
//! ## Error Categories
//!
//! - **Authorization**: `AuthorizationExpired` (401 on a normal call, drives token renewal)
//!   and `RenewalCredentialInvalid` (the refresh token is gone or rejected, session is cleared)
//! - **Transient**: `Network`, `Timeout`, `Server`, `Rejected` (propagated, session untouched)
//! - **Data**: `Parse`, `Encode` (a body did not match the expected shape)
//! - **Local**: `Storage` (secure store), `Config`, `RenewalAbandoned`
//!
//! ## Why `Clone`
//!
//! The outcome of one renewal cycle is handed to every queued caller, so the
//! error has to be cloneable. Variants therefore carry messages, not source errors.
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use client::core::error::ApiError;
//!
//! fn describe(err: &ApiError) -> &'static str {
//!     if err.ends_session() {
//!         "Please sign in again"
//!     } else if err.is_transient() {
//!         "Network problem, try again"
//!     } else {
//!         "Something went wrong"
//!     }
//! }
//! ```

use reqwest::StatusCode;
use thiserror::Error;

/// Client-wide error type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered 401 to a regular call.
    ///
    /// Triggers one renewal cycle; surfaces to the caller only when the call
    /// targets an auth endpoint or was already retried.
    #[error("Authorization expired: {message}")]
    AuthorizationExpired { message: String },

    /// The refresh token is missing or the refresh endpoint answered 401.
    ///
    /// Terminal for the session: all credentials are cleared.
    #[error("Session expired: {0}")]
    RenewalCredentialInvalid(String),

    /// Connection refused, DNS failure, reset, and similar.
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// 5xx response.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// 4xx response other than 401.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// A response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A request body could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// The secure store failed to read, write or delete.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The task running a renewal cycle was dropped before it finished.
    #[error("Token renewal was abandoned before completing")]
    RenewalAbandoned,
}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Map a non-2xx status and the envelope message to an error.
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = status
                .canonical_reason()
                .unwrap_or("Unexpected status")
                .to_string();
        }

        match status {
            StatusCode::UNAUTHORIZED => ApiError::AuthorizationExpired { message },
            s if s.is_server_error() => ApiError::Server {
                status: s.as_u16(),
                message,
            },
            s => ApiError::Rejected {
                status: s.as_u16(),
                message,
            },
        }
    }

    /// 401 on a regular call.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::AuthorizationExpired { .. })
    }

    /// Whether this error means the user has to sign in again.
    pub fn ends_session(&self) -> bool {
        matches!(self, ApiError::RenewalCredentialInvalid(_))
    }

    /// Failures worth retrying later without touching the session.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::Network(_)
                | ApiError::Timeout
                | ApiError::Server { .. }
                | ApiError::Rejected { .. }
                | ApiError::RenewalAbandoned
        )
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AuthorizationExpired { .. } => Some(401),
            ApiError::Server { status, .. } | ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<lib_utils::envs::Error> for ApiError {
    fn from(err: lib_utils::envs::Error) -> Self {
        ApiError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_statuses_to_variants() {
        assert!(ApiError::from_status(StatusCode::UNAUTHORIZED, "Token expired").is_unauthorized());
        assert_eq!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream"),
            ApiError::Server {
                status: 502,
                message: "upstream".to_string()
            }
        );
        assert_eq!(ApiError::from_status(StatusCode::FORBIDDEN, "no").status(), Some(403));
    }

    #[test]
    fn empty_message_falls_back_to_reason() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "  ");
        assert_eq!(err.to_string(), "Server error (500): Internal Server Error");
    }

    #[test]
    fn forbidden_is_transient_not_terminal() {
        let err = ApiError::from_status(StatusCode::FORBIDDEN, "blocked");
        assert!(err.is_transient());
        assert!(!err.ends_session());
        assert!(!err.is_unauthorized());
    }
}

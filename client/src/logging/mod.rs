//! # Logging
//!
//! Structured logs to `logs/client.log` (daily rotation), optionally mirrored
//! to stderr.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default `client=info,warn`)
//! - `SIGNALS_LOG_DIR`: Log directory (default `logs`)
//! - `SIGNALS_LOG_STDERR`: Mirror logs to stderr (1=on)
//!
//! Every [`crate::ApiClient::execute`] call runs in a span carrying a
//! `request_id`, so a request, its renewal and its replay share one id.
//! Tokens are never logged in full, only as [`shared::fingerprint`]s.

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init;

/// File name prefix of the rolling log.
pub const LOG_FILE_NAME: &str = "client.log";

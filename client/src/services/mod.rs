//! # Services Module
//!
//! External integrations: the backend HTTP API and the platform's secure
//! storage.
//!
//! ```text
//! services/
//! ├── api/       - Backend HTTP API client
//! │                (sign-in, token renewal, package catalogue)
//! └── storage.rs - SecureStore implementations
//!                  (in-memory, JSON file)
//! ```
//!
//! ## Thread Safety
//!
//! - **ApiClient**: wraps `reqwest::Client` (internally thread-safe); share
//!   it behind an `Arc`.
//! - **SecureStore**: implementations are `Send + Sync`; `FileSecureStore`
//!   serializes writers so concurrent sets cannot interleave.

pub mod api;
pub mod storage;

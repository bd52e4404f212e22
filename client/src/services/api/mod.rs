//! # Backend API Client Module
//!
//! HTTP client for communicating with the signals backend.
//! Handles authentication, token renewal and the package catalogue.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs      - Module exports and documentation
//! ├── client.rs   - ApiClient, bearer injection and 401 renewal
//! ├── request.rs  - Replayable request description
//! ├── auth.rs     - Google verification, refresh, sign-in helpers
//! └── packages.rs - Package catalogue endpoints
//! ```

pub mod auth;
pub mod client;
pub mod packages;
pub mod request;

pub use auth::{extract_id_token, sign_in_with_google, AuthSessionResult};
pub use client::ApiClient;
pub use packages::{get_packages, DEFAULT_PAGE_LIMIT};
pub use request::ApiRequest;

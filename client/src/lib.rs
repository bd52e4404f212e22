//! # Signals Client - Library Root
//!
//! Authenticated API client for the trading-signals backend, with automatic
//! access token renewal and request coalescing.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              client (this crate)                       │
//! ├────────────────────────────────────────────────────────┤
//! │  session::SessionStore  - access token, user, refresh  │
//! │  session::RenewalGate   - one refresh per 401 burst    │
//! │  services::api          - ApiClient, endpoints         │
//! │  services::storage      - SecureStore backends         │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP/JSON
//!          ▼
//! ┌─────────────────┐
//! │  Backend API    │  /auth/google/verify, /auth/refresh, /api/*
//! └─────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **config**: `ClientConfig` loaded from `SIGNALS_*` environment variables
//! - **core**: `ApiError` and the `SecureStore`/`ApiService` traits
//! - **logging**: File-based `tracing` setup
//! - **services**: Backend HTTP client and secure store backends
//! - **session**: Credential store, renewal gate, startup bootstrap
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use client::services::storage::MemorySecureStore;
//! use client::session::bootstrap;
//! use client::{ApiClient, ClientConfig, RenewalGate, SessionStore};
//!
//! # async fn run() -> client::Result<()> {
//! let config = ClientConfig::default();
//! let session = Arc::new(SessionStore::new(Arc::new(MemorySecureStore::new())));
//! let client = ApiClient::new(&config, session, Arc::new(RenewalGate::new()))?;
//!
//! let snapshot = bootstrap(&client).await;
//! if snapshot.authenticated {
//!     let page = client::services::api::get_packages(&client, 100, 0).await?;
//!     println!("{} packages", page.total);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p client
//! ```
//!
//! Integration tests in `tests/` run against an in-process axum backend.

pub mod config;
pub mod core;
pub mod logging;
pub mod services;
pub mod session;

// Re-export commonly used types for convenience
pub use config::ClientConfig;
pub use core::{ApiError, ApiService, Result};
pub use services::api::ApiClient;
pub use session::{RenewalGate, SessionSnapshot, SessionStore};

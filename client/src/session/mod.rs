//! # Session
//!
//! ```text
//! session/
//! ├── store.rs     - SessionStore: access token, user, admin flag, refresh token
//! ├── renewal.rs   - RenewalGate: one refresh per burst of 401s
//! └── bootstrap.rs - Startup restore from the persisted refresh token
//! ```
//!
//! The store and the gate are created once per process and shared by `Arc`
//! between the API client, the bootstrap and the UI.

pub mod bootstrap;
pub mod renewal;
pub mod store;

pub use bootstrap::bootstrap;
pub use renewal::{RenewalGate, RenewalOutcome};
pub use store::{SessionSnapshot, SessionStore, REFRESH_TOKEN_KEY};

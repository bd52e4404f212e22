//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures exchanged with the backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`envelope`] - Response wrapper shared by every endpoint
//! - [`auth`] - Google verification, refresh and user profile DTOs
//! - [`packages`] - Subscription package catalogue
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /auth/refresh
//! Content-Type: application/json
//!
//! {
//!   "refresh_token": "r-4f1c...",
//!   "device_type": "mobile"
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "status": "success",
//!   "type": "auth",
//!   "data": {
//!     "user": { "id": 7, "email": "alice@example.com", ... },
//!     "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!     "refresh_token": "r-9a2e...",
//!     "is_admin": false
//!   },
//!   "message": "Token refreshed"
//! }
//! ```

pub mod auth;
pub mod envelope;
pub mod packages;

pub use auth::*;
pub use envelope::*;
pub use packages::*;

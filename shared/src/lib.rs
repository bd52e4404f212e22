//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the signals client and the backend API.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::envelope`]**: The `{status, type, data, message}` wrapper every endpoint returns
//!   - **[`dto::auth`]**: Google verification, token refresh and user profile DTOs
//!   - **[`dto::packages`]**: Signal subscription package catalogue
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::mask_secret`]**: Shorten a token for display without revealing it
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using the default `serde` behavior:
//! - Field names use **snake_case**, matching the backend
//! - Catalogue enums use **SCREAMING_SNAKE_CASE** (`FOREX`, `SIX_MONTHS`)
//! - Timestamps are RFC 3339 strings parsed into `chrono::DateTime<Utc>`
//!
//! ## Usage in the Client
//!
//! ```rust,ignore
//! use shared::dto::{ApiEnvelope, AuthPayload, RefreshTokenRequest};
//!
//! # async fn demo() -> Result<(), reqwest::Error> {
//! let request = RefreshTokenRequest::mobile("stored-refresh-token");
//!
//! let response: ApiEnvelope<AuthPayload> = reqwest::Client::new()
//!     .post("http://localhost:8080/auth/refresh")
//!     .json(&request)
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//!
//! println!("Signed in as {}", response.data.user.email);
//! # Ok(())
//! # }
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;

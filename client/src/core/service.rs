//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.

use async_trait::async_trait;
use shared::{AuthPayload, PackagesPage};
use thiserror::Error;

use super::error::ApiError;

/// Failure reported by a [`SecureStore`] backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("secure store {operation} failed for '{key}': {reason}")]
pub struct StorageError {
    pub operation: &'static str,
    pub key: String,
    pub reason: String,
}

impl StorageError {
    pub fn new(operation: &'static str, key: &str, reason: impl ToString) -> Self {
        Self {
            operation,
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

/// Encrypted key-value storage provided by the platform (Keychain, Keystore).
///
/// Only the session store talks to this; everything else goes through
/// [`crate::session::SessionStore`].
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key was never written or was deleted.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write or overwrite a value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Trait for API service operations
///
/// This trait allows the UI layer to depend on an abstraction and lets tests
/// swap in a fake backend.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Exchange a Google ID token for a session and store it
    async fn sign_in_with_google(&self, id_token: &str) -> Result<AuthPayload, ApiError>;

    /// Get one page of the package catalogue
    async fn get_packages(&self, limit: u32, offset: u32) -> Result<PackagesPage, ApiError>;

    /// Run (or join) a token renewal cycle and return the new access token
    async fn renew_session(&self) -> Result<String, ApiError>;

    /// Clear every credential, in memory and on disk
    async fn logout(&self) -> Result<(), ApiError>;
}

//! # Core Abstractions
//!
//! Core traits and error types shared by the session and service layers.
//!
//! ## Modules
//!
//! - **[`error`]**: Client error type (`ApiError`, `Result<T>`)
//! - **[`service`]**: Seams for dependency injection (`SecureStore`, `ApiService`)
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use client::core::service::SecureStore;
//! use client::services::storage::MemorySecureStore;
//!
//! // On device: a Keychain/Keystore backed implementation
//! // In tests: the in-memory store
//! let store: Arc<dyn SecureStore> = Arc::new(MemorySecureStore::new());
//! ```

pub mod error;
pub mod service;

pub use error::{ApiError, Result};
pub use service::{ApiService, SecureStore, StorageError};

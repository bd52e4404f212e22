//! # Session Store
//!
//! Single source of truth for who is signed in and which credential
//! authorizes their requests.
//!
//! | Field | Lifetime | Written by |
//! |---|---|---|
//! | access token | memory | sign-in, refresh, logout |
//! | user, admin flag | memory | sign-in, refresh, logout |
//! | refresh token | secure store (`refresh_token`) | sign-in, refresh (rotated), logout |
//! | initialized | memory, one-way | session bootstrap |
//!
//! The access token is short-lived and safe to lose on restart; the refresh
//! token must survive restarts so the user is not asked to sign in on every
//! launch.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::{fingerprint, AuthPayload, User};
use tokio::sync::watch;

use crate::core::error::ApiError;
use crate::core::service::SecureStore;

/// Secure store key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// What the UI needs to route: loading, signed out, or signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_admin: bool,
    pub authenticated: bool,
    pub initialized: bool,
}

#[derive(Debug, Default)]
struct SessionState {
    access_token: Option<String>,
    user: Option<User>,
    is_admin: bool,
    initialized: bool,
}

impl SessionState {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            is_admin: self.is_admin,
            authenticated: self.user.is_some(),
            initialized: self.initialized,
        }
    }
}

/// Credential store shared by the API client, the bootstrap and the UI.
pub struct SessionStore {
    state: RwLock<SessionState>,
    secure: Arc<dyn SecureStore>,
    changes: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    pub fn new(secure: Arc<dyn SecureStore>) -> Self {
        let (changes, _) = watch::channel(SessionSnapshot::default());
        Self {
            state: RwLock::new(SessionState::default()),
            secure,
            changes,
        }
    }

    // Callers hold the write lock so snapshots are published in mutation order
    fn publish(&self, state: &SessionState) {
        self.changes.send_replace(state.snapshot());
    }

    /// Current access token, read at send time by the API client.
    pub fn access_token(&self) -> Option<String> {
        self.state.read().access_token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn is_admin(&self) -> bool {
        self.state.read().is_admin
    }

    /// True iff a user profile is present.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().user.is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().initialized
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.read().snapshot()
    }

    /// Receive a new snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.changes.subscribe()
    }

    /// Set or clear the signed-in user. `authenticated` follows.
    pub fn set_user(&self, user: Option<User>) {
        let mut state = self.state.write();
        state.user = user;
        self.publish(&state);
    }

    /// Replace the in-memory access token. Nothing is persisted.
    pub fn set_access_token(&self, token: impl Into<String>) {
        self.state.write().access_token = Some(token.into());
    }

    pub fn set_is_admin(&self, is_admin: bool) {
        let mut state = self.state.write();
        state.is_admin = is_admin;
        self.publish(&state);
    }

    /// Latch `initialized`. Once true it stays true; returns whether this call flipped it.
    pub fn set_initialized(&self, initialized: bool) -> bool {
        let mut state = self.state.write();
        if !initialized || state.initialized {
            if !initialized && state.initialized {
                tracing::debug!("Ignoring attempt to reset the initialized latch");
            }
            return false;
        }

        state.initialized = true;
        self.publish(&state);
        true
    }

    /// Read the persisted refresh token.
    ///
    /// A storage failure is logged and reported as absent: the caller then
    /// degrades to a fresh sign-in.
    pub async fn renewal_credential(&self) -> Option<String> {
        match self.secure.get(REFRESH_TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read refresh token, treating as absent");
                None
            }
        }
    }

    /// Persist a refresh token.
    pub async fn set_renewal_credential(&self, token: &str) -> Result<(), ApiError> {
        self.secure.set(REFRESH_TOKEN_KEY, token).await?;
        Ok(())
    }

    /// Install the session returned by sign-in or refresh.
    ///
    /// The rotated refresh token is persisted first, then access token, user
    /// and admin flag are swapped in under one write lock. When persisting
    /// fails the in-memory session is still installed (usable until the
    /// process exits) and the storage error is returned.
    pub async fn establish(&self, payload: &AuthPayload) -> Result<(), ApiError> {
        let persisted = self.set_renewal_credential(&payload.refresh_token).await;

        {
            let mut state = self.state.write();
            state.access_token = Some(payload.access_token.clone());
            state.user = Some(payload.user.clone());
            state.is_admin = payload.is_admin;
            self.publish(&state);
        }

        tracing::debug!(
            user_id = payload.user.id,
            access_token = %fingerprint(&payload.access_token),
            persisted = persisted.is_ok(),
            "Session credentials installed"
        );

        persisted
    }

    /// Forget everything: memory first, then the persisted refresh token.
    ///
    /// Safe to call when already signed out. The in-memory reset always
    /// happens; a failure to delete from the secure store is returned.
    pub async fn clear_all(&self) -> Result<(), ApiError> {
        {
            let mut state = self.state.write();
            state.access_token = None;
            state.user = None;
            state.is_admin = false;
            self.publish(&state);
        }

        self.secure.delete(REFRESH_TOKEN_KEY).await?;
        Ok(())
    }

    /// User-initiated sign out.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.clear_all().await;
        match &result {
            Ok(()) => tracing::info!("Logged out"),
            Err(e) => tracing::error!(error = %e, "Logout could not remove the stored refresh token"),
        }
        result
    }
}

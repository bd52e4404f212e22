//! # Authentication Endpoints
//!
//! Google ID token verification and refresh token exchange. Both calls are
//! sent without a bearer token and their 401s are returned as-is.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared::{AuthPayload, GoogleVerifyRequest, RefreshTokenRequest};

use super::client::ApiClient;
use super::request::ApiRequest;
use crate::core::error::Result;

pub const GOOGLE_VERIFY_PATH: &str = "/auth/google/verify";
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Verify a Google ID token with the backend.
#[tracing::instrument(skip_all)]
pub async fn verify_google_token(client: &ApiClient, id_token: &str) -> Result<AuthPayload> {
    let request = ApiRequest::post_json(GOOGLE_VERIFY_PATH, &GoogleVerifyRequest::mobile(id_token))?;
    let envelope = client.send_unauthenticated::<AuthPayload>(&request).await?;
    Ok(envelope.into_data())
}

/// Exchange a refresh token for a new access token (and a rotated refresh token).
#[tracing::instrument(skip_all)]
pub async fn refresh_access_token(client: &ApiClient, refresh_token: &str) -> Result<AuthPayload> {
    let request = ApiRequest::post_json(REFRESH_PATH, &RefreshTokenRequest::mobile(refresh_token))?;
    let envelope = client.send_unauthenticated::<AuthPayload>(&request).await?;
    Ok(envelope.into_data())
}

/// Sign in with a Google ID token and install the resulting session.
///
/// If the refresh token cannot be persisted the session is still usable for
/// this process, and the storage error is returned so the UI can warn that
/// the user will have to sign in again next launch.
pub async fn sign_in_with_google(client: &ApiClient, id_token: &str) -> Result<AuthPayload> {
    tracing::info!("Verifying Google ID token");
    let start = std::time::Instant::now();

    let payload = verify_google_token(client, id_token).await.map_err(|e| {
        tracing::warn!(error = %e, "Google sign-in failed");
        e
    })?;

    client.session().establish(&payload).await?;

    tracing::info!(
        user_id = payload.user.id,
        is_admin = payload.is_admin,
        duration_ms = start.elapsed().as_millis(),
        "Sign-in successful"
    );
    Ok(payload)
}

// ==================== GOOGLE SIGN-IN ====================

/// Result of the platform's OAuth browser session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthSessionResult {
    Success {
        #[serde(default)]
        params: HashMap<String, String>,
    },
    Cancel,
    Dismiss,
    Error {
        #[serde(default)]
        error: Option<String>,
    },
}

/// Pull the ID token out of a successful browser session.
pub fn extract_id_token(result: &AuthSessionResult) -> Option<String> {
    match result {
        AuthSessionResult::Success { params } => params
            .get("id_token")
            .filter(|token| !token.is_empty())
            .cloned(),
        _ => None,
    }
}

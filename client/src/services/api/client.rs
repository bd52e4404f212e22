//! # API Client
//!
//! HTTP client for the signals backend with transparent token renewal.
//!
//! ## Request Flow
//!
//! ```text
//! execute(request)
//!   │
//!   ├─ attach "Bearer <access token>" (read from the session at send time,
//!   │  skipped for /auth/google/verify and /auth/refresh)
//!   │
//!   ├─ 2xx ─────────────────────────────────► decode envelope
//!   ├─ non-401 error ───────────────────────► propagate
//!   └─ 401
//!       ├─ auth endpoint or already retried ► propagate
//!       ├─ token rotated meanwhile ─────────► replay with the current token
//!       └─ renew_session()
//!            ├─ initiator: spawn the renewal task, then wait like everyone else
//!            ├─ waiter: suspend until the renewal task finishes
//!            ├─ Ok(token) ──────────────────► replay once with token
//!            └─ Err(e) ─────────────────────► propagate e (401 from refresh
//!                                             or missing refresh token also
//!                                             clears the session)
//! ```
//!
//! The auth endpoints go through [`ApiClient::send_unauthenticated`], which
//! never looks at a 401, so the refresh call cannot re-enter the renewal path.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::Instrument;
use shared::{ApiEnvelope, AuthPayload, ErrorEnvelope, PackagesPage};

use super::request::ApiRequest;
use crate::config::ClientConfig;
use crate::core::error::{ApiError, Result};
use crate::core::service::ApiService;
use crate::session::renewal::{RenewalGate, RenewalLease, Ticket};
use crate::session::store::SessionStore;

/// HTTP client for communicating with the backend API server.
///
/// Cheap to clone; `reqwest::Client` pools connections internally and the
/// session and gate are shared handles.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    session: Arc<SessionStore>,
    gate: Arc<RenewalGate>,
}

impl ApiClient {
    /// Create a client bound to a session store and a renewal gate.
    ///
    /// Every request carries `config.request_timeout`; a timeout is reported
    /// as [`ApiError::Timeout`] and never triggers a renewal.
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>, gate: Arc<RenewalGate>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: Arc::from(config.api_base_url.trim_end_matches('/')),
            session,
            gate,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn gate(&self) -> &Arc<RenewalGate> {
        &self.gate
    }

    /// Send a request, renewing the access token once on a 401.
    #[tracing::instrument(
        skip(self, request),
        fields(
            request_id = %uuid::Uuid::new_v4(),
            method = %request.method(),
            path = %request.path(),
        )
    )]
    pub async fn execute<T: DeserializeOwned>(&self, mut request: ApiRequest) -> Result<ApiEnvelope<T>> {
        if request.is_auth_endpoint() {
            return self.send_unauthenticated(&request).await;
        }

        let bearer = self.session.access_token();

        match self.dispatch::<T>(&request, bearer.as_deref()).await {
            Err(err) if err.is_unauthorized() && request.can_retry() => {
                request.mark_retried();
                tracing::debug!("Access token rejected");

                let token = self.token_after_rejection(bearer.as_deref()).await?;
                self.dispatch(&request, Some(&token)).await
            }
            result => result,
        }
    }

    /// Send without a bearer token and without 401 handling.
    ///
    /// Used for sign-in and refresh, whose 401s mean "bad credential", not
    /// "expired access token".
    #[tracing::instrument(
        skip(self, request),
        fields(
            request_id = %uuid::Uuid::new_v4(),
            method = %request.method(),
            path = %request.path(),
        )
    )]
    pub(super) async fn send_unauthenticated<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<ApiEnvelope<T>> {
        self.dispatch(request, None).await
    }

    async fn dispatch<T: DeserializeOwned>(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<ApiEnvelope<T>> {
        let start = Instant::now();
        let url = format!("{}{}", self.base_url, request.path());

        let mut builder = self.http.request(request.method().clone(), url.as_str());
        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            let err = ApiError::from(e);
            tracing::warn!(error = %err, duration_ms = start.elapsed().as_millis(), "Request failed");
            err
        })?;

        let status = response.status();
        let body = response.bytes().await?;
        let duration_ms = start.elapsed().as_millis();

        if status.is_success() {
            tracing::debug!(status = status.as_u16(), duration_ms, retried = request.is_retried(), "Request succeeded");
            return serde_json::from_slice::<ApiEnvelope<T>>(&body).map_err(|e| {
                tracing::error!(error = %e, "Response parse error");
                ApiError::Parse(e.to_string())
            });
        }

        let message = serde_json::from_slice::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.message)
            .unwrap_or_default();
        let err = ApiError::from_status(status, message);

        tracing::warn!(status = status.as_u16(), error = %err, duration_ms, "Request rejected");
        Err(err)
    }

    /// Token to replay a request with after the backend rejected `stale`.
    async fn token_after_rejection(&self, stale: Option<&str>) -> Result<String> {
        // Another caller already finished a renewal while this request was in flight
        if let Some(current) = self.session.access_token() {
            if stale != Some(current.as_str()) {
                tracing::debug!("Access token already rotated, replaying without renewal");
                return Ok(current);
            }
        }

        self.renew_session().await
    }

    /// Run one renewal cycle, or wait for the one already in flight.
    ///
    /// The first caller spawns the renewal as its own task and then waits on
    /// it like every other caller, so cancelling any caller, the first one
    /// included, never cancels the refresh request or loses a rotated refresh
    /// token.
    ///
    /// On success the new access token is returned after the session store
    /// holds the full new credential set. A 401 from the refresh endpoint, or
    /// a missing refresh token, clears the session before waiters are
    /// released; any other failure leaves the session untouched.
    pub async fn renew_session(&self) -> Result<String> {
        let waiter = match self.gate.begin_or_join() {
            Ticket::Waiter(waiter) => {
                tracing::debug!("Joining in-flight token renewal");
                waiter
            }
            Ticket::Initiator(lease) => {
                let waiter = lease.subscribe();
                let client = self.clone();
                tokio::spawn(async move { client.run_renewal(lease).await }.in_current_span());
                waiter
            }
        };

        waiter.wait().await
    }

    async fn run_renewal(&self, lease: RenewalLease) {
        tracing::info!("Refreshing access token");
        let outcome = self.refresh_credentials().await;

        match &outcome {
            Ok(_) => tracing::info!("Token auto-refreshed successfully"),
            Err(e) if e.ends_session() => {
                tracing::warn!(error = %e, "Session expired, logging out");
                if let Err(clear_err) = self.session.clear_all().await {
                    tracing::error!(error = %clear_err, "Failed to clear stored credentials");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Token refresh failed"),
        }

        let released = lease.complete(&outcome);
        tracing::debug!(released, "Released queued requests");
    }

    async fn refresh_credentials(&self) -> Result<String> {
        let Some(refresh_token) = self.session.renewal_credential().await else {
            return Err(ApiError::RenewalCredentialInvalid(
                "No refresh token available".to_string(),
            ));
        };

        let payload = super::auth::refresh_access_token(self, &refresh_token)
            .await
            .map_err(|e| match e {
                ApiError::AuthorizationExpired { message } => ApiError::RenewalCredentialInvalid(message),
                other => other,
            })?;

        if let Err(e) = self.session.establish(&payload).await {
            // The in-memory session is installed; only persistence across restarts is lost
            tracing::warn!(error = %e, "Refreshed session could not be persisted");
        }

        Ok(payload.access_token)
    }
}

#[async_trait]
impl ApiService for ApiClient {
    async fn sign_in_with_google(&self, id_token: &str) -> Result<AuthPayload> {
        super::auth::sign_in_with_google(self, id_token).await
    }

    async fn get_packages(&self, limit: u32, offset: u32) -> Result<PackagesPage> {
        super::packages::get_packages(self, limit, offset).await
    }

    async fn renew_session(&self) -> Result<String> {
        ApiClient::renew_session(self).await
    }

    async fn logout(&self) -> Result<()> {
        self.session.logout().await
    }
}

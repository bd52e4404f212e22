//! In-process mock of the signals backend for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use client::core::service::{SecureStore, StorageError};
use client::services::storage::MemorySecureStore;
use client::session::REFRESH_TOKEN_KEY;
use client::{ApiClient, ClientConfig, RenewalGate, SessionStore};

pub const GOOD_GOOGLE_TOKEN: &str = "google-id-token";

/// How `POST /auth/refresh` answers.
#[derive(Debug, Clone)]
pub enum RefreshBehavior {
    /// Rotate to the given pair; the new access token becomes valid.
    Succeed { access: String, refresh: String },
    /// Return a new pair that the backend still rejects.
    SucceedButStillRejected,
    Reject401,
    Fail500,
}

impl RefreshBehavior {
    pub fn rotate_to(access: &str, refresh: &str) -> Self {
        Self::Succeed {
            access: access.to_string(),
            refresh: refresh.to_string(),
        }
    }
}

pub struct MockBackend {
    valid_access: Mutex<String>,
    behavior: Mutex<RefreshBehavior>,
    refresh_delay: Duration,
    refresh_calls: AtomicUsize,
    verify_calls: AtomicUsize,
    refresh_tokens_seen: Mutex<Vec<String>>,
    bearers_seen: Mutex<Vec<Option<String>>>,
}

impl MockBackend {
    pub fn new(valid_access: &str, behavior: RefreshBehavior) -> Self {
        Self {
            valid_access: Mutex::new(valid_access.to_string()),
            behavior: Mutex::new(behavior),
            // Long enough for every request of a burst to see its 401 first
            refresh_delay: Duration::from_millis(200),
            refresh_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            refresh_tokens_seen: Mutex::new(Vec::new()),
            bearers_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn set_valid_access(&self, token: &str) {
        *self.valid_access.lock() = token.to_string();
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_tokens_seen(&self) -> Vec<String> {
        self.refresh_tokens_seen.lock().clone()
    }

    /// Bearer tokens presented to `/api/*`, in arrival order.
    pub fn bearers_seen(&self) -> Vec<Option<String>> {
        self.bearers_seen.lock().clone()
    }

    pub fn bearer_count(&self, token: &str) -> usize {
        self.bearers_seen
            .lock()
            .iter()
            .filter(|seen| seen.as_deref() == Some(token))
            .count()
    }
}

/// Secure store that counts deletes, so tests can tell how often the session was cleared.
#[derive(Default)]
pub struct CountingStore {
    inner: MemorySecureStore,
    deletes: AtomicUsize,
}

impl CountingStore {
    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecureStore for CountingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(key).await
    }
}

pub struct Harness {
    pub backend: Arc<MockBackend>,
    pub store: Arc<CountingStore>,
    pub client: Arc<ApiClient>,
}

impl Harness {
    pub async fn start(backend: MockBackend) -> Self {
        Self::start_with_timeout(backend, Duration::from_secs(5)).await
    }

    pub async fn start_with_timeout(backend: MockBackend, timeout: Duration) -> Self {
        let backend = Arc::new(backend);
        let base_url = spawn_backend(backend.clone()).await;

        let mut config = ClientConfig::with_base_url(base_url);
        config.request_timeout = timeout;

        let store = Arc::new(CountingStore::default());
        let session = Arc::new(SessionStore::new(store.clone()));
        let client = ApiClient::new(&config, session, Arc::new(RenewalGate::new())).unwrap();

        Self {
            backend,
            store,
            client: Arc::new(client),
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.client.session()
    }

    /// Install a signed-in session as if the app had run before.
    pub async fn seed_session(&self, access: &str, refresh: &str) {
        let session = self.session();
        session.set_access_token(access);
        session.set_user(Some(serde_json::from_value(user_json()).unwrap()));
        session.set_renewal_credential(refresh).await.unwrap();
    }

    /// Persist only a refresh token, as after a restart.
    pub async fn seed_refresh_token(&self, refresh: &str) {
        self.store.set(REFRESH_TOKEN_KEY, refresh).await.unwrap();
    }

    pub async fn stored_refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY).await.unwrap()
    }
}

pub async fn spawn_backend(backend: Arc<MockBackend>) -> String {
    let app = Router::new()
        .route("/api/packages", get(list_packages))
        .route("/api/packages/delayed", get(list_packages_delayed))
        .route("/api/slow", get(slow))
        .route("/auth/refresh", post(refresh))
        .route("/auth/google/verify", post(verify))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn user_json() -> Value {
    json!({
        "id": 42,
        "email": "trader@example.com",
        "name": "Test Trader",
        "profile_picture": "",
        "email_verified": true,
        "blocked": false,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    })
}

fn auth_payload(access: &str, refresh: &str) -> Value {
    json!({
        "user": user_json(),
        "access_token": access,
        "refresh_token": refresh,
        "is_admin": false
    })
}

fn success(data: Value) -> Response {
    Json(json!({
        "status": "success",
        "type": "success",
        "data": data,
        "message": ""
    }))
    .into_response()
}

fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "status": "error",
            "type": "error",
            "message": message
        })),
    )
        .into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn list_packages(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    let token = bearer(&headers);
    backend.bearers_seen.lock().push(token.clone());
    packages_page(&backend, token.as_deref())
}

/// Checks the bearer only after a pause, so the 401 can land after a renewal.
async fn list_packages_delayed(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    let token = bearer(&headers);
    backend.bearers_seen.lock().push(token.clone());
    tokio::time::sleep(Duration::from_millis(400)).await;
    packages_page(&backend, token.as_deref())
}

fn packages_page(backend: &MockBackend, token: Option<&str>) -> Response {
    if token != Some(backend.valid_access.lock().as_str()) {
        return failure(StatusCode::UNAUTHORIZED, "Token expired");
    }

    success(json!({
        "limit": 100,
        "offset": 0,
        "total": 1,
        "packages": [{
            "id": 1,
            "name": "Forex Pro",
            "asset_class": "FOREX",
            "duration_type": "SHORT_TERM",
            "billing_cycle": "MONTHLY",
            "duration_days": 30,
            "price": 49.0,
            "description": "Daily forex signals",
            "is_active": true,
            "signals_per_day": 5,
            "features": ["Entry and exit levels", "Stop loss"],
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }]
    }))
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(2)).await;
    success(json!({}))
}

async fn refresh(State(backend): State<Arc<MockBackend>>, Json(body): Json<Value>) -> Response {
    backend.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(token) = body.get("refresh_token").and_then(Value::as_str) {
        backend.refresh_tokens_seen.lock().push(token.to_string());
    }

    tokio::time::sleep(backend.refresh_delay).await;

    let behavior = backend.behavior.lock().clone();
    match behavior {
        RefreshBehavior::Succeed { access, refresh } => {
            backend.set_valid_access(&access);
            success(auth_payload(&access, &refresh))
        }
        RefreshBehavior::SucceedButStillRejected => success(auth_payload("A-rejected", "R-rotated")),
        RefreshBehavior::Reject401 => failure(StatusCode::UNAUTHORIZED, "Invalid refresh token"),
        RefreshBehavior::Fail500 => failure(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable"),
    }
}

async fn verify(State(backend): State<Arc<MockBackend>>, Json(body): Json<Value>) -> Response {
    backend.verify_calls.fetch_add(1, Ordering::SeqCst);

    if body.get("id_token").and_then(Value::as_str) != Some(GOOD_GOOGLE_TOKEN) {
        return failure(StatusCode::UNAUTHORIZED, "Invalid Google token");
    }

    backend.set_valid_access("A1");
    success(auth_payload("A1", "R1"))
}

//! # API Request
//!
//! Transport-independent description of one backend call, replayable after a
//! token renewal.

use reqwest::Method;
use serde::Serialize;

use super::auth::{GOOGLE_VERIFY_PATH, REFRESH_PATH};
use crate::core::error::{ApiError, Result};

/// Endpoints that must never carry a bearer token or trigger a renewal.
const AUTH_ENDPOINTS: [&str; 2] = [GOOGLE_VERIFY_PATH, REFRESH_PATH];

#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST with a JSON body.
    pub fn post_json<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let mut request = Self::new(Method::POST, path);
        request.body = Some(body);
        Ok(request)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Sign-in and refresh calls are sent without a bearer token and are never renewed.
    pub fn is_auth_endpoint(&self) -> bool {
        AUTH_ENDPOINTS.iter().any(|endpoint| self.path.contains(endpoint))
    }

    pub fn is_retried(&self) -> bool {
        self.retried
    }

    /// Whether a 401 on this request may start (or join) a renewal.
    pub fn can_retry(&self) -> bool {
        !self.retried && !self.is_auth_endpoint()
    }

    /// Mark as replayed. Idempotent.
    pub fn mark_retried(&mut self) {
        self.retried = true;
    }
}

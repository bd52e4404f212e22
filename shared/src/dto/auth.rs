use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client platform reported to the backend when tokens are issued.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Mobile,
    Web,
    Desktop,
}

/// Google ID token verification request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoogleVerifyRequest {
    pub id_token: String,
    pub device_type: DeviceType,
}

impl GoogleVerifyRequest {
    pub fn mobile(id_token: impl Into<String>) -> Self {
        Self {
            id_token: id_token.into(),
            device_type: DeviceType::Mobile,
        }
    }
}

/// Refresh token exchange request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
    pub device_type: DeviceType,
}

impl RefreshTokenRequest {
    pub fn mobile(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
            device_type: DeviceType::Mobile,
        }
    }
}

/// Payload of a successful verify or refresh call.
///
/// The backend rotates `refresh_token` on every refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthPayload {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// User profile (public, safe to keep in memory and show in the UI)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub profile_picture: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

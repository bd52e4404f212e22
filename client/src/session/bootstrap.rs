//! # Session Bootstrap
//!
//! Runs once at startup: turns a persisted refresh token into a live session
//! before the UI decides between the sign-in screen and the main screens.

use crate::services::api::ApiClient;
use crate::session::store::SessionSnapshot;

/// Restore the session from the persisted refresh token.
///
/// No refresh token means no network call. Any renewal failure is logged and
/// swallowed; a 401 from the refresh endpoint has already cleared the
/// session. `initialized` is latched on every path, so the UI never waits on
/// the loading screen forever.
#[tracing::instrument(skip_all)]
pub async fn bootstrap(client: &ApiClient) -> SessionSnapshot {
    let session = client.session();

    if session.renewal_credential().await.is_none() {
        tracing::info!("No stored refresh token, starting signed out");
    } else {
        match client.renew_session().await {
            Ok(_) => tracing::info!("Session restored from stored refresh token"),
            Err(e) if e.ends_session() => tracing::info!(error = %e, "Stored session expired"),
            Err(e) => tracing::warn!(error = %e, "Session restore failed, starting signed out"),
        }
    }

    session.set_initialized(true);
    session.snapshot()
}

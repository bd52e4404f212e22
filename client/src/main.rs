//! Signals client CLI
//!
//! Restores the stored session, signs in with `SIGNALS_GOOGLE_ID_TOKEN` when
//! signed out, then lists the subscription packages.

use std::process::ExitCode;
use std::sync::Arc;

use client::config::init_config;
use client::logging::{self, LogConfig};
use client::services::api::DEFAULT_PAGE_LIMIT;
use client::services::storage::FileSecureStore;
use client::session::bootstrap;
use client::{ApiClient, ApiService, RenewalGate, SessionStore};
use lib_utils::envs::get_env;

/// Features shown per package before "+N more".
const FEATURE_PREVIEW: usize = 3;

#[tokio::main]
async fn main() -> ExitCode {
    let _log_guard = logging::init(&LogConfig::from_env());

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Client exited with error");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> client::Result<()> {
    let config = init_config()?;
    tracing::info!(api_base_url = %config.api_base_url, "Starting signals client");

    let secure = Arc::new(FileSecureStore::new(config.token_file.clone()));
    let session = Arc::new(SessionStore::new(secure));
    let gate = Arc::new(RenewalGate::new());
    let api_client = Arc::new(ApiClient::new(config, session.clone(), gate)?);

    let snapshot = bootstrap(&api_client).await;
    let api: Arc<dyn ApiService> = api_client;

    if !snapshot.authenticated {
        let Ok(id_token) = get_env("SIGNALS_GOOGLE_ID_TOKEN") else {
            println!("Signed out. Set SIGNALS_GOOGLE_ID_TOKEN to sign in.");
            return Ok(());
        };

        let payload = match api.sign_in_with_google(&id_token).await {
            Ok(payload) => payload,
            // Signed in for this run; the refresh token just could not be saved
            Err(e @ client::ApiError::Storage(_)) if session.is_authenticated() => {
                eprintln!("Warning: {}", e);
                return list_packages(api.as_ref()).await;
            }
            Err(e) => return Err(e),
        };
        println!("Signed in as {} <{}>", payload.user.name, payload.user.email);
    } else if let Some(user) = &snapshot.user {
        println!("Welcome back, {}", user.name);
    }

    list_packages(api.as_ref()).await
}

async fn list_packages(api: &dyn ApiService) -> client::Result<()> {
    let page = api.get_packages(DEFAULT_PAGE_LIMIT, 0).await?;

    if page.packages.is_empty() {
        println!("No packages available");
        return Ok(());
    }

    println!("{} of {} packages", page.packages.len(), page.total);
    for package in &page.packages {
        println!(
            "  {:<28} {:<7} {:>9}",
            package.name,
            format!("{:?}", package.asset_class),
            package.formatted_price()
        );

        let (shown, remaining) = package.feature_preview(FEATURE_PREVIEW);
        for feature in shown {
            println!("      - {}", feature);
        }
        if remaining > 0 {
            println!("      +{} more", remaining);
        }
    }
    Ok(())
}

//! # Token Secret Refresher
//!
//! A Kubernetes job that fetches an OAuth2 client-credentials access token and
//! writes it into a Kubernetes secret.
//!
//! ## Overview
//!
//! Each invocation performs exactly one pass:
//!
//! 1. **Validate configuration** - `AUTH_USERNAME`, `AUTH_CLIENT_SECRET`, `AUTH_URL`,
//!    `SECRET_NAME`, `SECRET_NAMESPACE` must all be set
//! 2. **Request a token** - `POST {AUTH_URL}?grant_type=client_credentials` with Basic auth
//! 3. **Store the token** - create the secret, or update its `token` key in place
//!
//! Scheduling is left to a `CronJob`. The process exits `0` on success and `1`
//! on any failure, after logging the failing stage.

use anyhow::{Context, Result};
use kube::Client;
use std::process::ExitCode;
use token_secret_refresher::auth::{build_http_client, TokenClient};
use token_secret_refresher::config::{EnvironmentConfig, LogConfig};
use token_secret_refresher::error::RefreshError;
use token_secret_refresher::manager::TokenManager;
use token_secret_refresher::observability;
use token_secret_refresher::reconciler::ReconcileOutcome;
use token_secret_refresher::store::KubeSecretStore;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Configure rustls crypto provider FIRST, before any client is built
    // Required for rustls 0.23+ when no default provider is set via features
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("Failed to install rustls crypto provider");
        return ExitCode::FAILURE;
    }

    if let Err(e) = observability::init_tracing(&LogConfig::from_env()) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    info!(
        git_hash = env!("BUILD_GIT_HASH"),
        built = env!("BUILD_DATETIME"),
        "Starting token secret refresher"
    );

    match run().await {
        Ok(outcome) => {
            info!(outcome = outcome.as_str(), "Token refresh completed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let stage = e
                .downcast_ref::<RefreshError>()
                .map_or("bootstrap", |refresh| refresh.stage().as_str());
            error!(stage, error = %format!("{e:#}"), "Failed to get token");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ReconcileOutcome> {
    // Validate before any client exists so a misconfigured run touches nothing
    let config = EnvironmentConfig::from_env()?;

    let http_client = build_http_client(config.insecure_skip_tls_verify)
        .context("Failed to create HTTP client")?;
    let client = Client::try_default()
        .await
        .context("Failed initializing Kubernetes client")?;

    let manager = TokenManager::new(
        config,
        TokenClient::new(http_client),
        KubeSecretStore::new(client),
    );

    Ok(manager.create_or_update().await?)
}

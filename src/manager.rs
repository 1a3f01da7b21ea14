//! # Token Manager
//!
//! Runs one refresh pass: encode credentials, request a token, extract it,
//! and reconcile the target secret. The first failing stage ends the run;
//! nothing is retried.

use crate::auth::{basic_auth_header, extract_access_token, TokenClient};
use crate::config::EnvironmentConfig;
use crate::error::RefreshError;
use crate::reconciler::{ReconcileOutcome, SecretReconciler};
use crate::store::CredentialStore;
use reqwest::Url;
use tracing::{info, info_span, Instrument};

/// Sequences a single token refresh
#[derive(Debug)]
pub struct TokenManager<S> {
    config: EnvironmentConfig,
    token_client: TokenClient,
    store: S,
}

impl<S: CredentialStore> TokenManager<S> {
    pub fn new(config: EnvironmentConfig, token_client: TokenClient, store: S) -> Self {
        Self {
            config,
            token_client,
            store,
        }
    }

    /// Fetch a fresh access token and store it in the target secret
    ///
    /// # Errors
    ///
    /// Returns a [`RefreshError`] tagged with the stage that failed.
    pub async fn create_or_update(&self) -> Result<ReconcileOutcome, RefreshError> {
        let target = &self.config.target;
        let span = info_span!(
            "token_refresh",
            secret = %target.name,
            namespace = %target.namespace,
        );

        async move {
            let authorization =
                basic_auth_header(&self.config.auth_username, &self.config.auth_client_secret);

            info!(auth_host = %auth_host(&self.config.auth_url), "Requesting access token");
            let body = self
                .token_client
                .fetch(&self.config.auth_url, &authorization)
                .await?;

            let token = extract_access_token(&body)?;
            info!("Access token received");

            SecretReconciler::new(&self.store)
                .reconcile(target, &token)
                .await
        }
        .instrument(span)
        .await
    }
}

/// Host of the token endpoint, so userinfo or query parameters never reach the logs
fn auth_host(auth_url: &str) -> String {
    Url::parse(auth_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_owned))
        .unwrap_or_else(|| "<invalid url>".to_string())
}

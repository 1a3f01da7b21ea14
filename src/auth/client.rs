//! # Token Endpoint Client
//!
//! Issues the client-credentials token request and returns the raw response body.
//!
//! The HTTP transport itself is built by [`build_http_client`] at startup; the
//! only transport setting the job controls is certificate validation.

use crate::constants::GRANT_TYPE;
use crate::error::RequestError;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Client;
use tracing::{debug, warn};

/// Build the HTTP client used for the token request
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_http_client(insecure_skip_tls_verify: bool) -> reqwest::Result<Client> {
    if insecure_skip_tls_verify {
        warn!("TLS certificate validation is disabled for the token request");
    }
    Client::builder()
        .danger_accept_invalid_certs(insecure_skip_tls_verify)
        .build()
}

/// Client for the authorization server's token endpoint
#[derive(Debug, Clone)]
pub struct TokenClient {
    http_client: Client,
}

impl TokenClient {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }

    /// `POST {auth_url}?grant_type=client_credentials` with an empty body
    ///
    /// The body is returned whatever the status code; an error page fails
    /// later when the token is extracted from it. The response is owned by
    /// this function and dropped on every return path, which releases its
    /// connection back to the pool.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] naming whether the request could not be
    /// built, could not be sent, or its body could not be read.
    pub async fn fetch(&self, auth_url: &str, authorization: &str) -> Result<Vec<u8>, RequestError> {
        let mut header = HeaderValue::from_str(authorization)?;
        header.set_sensitive(true);

        let request = self
            .http_client
            .post(auth_url)
            .query(&[("grant_type", GRANT_TYPE)])
            .header(AUTHORIZATION, header)
            .build()
            .map_err(RequestError::Build)?;

        debug!(url = %request.url(), "Sending token request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(RequestError::Transport)?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Token endpoint responded");
        } else {
            warn!(status = status.as_u16(), "Token endpoint returned a non-success status");
        }

        let body = response.bytes().await.map_err(RequestError::Body)?;
        Ok(body.to_vec())
    }
}

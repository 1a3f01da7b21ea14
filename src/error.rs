//! # Errors
//!
//! Error taxonomy for a single refresh run. Every failure is tagged with the
//! [`Stage`] it came from so the binary can report where the run stopped.

use crate::config::SecretTarget;
use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

/// Pipeline stage a [`RefreshError`] originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Required environment variables missing or empty
    Configuration,
    /// Building, sending, or reading the token request
    TokenRequest,
    /// Parsing the token response
    TokenResponse,
    /// Fetching the existing secret
    SecretProbe,
    /// Creating a new secret
    SecretCreate,
    /// Updating the existing secret
    SecretUpdate,
}

impl Stage {
    /// Get the label used in structured log fields
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Configuration => "configuration",
            Stage::TokenRequest => "token-request",
            Stage::TokenResponse => "token-response",
            Stage::SecretProbe => "secret-probe",
            Stage::SecretCreate => "secret-create",
            Stage::SecretUpdate => "secret-update",
        }
    }
}

/// Terminal error of a refresh run
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("please set {}", .missing.join(","))]
    Configuration { missing: Vec<&'static str> },
    #[error("failed sending the token request")]
    Request(#[from] RequestError),
    #[error("failed to extract token")]
    ResponseParse(#[from] ParseError),
    #[error("failed getting secret {target}")]
    StoreProbe {
        target: SecretTarget,
        #[source]
        source: StoreError,
    },
    #[error("failed to create secret {target}")]
    StoreCreate {
        target: SecretTarget,
        #[source]
        source: StoreError,
    },
    #[error("failed to update secret {target}")]
    StoreUpdate {
        target: SecretTarget,
        #[source]
        source: StoreError,
    },
}

impl RefreshError {
    /// Stage the run was in when it failed
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            RefreshError::Configuration { .. } => Stage::Configuration,
            RefreshError::Request(_) => Stage::TokenRequest,
            RefreshError::ResponseParse(_) => Stage::TokenResponse,
            RefreshError::StoreProbe { .. } => Stage::SecretProbe,
            RefreshError::StoreCreate { .. } => Stage::SecretCreate,
            RefreshError::StoreUpdate { .. } => Stage::SecretUpdate,
        }
    }
}

/// Failure while talking to the token endpoint
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid authorization header value")]
    InvalidHeader(#[from] InvalidHeaderValue),
    #[error("failed creating request of method POST")]
    Build(#[source] reqwest::Error),
    #[error("failed making request")]
    Transport(#[source] reqwest::Error),
    #[error("failed reading response body")]
    Body(#[source] reqwest::Error),
}

/// Failure while extracting the access token from the response body
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse JSON")]
    Json(#[from] serde_json::Error),
    #[error("token field is empty")]
    EmptyToken,
}

/// Failure reported by the credential store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The API server answered with an error status
    #[error("{reason} ({code}): {message}")]
    Api {
        code: u16,
        reason: String,
        message: String,
    },
    /// The request never produced an API status (connection, TLS, serialization)
    #[error("kubernetes client error")]
    Client(#[source] kube::Error),
}

impl StoreError {
    /// HTTP status code of an API error, if any
    #[must_use]
    pub fn code(&self) -> Option<u16> {
        match self {
            StoreError::Api { code, .. } => Some(*code),
            StoreError::Client(_) => None,
        }
    }
}

impl From<kube::Error> for StoreError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(response) => StoreError::Api {
                code: response.code,
                reason: response.reason,
                message: response.message,
            },
            other => StoreError::Client(other),
        }
    }
}

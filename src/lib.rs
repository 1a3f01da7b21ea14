//! Token Secret Refresher Library
//!
//! One-shot job that fetches an OAuth2 client-credentials access token and
//! stores it in a Kubernetes secret, creating the secret if it is missing.
//! Tests are included in the module files and under `tests/`.
//!
//! ## Flow
//!
//! 1. [`config::EnvironmentConfig::from_env`] validates the required variables
//! 2. [`auth::basic_auth_header`] encodes the client credentials
//! 3. [`auth::TokenClient::fetch`] calls the token endpoint
//! 4. [`auth::extract_access_token`] reads `token` from the response
//! 5. [`reconciler::SecretReconciler`] creates or updates the secret
//!
//! [`manager::TokenManager`] runs steps 2 to 5 as a single pass.

pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod manager;
pub mod observability;
pub mod reconciler;
pub mod store;

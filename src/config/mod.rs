//! # Configuration
//!
//! Settings loaded once from environment variables at startup.
//!
//! [`EnvironmentConfig`] can only be obtained through resolution, so holding
//! one means every required variable was present and non-empty.

pub mod logging;

pub use logging::{LogConfig, LogFormat};

use crate::constants::{
    AUTH_CLIENT_SECRET, AUTH_URL, AUTH_USERNAME, INSECURE_SKIP_TLS_VERIFY, REQUIRED_VARIABLES,
    SECRET_NAME, SECRET_NAMESPACE,
};
use crate::error::RefreshError;
use std::fmt;
use zeroize::Zeroizing;

/// Identity of the Kubernetes secret a run writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretTarget {
    pub name: String,
    pub namespace: String,
}

impl SecretTarget {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl fmt::Display for SecretTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Validated job configuration
#[derive(Clone)]
pub struct EnvironmentConfig {
    pub auth_username: String,
    pub auth_client_secret: Zeroizing<String>,
    /// Token endpoint without the grant type query
    pub auth_url: String,
    pub target: SecretTarget,
    pub insecure_skip_tls_verify: bool,
}

impl fmt::Debug for EnvironmentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentConfig")
            .field("auth_username", &self.auth_username)
            .field("auth_client_secret", &"<redacted>")
            .field("auth_url", &self.auth_url)
            .field("target", &self.target)
            .field("insecure_skip_tls_verify", &self.insecure_skip_tls_verify)
            .finish()
    }
}

impl EnvironmentConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::Configuration`] naming every required variable
    /// that is unset or empty.
    pub fn from_env() -> Result<Self, RefreshError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::Configuration`] naming every required variable
    /// that is unset or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RefreshError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing = missing_variables(&lookup);
        if !missing.is_empty() {
            return Err(RefreshError::Configuration { missing });
        }

        let required = |name: &str| lookup(name).unwrap_or_default();

        Ok(Self {
            auth_username: required(AUTH_USERNAME),
            auth_client_secret: Zeroizing::new(required(AUTH_CLIENT_SECRET)),
            auth_url: required(AUTH_URL),
            target: SecretTarget::new(required(SECRET_NAME), required(SECRET_NAMESPACE)),
            insecure_skip_tls_verify: insecure_skip_tls_verify(lookup(INSECURE_SKIP_TLS_VERIFY)),
        })
    }
}

/// Names of the required variables that are unset or empty, in declaration order
pub fn missing_variables<F>(lookup: F) -> Vec<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    REQUIRED_VARIABLES
        .into_iter()
        .filter(|name| lookup(name).is_none_or(|value| value.is_empty()))
        .collect()
}

/// Only the exact string `"true"` disables certificate validation
fn insecure_skip_tls_verify(value: Option<String>) -> bool {
    value.as_deref() == Some("true")
}

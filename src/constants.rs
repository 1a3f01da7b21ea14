//! # Constants
//!
//! Environment variable names and fixed protocol values shared across the job.

/// Username sent to the authorization server
pub const AUTH_USERNAME: &str = "AUTH_USERNAME";

/// Client secret sent to the authorization server
pub const AUTH_CLIENT_SECRET: &str = "AUTH_CLIENT_SECRET";

/// Base URL of the token endpoint (without the grant type query)
pub const AUTH_URL: &str = "AUTH_URL";

/// Name of the Kubernetes secret that receives the token
pub const SECRET_NAME: &str = "SECRET_NAME";

/// Namespace of the Kubernetes secret that receives the token
pub const SECRET_NAMESPACE: &str = "SECRET_NAMESPACE";

/// Set to exactly `"true"` to skip TLS certificate validation on the token request
pub const INSECURE_SKIP_TLS_VERIFY: &str = "INSECURE_SKIP_TLS_VERIFY";

/// Variables that must be set and non-empty, in reporting order
pub const REQUIRED_VARIABLES: [&str; 5] = [
    AUTH_USERNAME,
    AUTH_CLIENT_SECRET,
    AUTH_URL,
    SECRET_NAME,
    SECRET_NAMESPACE,
];

/// Key holding the access token, both in the token response and in the secret data
pub const TOKEN_KEY: &str = "token";

/// OAuth2 grant requested from the token endpoint
pub const GRANT_TYPE: &str = "client_credentials";

/// Secret type used when the job creates the secret
pub const SECRET_TYPE_OPAQUE: &str = "Opaque";

/// Default tracing filter target when `RUST_LOG` is not set
pub const LOG_TARGET: &str = "token_secret_refresher";

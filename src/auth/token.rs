//! # Access Token
//!
//! Extracts the access token from the token endpoint's JSON response.

use crate::error::ParseError;
use serde::Deserialize;
use std::fmt;
use zeroize::Zeroizing;

/// Access token for a single run
///
/// Never cached; the buffer is wiped when the run drops it.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Token endpoint response; every field other than `token` is ignored
#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Parse the response body and extract its `token` field
///
/// # Errors
///
/// Returns [`ParseError::Json`] for malformed JSON or a missing `token`
/// field, and [`ParseError::EmptyToken`] when the field is an empty string.
pub fn extract_access_token(body: &[u8]) -> Result<AccessToken, ParseError> {
    let response: TokenResponse = serde_json::from_slice(body)?;
    if response.token.is_empty() {
        return Err(ParseError::EmptyToken);
    }
    Ok(AccessToken::new(response.token))
}

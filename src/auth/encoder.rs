//! # Basic Authentication
//!
//! Encodes client credentials into an HTTP `Authorization` header value.

use base64::{engine::general_purpose, Engine as _};
use zeroize::Zeroizing;

/// Build `Basic base64(username:secret)`
///
/// Intermediate buffers holding the plaintext secret are wiped on drop.
#[must_use]
pub fn basic_auth_header(username: &str, client_secret: &str) -> Zeroizing<String> {
    let credentials = Zeroizing::new(format!("{username}:{client_secret}"));
    let encoded = Zeroizing::new(general_purpose::STANDARD.encode(credentials.as_bytes()));
    Zeroizing::new(format!("Basic {}", encoded.as_str()))
}

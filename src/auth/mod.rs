//! # Authorization Server
//!
//! Client-credentials token acquisition: Basic header encoding, the token
//! request itself, and extraction of the token from the response.

pub mod client;
pub mod encoder;
pub mod token;

pub use client::{build_http_client, TokenClient};
pub use encoder::basic_auth_header;
pub use token::{extract_access_token, AccessToken};

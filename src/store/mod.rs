//! # Credential Store
//!
//! Storage seam for the secret that receives the access token.
//!
//! The reconciler only ever needs three calls: fetch the secret, create it,
//! or write it back. A missing secret is a distinct [`ProbeOutcome`] rather
//! than an error so it can never be confused with a permission or transport
//! failure.

use crate::config::SecretTarget;
use crate::error::StoreError;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;

pub mod kubernetes;

pub use kubernetes::KubeSecretStore;

/// Result of looking up the target secret
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    /// The secret exists; carries the object as currently stored
    Found(Box<Secret>),
    /// The store reported that no such secret exists
    NotFound,
}

/// Store holding named, namespaced secrets
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the secret, mapping the store's "not found" status to [`ProbeOutcome::NotFound`]
    async fn probe(&self, target: &SecretTarget) -> Result<ProbeOutcome, StoreError>;

    /// Create a new secret in `namespace`
    async fn create(&self, namespace: &str, secret: &Secret) -> Result<Secret, StoreError>;

    /// Replace an existing secret in `namespace`
    ///
    /// Implementations should honor `metadata.resourceVersion` so a concurrent
    /// modification fails instead of being overwritten.
    async fn update(&self, namespace: &str, secret: &Secret) -> Result<Secret, StoreError>;
}

/// A borrowed store is a store, so a caller can keep its handle while a
/// [`crate::manager::TokenManager`] runs against it
#[async_trait]
impl<S: CredentialStore + ?Sized> CredentialStore for &S {
    async fn probe(&self, target: &SecretTarget) -> Result<ProbeOutcome, StoreError> {
        (**self).probe(target).await
    }

    async fn create(&self, namespace: &str, secret: &Secret) -> Result<Secret, StoreError> {
        (**self).create(namespace, secret).await
    }

    async fn update(&self, namespace: &str, secret: &Secret) -> Result<Secret, StoreError> {
        (**self).update(namespace, secret).await
    }
}

//! # Kubernetes Secret Store
//!
//! [`CredentialStore`] backed by the Kubernetes API.

use super::{CredentialStore, ProbeOutcome};
use crate::config::SecretTarget;
use crate::error::StoreError;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::api::{Api, PostParams};
use kube::{Client, ResourceExt};
use std::fmt;
use tracing::debug;

/// Secrets accessed through a Kubernetes client
#[derive(Clone)]
pub struct KubeSecretStore {
    client: Client,
}

impl fmt::Debug for KubeSecretStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KubeSecretStore").finish_non_exhaustive()
    }
}

impl KubeSecretStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn secrets(&self, namespace: &str) -> Api<Secret> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl CredentialStore for KubeSecretStore {
    async fn probe(&self, target: &SecretTarget) -> Result<ProbeOutcome, StoreError> {
        match self.secrets(&target.namespace).get(&target.name).await {
            Ok(secret) => Ok(ProbeOutcome::Found(Box::new(secret))),
            Err(kube::Error::Api(api_err)) if api_err.code == 404 => {
                debug!(secret = %target, "Secret not found");
                Ok(ProbeOutcome::NotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create(&self, namespace: &str, secret: &Secret) -> Result<Secret, StoreError> {
        Ok(self
            .secrets(namespace)
            .create(&PostParams::default(), secret)
            .await?)
    }

    async fn update(&self, namespace: &str, secret: &Secret) -> Result<Secret, StoreError> {
        Ok(self
            .secrets(namespace)
            .replace(&secret.name_any(), &PostParams::default(), secret)
            .await?)
    }
}

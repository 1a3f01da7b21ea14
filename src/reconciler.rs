//! # Secret Reconciler
//!
//! Brings the target secret's `token` key to the freshly fetched value.
//!
//! ## Reconciliation Flow
//!
//! 1. Probe the store for the secret
//! 2. Choose a path:
//!    - **Found**: set `data.token`, keep every other key and all metadata, update
//!    - **Not found**: build a new `Opaque` secret holding only `token`, create
//!    - **Any other probe failure**: stop; creation is never attempted
//!
//! The token is stored as its raw bytes in `data`. The API server's base64
//! encoding of `data` on the wire is the only encoding applied, so consumers
//! of the secret read the token verbatim.
//!
//! Probe and write are separate calls. The update carries the probed
//! `resourceVersion`, so a change made in between fails the update rather
//! than being overwritten; two runs racing on a missing secret make the
//! second create fail with a conflict.

use crate::auth::AccessToken;
use crate::config::SecretTarget;
use crate::constants::{SECRET_TYPE_OPAQUE, TOKEN_KEY};
use crate::error::RefreshError;
use crate::store::{CredentialStore, ProbeOutcome};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ByteString;
use std::collections::BTreeMap;
use tracing::info;

/// Which write path a successful reconciliation took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Created,
    Updated,
}

impl ReconcileOutcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconcileOutcome::Created => "created",
            ReconcileOutcome::Updated => "updated",
        }
    }
}

/// Create-or-update of a single secret against a [`CredentialStore`]
#[derive(Debug)]
pub struct SecretReconciler<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: CredentialStore + ?Sized> SecretReconciler<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Write `token` into the target secret, creating the secret if needed
    ///
    /// # Errors
    ///
    /// - [`RefreshError::StoreProbe`] if the lookup fails for any reason other than "not found"
    /// - [`RefreshError::StoreUpdate`] if the existing secret cannot be written back
    /// - [`RefreshError::StoreCreate`] if the new secret cannot be created
    pub async fn reconcile(
        &self,
        target: &SecretTarget,
        token: &AccessToken,
    ) -> Result<ReconcileOutcome, RefreshError> {
        let outcome = self
            .store
            .probe(target)
            .await
            .map_err(|source| RefreshError::StoreProbe {
                target: target.clone(),
                source,
            })?;

        match outcome {
            ProbeOutcome::Found(mut secret) => {
                info!(
                    secret = %target.name,
                    namespace = %target.namespace,
                    "Secret exists, updating token"
                );
                apply_token(&mut secret, token);
                self.store
                    .update(&target.namespace, &secret)
                    .await
                    .map_err(|source| RefreshError::StoreUpdate {
                        target: target.clone(),
                        source,
                    })?;
                info!(
                    secret = %target.name,
                    namespace = %target.namespace,
                    "Secret updated"
                );
                Ok(ReconcileOutcome::Updated)
            }
            ProbeOutcome::NotFound => {
                info!(
                    secret = %target.name,
                    namespace = %target.namespace,
                    "Secret does not exist, creating"
                );
                let secret = build_secret(target, token);
                self.store
                    .create(&target.namespace, &secret)
                    .await
                    .map_err(|source| RefreshError::StoreCreate {
                        target: target.clone(),
                        source,
                    })?;
                info!(
                    secret = %target.name,
                    namespace = %target.namespace,
                    "Secret created"
                );
                Ok(ReconcileOutcome::Created)
            }
        }
    }
}

/// New `Opaque` secret holding only the token
#[must_use]
pub fn build_secret(target: &SecretTarget, token: &AccessToken) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(target.name.clone()),
            namespace: Some(target.namespace.clone()),
            ..Default::default()
        },
        data: Some(BTreeMap::from([(
            TOKEN_KEY.to_string(),
            ByteString(token.as_bytes().to_vec()),
        )])),
        type_: Some(SECRET_TYPE_OPAQUE.to_string()),
        ..Default::default()
    }
}

/// Set `data.token` on an existing secret, leaving everything else as is
pub fn apply_token(secret: &mut Secret, token: &AccessToken) {
    secret
        .data
        .get_or_insert_with(BTreeMap::new)
        .insert(TOKEN_KEY.to_string(), ByteString(token.as_bytes().to_vec()));
}

//! Common test utilities
//!
//! Provides rustls crypto provider setup, an in-memory credential store that
//! records every call, and configuration helpers.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ByteString;
use kube::ResourceExt;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, Once};
use token_secret_refresher::config::{EnvironmentConfig, SecretTarget};
use token_secret_refresher::constants::{
    AUTH_CLIENT_SECRET, AUTH_URL, AUTH_USERNAME, SECRET_NAME, SECRET_NAMESPACE,
};
use token_secret_refresher::error::StoreError;
use token_secret_refresher::store::{CredentialStore, ProbeOutcome};

static RUSTLS_INIT: Once = Once::new();

/// Initialize rustls crypto provider for tests
///
/// Uses a `Once` to ensure it's only called once per test binary.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        // Ignore the error if a unit test in the same process got there first
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

pub const USERNAME: &str = "user";
pub const CLIENT_SECRET: &str = "secret";
/// `Basic base64("user:secret")`
pub const BASIC_HEADER: &str = "Basic dXNlcjpzZWNyZXQ=";
pub const NAME: &str = "api-token";
pub const NAMESPACE: &str = "jobs";

/// Configuration pointing at `auth_url` and the `jobs/api-token` secret
pub fn config_for(auth_url: &str) -> EnvironmentConfig {
    let env = HashMap::from([
        (AUTH_USERNAME, USERNAME.to_string()),
        (AUTH_CLIENT_SECRET, CLIENT_SECRET.to_string()),
        (AUTH_URL, auth_url.to_string()),
        (SECRET_NAME, NAME.to_string()),
        (SECRET_NAMESPACE, NAMESPACE.to_string()),
    ]);
    EnvironmentConfig::from_lookup(|name| env.get(name).cloned())
        .expect("test configuration is complete")
}

pub fn target() -> SecretTarget {
    SecretTarget::new(NAME, NAMESPACE)
}

/// Existing secret with an unrelated `foo: bar` key
pub fn existing_secret(token: &str) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(NAME.to_string()),
            namespace: Some(NAMESPACE.to_string()),
            annotations: Some(BTreeMap::from([(
                "owner".to_string(),
                "platform-team".to_string(),
            )])),
            ..Default::default()
        },
        data: Some(BTreeMap::from([
            ("foo".to_string(), ByteString(b"bar".to_vec())),
            ("token".to_string(), ByteString(token.as_bytes().to_vec())),
        ])),
        type_: Some("Opaque".to_string()),
        ..Default::default()
    }
}

/// Call made against [`MemorySecretStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Probe,
    Create,
    Update,
}

/// Failure injected into a [`MemorySecretStore`] operation
#[derive(Debug, Clone, Copy)]
pub struct InjectedFailure {
    pub code: u16,
    pub reason: &'static str,
}

impl InjectedFailure {
    pub const FORBIDDEN: Self = Self {
        code: 403,
        reason: "Forbidden",
    };
    pub const INTERNAL: Self = Self {
        code: 500,
        reason: "InternalError",
    };
    pub const CONFLICT: Self = Self {
        code: 409,
        reason: "Conflict",
    };

    fn into_error(self) -> StoreError {
        StoreError::Api {
            code: self.code,
            reason: self.reason.to_string(),
            message: format!("injected {} failure", self.reason),
        }
    }
}

/// In-memory secret store keyed by `(namespace, name)`
///
/// Behaves like the API server for the calls the reconciler makes: 404-style
/// `NotFound` on a missing secret, conflict on creating an existing one, and
/// a bumped `resourceVersion` on every write.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: Mutex<BTreeMap<(String, String), Secret>>,
    calls: Mutex<Vec<StoreCall>>,
    probe_failure: Option<InjectedFailure>,
    create_failure: Option<InjectedFailure>,
    update_failure: Option<InjectedFailure>,
    revision: Mutex<u64>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(secret: Secret) -> Self {
        let store = Self::new();
        let namespace = secret.namespace().unwrap_or_default();
        store
            .secrets
            .lock()
            .unwrap()
            .insert((namespace, secret.name_any()), secret);
        store
    }

    pub fn failing_probe(mut self, failure: InjectedFailure) -> Self {
        self.probe_failure = Some(failure);
        self
    }

    pub fn failing_create(mut self, failure: InjectedFailure) -> Self {
        self.create_failure = Some(failure);
        self
    }

    pub fn failing_update(mut self, failure: InjectedFailure) -> Self {
        self.update_failure = Some(failure);
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn get(&self, namespace: &str, name: &str) -> Option<Secret> {
        self.secrets
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// Value stored under `key`, decoded as UTF-8
    pub fn value(&self, namespace: &str, name: &str, key: &str) -> Option<String> {
        let secret = self.get(namespace, name)?;
        let bytes = secret.data?.get(key)?.0.clone();
        String::from_utf8(bytes).ok()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn stamp(&self, secret: &Secret) -> Secret {
        let mut revision = self.revision.lock().unwrap();
        *revision += 1;
        let mut stored = secret.clone();
        stored.metadata.resource_version = Some(revision.to_string());
        stored
    }
}

#[async_trait]
impl CredentialStore for MemorySecretStore {
    async fn probe(&self, target: &SecretTarget) -> Result<ProbeOutcome, StoreError> {
        self.record(StoreCall::Probe);
        if let Some(failure) = self.probe_failure {
            return Err(failure.into_error());
        }
        Ok(match self.get(&target.namespace, &target.name) {
            Some(secret) => ProbeOutcome::Found(Box::new(secret)),
            None => ProbeOutcome::NotFound,
        })
    }

    async fn create(&self, namespace: &str, secret: &Secret) -> Result<Secret, StoreError> {
        self.record(StoreCall::Create);
        if let Some(failure) = self.create_failure {
            return Err(failure.into_error());
        }
        let key = (namespace.to_string(), secret.name_any());
        if self.secrets.lock().unwrap().contains_key(&key) {
            return Err(InjectedFailure {
                code: 409,
                reason: "AlreadyExists",
            }
            .into_error());
        }
        let stored = self.stamp(secret);
        self.secrets.lock().unwrap().insert(key, stored.clone());
        Ok(stored)
    }

    async fn update(&self, namespace: &str, secret: &Secret) -> Result<Secret, StoreError> {
        self.record(StoreCall::Update);
        if let Some(failure) = self.update_failure {
            return Err(failure.into_error());
        }
        let key = (namespace.to_string(), secret.name_any());
        if !self.secrets.lock().unwrap().contains_key(&key) {
            return Err(InjectedFailure {
                code: 404,
                reason: "NotFound",
            }
            .into_error());
        }
        let stored = self.stamp(secret);
        self.secrets.lock().unwrap().insert(key, stored.clone());
        Ok(stored)
    }
}

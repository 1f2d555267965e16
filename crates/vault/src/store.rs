use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// One persisted credential link. The secret only ever appears here
/// encrypted; plaintext never leaves the vault's decrypt scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub user_id: String,
    pub marketplace_id: String,
    pub encrypted_secret: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential backend error: {0}")]
    Backend(String),
}

/// Credential persistence, keyed by (user, marketplace).
///
/// `put` is an upsert: re-storing the same key overwrites, it never
/// duplicates, which is what makes orchestrator-level retries safe.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn put(&self, record: CredentialRecord) -> Result<(), StoreError>;

    async fn get(
        &self,
        user_id: &str,
        marketplace_id: &str,
    ) -> Result<Option<CredentialRecord>, StoreError>;

    async fn delete(&self, user_id: &str, marketplace_id: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    records: Arc<RwLock<HashMap<(String, String), CredentialRecord>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn put(&self, record: CredentialRecord) -> Result<(), StoreError> {
        let key = (record.user_id.clone(), record.marketplace_id.clone());
        self.records.write().unwrap().insert(key, record);
        Ok(())
    }

    async fn get(
        &self,
        user_id: &str,
        marketplace_id: &str,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        let key = (user_id.to_string(), marketplace_id.to_string());
        Ok(self.records.read().unwrap().get(&key).cloned())
    }

    async fn delete(&self, user_id: &str, marketplace_id: &str) -> Result<(), StoreError> {
        let key = (user_id.to_string(), marketplace_id.to_string());
        self.records.write().unwrap().remove(&key);
        Ok(())
    }
}

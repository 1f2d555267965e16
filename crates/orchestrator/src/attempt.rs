use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crosslist_types::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOperation {
    Publish,
    Signup,
}

/// Append-only audit record, one per (target, attempt).
///
/// Exists for debugging partial failures after the fact; it never carries
/// credentials or listing bodies, only ids and outcome summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub user_id: String,
    pub marketplace_id: String,
    pub operation: AttemptOperation,
    /// Short outcome summary, e.g. "auto_published" or "failed".
    pub outcome: String,
    pub error_kind: Option<ErrorKind>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum AttemptLogError {
    #[error("attempt log backend error: {0}")]
    Backend(String),
}

/// Attempt history sink. Failures to append are logged by the caller and
/// never affect the report.
#[async_trait]
pub trait AttemptLog: Send + Sync {
    async fn append(&self, record: AttemptRecord) -> Result<(), AttemptLogError>;
}

#[derive(Debug, Default)]
pub struct InMemoryAttemptLog {
    records: Arc<RwLock<Vec<AttemptRecord>>>,
}

impl InMemoryAttemptLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AttemptRecord> {
        self.records.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }
}

#[async_trait]
impl AttemptLog for InMemoryAttemptLog {
    async fn append(&self, record: AttemptRecord) -> Result<(), AttemptLogError> {
        self.records.write().unwrap().push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn appends_in_order() {
        let log = InMemoryAttemptLog::new();
        for marketplace in ["ebay", "etsy"] {
            log.append(AttemptRecord {
                user_id: "u1".to_string(),
                marketplace_id: marketplace.to_string(),
                operation: AttemptOperation::Publish,
                outcome: "auto_published".to_string(),
                error_kind: None,
                recorded_at: Utc::now(),
            })
            .await
            .unwrap();
        }

        let records = log.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].marketplace_id, "ebay");
        assert_eq!(records[1].marketplace_id, "etsy");
    }
}

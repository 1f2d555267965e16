use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::AttemptError;

/// Rendered text a seller pastes into a marketplace's posting UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyPasteData {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    /// Step-by-step instructions tailored to the marketplace's posting flow.
    pub instructions: Vec<String>,
}

/// Terminal classification of one (listing, marketplace) publish attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PublishOutcome {
    AutoPublished { listing_url: String },
    CopyPasteReady { copy_paste_data: CopyPasteData },
    Failed { error: AttemptError },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishAttemptResult {
    pub marketplace_id: String,
    #[serde(flatten)]
    pub outcome: PublishOutcome,
}

impl PublishAttemptResult {
    pub fn failed(marketplace_id: impl Into<String>, error: AttemptError) -> Self {
        Self {
            marketplace_id: marketplace_id.into(),
            outcome: PublishOutcome::Failed { error },
        }
    }
}

/// Entry in the `automaticPosts` bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomaticPost {
    pub marketplace: String,
    pub listing_url: String,
}

/// Entry in the `copyPastePosts` bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyPastePost {
    pub marketplace: String,
    pub copy_paste_data: CopyPasteData,
}

/// Entry in the `failedPosts` bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedPost {
    pub marketplace: String,
    pub error: AttemptError,
}

/// Aggregated outcome of one publish batch.
///
/// A partition of the per-target results: every resolved marketplace appears
/// in exactly one bucket, and each bucket preserves the caller's original
/// marketplace order regardless of completion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReport {
    pub automatic_posts: Vec<AutomaticPost>,
    pub copy_paste_posts: Vec<CopyPastePost>,
    pub failed_posts: Vec<FailedPost>,
}

impl PublishReport {
    /// Partition results into buckets, preserving the given order.
    pub fn from_results(results: Vec<PublishAttemptResult>) -> Self {
        let mut report = PublishReport::default();
        for result in results {
            match result.outcome {
                PublishOutcome::AutoPublished { listing_url } => {
                    report.automatic_posts.push(AutomaticPost {
                        marketplace: result.marketplace_id,
                        listing_url,
                    });
                }
                PublishOutcome::CopyPasteReady { copy_paste_data } => {
                    report.copy_paste_posts.push(CopyPastePost {
                        marketplace: result.marketplace_id,
                        copy_paste_data,
                    });
                }
                PublishOutcome::Failed { error } => {
                    report.failed_posts.push(FailedPost {
                        marketplace: result.marketplace_id,
                        error,
                    });
                }
            }
        }
        report
    }

    pub fn total(&self) -> usize {
        self.automatic_posts.len() + self.copy_paste_posts.len() + self.failed_posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Terminal status of one (user, marketplace) signup attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum SignupStatus {
    Success,
    /// The user must complete an external redirect flow; the URL travels in
    /// the result message. Nothing is persisted until that flow completes.
    PendingOauth { redirect_url: String },
    Failed { error: AttemptError },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupAttemptResult {
    pub marketplace: String,
    #[serde(flatten)]
    pub status: SignupStatus,
    pub message: String,
}

/// Aggregated outcome of one bulk signup batch, in caller order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupReport {
    pub results: Vec<SignupAttemptResult>,
}

impl SignupReport {
    pub fn succeeded(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, SignupStatus::Success))
            .count()
    }

    pub fn pending(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, SignupStatus::PendingOauth { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, SignupStatus::Failed { .. }))
            .count()
    }
}

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crosslist_catalog::{MarketplaceCatalog, Resolution};
use crosslist_connector::{ConnectorRegistry, MarketplaceConnector};
use crosslist_types::{
    AttemptError, ErrorKind, IntegrationMode, ListingSnapshot, PublishAttemptResult,
    PublishOutcome, PublishReport,
};
use crosslist_vault::{CredentialVault, SecretLease, VaultError};

use crate::attempt::{AttemptLog, AttemptOperation, AttemptRecord, InMemoryAttemptLog};
use crate::{BuilderError, OrchestratorConfig, OrchestratorError};

/// Builder for [`PublishOrchestrator`].
pub struct PublishOrchestratorBuilder {
    catalog: Option<Arc<MarketplaceCatalog>>,
    connectors: Option<Arc<ConnectorRegistry>>,
    vault: Option<Arc<CredentialVault>>,
    attempt_log: Option<Arc<dyn AttemptLog>>,
    config: OrchestratorConfig,
}

impl PublishOrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            catalog: None,
            connectors: None,
            vault: None,
            attempt_log: None,
            config: OrchestratorConfig::default(),
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<MarketplaceCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_connectors(mut self, connectors: Arc<ConnectorRegistry>) -> Self {
        self.connectors = Some(connectors);
        self
    }

    pub fn with_vault(mut self, vault: Arc<CredentialVault>) -> Self {
        self.vault = Some(vault);
        self
    }

    pub fn with_attempt_log(mut self, attempt_log: Arc<dyn AttemptLog>) -> Self {
        self.attempt_log = Some(attempt_log);
        self
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<PublishOrchestrator, BuilderError> {
        let catalog = self
            .catalog
            .ok_or(BuilderError::MissingField { field: "catalog" })?;
        let connectors = self
            .connectors
            .ok_or(BuilderError::MissingField { field: "connectors" })?;
        let vault = self
            .vault
            .ok_or(BuilderError::MissingField { field: "vault" })?;

        Ok(PublishOrchestrator {
            catalog,
            connectors,
            vault,
            attempt_log: self
                .attempt_log
                .unwrap_or_else(|| Arc::new(InMemoryAttemptLog::new())),
            config: self.config,
        })
    }
}

impl Default for PublishOrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A target that needs a network dispatch, with everything decided before
/// any call goes out.
struct ApiDispatch {
    index: usize,
    marketplace_id: String,
    connector: Arc<dyn MarketplaceConnector>,
    credential: Option<SecretLease>,
}

/// Fans one listing out to N marketplaces and reduces the per-target
/// outcomes into a single [`PublishReport`].
///
/// Strategy is decided purely from catalog capability flags: API targets
/// are dispatched concurrently, copy-paste targets are rendered inline, and
/// an API target whose credential is absent is downgraded to copy-paste
/// rather than failed. Once dispatch begins there is no whole-batch failure
/// state, only per-target results.
pub struct PublishOrchestrator {
    catalog: Arc<MarketplaceCatalog>,
    connectors: Arc<ConnectorRegistry>,
    vault: Arc<CredentialVault>,
    attempt_log: Arc<dyn AttemptLog>,
    config: OrchestratorConfig,
}

impl PublishOrchestrator {
    pub fn builder() -> PublishOrchestratorBuilder {
        PublishOrchestratorBuilder::new()
    }

    /// Publish `listing` to every marketplace in `marketplace_ids`.
    ///
    /// Dispatch follows caller order; completion order is unconstrained,
    /// but buckets in the returned report are re-sorted back into input
    /// order, so the result is deterministic regardless of network timing.
    pub async fn publish<S: AsRef<str>>(
        &self,
        listing: &ListingSnapshot,
        marketplace_ids: &[S],
        user_id: &str,
    ) -> Result<PublishReport, OrchestratorError> {
        // First occurrence wins: a repeated id must not publish twice.
        let mut seen = HashSet::new();
        let targets: Vec<&str> = marketplace_ids
            .iter()
            .map(AsRef::as_ref)
            .filter(|id| seen.insert(*id))
            .collect();

        if targets.len() > self.config.max_batch_size {
            return Err(OrchestratorError::BatchTooLarge {
                requested: targets.len(),
                max: self.config.max_batch_size,
            });
        }
        if targets.is_empty() {
            return Ok(PublishReport::default());
        }

        info!(
            batch_size = targets.len(),
            title = %listing.title,
            "Dispatching publish batch"
        );

        let mut slots: Vec<Option<PublishAttemptResult>> = Vec::new();
        slots.resize_with(targets.len(), || None);
        let mut dispatches: Vec<ApiDispatch> = Vec::new();

        for (index, resolution) in self.catalog.resolve(&targets).into_iter().enumerate() {
            let descriptor = match resolution {
                Resolution::Known(descriptor) => descriptor,
                Resolution::Unknown(id) => {
                    slots[index] = Some(PublishAttemptResult::failed(
                        id,
                        AttemptError::new(
                            ErrorKind::UnknownMarketplace,
                            "marketplace not in catalog",
                        ),
                    ));
                    continue;
                }
            };

            let Some(connector) = self.connectors.get(&descriptor.id) else {
                warn!(marketplace = %descriptor.id, "marketplace in catalog but no connector registered");
                slots[index] = Some(PublishAttemptResult::failed(
                    descriptor.id.clone(),
                    AttemptError::new(
                        ErrorKind::UnknownMarketplace,
                        "no connector registered for marketplace",
                    ),
                ));
                continue;
            };

            match descriptor.integration_mode {
                IntegrationMode::ManualCopyPaste => {
                    // Pure rendering; nothing to dispatch.
                    slots[index] = Some(PublishAttemptResult {
                        marketplace_id: descriptor.id.clone(),
                        outcome: PublishOutcome::CopyPasteReady {
                            copy_paste_data: connector.render_copy_paste(listing),
                        },
                    });
                }
                IntegrationMode::ApiAutoPublish => {
                    let credential = if descriptor.requires_credentials {
                        match self.vault.fetch(user_id, &descriptor.id).await {
                            Ok(lease) => Some(lease),
                            Err(VaultError::NotFound { .. }) => {
                                // Not connected: copy-paste instead of failing.
                                info!(
                                    marketplace = %descriptor.id,
                                    "no stored credential, downgrading to copy-paste"
                                );
                                slots[index] = Some(PublishAttemptResult {
                                    marketplace_id: descriptor.id.clone(),
                                    outcome: PublishOutcome::CopyPasteReady {
                                        copy_paste_data: connector.render_copy_paste(listing),
                                    },
                                });
                                continue;
                            }
                            Err(VaultError::Decryption { .. }) => {
                                slots[index] = Some(PublishAttemptResult::failed(
                                    descriptor.id.clone(),
                                    AttemptError::new(
                                        ErrorKind::InvalidCredentials,
                                        "stored credential is unusable, reconnect the marketplace",
                                    ),
                                ));
                                continue;
                            }
                            Err(e) => {
                                slots[index] = Some(PublishAttemptResult::failed(
                                    descriptor.id.clone(),
                                    AttemptError::new(ErrorKind::PersistenceFailed, e.to_string()),
                                ));
                                continue;
                            }
                        }
                    } else {
                        None
                    };

                    dispatches.push(ApiDispatch {
                        index,
                        marketplace_id: descriptor.id.clone(),
                        connector,
                        credential,
                    });
                }
            }
        }

        // One task per API target; a failure settles its own slot and
        // nothing else. The only suspension point is this all-settled join.
        let futures: Vec<_> = dispatches
            .into_iter()
            .map(|dispatch| {
                let timeout = self.config.timeout_for(&dispatch.marketplace_id);
                async move {
                    let ApiDispatch {
                        index,
                        marketplace_id,
                        connector,
                        credential,
                    } = dispatch;

                    let call = async {
                        let secret = credential.as_ref().map(|lease| lease.expose());
                        connector.publish(listing, secret).await
                    };

                    let outcome = match tokio::time::timeout(timeout, call).await {
                        Ok(Ok(published)) => PublishOutcome::AutoPublished {
                            listing_url: published.listing_url,
                        },
                        Ok(Err(err)) => {
                            warn!(marketplace = %marketplace_id, error = %err, "publish attempt failed");
                            PublishOutcome::Failed { error: err.into() }
                        }
                        Err(_) => {
                            warn!(marketplace = %marketplace_id, ?timeout, "publish attempt timed out");
                            PublishOutcome::Failed {
                                error: AttemptError::new(
                                    ErrorKind::Timeout,
                                    format!("no response within {}ms", timeout.as_millis()),
                                ),
                            }
                        }
                    };

                    (
                        index,
                        PublishAttemptResult {
                            marketplace_id,
                            outcome,
                        },
                    )
                }
            })
            .collect();

        for (index, result) in futures::future::join_all(futures).await {
            slots[index] = Some(result);
        }

        debug_assert!(slots.iter().all(Option::is_some));
        let results: Vec<PublishAttemptResult> = slots.into_iter().flatten().collect();

        self.record_attempts(user_id, &results).await;

        let report = PublishReport::from_results(results);
        info!(
            automatic = report.automatic_posts.len(),
            copy_paste = report.copy_paste_posts.len(),
            failed = report.failed_posts.len(),
            "Publish batch settled"
        );
        Ok(report)
    }

    async fn record_attempts(&self, user_id: &str, results: &[PublishAttemptResult]) {
        for result in results {
            let (outcome, error_kind) = match &result.outcome {
                PublishOutcome::AutoPublished { .. } => ("auto_published", None),
                PublishOutcome::CopyPasteReady { .. } => ("copy_paste_ready", None),
                PublishOutcome::Failed { error } => ("failed", Some(error.kind)),
            };

            let record = AttemptRecord {
                user_id: user_id.to_string(),
                marketplace_id: result.marketplace_id.clone(),
                operation: AttemptOperation::Publish,
                outcome: outcome.to_string(),
                error_kind,
                recorded_at: Utc::now(),
            };

            if let Err(e) = self.attempt_log.append(record).await {
                warn!(marketplace = %result.marketplace_id, error = %e, "failed to record publish attempt");
            }
        }
    }
}

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crosslist_catalog::{MarketplaceCatalog, Resolution};
use crosslist_connector::{ConnectorRegistry, MarketplaceConnector, SignupOutcome};
use crosslist_types::{AttemptError, ErrorKind, SignupAttemptResult, SignupReport, SignupStatus};
use crosslist_vault::CredentialVault;

use crate::attempt::{AttemptLog, AttemptOperation, AttemptRecord, InMemoryAttemptLog};
use crate::validator::signup_preconditions;
use crate::{BuilderError, OrchestratorConfig, OrchestratorError};

/// Builder for [`BulkSignupOrchestrator`].
pub struct BulkSignupOrchestratorBuilder {
    catalog: Option<Arc<MarketplaceCatalog>>,
    connectors: Option<Arc<ConnectorRegistry>>,
    vault: Option<Arc<CredentialVault>>,
    attempt_log: Option<Arc<dyn AttemptLog>>,
    config: OrchestratorConfig,
}

impl BulkSignupOrchestratorBuilder {
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

    pub fn build(self) -> Result<BulkSignupOrchestrator, BuilderError> {
        let catalog = self
            .catalog
            .ok_or(BuilderError::MissingField { field: "catalog" })?;
        let connectors = self
            .connectors
            .ok_or(BuilderError::MissingField { field: "connectors" })?;
        let vault = self
            .vault
            .ok_or(BuilderError::MissingField { field: "vault" })?;

        Ok(BulkSignupOrchestrator {
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

impl Default for BulkSignupOrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct SignupDispatch {
    index: usize,
    marketplace_id: String,
    connector: Arc<dyn MarketplaceConnector>,
}

/// Enrolls one user into many marketplaces with one shared email/password
/// and reduces the per-target outcomes into a [`SignupReport`].
///
/// Credential validation runs once, before any dispatch; after that point
/// every failure is per-target data. Marketplaces that need no account are
/// synthesized as successes so "select all" stays coherent.
pub struct BulkSignupOrchestrator {
    catalog: Arc<MarketplaceCatalog>,
    connectors: Arc<ConnectorRegistry>,
    vault: Arc<CredentialVault>,
    attempt_log: Arc<dyn AttemptLog>,
    config: OrchestratorConfig,
}

impl BulkSignupOrchestrator {
    pub fn builder() -> BulkSignupOrchestratorBuilder {
        BulkSignupOrchestratorBuilder::new()
    }

    pub async fn signup<S: AsRef<str>>(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        marketplace_ids: &[S],
    ) -> Result<SignupReport, OrchestratorError> {
        // Whole-batch precondition: fails before anything is dispatched.
        signup_preconditions(email, password)?;

        // First occurrence wins: a repeated id must not enroll twice.
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
            return Ok(SignupReport::default());
        }

        info!(batch_size = targets.len(), "Dispatching signup batch");

        let mut slots: Vec<Option<SignupAttemptResult>> = Vec::new();
        slots.resize_with(targets.len(), || None);
        let mut dispatches: Vec<SignupDispatch> = Vec::new();

        for (index, resolution) in self.catalog.resolve(&targets).into_iter().enumerate() {
            let descriptor = match resolution {
                Resolution::Known(descriptor) => descriptor,
                Resolution::Unknown(id) => {
                    slots[index] = Some(failed_result(
                        &id,
                        AttemptError::new(
                            ErrorKind::UnknownMarketplace,
                            "marketplace not in catalog",
                        ),
                    ));
                    continue;
                }
            };

            if !descriptor.requires_credentials {
                // No account needed; synthesized so the target still
                // appears exactly once in the report.
                slots[index] = Some(SignupAttemptResult {
                    marketplace: descriptor.id.clone(),
                    status: SignupStatus::Success,
                    message: format!(
                        "{} needs no account; listings are posted manually",
                        descriptor.name
                    ),
                });
                continue;
            }

            let Some(connector) = self.connectors.get(&descriptor.id) else {
                warn!(marketplace = %descriptor.id, "marketplace in catalog but no connector registered");
                slots[index] = Some(failed_result(
                    &descriptor.id,
                    AttemptError::new(
                        ErrorKind::UnknownMarketplace,
                        "no connector registered for marketplace",
                    ),
                ));
                continue;
            };

            dispatches.push(SignupDispatch {
                index,
                marketplace_id: descriptor.id.clone(),
                connector,
            });
        }

        let futures: Vec<_> = dispatches
            .into_iter()
            .map(|dispatch| {
                let timeout = self.config.timeout_for(&dispatch.marketplace_id);
                let vault = self.vault.clone();
                async move {
                    let SignupDispatch {
                        index,
                        marketplace_id,
                        connector,
                    } = dispatch;

                    let outcome =
                        tokio::time::timeout(timeout, connector.signup(email, password)).await;

                    let result = match outcome {
                        Ok(Ok(SignupOutcome::Success { account_handle })) => {
                            // A signup that cannot be remembered is not a
                            // success; the store happens before folding.
                            match vault.store(user_id, &marketplace_id, &account_handle).await {
                                Ok(()) => SignupAttemptResult {
                                    marketplace: marketplace_id.clone(),
                                    status: SignupStatus::Success,
                                    message: "account ready".to_string(),
                                },
                                Err(e) => {
                                    warn!(marketplace = %marketplace_id, error = %e, "credential persistence failed after signup");
                                    failed_result(
                                        &marketplace_id,
                                        AttemptError::new(
                                            ErrorKind::PersistenceFailed,
                                            "signup succeeded but the credential could not be saved",
                                        ),
                                    )
                                }
                            }
                        }
                        Ok(Ok(SignupOutcome::PendingOauth { redirect_url })) => {
                            SignupAttemptResult {
                                marketplace: marketplace_id.clone(),
                                status: SignupStatus::PendingOauth {
                                    redirect_url: redirect_url.clone(),
                                },
                                message: format!("complete sign-in at {redirect_url}"),
                            }
                        }
                        Ok(Err(err)) => {
                            warn!(marketplace = %marketplace_id, error = %err, "signup attempt failed");
                            failed_result(&marketplace_id, err.into())
                        }
                        Err(_) => {
                            warn!(marketplace = %marketplace_id, ?timeout, "signup attempt timed out");
                            failed_result(
                                &marketplace_id,
                                AttemptError::new(
                                    ErrorKind::Timeout,
                                    format!("no response within {}ms", timeout.as_millis()),
                                ),
                            )
                        }
                    };

                    (index, result)
                }
            })
            .collect();

        for (index, result) in futures::future::join_all(futures).await {
            slots[index] = Some(result);
        }

        debug_assert!(slots.iter().all(Option::is_some));
        let results: Vec<SignupAttemptResult> = slots.into_iter().flatten().collect();

        self.record_attempts(user_id, &results).await;

        let report = SignupReport { results };
        info!(
            succeeded = report.succeeded(),
            pending = report.pending(),
            failed = report.failed(),
            "Signup batch settled"
        );
        Ok(report)
    }

    async fn record_attempts(&self, user_id: &str, results: &[SignupAttemptResult]) {
        for result in results {
            let (outcome, error_kind) = match &result.status {
                SignupStatus::Success => ("success", None),
                SignupStatus::PendingOauth { .. } => ("pending_oauth", None),
                SignupStatus::Failed { error } => ("failed", Some(error.kind)),
            };

            let record = AttemptRecord {
                user_id: user_id.to_string(),
                marketplace_id: result.marketplace.clone(),
                operation: AttemptOperation::Signup,
                outcome: outcome.to_string(),
                error_kind,
                recorded_at: Utc::now(),
            };

            if let Err(e) = self.attempt_log.append(record).await {
                warn!(marketplace = %result.marketplace, error = %e, "failed to record signup attempt");
            }
        }
    }
}

fn failed_result(marketplace_id: &str, error: AttemptError) -> SignupAttemptResult {
    let message = error.message.clone();
    SignupAttemptResult {
        marketplace: marketplace_id.to_string(),
        status: SignupStatus::Failed { error },
        message,
    }
}

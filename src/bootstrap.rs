//! Wires a validated [`AppConfig`] into a ready-to-use pipeline.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crosslist_catalog::{CatalogError, MarketplaceCatalog};
use crosslist_config::{validate_config, AppConfig, ConfigError};
use crosslist_connector::ConnectorRegistry;
use crosslist_orchestrator::{
    AttemptLog, BuilderError, BulkSignupOrchestrator, OrchestratorConfig, PublishOrchestrator,
};
use crosslist_vault::CredentialVault;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Builder(#[from] BuilderError),
}

/// Both orchestrators wired over one shared catalog, registry, and vault.
pub struct Pipeline {
    pub catalog: Arc<MarketplaceCatalog>,
    pub connectors: Arc<ConnectorRegistry>,
    pub vault: Arc<CredentialVault>,
    pub publisher: PublishOrchestrator,
    pub signup: BulkSignupOrchestrator,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }
}

pub struct PipelineBuilder {
    config: AppConfig,
    connectors: Option<Arc<ConnectorRegistry>>,
    vault: Option<Arc<CredentialVault>>,
    attempt_log: Option<Arc<dyn AttemptLog>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            connectors: None,
            vault: None,
            attempt_log: None,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
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

    /// Share one attempt log across both orchestrators.
    pub fn with_attempt_log(mut self, attempt_log: Arc<dyn AttemptLog>) -> Self {
        self.attempt_log = Some(attempt_log);
        self
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        validate_config(&self.config)?;

        let connectors = self
            .connectors
            .ok_or(BuilderError::MissingField { field: "connectors" })?;
        let vault = self
            .vault
            .ok_or(BuilderError::MissingField { field: "vault" })?;

        // An empty catalog section means "use the built-in table".
        let catalog = if self.config.catalog.is_empty() {
            Arc::new(MarketplaceCatalog::builtin())
        } else {
            Arc::new(MarketplaceCatalog::new(self.config.catalog.clone())?)
        };

        let orchestrator_config = orchestrator_config_from(&self.config);

        let mut publish_builder = PublishOrchestrator::builder()
            .with_catalog(catalog.clone())
            .with_connectors(connectors.clone())
            .with_vault(vault.clone())
            .with_config(orchestrator_config.clone());
        let mut signup_builder = BulkSignupOrchestrator::builder()
            .with_catalog(catalog.clone())
            .with_connectors(connectors.clone())
            .with_vault(vault.clone())
            .with_config(orchestrator_config);

        if let Some(attempt_log) = self.attempt_log {
            publish_builder = publish_builder.with_attempt_log(attempt_log.clone());
            signup_builder = signup_builder.with_attempt_log(attempt_log);
        }

        let publisher = publish_builder.build()?;
        let signup = signup_builder.build()?;

        info!(
            marketplaces = catalog.len(),
            connectors = connectors.len(),
            "Pipeline assembled"
        );

        Ok(Pipeline {
            catalog,
            connectors,
            vault,
            publisher,
            signup,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn orchestrator_config_from(config: &AppConfig) -> OrchestratorConfig {
    let mut orchestrator_config = OrchestratorConfig::default()
        .with_default_timeout(Duration::from_millis(config.orchestrator.default_timeout_ms))
        .with_max_batch_size(config.orchestrator.max_batch_size);

    for (marketplace_id, timeout_ms) in &config.orchestrator.marketplace_timeouts_ms {
        orchestrator_config = orchestrator_config
            .with_marketplace_timeout(marketplace_id.clone(), Duration::from_millis(*timeout_ms));
    }

    orchestrator_config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosslist_config::ConfigLoader;
    use crosslist_vault::{InMemoryCredentialStore, MockCipher};

    fn vault() -> Arc<CredentialVault> {
        Arc::new(CredentialVault::new(
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(MockCipher::new(7)),
        ))
    }

    #[test]
    fn default_config_uses_builtin_catalog() {
        let pipeline = Pipeline::builder()
            .with_connectors(Arc::new(ConnectorRegistry::new()))
            .with_vault(vault())
            .build()
            .unwrap();

        assert!(pipeline.catalog.describe("ebay").is_some());
        assert!(pipeline.catalog.len() >= 6);
    }

    #[test]
    fn custom_catalog_replaces_builtin() {
        let config = ConfigLoader::from_toml(
            r#"
            [[catalog]]
            id = "ebay"
            name = "eBay"
            tier = 1
            integration_mode = "api_auto_publish"
            requires_credentials = true
        "#,
        )
        .unwrap();

        let pipeline = Pipeline::builder()
            .with_config(config)
            .with_connectors(Arc::new(ConnectorRegistry::new()))
            .with_vault(vault())
            .build()
            .unwrap();

        assert_eq!(pipeline.catalog.len(), 1);
        assert!(pipeline.catalog.describe("etsy").is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ConfigLoader::from_toml(
            r#"
            [orchestrator]
            max_batch_size = 0
        "#,
        )
        .unwrap();

        let result = Pipeline::builder()
            .with_config(config)
            .with_connectors(Arc::new(ConnectorRegistry::new()))
            .with_vault(vault())
            .build();

        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn missing_vault_is_a_builder_error() {
        let result = Pipeline::builder()
            .with_connectors(Arc::new(ConnectorRegistry::new()))
            .build();

        assert!(matches!(result, Err(PipelineError::Builder(_))));
    }
}

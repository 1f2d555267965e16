//! Crosslist: publish one listing to many marketplaces.
//!
//! Re-exports the member crates behind one facade plus the glue that
//! wires a configured pipeline together:
//!
//! - [`catalog`]: static registry of marketplaces and their capabilities
//! - [`connector`]: per-marketplace integrations (API and copy-paste)
//! - [`vault`]: encrypted credential storage with scoped plaintext access
//! - [`orchestrator`]: concurrent publish and bulk-signup fan-out
//! - [`config`]: file/env configuration loading and validation

pub use crosslist_catalog as catalog;
pub use crosslist_config as config;
pub use crosslist_connector as connector;
pub use crosslist_orchestrator as orchestrator;
pub use crosslist_types as types;
pub use crosslist_vault as vault;

mod bootstrap;
pub mod telemetry;

pub use bootstrap::{Pipeline, PipelineBuilder, PipelineError};

// Commonly used types at the crate root
pub use crosslist_catalog::MarketplaceCatalog;
pub use crosslist_connector::{ConnectorRegistry, MarketplaceConnector};
pub use crosslist_orchestrator::{BulkSignupOrchestrator, OrchestratorConfig, PublishOrchestrator};
pub use crosslist_types::{
    ErrorKind, IntegrationMode, ListingSnapshot, MarketplaceDescriptor, PublishReport,
    SignupReport,
};
pub use crosslist_vault::CredentialVault;

//! Core configuration structures for the crosslist pipeline

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crosslist_types::MarketplaceDescriptor;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Marketplace catalog entries. An empty list means "use the built-in
    /// catalog" rather than "no marketplaces".
    #[serde(default)]
    pub catalog: Vec<MarketplaceDescriptor>,

    /// Orchestrator configuration
    #[serde(default)]
    pub orchestrator: OrchestratorSection,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Orchestrator tuning shared by publish and signup batches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorSection {
    /// Per-marketplace call timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,

    /// Timeout overrides by marketplace ID, in milliseconds
    #[serde(default)]
    pub marketplace_timeouts_ms: HashMap<String, u64>,

    /// Maximum marketplaces per batch
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_ms() -> u64 {
    10000
}

fn default_max_batch_size() -> usize {
    25
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for OrchestratorSection {
    fn default() -> Self {
        Self {
            default_timeout_ms: default_timeout_ms(),
            marketplace_timeouts_ms: HashMap::new(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

use std::collections::HashMap;
use std::time::Duration;

/// Configuration shared by both orchestrators.
#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    /// Per-call timeout applied when no marketplace override exists.
    pub default_timeout: Duration,

    /// Per-marketplace timeout overrides.
    pub timeout_overrides: HashMap<String, Duration>,

    /// Upper bound on marketplaces per batch; larger requests are rejected
    /// before any dispatch.
    pub max_batch_size: usize,
}

impl OrchestratorConfig {
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_marketplace_timeout(
        mut self,
        marketplace_id: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        self.timeout_overrides.insert(marketplace_id.into(), timeout);
        self
    }

    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    pub fn timeout_for(&self, marketplace_id: &str) -> Duration {
        self.timeout_overrides
            .get(marketplace_id)
            .copied()
            .unwrap_or(self.default_timeout)
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(10),
            timeout_overrides: HashMap::new(),
            max_batch_size: 25,
        }
    }
}

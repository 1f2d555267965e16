use std::collections::HashMap;
use std::sync::Arc;

use crate::MarketplaceConnector;

/// Lookup table from marketplace id to its connector.
///
/// Built once at startup and shared read-only across dispatches.
#[derive(Default, Clone)]
pub struct ConnectorRegistry {
    by_id: HashMap<String, Arc<dyn MarketplaceConnector>>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, connector: Arc<dyn MarketplaceConnector>) {
        self.by_id
            .insert(connector.marketplace_id().to_string(), connector);
    }

    pub fn with(mut self, connector: Arc<dyn MarketplaceConnector>) -> Self {
        self.register(connector);
        self
    }

    pub fn get(&self, marketplace_id: &str) -> Option<Arc<dyn MarketplaceConnector>> {
        self.by_id.get(marketplace_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Probe every registered connector concurrently.
    pub async fn health_check(&self) -> Vec<(String, bool)> {
        let futures: Vec<_> = self
            .by_id
            .values()
            .map(|c| async move { (c.marketplace_id().to_string(), c.health_check().await) })
            .collect();

        let mut results = futures::future::join_all(futures).await;
        results.sort_by(|a, b| a.0.cmp(&b.0));
        results
    }
}

use std::collections::HashMap;

use thiserror::Error;

use crosslist_types::MarketplaceDescriptor;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate marketplace id in catalog: {id}")]
    DuplicateMarketplace { id: String },
}

/// One entry from resolving a caller-supplied id list, in caller order.
///
/// Unknown ids stay in place instead of being filtered out, so callers can
/// surface them as per-target failures without losing slot positions.
#[derive(Debug, Clone)]
pub enum Resolution {
    Known(MarketplaceDescriptor),
    Unknown(String),
}

/// Static registry of known marketplaces.
///
/// Immutable after construction, so it is shared freely across concurrent
/// dispatches without locking. Both orchestrators query it; capability
/// flags live here and nowhere else.
#[derive(Debug, Clone)]
pub struct MarketplaceCatalog {
    by_id: HashMap<String, MarketplaceDescriptor>,
}

impl MarketplaceCatalog {
    pub fn new(descriptors: Vec<MarketplaceDescriptor>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if by_id.contains_key(&descriptor.id) {
                return Err(CatalogError::DuplicateMarketplace {
                    id: descriptor.id,
                });
            }
            by_id.insert(descriptor.id.clone(), descriptor);
        }
        Ok(Self { by_id })
    }

    /// Catalog with the built-in marketplace table.
    pub fn builtin() -> Self {
        Self::new(crate::builtin_descriptors()).expect("builtin catalog has unique ids")
    }

    pub fn describe(&self, marketplace_id: &str) -> Option<&MarketplaceDescriptor> {
        self.by_id.get(marketplace_id)
    }

    /// Resolve ids in caller order; unknown ids are recorded in place, not
    /// fatal.
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Vec<Resolution> {
        ids.iter()
            .map(|id| match self.by_id.get(id.as_ref()) {
                Some(descriptor) => Resolution::Known(descriptor.clone()),
                None => Resolution::Unknown(id.as_ref().to_string()),
            })
            .collect()
    }

    /// Descriptors in a priority tier, for "select tier" bulk actions.
    pub fn tier(&self, tier: u8) -> Vec<&MarketplaceDescriptor> {
        let mut entries: Vec<_> = self.by_id.values().filter(|d| d.tier == tier).collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

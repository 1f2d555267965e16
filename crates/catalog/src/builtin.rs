use crosslist_types::{IntegrationMode, MarketplaceDescriptor};

/// Built-in marketplace table.
///
/// Tier 1 are the high-traffic defaults surfaced first in selection UIs.
/// Deployments can replace this table entirely through configuration.
pub fn builtin_descriptors() -> Vec<MarketplaceDescriptor> {
    use IntegrationMode::{ApiAutoPublish, ManualCopyPaste};

    vec![
        MarketplaceDescriptor::new("ebay", "eBay", 1, ApiAutoPublish, true),
        MarketplaceDescriptor::new("etsy", "Etsy", 1, ApiAutoPublish, true),
        MarketplaceDescriptor::new("facebook", "Facebook Marketplace", 1, ManualCopyPaste, false),
        MarketplaceDescriptor::new("poshmark", "Poshmark", 2, ApiAutoPublish, true),
        MarketplaceDescriptor::new("mercari", "Mercari", 2, ApiAutoPublish, true),
        MarketplaceDescriptor::new("craigslist", "Craigslist", 2, ManualCopyPaste, false),
        MarketplaceDescriptor::new("depop", "Depop", 3, ApiAutoPublish, true),
        MarketplaceDescriptor::new("offerup", "OfferUp", 3, ManualCopyPaste, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_marketplaces_never_require_credentials() {
        for descriptor in builtin_descriptors() {
            if descriptor.integration_mode == IntegrationMode::ManualCopyPaste {
                assert!(
                    !descriptor.requires_credentials,
                    "{} is copy-paste but demands credentials",
                    descriptor.id
                );
            }
        }
    }

    #[test]
    fn ids_are_unique() {
        let descriptors = builtin_descriptors();
        let mut ids: Vec<_> = descriptors.iter().map(|d| d.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), descriptors.len());
    }
}

use async_trait::async_trait;

use crosslist_types::{CopyPasteData, ListingSnapshot};

use crate::{ConnectorError, MarketplaceConnector, PublishedListing, SignupOutcome};

/// Reference connector for `manual_copy_paste` marketplaces.
///
/// Never touches the network: its only real operation is rendering the
/// listing as text plus posting instructions tailored to one marketplace's
/// UI. `publish` and `signup` exist to satisfy the trait but are never
/// routed here by the orchestrators.
pub struct CopyPasteConnector {
    marketplace_id: String,
    steps: Vec<String>,
}

impl CopyPasteConnector {
    pub fn new(marketplace_id: impl Into<String>, steps: Vec<String>) -> Self {
        Self {
            marketplace_id: marketplace_id.into(),
            steps,
        }
    }

    /// Craigslist posting flow.
    pub fn craigslist() -> Self {
        Self::new(
            "craigslist",
            vec![
                "Go to craigslist.org and choose your city".to_string(),
                "Click \"create a posting\" and pick the for-sale category".to_string(),
                "Paste the title into the posting title field".to_string(),
                "Paste the description into the posting body".to_string(),
                "Enter the price and your general location".to_string(),
                "Upload the photos in the listed order, then publish".to_string(),
            ],
        )
    }

    /// Facebook Marketplace posting flow.
    pub fn facebook_marketplace() -> Self {
        Self::new(
            "facebook",
            vec![
                "Open Facebook and go to Marketplace > Create new listing".to_string(),
                "Choose \"Item for sale\"".to_string(),
                "Paste the title and description".to_string(),
                "Set the price and select the matching category".to_string(),
                "Add the photos in the listed order".to_string(),
                "Choose condition, then click Publish".to_string(),
            ],
        )
    }

    /// OfferUp posting flow.
    pub fn offerup() -> Self {
        Self::new(
            "offerup",
            vec![
                "Open the OfferUp app and tap Post".to_string(),
                "Add the photos in the listed order".to_string(),
                "Paste the title and description".to_string(),
                "Set the price and condition, then post".to_string(),
            ],
        )
    }
}

#[async_trait]
impl MarketplaceConnector for CopyPasteConnector {
    fn marketplace_id(&self) -> &str {
        &self.marketplace_id
    }

    async fn publish(
        &self,
        _listing: &ListingSnapshot,
        _credential: Option<&str>,
    ) -> Result<PublishedListing, ConnectorError> {
        Err(ConnectorError::Unsupported {
            operation: "publish",
        })
    }

    fn render_copy_paste(&self, listing: &ListingSnapshot) -> CopyPasteData {
        CopyPasteData {
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: listing.price,
            instructions: self.steps.clone(),
        }
    }

    async fn signup(&self, _email: &str, _password: &str) -> Result<SignupOutcome, ConnectorError> {
        Err(ConnectorError::Unsupported { operation: "signup" })
    }
}

use async_trait::async_trait;
use crosslist_types::{CopyPasteData, ListingSnapshot};

use crate::ConnectorError;

/// A live listing created through a marketplace API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedListing {
    pub listing_url: String,
}

/// What a marketplace answered to an account-creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    /// Account ready; the handle is an opaque token the vault stores.
    Success { account_handle: String },
    /// The user must complete an external redirect flow first.
    PendingOauth { redirect_url: String },
}

/// One implementation per marketplace; each implements the subset its
/// integration mode supports.
///
/// Side effects are confined to network I/O. Connectors hold no shared
/// mutable state, so concurrent invocations need no locking: each call
/// operates on its own copy of the inputs.
#[async_trait]
pub trait MarketplaceConnector: Send + Sync {
    /// Catalog id this connector serves.
    fn marketplace_id(&self) -> &str;

    /// Create the listing through the marketplace API.
    ///
    /// Only invoked for `api_auto_publish` targets; the orchestrator never
    /// routes copy-paste marketplaces here.
    async fn publish(
        &self,
        listing: &ListingSnapshot,
        credential: Option<&str>,
    ) -> Result<PublishedListing, ConnectorError>;

    /// Render the copy-paste payload for this marketplace's posting UI.
    ///
    /// Pure formatting: no network, cannot fail.
    fn render_copy_paste(&self, listing: &ListingSnapshot) -> CopyPasteData;

    /// Create or link an account with the given credentials.
    ///
    /// Only invoked for marketplaces with `requires_credentials == true`.
    async fn signup(&self, email: &str, password: &str) -> Result<SignupOutcome, ConnectorError>;

    async fn health_check(&self) -> bool {
        true
    }
}

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crosslist_types::{CopyPasteData, ListingSnapshot};

use crate::{ConnectorError, MarketplaceConnector, PublishedListing, SignupOutcome};

/// Configurable connector double for orchestrator and integration tests.
///
/// Call counts are observable so tests can assert isolation: a failing
/// marketplace must not suppress or alter its siblings' dispatches.
pub struct MockConnector {
    marketplace_id: String,
    publish_result: Result<PublishedListing, ConnectorError>,
    signup_result: Result<SignupOutcome, ConnectorError>,
    delay: Option<Duration>,
    hang: bool,
    publish_calls: AtomicUsize,
    signup_calls: AtomicUsize,
}

impl MockConnector {
    pub fn new(marketplace_id: impl Into<String>) -> Self {
        let marketplace_id = marketplace_id.into();
        Self {
            publish_result: Ok(PublishedListing {
                listing_url: format!("https://{marketplace_id}.example/listing/1"),
            }),
            signup_result: Ok(SignupOutcome::Success {
                account_handle: format!("{marketplace_id}-account"),
            }),
            delay: None,
            hang: false,
            publish_calls: AtomicUsize::new(0),
            signup_calls: AtomicUsize::new(0),
            marketplace_id,
        }
    }

    pub fn publish_url(mut self, url: impl Into<String>) -> Self {
        self.publish_result = Ok(PublishedListing {
            listing_url: url.into(),
        });
        self
    }

    pub fn fail_publish(mut self, error: ConnectorError) -> Self {
        self.publish_result = Err(error);
        self
    }

    pub fn signup_success(mut self, account_handle: impl Into<String>) -> Self {
        self.signup_result = Ok(SignupOutcome::Success {
            account_handle: account_handle.into(),
        });
        self
    }

    pub fn signup_pending(mut self, redirect_url: impl Into<String>) -> Self {
        self.signup_result = Ok(SignupOutcome::PendingOauth {
            redirect_url: redirect_url.into(),
        });
        self
    }

    pub fn fail_signup(mut self, error: ConnectorError) -> Self {
        self.signup_result = Err(error);
        self
    }

    /// Sleep before answering, to exercise completion-order shuffling.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Never answer; only an orchestrator timeout can settle this target.
    pub fn never_completes(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn publish_calls(&self) -> usize {
        self.publish_calls.load(Ordering::SeqCst)
    }

    pub fn signup_calls(&self) -> usize {
        self.signup_calls.load(Ordering::SeqCst)
    }

    async fn stall(&self) {
        if self.hang {
            // Far beyond any sane per-call timeout.
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl MarketplaceConnector for MockConnector {
    fn marketplace_id(&self) -> &str {
        &self.marketplace_id
    }

    async fn publish(
        &self,
        _listing: &ListingSnapshot,
        _credential: Option<&str>,
    ) -> Result<PublishedListing, ConnectorError> {
        self.publish_calls.fetch_add(1, Ordering::SeqCst);
        self.stall().await;
        self.publish_result.clone()
    }

    fn render_copy_paste(&self, listing: &ListingSnapshot) -> CopyPasteData {
        CopyPasteData {
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: listing.price,
            instructions: vec![format!("Post manually on {}", self.marketplace_id)],
        }
    }

    async fn signup(&self, _email: &str, _password: &str) -> Result<SignupOutcome, ConnectorError> {
        self.signup_calls.fetch_add(1, Ordering::SeqCst);
        self.stall().await;
        self.signup_result.clone()
    }
}

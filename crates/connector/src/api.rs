use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crosslist_types::{CopyPasteData, ListingSnapshot};

use crate::{ConnectorError, MarketplaceConnector, PublishedListing, SignupOutcome};

/// Listing payload as the marketplace API expects it.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRequest {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub condition: String,
    pub category: String,
    pub photo_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingResponse {
    pub listing_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountResponse {
    Created { account_handle: String },
    OauthRedirect { redirect_url: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("credential rejected")]
    Unauthorized,

    #[error("account already exists")]
    DuplicateAccount,

    #[error("rate limited{}", retry_after_secs.map(|s| format!(", retry after {s}s")).unwrap_or_default())]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("network error: {0}")]
    Network(String),
}

impl From<GatewayError> for ConnectorError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unauthorized => ConnectorError::InvalidCredentials,
            GatewayError::DuplicateAccount => ConnectorError::DuplicateAccount,
            GatewayError::RateLimited { retry_after_secs } => {
                ConnectorError::RateLimited { retry_after_secs }
            }
            GatewayError::Network(detail) => ConnectorError::Unreachable(detail),
        }
    }
}

/// Transport performing a marketplace's actual wire calls.
///
/// Implemented per marketplace outside this core (OAuth clients, HTTP
/// plumbing); the connector only depends on this narrow contract.
#[async_trait]
pub trait MarketplaceGateway: Send + Sync {
    async fn create_listing(
        &self,
        credential: &str,
        request: ListingRequest,
    ) -> Result<ListingResponse, GatewayError>;

    async fn create_account(
        &self,
        request: AccountRequest,
    ) -> Result<AccountResponse, GatewayError>;
}

/// Reference connector for `api_auto_publish` marketplaces.
///
/// All marketplace-specific behavior lives in the gateway; this type does
/// the payload mapping and error translation.
pub struct ApiConnector {
    marketplace_id: String,
    marketplace_name: String,
    gateway: Arc<dyn MarketplaceGateway>,
}

impl ApiConnector {
    pub fn new(
        marketplace_id: impl Into<String>,
        marketplace_name: impl Into<String>,
        gateway: Arc<dyn MarketplaceGateway>,
    ) -> Self {
        Self {
            marketplace_id: marketplace_id.into(),
            marketplace_name: marketplace_name.into(),
            gateway,
        }
    }

    fn listing_request(listing: &ListingSnapshot) -> ListingRequest {
        ListingRequest {
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: listing.price,
            condition: listing.condition.label().to_string(),
            category: listing.category.clone(),
            photo_urls: listing.photos.clone(),
        }
    }
}

#[async_trait]
impl MarketplaceConnector for ApiConnector {
    fn marketplace_id(&self) -> &str {
        &self.marketplace_id
    }

    async fn publish(
        &self,
        listing: &ListingSnapshot,
        credential: Option<&str>,
    ) -> Result<PublishedListing, ConnectorError> {
        let credential = credential.ok_or(ConnectorError::MissingCredential)?;

        debug!(marketplace = %self.marketplace_id, "submitting listing via API");
        let response = self
            .gateway
            .create_listing(credential, Self::listing_request(listing))
            .await?;

        Ok(PublishedListing {
            listing_url: response.listing_url,
        })
    }

    fn render_copy_paste(&self, listing: &ListingSnapshot) -> CopyPasteData {
        // Fallback text for API marketplaces the user hasn't connected yet.
        CopyPasteData {
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: listing.price,
            instructions: vec![
                format!("Sign in to your {} account", self.marketplace_name),
                "Open the sell/list form".to_string(),
                "Paste the title and description above".to_string(),
                format!("Set the price to ${}", listing.price),
                format!(
                    "Upload your {} photo(s) in the same order",
                    listing.photos.len()
                ),
                format!(
                    "Select condition \"{}\" and publish",
                    listing.condition.label()
                ),
            ],
        }
    }

    async fn signup(&self, email: &str, password: &str) -> Result<SignupOutcome, ConnectorError> {
        debug!(marketplace = %self.marketplace_id, "creating marketplace account");
        let response = self
            .gateway
            .create_account(AccountRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        Ok(match response {
            AccountResponse::Created { account_handle } => {
                SignupOutcome::Success { account_handle }
            }
            AccountResponse::OauthRedirect { redirect_url } => {
                SignupOutcome::PendingOauth { redirect_url }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosslist_types::Condition;
    use std::str::FromStr;

    struct FixedGateway {
        listing: Result<ListingResponse, GatewayError>,
        account: Result<AccountResponse, GatewayError>,
    }

    #[async_trait]
    impl MarketplaceGateway for FixedGateway {
        async fn create_listing(
            &self,
            _credential: &str,
            _request: ListingRequest,
        ) -> Result<ListingResponse, GatewayError> {
            self.listing.clone()
        }

        async fn create_account(
            &self,
            _request: AccountRequest,
        ) -> Result<AccountResponse, GatewayError> {
            self.account.clone()
        }
    }

    fn listing() -> ListingSnapshot {
        ListingSnapshot::new(
            "Road bike",
            "54cm aluminum frame, recently tuned",
            Decimal::from_str("380").unwrap(),
            Condition::Good,
            "Sporting Goods",
            vec!["front.jpg".to_string(), "drivetrain.jpg".to_string()],
        )
        .unwrap()
    }

    fn connector(gateway: FixedGateway) -> ApiConnector {
        ApiConnector::new("ebay", "eBay", Arc::new(gateway))
    }

    #[tokio::test]
    async fn publish_returns_listing_url() {
        let connector = connector(FixedGateway {
            listing: Ok(ListingResponse {
                listing_url: "https://ebay.example/itm/42".to_string(),
            }),
            account: Err(GatewayError::Network("unused".to_string())),
        });

        let published = connector
            .publish(&listing(), Some("oauth-token"))
            .await
            .unwrap();
        assert_eq!(published.listing_url, "https://ebay.example/itm/42");
    }

    #[tokio::test]
    async fn publish_without_credential_is_missing_credential() {
        let connector = connector(FixedGateway {
            listing: Ok(ListingResponse {
                listing_url: "unused".to_string(),
            }),
            account: Err(GatewayError::Network("unused".to_string())),
        });

        let err = connector.publish(&listing(), None).await.unwrap_err();
        assert_eq!(err, ConnectorError::MissingCredential);
    }

    #[tokio::test]
    async fn gateway_errors_translate() {
        let connector = connector(FixedGateway {
            listing: Err(GatewayError::Unauthorized),
            account: Err(GatewayError::DuplicateAccount),
        });

        let err = connector
            .publish(&listing(), Some("stale-token"))
            .await
            .unwrap_err();
        assert_eq!(err, ConnectorError::InvalidCredentials);

        let err = connector.signup("a@b.com", "hunter22").await.unwrap_err();
        assert_eq!(err, ConnectorError::DuplicateAccount);
    }

    #[tokio::test]
    async fn signup_maps_both_outcomes() {
        let connector = connector(FixedGateway {
            listing: Err(GatewayError::Network("unused".to_string())),
            account: Ok(AccountResponse::OauthRedirect {
                redirect_url: "https://ebay.example/oauth/start".to_string(),
            }),
        });

        let outcome = connector.signup("a@b.com", "hunter22").await.unwrap();
        assert_eq!(
            outcome,
            SignupOutcome::PendingOauth {
                redirect_url: "https://ebay.example/oauth/start".to_string()
            }
        );
    }

    #[test]
    fn copy_paste_fallback_mentions_marketplace() {
        let connector = connector(FixedGateway {
            listing: Err(GatewayError::Network("unused".to_string())),
            account: Err(GatewayError::Network("unused".to_string())),
        });

        let data = connector.render_copy_paste(&listing());
        assert_eq!(data.title, "Road bike");
        assert!(data.instructions.iter().any(|step| step.contains("eBay")));
    }
}

pub mod api;
pub mod error;
pub mod manual;
pub mod mock;
pub mod registry;
pub mod traits;

pub use api::{
    AccountRequest, AccountResponse, ApiConnector, GatewayError, ListingRequest, ListingResponse,
    MarketplaceGateway,
};
pub use error::ConnectorError;
pub use manual::CopyPasteConnector;
pub use mock::MockConnector;
pub use registry::ConnectorRegistry;
pub use traits::{MarketplaceConnector, PublishedListing, SignupOutcome};

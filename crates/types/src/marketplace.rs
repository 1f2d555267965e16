use serde::{Deserialize, Serialize};

/// How a marketplace is integrated.
///
/// `ApiAutoPublish` marketplaces accept listings over their API;
/// `ManualCopyPaste` marketplaces only ever receive rendered text the
/// seller pastes into the posting UI, so no network call is made for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMode {
    ApiAutoPublish,
    ManualCopyPaste,
}

/// Immutable capability record for one marketplace, loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceDescriptor {
    /// Unique key, e.g. "ebay".
    pub id: String,

    /// Display name.
    pub name: String,

    /// Priority group; 1 = most popular. Used only for grouping and
    /// bulk "select tier" actions, never for dispatch decisions.
    pub tier: u8,

    pub integration_mode: IntegrationMode,

    /// Whether a stored account credential is needed. `false` implies
    /// signup attempts for this marketplace are synthesized, never sent.
    pub requires_credentials: bool,
}

impl MarketplaceDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        tier: u8,
        integration_mode: IntegrationMode,
        requires_credentials: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier,
            integration_mode,
            requires_credentials,
        }
    }

    pub fn is_api(&self) -> bool {
        self.integration_mode == IntegrationMode::ApiAutoPublish
    }
}

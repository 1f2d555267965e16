//! End-to-end tests over the assembled pipeline: catalog, connectors,
//! vault, and both orchestrators wired the way a deployment would.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;

use crosslist::catalog::MarketplaceCatalog;
use crosslist::connector::{ConnectorRegistry, CopyPasteConnector, MockConnector};
use crosslist::orchestrator::{InMemoryAttemptLog, OrchestratorConfig, OrchestratorError};
use crosslist::types::{Condition, ErrorKind, ListingSnapshot, PublishOutcome, SignupStatus};
use crosslist::vault::{CredentialVault, InMemoryCredentialStore, MockCipher};
use crosslist::Pipeline;

fn listing() -> ListingSnapshot {
    ListingSnapshot::new(
        "Vintage Leather Jacket",
        "Brown leather, size M, lightly worn.",
        Decimal::new(12500, 2),
        Condition::Good,
        "Clothing",
        vec!["https://img.example/jacket.jpg".to_string()],
    )
    .unwrap()
}

fn vault_with_store() -> (Arc<CredentialVault>, Arc<InMemoryCredentialStore>) {
    let store = Arc::new(InMemoryCredentialStore::new());
    let vault = Arc::new(CredentialVault::new(
        store.clone(),
        Arc::new(MockCipher::new(11)),
    ));
    (vault, store)
}

fn registry() -> ConnectorRegistry {
    ConnectorRegistry::new()
        .with(Arc::new(
            MockConnector::new("ebay").publish_url("https://ebay.example/itm/42"),
        ))
        .with(Arc::new(MockConnector::new("etsy")))
        .with(Arc::new(CopyPasteConnector::facebook_marketplace()))
        .with(Arc::new(CopyPasteConnector::craigslist()))
}

fn pipeline(vault: Arc<CredentialVault>) -> Pipeline {
    Pipeline::builder()
        .with_connectors(Arc::new(registry()))
        .with_vault(vault)
        .build()
        .unwrap()
}

#[tokio::test]
async fn publish_splits_into_three_buckets() {
    let (vault, _) = vault_with_store();
    // Only ebay is connected.
    vault.store("u1", "ebay", "oauth-token").await.unwrap();
    let pipeline = pipeline(vault);

    let report = pipeline
        .publisher
        .publish(
            &listing(),
            &["ebay", "facebook", "craigslist", "unknownmkt"],
            "u1",
        )
        .await
        .unwrap();

    assert_eq!(report.automatic_posts.len(), 1);
    assert_eq!(report.automatic_posts[0].marketplace, "ebay");
    assert_eq!(
        report.automatic_posts[0].listing_url,
        "https://ebay.example/itm/42"
    );

    let copy_paste: Vec<_> = report
        .copy_paste_posts
        .iter()
        .map(|p| p.marketplace.as_str())
        .collect();
    assert_eq!(copy_paste, vec!["facebook", "craigslist"]);

    assert_eq!(report.failed_posts.len(), 1);
    assert_eq!(report.failed_posts[0].marketplace, "unknownmkt");
    assert_eq!(
        report.failed_posts[0].error.kind,
        ErrorKind::UnknownMarketplace
    );
}

#[tokio::test]
async fn every_target_lands_in_exactly_one_bucket() {
    let (vault, _) = vault_with_store();
    vault.store("u1", "ebay", "token").await.unwrap();
    let pipeline = pipeline(vault);

    let ids = ["ebay", "etsy", "facebook", "craigslist", "nosuch"];
    let report = pipeline.publisher.publish(&listing(), &ids, "u1").await.unwrap();

    assert_eq!(report.total(), ids.len());
}

#[tokio::test]
async fn repeated_selection_appears_in_the_report_once() {
    let (vault, _) = vault_with_store();
    let pipeline = pipeline(vault);

    let report = pipeline
        .publisher
        .publish(&listing(), &["facebook", "facebook"], "u1")
        .await
        .unwrap();

    assert_eq!(report.total(), 1);
    assert_eq!(report.copy_paste_posts.len(), 1);
    assert_eq!(report.copy_paste_posts[0].marketplace, "facebook");
}

#[tokio::test]
async fn missing_credential_downgrades_to_copy_paste() {
    let (vault, _) = vault_with_store();
    // No credential for etsy; the listing should still reach the seller
    // as a copy-paste package rather than a failure.
    let pipeline = pipeline(vault);

    let report = pipeline
        .publisher
        .publish(&listing(), &["etsy"], "u1")
        .await
        .unwrap();

    assert!(report.automatic_posts.is_empty());
    assert!(report.failed_posts.is_empty());
    assert_eq!(report.copy_paste_posts.len(), 1);
    assert_eq!(report.copy_paste_posts[0].marketplace, "etsy");
    assert_eq!(
        report.copy_paste_posts[0].copy_paste_data.title,
        "Vintage Leather Jacket"
    );
}

#[tokio::test]
async fn signup_weak_password_aborts_whole_batch() {
    let (vault, store) = vault_with_store();
    let pipeline = pipeline(vault);

    let err = pipeline
        .signup
        .signup("u1", "seller@example.com", "12345", &["ebay", "etsy", "facebook"])
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::Validation { .. }));
    assert!(store.is_empty());
}

#[tokio::test]
async fn signup_mixes_real_and_synthesized_results() {
    let (vault, store) = vault_with_store();
    let registry = ConnectorRegistry::new()
        .with(Arc::new(MockConnector::new("ebay").signup_success("ebay-session")))
        .with(Arc::new(
            MockConnector::new("etsy").signup_pending("https://etsy.example/oauth"),
        ))
        .with(Arc::new(CopyPasteConnector::facebook_marketplace()));
    let pipeline = Pipeline::builder()
        .with_connectors(Arc::new(registry))
        .with_vault(vault.clone())
        .build()
        .unwrap();

    let report = pipeline
        .signup
        .signup("u1", "seller@example.com", "hunter22", &["ebay", "etsy", "facebook"])
        .await
        .unwrap();

    assert_eq!(report.succeeded(), 2); // ebay + synthesized facebook
    assert_eq!(report.pending(), 1);
    assert_eq!(report.failed(), 0);

    // Only the real signup persisted a credential.
    assert_eq!(store.len(), 1);
    let lease = vault.fetch("u1", "ebay").await.unwrap();
    assert_eq!(lease.expose(), "ebay-session");

    let statuses: Vec<_> = report.results.iter().map(|r| &r.status).collect();
    assert!(matches!(statuses[0], SignupStatus::Success));
    assert!(matches!(statuses[1], SignupStatus::PendingOauth { .. }));
    assert!(matches!(statuses[2], SignupStatus::Success));
}

#[tokio::test]
async fn signup_then_publish_uses_the_stored_credential() {
    let (vault, _) = vault_with_store();
    let pipeline = pipeline(vault);

    pipeline
        .signup
        .signup("u1", "seller@example.com", "hunter22", &["ebay"])
        .await
        .unwrap();

    let report = pipeline
        .publisher
        .publish(&listing(), &["ebay"], "u1")
        .await
        .unwrap();

    assert_eq!(report.automatic_posts.len(), 1);
}

#[tokio::test]
async fn hung_connector_times_out_without_stalling_siblings() {
    let (vault, _) = vault_with_store();
    vault.store("u1", "ebay", "token").await.unwrap();
    vault.store("u1", "etsy", "token").await.unwrap();

    let registry = ConnectorRegistry::new()
        .with(Arc::new(MockConnector::new("ebay").never_completes()))
        .with(Arc::new(MockConnector::new("etsy")));
    let pipeline = Pipeline::builder()
        .with_connectors(Arc::new(registry))
        .with_vault(vault)
        .build()
        .unwrap();

    // Rebuild the publisher with a tight timeout for the hung target.
    let publisher = crosslist::PublishOrchestrator::builder()
        .with_catalog(pipeline.catalog.clone())
        .with_connectors(pipeline.connectors.clone())
        .with_vault(pipeline.vault.clone())
        .with_config(
            OrchestratorConfig::default()
                .with_marketplace_timeout("ebay", Duration::from_millis(50)),
        )
        .build()
        .unwrap();

    let report = publisher
        .publish(&listing(), &["ebay", "etsy"], "u1")
        .await
        .unwrap();

    assert_eq!(report.failed_posts.len(), 1);
    assert_eq!(report.failed_posts[0].error.kind, ErrorKind::Timeout);
    assert!(report.failed_posts[0].error.retryable);
    assert_eq!(report.automatic_posts.len(), 1);
    assert_eq!(report.automatic_posts[0].marketplace, "etsy");
}

#[tokio::test]
async fn shared_attempt_log_sees_both_operations() {
    let (vault, _) = vault_with_store();
    let log = Arc::new(InMemoryAttemptLog::new());
    let pipeline = Pipeline::builder()
        .with_connectors(Arc::new(registry()))
        .with_vault(vault)
        .with_attempt_log(log.clone())
        .build()
        .unwrap();

    pipeline
        .signup
        .signup("u1", "seller@example.com", "hunter22", &["ebay"])
        .await
        .unwrap();
    pipeline
        .publisher
        .publish(&listing(), &["ebay"], "u1")
        .await
        .unwrap();

    assert_eq!(log.len(), 2);
}

#[tokio::test]
async fn report_wire_shape_is_stable() {
    let (vault, _) = vault_with_store();
    vault.store("u1", "ebay", "token").await.unwrap();
    let pipeline = pipeline(vault);

    let report = pipeline
        .publisher
        .publish(&listing(), &["ebay", "craigslist", "nosuch"], "u1")
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("automaticPosts").is_some());
    assert!(json.get("copyPastePosts").is_some());
    assert!(json.get("failedPosts").is_some());

    let auto = &json["automaticPosts"][0];
    assert_eq!(auto["marketplace"], "ebay");
    assert!(auto.get("listingUrl").is_some());

    let copy = &json["copyPastePosts"][0];
    assert!(copy.get("copyPasteData").is_some());

    let failed = &json["failedPosts"][0];
    assert_eq!(failed["error"]["kind"], "unknown_marketplace");
}

#[tokio::test]
async fn tier_selection_drives_a_batch() {
    let (vault, _) = vault_with_store();
    vault.store("u1", "ebay", "token").await.unwrap();
    vault.store("u1", "etsy", "token").await.unwrap();
    let pipeline = pipeline(vault);

    let tier_one: Vec<String> = MarketplaceCatalog::builtin()
        .tier(1)
        .into_iter()
        .map(|d| d.id.clone())
        .collect();

    let report = pipeline
        .publisher
        .publish(&listing(), &tier_one, "u1")
        .await
        .unwrap();

    assert_eq!(report.total(), tier_one.len());
    assert!(report.failed_posts.is_empty());
}

#[tokio::test]
async fn publish_outcome_tags_match_results() {
    let (vault, _) = vault_with_store();
    vault.store("u1", "ebay", "token").await.unwrap();
    let pipeline = pipeline(vault);

    let report = pipeline
        .publisher
        .publish(&listing(), &["ebay"], "u1")
        .await
        .unwrap();

    // The bucket view and the outcome enum agree.
    assert_eq!(report.automatic_posts.len(), 1);
    let outcome = PublishOutcome::AutoPublished {
        listing_url: report.automatic_posts[0].listing_url.clone(),
    };
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["outcome"], "auto_published");
}

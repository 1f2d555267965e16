use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seller-declared item condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl Condition {
    /// Label suitable for rendered copy-paste text.
    pub fn label(self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::LikeNew => "Like New",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Poor => "Poor",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("listing title must not be empty")]
    EmptyTitle,

    #[error("listing price must be positive, got {price}")]
    NonPositivePrice { price: Decimal },
}

/// Immutable value passed into a publish attempt.
///
/// Constructed once per publish call and never mutated during dispatch;
/// every connector sees the same snapshot regardless of completion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub condition: Condition,
    pub category: String,
    /// Ordered photo references (URLs or storage keys).
    pub photos: Vec<String>,
}

impl ListingSnapshot {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        condition: Condition,
        category: impl Into<String>,
        photos: Vec<String>,
    ) -> Result<Self, SnapshotError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(SnapshotError::EmptyTitle);
        }
        if price <= Decimal::ZERO {
            return Err(SnapshotError::NonPositivePrice { price });
        }

        Ok(Self {
            title,
            description: description.into(),
            price,
            condition,
            category: category.into(),
            photos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn snapshot(price: &str) -> Result<ListingSnapshot, SnapshotError> {
        ListingSnapshot::new(
            "Vintage camera",
            "Working Canon AE-1 with 50mm lens",
            Decimal::from_str(price).unwrap(),
            Condition::Good,
            "Electronics",
            vec!["photo-1.jpg".to_string()],
        )
    }

    #[test]
    fn accepts_positive_price() {
        let listing = snapshot("124.99").unwrap();
        assert_eq!(listing.price, Decimal::from_str("124.99").unwrap());
        assert_eq!(listing.condition.label(), "Good");
    }

    #[test]
    fn rejects_zero_and_negative_price() {
        assert!(matches!(
            snapshot("0"),
            Err(SnapshotError::NonPositivePrice { .. })
        ));
        assert!(matches!(
            snapshot("-5"),
            Err(SnapshotError::NonPositivePrice { .. })
        ));
    }

    #[test]
    fn rejects_blank_title() {
        let result = ListingSnapshot::new(
            "   ",
            "desc",
            Decimal::ONE,
            Condition::New,
            "Misc",
            vec![],
        );
        assert_eq!(result.unwrap_err(), SnapshotError::EmptyTitle);
    }
}

//! # Product Catalog Entries
//!
//! A `Product` is a single stocked item identified by a unique SKU.
//! Category-specific attributes live in the [`CategoryDetails`] tagged union
//! and are dispatched via pattern matching, never virtual methods.
//!
//! ## Dual-Key Identity Pattern
//! The SKU is the business identifier and the ledger key. It is immutable
//! for the lifetime of the entry: re-cataloguing under a new SKU is a remove
//! plus an add.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category Details
// =============================================================================

/// Physical dimensions of a household item, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width_cm: u32,
    pub height_cm: u32,
    pub depth_cm: u32,
}

/// Category-specific attributes of a catalog entry.
///
/// One variant per stocked category, plus `Other` for ad-hoc category
/// labels. The serde `type` tag keeps backups self-describing so a restore
/// can rebuild the right variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CategoryDetails {
    /// Perishable goods with a hard expiry date.
    Food {
        expires_on: NaiveDate,
        weight_kg: f64,
        organic: bool,
    },
    /// Electronics with warranty coverage.
    Electronics {
        brand: String,
        warranty_months: u32,
        power_watts: f64,
    },
    /// Apparel.
    Clothing {
        size: String,
        color: String,
        material: String,
        gender: String,
    },
    /// Furniture and household goods.
    Household {
        room: String,
        dimensions: Dimensions,
        weight_kg: f64,
    },
    /// Open-ended category label for anything else.
    Other { category: String },
}

impl CategoryDetails {
    /// Display label for the category; used as the grouping key in
    /// snapshots, reports, and discount assignments.
    pub fn label(&self) -> &str {
        match self {
            CategoryDetails::Food { .. } => "Food",
            CategoryDetails::Electronics { .. } => "Electronics",
            CategoryDetails::Clothing { .. } => "Clothing",
            CategoryDetails::Household { .. } => "Household",
            CategoryDetails::Other { category } => category,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A single stocked catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stock Keeping Unit - the business identifier and ledger key.
    pub sku: String,

    /// Display name shown in listings and reports.
    pub name: String,

    /// Unit price in cents. Non-negative.
    pub price: Money,

    /// On-hand quantity. The ledger guarantees this never goes negative
    /// and prunes the entry when it reaches zero.
    pub quantity: i64,

    /// Free-text description; searched together with the name.
    pub description: String,

    /// Category-specific attributes.
    pub details: CategoryDetails,

    /// When the entry was first catalogued.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new catalog entry.
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        description: impl Into<String>,
        details: CategoryDetails,
    ) -> Self {
        Product {
            sku: sku.into(),
            name: name.into(),
            price,
            quantity,
            description: description.into(),
            details,
            created_at: Utc::now(),
        }
    }

    /// Category display label.
    #[inline]
    pub fn category(&self) -> &str {
        self.details.label()
    }

    /// Total value of the on-hand stock (price × quantity).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// Expiry date, for perishable entries only.
    pub fn expires_on(&self) -> Option<NaiveDate> {
        match &self.details {
            CategoryDetails::Food { expires_on, .. } => Some(*expires_on),
            _ => None,
        }
    }

    /// Whether a perishable entry has expired as of `today`.
    /// Non-perishable entries never expire.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expires_on().map_or(false, |d| today > d)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn food(expires_on: NaiveDate) -> Product {
        Product::new(
            "FOOD-001",
            "Organic Milk 2.5%",
            Money::from_cents(455),
            100,
            "Organic milk from local farms",
            CategoryDetails::Food {
                expires_on,
                weight_kg: 1.0,
                organic: true,
            },
        )
    }

    #[test]
    fn test_category_labels() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 6).unwrap();
        assert_eq!(food(date).category(), "Food");

        let other = Product::new(
            "MISC-01",
            "Gift Card",
            Money::from_cents(1000),
            5,
            "",
            CategoryDetails::Other {
                category: "Vouchers".to_string(),
            },
        );
        assert_eq!(other.category(), "Vouchers");
    }

    #[test]
    fn test_stock_value() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 6).unwrap();
        assert_eq!(food(date).stock_value(), Money::from_cents(455 * 100));
    }

    #[test]
    fn test_expiry() {
        let expires = NaiveDate::from_ymd_opt(2026, 9, 6).unwrap();
        let product = food(expires);

        let before = NaiveDate::from_ymd_opt(2026, 9, 6).unwrap();
        let after = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();

        assert!(!product.is_expired(before)); // expiry day itself is still good
        assert!(product.is_expired(after));

        let gadget = Product::new(
            "ELEC-001",
            "Phone",
            Money::from_cents(159_900),
            3,
            "",
            CategoryDetails::Electronics {
                brand: "Samsung".to_string(),
                warranty_months: 24,
                power_watts: 15.0,
            },
        );
        assert!(!gadget.is_expired(after));
        assert_eq!(gadget.expires_on(), None);
    }

    #[test]
    fn test_details_serde_round_trip() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 6).unwrap();
        let product = food(date);

        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains("\"type\":\"food\""));

        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }
}

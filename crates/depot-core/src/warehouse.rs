//! # Warehouse Inventory Ledger
//!
//! The `Warehouse` owns the product ledger and enforces its two invariants:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       LEDGER INVARIANTS                             │
//! │                                                                     │
//! │  1. NO NEGATIVE STOCK                                               │
//! │     Every issue is checked against availability first.              │
//! │     An oversized request fails whole; stock is never clamped.       │
//! │                                                                     │
//! │  2. NO ZERO-QUANTITY ENTRIES                                        │
//! │     When an issue drains a product to exactly zero, the entry is    │
//! │     pruned. "Out of stock" and "unknown SKU" are the same state.    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries are kept in catalog order (first add wins the position), so
//! listings and reports are stable across runs. Lookups are linear scans:
//! the ledger holds at most a few thousand SKUs.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::Product;

// =============================================================================
// Warehouse
// =============================================================================

/// Result of adding a product to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new SKU entered the catalog.
    Created,
    /// The SKU already existed; the incoming quantity was merged into it.
    Merged { new_quantity: i64 },
}

/// The inventory ledger for a single warehouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    /// Display name, e.g. "Main".
    pub name: String,

    /// Physical location, free text.
    pub location: String,

    /// Catalog entries in insertion order. Quantities are always positive;
    /// drained entries are pruned.
    products: Vec<Product>,
}

impl Warehouse {
    /// Creates an empty warehouse.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Warehouse {
            name: name.into(),
            location: location.into(),
            products: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Stock Movements
    // -------------------------------------------------------------------------

    /// Adds a product to the ledger.
    ///
    /// If the SKU is already catalogued, the incoming quantity is merged
    /// into the existing entry and the existing price and details are kept.
    /// Otherwise the product enters the catalog at the end.
    pub fn add(&mut self, product: Product) -> AddOutcome {
        if let Some(existing) = self.products.iter_mut().find(|p| p.sku == product.sku) {
            existing.quantity += product.quantity;
            AddOutcome::Merged {
                new_quantity: existing.quantity,
            }
        } else {
            self.products.push(product);
            AddOutcome::Created
        }
    }

    /// Removes a product from the catalog entirely, returning the entry.
    pub fn remove(&mut self, sku: &str) -> CoreResult<Product> {
        let pos = self
            .products
            .iter()
            .position(|p| p.sku == sku)
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()))?;
        Ok(self.products.remove(pos))
    }

    /// Receives additional stock for an already-catalogued SKU.
    ///
    /// Unlike [`add`](Self::add), receiving cannot introduce a new SKU: an
    /// unknown SKU is an error. Returns the new on-hand quantity.
    pub fn receive(&mut self, sku: &str, quantity: i64) -> CoreResult<i64> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }
        let product = self
            .products
            .iter_mut()
            .find(|p| p.sku == sku)
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()))?;
        product.quantity += quantity;
        Ok(product.quantity)
    }

    /// Issues (removes) stock for a SKU.
    ///
    /// All-or-nothing: a request above availability fails without touching
    /// the ledger. Draining an entry to exactly zero prunes it from the
    /// catalog. Returns the remaining quantity (zero when pruned).
    pub fn issue(&mut self, sku: &str, quantity: i64) -> CoreResult<i64> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }
        let pos = self
            .products
            .iter()
            .position(|p| p.sku == sku)
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()))?;

        let available = self.products[pos].quantity;
        if quantity > available {
            return Err(CoreError::InsufficientStock {
                sku: sku.to_string(),
                available,
                requested: quantity,
            });
        }

        let remaining = available - quantity;
        if remaining == 0 {
            self.products.remove(pos);
        } else {
            self.products[pos].quantity = remaining;
        }
        Ok(remaining)
    }

    /// Updates the unit price of a catalogued SKU, returning the old price.
    pub fn set_price(&mut self, sku: &str, price: Money) -> CoreResult<Money> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.sku == sku)
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()))?;
        let old = product.price;
        product.price = price;
        Ok(old)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Looks up a product by SKU.
    pub fn get(&self, sku: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.sku == sku)
    }

    /// All catalogued products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of distinct SKUs.
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Total units across all SKUs.
    pub fn total_units(&self) -> i64 {
        self.products.iter().map(|p| p.quantity).sum()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Total value of all stock on hand.
    pub fn total_value(&self) -> Money {
        self.products
            .iter()
            .map(Product::stock_value)
            .fold(Money::zero(), |acc, v| acc + v)
    }

    /// Case-insensitive substring search over product names and
    /// descriptions.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Products in the given category (exact label match).
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category() == category)
            .collect()
    }

    /// Distinct category labels in catalog order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for product in &self.products {
            let label = product.category();
            if !labels.iter().any(|l| l == label) {
                labels.push(label.to_string());
            }
        }
        labels
    }

    /// Products whose quantity is strictly below `threshold`.
    pub fn low_stock(&self, threshold: i64) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.quantity < threshold)
            .collect()
    }

    /// Perishable products that expire within `within_days` of `today`
    /// (inclusive), excluding already-expired entries.
    pub fn expiring(&self, today: NaiveDate, within_days: i64) -> Vec<&Product> {
        let horizon = today + Duration::days(within_days);
        self.products
            .iter()
            .filter(|p| {
                p.expires_on()
                    .map_or(false, |d| d >= today && d <= horizon)
            })
            .collect()
    }

    /// Perishable products already past their expiry date.
    pub fn expired(&self, today: NaiveDate) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_expired(today))
            .collect()
    }

    /// Aggregated per-category view of the whole catalog.
    pub fn snapshot(&self) -> InventorySnapshot {
        let mut categories: Vec<CategoryBreakdown> = Vec::new();
        for product in &self.products {
            let label = product.category();
            let entry = match categories.iter_mut().find(|c| c.category == label) {
                Some(entry) => entry,
                None => {
                    categories.push(CategoryBreakdown {
                        category: label.to_string(),
                        product_count: 0,
                        total_units: 0,
                        total_value: Money::zero(),
                    });
                    categories.last_mut().expect("just pushed")
                }
            };
            entry.product_count += 1;
            entry.total_units += product.quantity;
            entry.total_value += product.stock_value();
        }

        InventorySnapshot {
            warehouse_name: self.name.clone(),
            taken_at: Utc::now(),
            product_count: self.product_count(),
            total_units: self.total_units(),
            total_value: self.total_value(),
            categories,
        }
    }
}

// =============================================================================
// Snapshot Types
// =============================================================================

/// Per-category aggregate within an [`InventorySnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub product_count: usize,
    pub total_units: i64,
    pub total_value: Money,
}

/// Point-in-time aggregated view of the ledger, consumed by reports and
/// exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub warehouse_name: String,
    pub taken_at: DateTime<Utc>,
    pub product_count: usize,
    pub total_units: i64,
    pub total_value: Money,
    /// Category order follows catalog order of first appearance.
    pub categories: Vec<CategoryBreakdown>,
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Warehouse Statistics
//!
//! Aggregate views of the ledger for the statistics screen:
//! category distributions, the most valuable SKUs, the catalog price
//! range, and a stock health bucketing.
//!
//! ## Stock Health Buckets
//! ```text
//! ┌───────────────┬───────────────────────┐
//! │  critical     │  quantity <= 5        │
//! │  low          │  6 ..= 15             │
//! │  medium       │  16 ..= 50            │
//! │  high         │  quantity > 50        │
//! └───────────────┴───────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use depot_core::{Money, Warehouse};

/// How many SKUs each top list carries.
pub const TOP_PRODUCTS: usize = 5;

// =============================================================================
// Statistic Types
// =============================================================================

/// One entry in a top-products list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopProduct {
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub stock_value: Money,
}

/// Minimum, maximum, and mean unit price across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
    pub average: Money,
}

/// SKU counts per stock health bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockHealth {
    pub critical: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// The full statistics bundle for one warehouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseStats {
    pub generated_at: DateTime<Utc>,
    pub product_count: usize,
    pub total_units: i64,
    pub total_value: Money,
    /// Units per category, catalog order.
    pub category_units: Vec<(String, i64)>,
    /// Stock value per category, catalog order.
    pub category_values: Vec<(String, Money)>,
    /// Most valuable SKUs, highest first.
    pub top_by_value: Vec<TopProduct>,
    /// Deepest-stocked SKUs, highest first.
    pub top_by_quantity: Vec<TopProduct>,
    /// None for an empty catalog.
    pub price_range: Option<PriceRange>,
    pub stock_health: StockHealth,
}

// =============================================================================
// Computation
// =============================================================================

/// Computes the statistics bundle for a warehouse.
pub fn compute_stats(warehouse: &Warehouse) -> WarehouseStats {
    let snapshot = warehouse.snapshot();

    let category_units = snapshot
        .categories
        .iter()
        .map(|c| (c.category.clone(), c.total_units))
        .collect();
    let category_values = snapshot
        .categories
        .iter()
        .map(|c| (c.category.clone(), c.total_value))
        .collect();

    let entries: Vec<TopProduct> = warehouse
        .products()
        .iter()
        .map(|p| TopProduct {
            sku: p.sku.clone(),
            name: p.name.clone(),
            quantity: p.quantity,
            stock_value: p.stock_value(),
        })
        .collect();

    let mut top_by_value = entries.clone();
    top_by_value.sort_by(|a, b| b.stock_value.cmp(&a.stock_value));
    top_by_value.truncate(TOP_PRODUCTS);

    let mut top_by_quantity = entries;
    top_by_quantity.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    top_by_quantity.truncate(TOP_PRODUCTS);

    let price_range = if warehouse.is_empty() {
        None
    } else {
        let prices: Vec<Money> = warehouse.products().iter().map(|p| p.price).collect();
        let min = *prices.iter().min().expect("non-empty");
        let max = *prices.iter().max().expect("non-empty");
        let sum: i64 = prices.iter().map(|m| m.cents()).sum();
        Some(PriceRange {
            min,
            max,
            average: Money::from_cents(sum / prices.len() as i64),
        })
    };

    let mut stock_health = StockHealth::default();
    for product in warehouse.products() {
        match product.quantity {
            q if q <= 5 => stock_health.critical += 1,
            q if q <= 15 => stock_health.low += 1,
            q if q <= 50 => stock_health.medium += 1,
            _ => stock_health.high += 1,
        }
    }

    WarehouseStats {
        generated_at: Utc::now(),
        product_count: snapshot.product_count,
        total_units: snapshot.total_units,
        total_value: snapshot.total_value,
        category_units,
        category_values,
        top_by_value,
        top_by_quantity,
        price_range,
        stock_health,
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders labelled counts as a horizontal bar chart.
///
/// The longest bar gets `max_width` characters; the rest scale
/// proportionally. Zero and negative counts render as empty bars.
pub fn render_bar_chart(entries: &[(String, i64)], max_width: usize) -> String {
    let peak = entries.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let mut out = String::new();
    for (label, count) in entries {
        let width = if peak > 0 && *count > 0 {
            ((*count as f64 / peak as f64) * max_width as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            " {:<15} {} {}\n",
            label,
            "█".repeat(width),
            count
        ));
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::{CategoryDetails, Product};

    fn product(sku: &str, cents: i64, qty: i64, category: &str) -> Product {
        Product::new(
            sku,
            format!("Item {sku}"),
            Money::from_cents(cents),
            qty,
            "",
            CategoryDetails::Other {
                category: category.to_string(),
            },
        )
    }

    fn stocked() -> Warehouse {
        let mut warehouse = Warehouse::new("Main", "Dock 4");
        warehouse.add(product("A", 1000, 3, "General")); // critical, value 3000
        warehouse.add(product("B", 50, 12, "General")); // low, value 600
        warehouse.add(product("C", 200, 40, "Bulk")); // medium, value 8000
        warehouse.add(product("D", 10, 100, "Bulk")); // high, value 1000
        warehouse
    }

    #[test]
    fn test_stock_health_buckets() {
        let stats = compute_stats(&stocked());
        assert_eq!(
            stats.stock_health,
            StockHealth {
                critical: 1,
                low: 1,
                medium: 1,
                high: 1,
            }
        );
    }

    #[test]
    fn test_top_by_value_ranking() {
        let stats = compute_stats(&stocked());
        let skus: Vec<&str> = stats.top_by_value.iter().map(|t| t.sku.as_str()).collect();
        assert_eq!(skus, vec!["C", "A", "D", "B"]);
    }

    #[test]
    fn test_top_by_quantity_ranking() {
        let stats = compute_stats(&stocked());
        let skus: Vec<&str> = stats
            .top_by_quantity
            .iter()
            .map(|t| t.sku.as_str())
            .collect();
        assert_eq!(skus, vec!["D", "C", "B", "A"]);
        assert_eq!(stats.top_by_quantity[0].quantity, 100);
    }

    #[test]
    fn test_summary_totals() {
        let stats = compute_stats(&stocked());
        assert_eq!(stats.product_count, 4);
        assert_eq!(stats.total_units, 155);
        assert_eq!(stats.total_value, Money::from_cents(12_600));
    }

    #[test]
    fn test_price_range() {
        let stats = compute_stats(&stocked());
        let range = stats.price_range.unwrap();
        assert_eq!(range.min, Money::from_cents(10));
        assert_eq!(range.max, Money::from_cents(1000));
        assert_eq!(range.average, Money::from_cents((1000 + 50 + 200 + 10) / 4));
    }

    #[test]
    fn test_empty_catalog_has_no_price_range() {
        let stats = compute_stats(&Warehouse::new("Main", "Dock 4"));
        assert!(stats.price_range.is_none());
        assert!(stats.top_by_value.is_empty());
        assert_eq!(stats.stock_health, StockHealth::default());
    }

    #[test]
    fn test_category_distributions_follow_catalog_order() {
        let stats = compute_stats(&stocked());
        assert_eq!(
            stats.category_units,
            vec![("General".to_string(), 15), ("Bulk".to_string(), 140)]
        );
        assert_eq!(stats.category_values[1].1, Money::from_cents(9000));
    }

    #[test]
    fn test_bar_chart_scaling() {
        let entries = vec![
            ("full".to_string(), 10),
            ("half".to_string(), 5),
            ("none".to_string(), 0),
        ];
        let chart = render_bar_chart(&entries, 10);
        let bars: Vec<usize> = chart
            .lines()
            .map(|l| l.matches('█').count())
            .collect();
        assert_eq!(bars, vec![10, 5, 0]);
        assert!(chart.contains("half"));
    }

    #[test]
    fn test_bar_chart_empty_input() {
        assert_eq!(render_bar_chart(&[], 10), "");
    }
}

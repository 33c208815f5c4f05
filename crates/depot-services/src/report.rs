//! # Report Builders
//!
//! Turns ledger and order state into structured report values plus a
//! plain-text rendering for the console and text exports.
//!
//! Every builder is a pure function over borrowed state; rendering is a
//! separate step so exports can reuse the structured data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use depot_core::{InventorySnapshot, Money, Order, OrderStatus, Warehouse};

const RULE: &str = "=================================================================";
const THIN_RULE: &str = "-----------------------------------------------------------------";

fn stamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

// =============================================================================
// Inventory Report
// =============================================================================

/// Per-category inventory report built from a ledger snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryReport {
    pub snapshot: InventorySnapshot,
}

/// Builds the inventory report for a warehouse.
pub fn inventory_report(warehouse: &Warehouse) -> InventoryReport {
    InventoryReport {
        snapshot: warehouse.snapshot(),
    }
}

impl InventoryReport {
    /// Plain-text rendering for console display and `.txt` exports.
    pub fn render(&self) -> String {
        let s = &self.snapshot;
        let mut out = String::new();
        out.push_str(RULE);
        out.push_str(&format!("\n INVENTORY REPORT - {}\n", s.warehouse_name));
        out.push_str(&format!(" Generated: {}\n", stamp(s.taken_at)));
        out.push_str(RULE);
        out.push_str(&format!(
            "\n {:<20} {:>10} {:>10} {:>15}\n",
            "Category", "Products", "Units", "Value"
        ));
        out.push_str(THIN_RULE);
        out.push('\n');
        for c in &s.categories {
            out.push_str(&format!(
                " {:<20} {:>10} {:>10} {:>15}\n",
                c.category,
                c.product_count,
                c.total_units,
                c.total_value.to_string()
            ));
        }
        out.push_str(THIN_RULE);
        out.push_str(&format!(
            "\n {:<20} {:>10} {:>10} {:>15}\n",
            "TOTAL",
            s.product_count,
            s.total_units,
            s.total_value.to_string()
        ));
        out.push_str(RULE);
        out.push('\n');
        out
    }
}

// =============================================================================
// Low-Stock Report
// =============================================================================

/// One SKU below the replenishment threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowStockLine {
    pub sku: String,
    pub name: String,
    pub quantity: i64,
}

/// Products strictly below a replenishment threshold, worst first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowStockReport {
    pub generated_at: DateTime<Utc>,
    pub threshold: i64,
    pub lines: Vec<LowStockLine>,
}

/// Builds the low-stock report, sorted by ascending quantity so the most
/// urgent SKUs come first.
pub fn low_stock_report(warehouse: &Warehouse, threshold: i64) -> LowStockReport {
    let mut lines: Vec<LowStockLine> = warehouse
        .low_stock(threshold)
        .into_iter()
        .map(|p| LowStockLine {
            sku: p.sku.clone(),
            name: p.name.clone(),
            quantity: p.quantity,
        })
        .collect();
    lines.sort_by_key(|l| l.quantity);

    LowStockReport {
        generated_at: Utc::now(),
        threshold,
        lines,
    }
}

impl LowStockReport {
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(RULE);
        out.push_str(&format!(
            "\n LOW STOCK REPORT (below {} units)\n",
            self.threshold
        ));
        out.push_str(&format!(" Generated: {}\n", stamp(self.generated_at)));
        out.push_str(RULE);
        out.push('\n');
        if self.lines.is_empty() {
            out.push_str(" All products sufficiently stocked.\n");
        } else {
            for line in &self.lines {
                out.push_str(&format!(
                    " {:<15} {:<30} {:>6} units\n",
                    line.sku, line.name, line.quantity
                ));
            }
        }
        out.push_str(RULE);
        out.push('\n');
        out
    }
}

// =============================================================================
// Sales Report
// =============================================================================

/// One fulfilled order in the sales report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesLine {
    pub order_id: String,
    pub customer: String,
    pub units: i64,
    pub total: Money,
}

/// Order-book summary: status counts, revenue, and per-order lines for
/// fulfilled orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReport {
    pub generated_at: DateTime<Utc>,
    pub total_orders: usize,
    pub pending: usize,
    pub fulfilled: usize,
    pub cancelled: usize,
    /// Sum of fulfilled order totals.
    pub revenue: Money,
    /// Revenue divided by fulfilled order count; zero with no sales.
    pub average_order_value: Money,
    pub lines: Vec<SalesLine>,
}

/// Builds the sales report over the full order book.
pub fn sales_report(orders: &[Order]) -> SalesReport {
    let mut pending = 0;
    let mut fulfilled = 0;
    let mut cancelled = 0;
    let mut revenue = Money::zero();
    let mut lines = Vec::new();

    for order in orders {
        match order.status {
            OrderStatus::Pending => pending += 1,
            OrderStatus::Cancelled => cancelled += 1,
            // the whole shipping progression counts as a sale
            OrderStatus::Processing | OrderStatus::Shipped | OrderStatus::Delivered => {
                fulfilled += 1;
                let total = order.fulfilled_total.unwrap_or_default();
                revenue += total;
                lines.push(SalesLine {
                    order_id: order.id.clone(),
                    customer: order.customer.clone(),
                    units: order.total_units(),
                    total,
                });
            }
        }
    }

    let average_order_value = if fulfilled > 0 {
        Money::from_cents(revenue.cents() / fulfilled as i64)
    } else {
        Money::zero()
    };

    SalesReport {
        generated_at: Utc::now(),
        total_orders: orders.len(),
        pending,
        fulfilled,
        cancelled,
        revenue,
        average_order_value,
        lines,
    }
}

impl SalesReport {
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(RULE);
        out.push_str("\n SALES REPORT\n");
        out.push_str(&format!(" Generated: {}\n", stamp(self.generated_at)));
        out.push_str(RULE);
        out.push_str(&format!(
            "\n Orders: {} total ({} fulfilled, {} pending, {} cancelled)\n",
            self.total_orders, self.fulfilled, self.pending, self.cancelled
        ));
        out.push_str(&format!(" Revenue: {}\n", self.revenue));
        out.push_str(&format!(
            " Average order value: {}\n",
            self.average_order_value
        ));
        if !self.lines.is_empty() {
            out.push_str(THIN_RULE);
            out.push('\n');
            for line in &self.lines {
                out.push_str(&format!(
                    " {:<10} {:<25} {:>5} units {:>12}\n",
                    line.order_id,
                    line.customer,
                    line.units,
                    line.total.to_string()
                ));
            }
        }
        out.push_str(RULE);
        out.push('\n');
        out
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::{CategoryDetails, Product};

    fn product(sku: &str, name: &str, cents: i64, qty: i64) -> Product {
        Product::new(
            sku,
            name,
            Money::from_cents(cents),
            qty,
            "",
            CategoryDetails::Other {
                category: "General".to_string(),
            },
        )
    }

    fn stocked() -> Warehouse {
        let mut warehouse = Warehouse::new("Main", "Dock 4");
        warehouse.add(product("SKU-A", "Alpha Widget", 1000, 10));
        warehouse.add(product("SKU-B", "Beta Gadget", 2500, 4));
        warehouse
    }

    #[test]
    fn test_inventory_report_totals() {
        let report = inventory_report(&stocked());
        assert_eq!(report.snapshot.product_count, 2);
        assert_eq!(report.snapshot.total_units, 14);

        let text = report.render();
        assert!(text.contains("INVENTORY REPORT - Main"));
        assert!(text.contains("TOTAL"));
        assert!(text.contains("$200.00")); // 1000*10 + 2500*4 cents
    }

    #[test]
    fn test_low_stock_sorted_worst_first() {
        let mut warehouse = stocked();
        warehouse.add(product("SKU-C", "Gamma", 100, 1));

        let report = low_stock_report(&warehouse, 10);
        let skus: Vec<&str> = report.lines.iter().map(|l| l.sku.as_str()).collect();
        assert_eq!(skus, vec!["SKU-C", "SKU-B"]);

        assert!(report.render().contains("below 10 units"));
    }

    #[test]
    fn test_low_stock_empty_message() {
        let report = low_stock_report(&stocked(), 1);
        assert!(report.lines.is_empty());
        assert!(report.render().contains("sufficiently stocked"));
    }

    #[test]
    fn test_sales_report_counts_and_revenue() {
        let mut warehouse = stocked();

        let mut sale = Order::new("Ada");
        sale.add_line("SKU-A", 2).unwrap();
        sale.fulfill(&mut warehouse).unwrap();

        let open = Order::new("Grace");

        let mut dropped = Order::new("Edsger");
        dropped.cancel().unwrap();

        let report = sales_report(&[sale, open, dropped]);
        assert_eq!(report.total_orders, 3);
        assert_eq!(report.fulfilled, 1);
        assert_eq!(report.pending, 1);
        assert_eq!(report.cancelled, 1);
        assert_eq!(report.revenue, Money::from_cents(2000));
        assert_eq!(report.average_order_value, Money::from_cents(2000));
        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.lines[0].customer, "Ada");
    }

    #[test]
    fn test_sales_report_empty_book() {
        let report = sales_report(&[]);
        assert_eq!(report.revenue, Money::zero());
        assert_eq!(report.average_order_value, Money::zero());
    }
}

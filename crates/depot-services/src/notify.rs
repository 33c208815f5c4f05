//! # Notification Center
//!
//! Severity-tagged operator notifications with an unread flag, plus the
//! two ledger sweeps that raise them:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Stock Sweeps                                  │
//! │                                                                     │
//! │  sweep_low_stock:  qty <  threshold  -> Warning                     │
//! │                    qty <= 3          -> Critical                    │
//! │                                                                     │
//! │  sweep_expiry:     expires within N days -> Warning                 │
//! │                    already expired       -> Critical                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sweeps skip findings that are already unread, so revisiting the
//! notifications screen does not duplicate a standing condition; once
//! acknowledged, a condition that persists is reported again.
//!
//! Like the operation history, the center is an explicit object owned by
//! the application; nothing global.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use depot_core::Warehouse;

/// At or below this quantity a low-stock finding escalates to Critical.
pub const CRITICAL_STOCK_QUANTITY: i64 = 3;

// =============================================================================
// Notification Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub at: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    pub read: bool,
}

// =============================================================================
// Notification Center
// =============================================================================

/// Collects notifications for the operator, oldest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    notifications: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises a notification. Critical findings are also logged.
    pub fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        if severity == Severity::Critical {
            warn!(%message, "critical notification raised");
        }
        self.notifications.push(Notification {
            at: Utc::now(),
            severity,
            message,
            read: false,
        });
    }

    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread(&self) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| !n.read).collect()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    // -------------------------------------------------------------------------
    // Ledger Sweeps
    // -------------------------------------------------------------------------

    /// Raises a notification unless an identical one is already unread.
    /// Sweeps run on every visit to the notifications screen; without this
    /// the same finding would pile up until it was acknowledged.
    fn notify_unique(&mut self, severity: Severity, message: String) -> bool {
        if self.notifications.iter().any(|n| !n.read && n.message == message) {
            return false;
        }
        self.notify(severity, message);
        true
    }

    /// Raises one notification per SKU strictly below `threshold`.
    /// Returns how many were raised.
    pub fn sweep_low_stock(&mut self, warehouse: &Warehouse, threshold: i64) -> usize {
        let mut raised = 0;
        for product in warehouse.low_stock(threshold) {
            let severity = if product.quantity <= CRITICAL_STOCK_QUANTITY {
                Severity::Critical
            } else {
                Severity::Warning
            };
            if self.notify_unique(
                severity,
                format!(
                    "Low stock: {} ({}) has {} units left",
                    product.name, product.sku, product.quantity
                ),
            ) {
                raised += 1;
            }
        }
        raised
    }

    /// Raises notifications for perishables: Critical for expired stock,
    /// Warning for stock expiring within `within_days` of `today`.
    pub fn sweep_expiry(
        &mut self,
        warehouse: &Warehouse,
        today: NaiveDate,
        within_days: i64,
    ) -> usize {
        let mut raised = 0;
        for product in warehouse.expired(today) {
            if self.notify_unique(
                Severity::Critical,
                format!("Expired: {} ({})", product.name, product.sku),
            ) {
                raised += 1;
            }
        }
        for product in warehouse.expiring(today, within_days) {
            // expires_on is always Some for entries in the expiring window
            if let Some(date) = product.expires_on() {
                if self.notify_unique(
                    Severity::Warning,
                    format!("Expires {}: {} ({})", date, product.name, product.sku),
                ) {
                    raised += 1;
                }
            }
        }
        raised
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use depot_core::{CategoryDetails, Money, Product};

    #[test]
    fn test_unread_tracking() {
        let mut center = NotificationCenter::new();
        center.notify(Severity::Info, "hello");
        center.notify(Severity::Warning, "careful");

        assert_eq!(center.unread_count(), 2);
        center.mark_all_read();
        assert_eq!(center.unread_count(), 0);
        assert_eq!(center.all().len(), 2);

        center.notify(Severity::Info, "again");
        assert_eq!(center.unread().len(), 1);
    }

    #[test]
    fn test_low_stock_sweep_escalation() {
        let mut warehouse = Warehouse::new("Main", "Dock 4");
        let mk = |sku: &str, qty: i64| {
            Product::new(
                sku,
                sku,
                Money::from_cents(100),
                qty,
                "",
                CategoryDetails::Other {
                    category: "General".to_string(),
                },
            )
        };
        warehouse.add(mk("CRIT", 2)); // <= 3 -> critical
        warehouse.add(mk("WARN", 7)); // below threshold -> warning
        warehouse.add(mk("FINE", 50));

        let mut center = NotificationCenter::new();
        let raised = center.sweep_low_stock(&warehouse, 10);
        assert_eq!(raised, 2);

        let severities: Vec<Severity> =
            center.all().iter().map(|n| n.severity).collect();
        assert_eq!(severities, vec![Severity::Critical, Severity::Warning]);
        assert!(center.all()[0].message.contains("CRIT"));
    }

    #[test]
    fn test_repeated_sweeps_do_not_duplicate_unread_findings() {
        let mut warehouse = Warehouse::new("Main", "Dock 4");
        warehouse.add(Product::new(
            "CRIT",
            "CRIT",
            Money::from_cents(100),
            2,
            "",
            CategoryDetails::Other {
                category: "General".to_string(),
            },
        ));

        let mut center = NotificationCenter::new();
        assert_eq!(center.sweep_low_stock(&warehouse, 10), 1);
        assert_eq!(center.sweep_low_stock(&warehouse, 10), 0);
        assert_eq!(center.all().len(), 1);

        // once acknowledged, a persisting condition is reported again
        center.mark_all_read();
        assert_eq!(center.sweep_low_stock(&warehouse, 10), 1);
        assert_eq!(center.all().len(), 2);
    }

    #[test]
    fn test_expiry_sweep() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let mut warehouse = Warehouse::new("Main", "Dock 4");
        let mk = |sku: &str, expires: NaiveDate| {
            Product::new(
                sku,
                sku,
                Money::from_cents(100),
                1,
                "",
                CategoryDetails::Food {
                    expires_on: expires,
                    weight_kg: 1.0,
                    organic: false,
                },
            )
        };
        warehouse.add(mk("GONE", today - Duration::days(2)));
        warehouse.add(mk("SOON", today + Duration::days(3)));
        warehouse.add(mk("OK", today + Duration::days(60)));

        let mut center = NotificationCenter::new();
        let raised = center.sweep_expiry(&warehouse, today, 7);
        assert_eq!(raised, 2);

        assert_eq!(center.all()[0].severity, Severity::Critical);
        assert!(center.all()[0].message.contains("GONE"));
        assert_eq!(center.all()[1].severity, Severity::Warning);
        assert!(center.all()[1].message.contains("SOON"));
    }
}

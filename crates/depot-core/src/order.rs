//! # Orders and Fulfillment
//!
//! An `Order` is a cart of SKU lines that is built up while `Pending` and
//! then fulfilled against a [`Warehouse`](crate::warehouse::Warehouse) in a
//! single all-or-nothing step.
//!
//! ## Fulfillment Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   TWO-PHASE FULFILLMENT                             │
//! │                                                                     │
//! │  Phase 1: VERIFY  - every line checked against the ledger.          │
//! │                     First shortfall aborts; ledger untouched.       │
//! │  Phase 2: ISSUE   - stock removed for every line, total captured,   │
//! │                     status flips to Fulfilled.                      │
//! │                                                                     │
//! │  There is never a partially fulfilled order.                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines carry only the SKU and quantity; unit prices are read from the
//! ledger at pricing time, so an order priced today reflects today's
//! catalog, not the catalog at the time the line was added.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::warehouse::Warehouse;
use crate::MAX_LINE_QUANTITY;

// =============================================================================
// Order Types
// =============================================================================

/// Lifecycle state of an order.
///
/// Only the Pending -> Processing transition moves stock; the shipping
/// progression afterwards is driven externally via
/// [`Order::set_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Open cart; lines may be added and removed.
    Pending,
    /// Stock has been issued; the order is immutable.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Closed. Cancelling does not restock issued stock; returns are a
    /// separate receive.
    Cancelled,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// One SKU line in an order. Neither price nor name is snapshotted; both
/// are read from the ledger when needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub sku: String,
    pub quantity: i64,
}

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Short order id, e.g. "3F2A9C1B".
    pub id: String,
    pub customer: String,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub created_at: DateTime<Utc>,
    /// Set when the order is fulfilled.
    pub fulfilled_at: Option<DateTime<Utc>>,
    /// Base total captured at fulfillment time (before discounts).
    pub fulfilled_total: Option<Money>,
}

impl Order {
    /// Creates an empty pending order with a fresh short id.
    pub fn new(customer: impl Into<String>) -> Self {
        let id = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
        Order {
            id,
            customer: customer.into(),
            status: OrderStatus::Pending,
            lines: Vec::new(),
            created_at: Utc::now(),
            fulfilled_at: None,
            fulfilled_total: None,
        }
    }

    fn ensure_pending(&self) -> CoreResult<()> {
        if self.status != OrderStatus::Pending {
            return Err(CoreError::OrderClosed {
                id: self.id.clone(),
                status: self.status.label().to_string(),
            });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Cart Mutations
    // -------------------------------------------------------------------------

    /// Adds a line for `sku`, merging quantities when the SKU is already in
    /// the cart.
    ///
    /// The ledger is deliberately not consulted here; a cart may reference
    /// SKUs that are out of stock or not yet catalogued, and availability
    /// is checked once, at [`fulfill`](Self::fulfill).
    pub fn add_line(&mut self, sku: &str, quantity: i64) -> CoreResult<()> {
        self.ensure_pending()?;
        if quantity <= 0 || quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::InvalidQuantity(quantity));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.sku == sku) {
            line.quantity += quantity;
        } else {
            self.lines.push(OrderLine {
                sku: sku.to_string(),
                quantity,
            });
        }
        Ok(())
    }

    /// Removes the line for `sku` from the cart.
    pub fn remove_line(&mut self, sku: &str) -> CoreResult<OrderLine> {
        self.ensure_pending()?;
        let pos = self
            .lines
            .iter()
            .position(|l| l.sku == sku)
            .ok_or_else(|| CoreError::LineNotFound(sku.to_string()))?;
        Ok(self.lines.remove(pos))
    }

    // -------------------------------------------------------------------------
    // Pricing & Fulfillment
    // -------------------------------------------------------------------------

    /// Computes the base total against current catalog prices.
    ///
    /// Lines whose SKU has since left the catalog contribute nothing; they
    /// surface as shortfalls at fulfillment instead.
    pub fn compute_total(&self, warehouse: &Warehouse) -> Money {
        self.lines
            .iter()
            .filter_map(|line| {
                warehouse
                    .get(&line.sku)
                    .map(|p| p.price.multiply_quantity(line.quantity))
            })
            .fold(Money::zero(), |acc, v| acc + v)
    }

    /// Fulfills the order against the ledger.
    ///
    /// Verifies every line first, then issues stock for all of them; a
    /// shortfall on any line aborts before any stock moves. On success the
    /// order captures its total and timestamp and becomes immutable.
    pub fn fulfill(&mut self, warehouse: &mut Warehouse) -> CoreResult<Money> {
        self.ensure_pending()?;
        if self.lines.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        // Phase 1: verify availability for every line.
        for line in &self.lines {
            let product = warehouse
                .get(&line.sku)
                .ok_or_else(|| CoreError::ProductNotFound(line.sku.clone()))?;
            if line.quantity > product.quantity {
                return Err(CoreError::InsufficientStock {
                    sku: line.sku.clone(),
                    available: product.quantity,
                    requested: line.quantity,
                });
            }
        }

        // Total must be read before issuing: fully issued SKUs are pruned.
        let total = self.compute_total(warehouse);

        // Phase 2: issue stock. Phase 1 guarantees these cannot fail.
        for line in &self.lines {
            warehouse.issue(&line.sku, line.quantity)?;
        }

        self.status = OrderStatus::Processing;
        self.fulfilled_at = Some(Utc::now());
        self.fulfilled_total = Some(total);
        Ok(total)
    }

    /// Advances the shipping progression (Processing -> Shipped ->
    /// Delivered). Cannot reopen an order or resurrect a cancelled one;
    /// cancellation goes through [`cancel`](Self::cancel) so the no-restock
    /// rule stays in one place.
    pub fn set_status(&mut self, status: OrderStatus) -> CoreResult<()> {
        let allowed = matches!(
            (self.status, status),
            (OrderStatus::Processing, OrderStatus::Shipped)
                | (OrderStatus::Processing, OrderStatus::Delivered)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        );
        if !allowed {
            return Err(CoreError::OrderClosed {
                id: self.id.clone(),
                status: self.status.label().to_string(),
            });
        }
        self.status = status;
        Ok(())
    }

    /// Cancels the order. Stock already issued at fulfillment is NOT
    /// returned to the ledger; restocking is an explicit receive.
    pub fn cancel(&mut self) -> CoreResult<()> {
        if matches!(self.status, OrderStatus::Cancelled | OrderStatus::Delivered) {
            return Err(CoreError::OrderClosed {
                id: self.id.clone(),
                status: self.status.label().to_string(),
            });
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    /// Whether stock has been issued for this order. Stays true through
    /// the shipping progression and even after a late cancellation.
    pub fn is_fulfilled(&self) -> bool {
        self.fulfilled_total.is_some()
    }

    /// Total units across all lines.
    pub fn total_units(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

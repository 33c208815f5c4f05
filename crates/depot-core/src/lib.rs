//! # depot-core: Pure Business Logic for Depot
//!
//! This crate is the **heart** of Depot, a single-process warehouse
//! management system. It contains all business logic as pure functions and
//! types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Depot Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/cli (menu loop)                       │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │              depot-services (reports, files)                │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ depot-core (THIS CRATE) ★                   │   │
//! │  │                                                             │   │
//! │  │   ┌─────────┐ ┌───────────┐ ┌────────┐ ┌─────────┐         │   │
//! │  │   │  money  │ │ warehouse │ │ order  │ │ pricing │         │   │
//! │  │   │  Money  │ │  Ledger   │ │ Lines  │ │Discounts│         │   │
//! │  │   └─────────┘ └───────────┘ └────────┘ └─────────┘         │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO LOGGING • PURE FUNCTIONS • TYPED ERRORS      │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`product`] - Catalog entries with per-category detail variants
//! - [`warehouse`] - The inventory ledger and its invariants
//! - [`order`] - Cart-like orders with all-or-nothing fulfillment
//! - [`pricing`] - Discount registry and price resolution
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic given its inputs
//! 2. **No I/O**: File system, network, and console access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Explicit Errors**: All failures are typed Results, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use depot_core::money::Money;
//! use depot_core::product::{CategoryDetails, Product};
//! use depot_core::warehouse::Warehouse;
//!
//! let mut warehouse = Warehouse::new("Main", "Dock 4");
//! warehouse.add(Product::new(
//!     "SODA-01",
//!     "Club Soda",
//!     Money::from_cents(199),
//!     24,
//!     "Sparkling water, 330ml",
//!     CategoryDetails::Other { category: "Beverages".to_string() },
//! ));
//!
//! assert_eq!(warehouse.total_value(), Money::from_cents(199 * 24));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod product;
pub mod validation;
pub mod warehouse;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use depot_core::Money` instead of
// `use depot_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{Order, OrderLine, OrderStatus};
pub use pricing::{Discount, DiscountKind, PriceQuote, PricingService};
pub use product::{CategoryDetails, Dimensions, Product};
pub use warehouse::{AddOutcome, CategoryBreakdown, InventorySnapshot, Warehouse};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default threshold below which a product counts as low-stock.
///
/// Queries use strict comparison: a product is low-stock when its quantity is
/// strictly less than the threshold.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Maximum quantity accepted for a single order line or stock movement.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 10000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999_999;

//! # Error Types
//!
//! Domain-specific error types for depot-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  depot-core errors (this file)                                      │
//! │  ├── CoreError        - Ledger/order/pricing rule violations        │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  depot-services errors (separate crate)                             │
//! │  └── ServiceError     - File/serialization failures                 │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → CLI message                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, quantities, codes)
//! 3. Errors are enum variants, never String
//! 4. The core never logs or prints; callers own user-facing messaging

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. No variant is fatal to
/// the process; every failure is recoverable by the caller choosing
/// different inputs.
#[derive(Debug, Error)]
pub enum CoreError {
    /// SKU absent from the ledger.
    ///
    /// Note that a fully issued product is pruned from the ledger, so a SKU
    /// that recently reached zero stock reports "not found" rather than
    /// "found with zero".
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// An issue or fulfillment requested more than is available.
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// Non-positive or out-of-range quantity supplied to a stock movement
    /// or an order line.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// An order operation requires at least one line.
    #[error("Order has no lines")]
    EmptyOrder,

    /// The order has no line for the given SKU.
    #[error("Order has no line for {0}")]
    LineNotFound(String),

    /// Mutation attempted on an order that is no longer pending.
    #[error("Order {id} is already {status}")]
    OrderClosed { id: String, status: String },

    /// Discount code absent from the pricing registry.
    #[error("Discount not found: {0}")]
    DiscountNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed SKU or date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

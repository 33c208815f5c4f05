//! # Validation Module
//!
//! Input validation utilities for Depot.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: CLI input helpers                                         │
//! │  ├── Re-prompt on parse failures                                    │
//! │  └── THIS MODULE: format and range rules                            │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: Core operations                                           │
//! │  ├── Ledger invariants (no negative stock)                          │
//! │  └── Order and discount rules                                       │
//! │                                                                     │
//! │  Defense in depth: both layers run, each catches different errors   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use depot_core::validation::{validate_sku, validate_quantity};
//!
//! validate_sku("FOOD-001").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must be between 3 and 50 characters
/// - May contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use depot_core::validation::validate_sku;
///
/// assert!(validate_sku("FOOD-001").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("BAD SKU!").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() < 3 {
        return Err(ValidationError::TooShort {
            field: "sku".to_string(),
            min: 3,
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a customer name for an order.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer".to_string(),
        });
    }

    if name.len() < 2 {
        return Err(ValidationError::TooShort {
            field: "customer".to_string(),
            min: 2,
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "customer".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a discount code.
///
/// Codes are stored uppercase; lowercase input is accepted here and
/// normalized by the caller.
pub fn validate_discount_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 30 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 30,
        });
    }

    if !code.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a contact email address.
///
/// Shallow shape check only (something@something.something); deliverability
/// is not this layer's problem.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected name@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Validates a phone number: digits with optional `+`, spaces, and dashes,
/// at least 7 digits.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    if digits < 7 || !allowed {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "expected at least 7 digits, with optional + - ( ) separators".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock movement or order line quantity.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items); negatives are not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a percentage given in basis points (0.01% steps).
/// Accepts 1 bps through 10000 bps (100%).
pub fn validate_percent_bps(bps: i64) -> ValidationResult<()> {
    if bps < 1 || bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "percent".to_string(),
            min: 1,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Date Parsing
// =============================================================================

/// Parses a `YYYY-MM-DD` date string.
pub fn parse_date(input: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("FOOD-001").is_ok());
        assert!(validate_sku("abc_123").is_ok());
        assert!(validate_sku("  FOOD-001  ").is_ok()); // trimmed
        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("BAD SKU!").is_err());
        assert!(validate_sku("AB").is_err()); // below the 3-char minimum
        assert!(validate_sku(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("orders@acme.test").is_ok());
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@acme.test").is_err());
        assert!(validate_email("orders@nodot").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+1-555-0101").is_ok());
        assert!(validate_phone("(044) 123 45 67").is_ok());
        assert!(validate_phone("12345").is_err()); // too few digits
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_LINE_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-5).is_err());
        assert!(validate_quantity(MAX_LINE_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(100)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_percent_bps() {
        assert!(validate_percent_bps(1000).is_ok());
        assert!(validate_percent_bps(10_000).is_ok());
        assert!(validate_percent_bps(0).is_err());
        assert!(validate_percent_bps(10_001).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Organic Milk 2.5%").is_ok());
        assert!(validate_product_name("  padded  ").is_ok());
        assert!(matches!(
            validate_product_name("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_product_name(&"x".repeat(201)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Ada Lovelace").is_ok());
        assert!(validate_customer_name("A").is_err());
        assert!(validate_customer_name("").is_err());
    }

    #[test]
    fn test_validate_discount_code() {
        assert!(validate_discount_code("BULK10").is_ok());
        assert!(validate_discount_code("CUSTOM_1756500000").is_ok());
        assert!(validate_discount_code("TEN%OFF").is_err());
        assert!(validate_discount_code("").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-09-06").unwrap(),
            NaiveDate::from_ymd_opt(2026, 9, 6).unwrap()
        );
        assert!(parse_date("06/09/2026").is_err());
        assert!(parse_date("not a date").is_err());
    }
}

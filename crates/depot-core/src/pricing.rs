//! # Pricing and Discounts
//!
//! The `PricingService` owns the discount registry and resolves the price
//! of an order line.
//!
//! ## Resolution Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │               WHICH DISCOUNT APPLIES TO A LINE?                     │
//! │                                                                     │
//! │   explicit code given AND registered ──► that discount              │
//! │   else SKU has an assigned code      ──► that discount              │
//! │   else category has an assigned code ──► that discount              │
//! │   else                               ──► none                       │
//! │                                                                     │
//! │   The first matching rung is FINAL. A registered-but-unusable       │
//! │   explicit code still wins the chain; the line is simply charged    │
//! │   full price. Only an UNREGISTERED explicit code falls through      │
//! │   to the assignment rungs.                                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A resolved discount is charged only when it is usable (active, under
//! its use cap) and the line meets its minimum quantity; usage is counted
//! only when money actually comes off.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::Product;

// =============================================================================
// Discount Types
// =============================================================================

/// How a discount reduces a line total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage off, in basis points (1000 bps = 10%).
    Percentage { bps: u32 },
    /// Fixed amount off the line total, floored at zero.
    Fixed { amount: Money },
}

/// A registered discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    /// Uppercase code, e.g. "BULK10". The registry key.
    pub code: String,
    pub description: String,
    pub kind: DiscountKind,
    /// Minimum line quantity before the discount kicks in.
    pub min_quantity: i64,
    /// Optional lifetime use cap.
    pub max_uses: Option<u32>,
    /// Times the discount has actually reduced a price.
    pub uses: u32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Discount {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        kind: DiscountKind,
    ) -> Self {
        Discount {
            code: code.into(),
            description: description.into(),
            kind,
            min_quantity: 1,
            max_uses: None,
            uses: 0,
            active: true,
            created_at: Utc::now(),
        }
    }

    pub fn with_min_quantity(mut self, min_quantity: i64) -> Self {
        self.min_quantity = min_quantity;
        self
    }

    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.max_uses = Some(max_uses);
        self
    }

    /// Whether the discount can still reduce a price at all.
    pub fn is_usable(&self) -> bool {
        self.active && self.max_uses.map_or(true, |cap| self.uses < cap)
    }

    /// Applies the discount to a base total, returning the final total.
    /// Never returns a negative amount.
    pub fn apply(&self, base: Money) -> Money {
        match self.kind {
            DiscountKind::Percentage { bps } => base - base.fraction_bps(bps),
            DiscountKind::Fixed { amount } => base.saturating_sub_floor_zero(amount),
        }
    }
}

// =============================================================================
// Price Quote
// =============================================================================

/// The fully resolved price of one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// Price × quantity before any discount.
    pub base_total: Money,
    /// What the customer pays.
    pub final_total: Money,
    /// Code of the discount that reduced the price, if any.
    pub discount_code: Option<String>,
    pub savings: Money,
}

// =============================================================================
// Pricing Service
// =============================================================================

/// Discount registry plus per-SKU and per-category assignments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingService {
    /// Registered discounts in registration order.
    discounts: Vec<Discount>,
    /// SKU → discount code.
    product_assignments: Vec<(String, String)>,
    /// Category label → discount code.
    category_assignments: Vec<(String, String)>,
}

impl PricingService {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-loaded with the standard promotions.
    pub fn with_standard_discounts() -> Self {
        let mut service = Self::new();
        service.register(
            Discount::new(
                "BULK10",
                "10% off for 10+ units",
                DiscountKind::Percentage { bps: 1000 },
            )
            .with_min_quantity(10),
        );
        service.register(
            Discount::new(
                "BULK20",
                "20% off for 50+ units",
                DiscountKind::Percentage { bps: 2000 },
            )
            .with_min_quantity(50),
        );
        service.register(
            Discount::new(
                "NEWYEAR",
                "15% new year promotion",
                DiscountKind::Percentage { bps: 1500 },
            )
            .with_max_uses(100),
        );
        service
    }

    // -------------------------------------------------------------------------
    // Registry Management
    // -------------------------------------------------------------------------

    /// Registers a discount. Re-registering a code replaces the old entry
    /// in place, keeping its position.
    pub fn register(&mut self, discount: Discount) {
        match self.discounts.iter_mut().find(|d| d.code == discount.code) {
            Some(existing) => *existing = discount,
            None => self.discounts.push(discount),
        }
    }

    /// Registers a one-off percentage discount under a generated
    /// `CUSTOM_<unix-timestamp>` code and returns the code.
    pub fn create_custom(&mut self, bps: u32, description: impl Into<String>) -> String {
        let code = format!("CUSTOM_{}", Utc::now().timestamp());
        self.register(Discount::new(
            code.clone(),
            description,
            DiscountKind::Percentage { bps },
        ));
        code
    }

    pub fn get(&self, code: &str) -> Option<&Discount> {
        self.discounts.iter().find(|d| d.code == code)
    }

    /// All registered discounts, in registration order.
    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }

    /// Only the discounts that can currently reduce a price.
    pub fn active_discounts(&self) -> Vec<&Discount> {
        self.discounts.iter().filter(|d| d.is_usable()).collect()
    }

    pub fn activate(&mut self, code: &str) -> CoreResult<()> {
        self.set_active(code, true)
    }

    pub fn deactivate(&mut self, code: &str) -> CoreResult<()> {
        self.set_active(code, false)
    }

    fn set_active(&mut self, code: &str, active: bool) -> CoreResult<()> {
        let discount = self
            .discounts
            .iter_mut()
            .find(|d| d.code == code)
            .ok_or_else(|| CoreError::DiscountNotFound(code.to_string()))?;
        discount.active = active;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Assignments
    // -------------------------------------------------------------------------

    /// Assigns a registered code to a SKU, replacing any previous
    /// assignment for that SKU.
    pub fn assign_to_product(&mut self, sku: &str, code: &str) -> CoreResult<()> {
        if self.get(code).is_none() {
            return Err(CoreError::DiscountNotFound(code.to_string()));
        }
        match self
            .product_assignments
            .iter_mut()
            .find(|(s, _)| s == sku)
        {
            Some((_, c)) => *c = code.to_string(),
            None => self
                .product_assignments
                .push((sku.to_string(), code.to_string())),
        }
        Ok(())
    }

    /// Assigns a registered code to a category label, replacing any
    /// previous assignment for that category.
    pub fn assign_to_category(&mut self, category: &str, code: &str) -> CoreResult<()> {
        if self.get(code).is_none() {
            return Err(CoreError::DiscountNotFound(code.to_string()));
        }
        match self
            .category_assignments
            .iter_mut()
            .find(|(c, _)| c == category)
        {
            Some((_, code_slot)) => *code_slot = code.to_string(),
            None => self
                .category_assignments
                .push((category.to_string(), code.to_string())),
        }
        Ok(())
    }

    fn assigned_code_for(&self, product: &Product) -> Option<&str> {
        if let Some((_, code)) = self
            .product_assignments
            .iter()
            .find(|(sku, _)| sku == &product.sku)
        {
            return Some(code);
        }
        self.category_assignments
            .iter()
            .find(|(category, _)| category == product.category())
            .map(|(_, code)| code.as_str())
    }

    // -------------------------------------------------------------------------
    // Quoting
    // -------------------------------------------------------------------------

    /// Resolves the price of a line.
    ///
    /// `explicit_code` is the customer-supplied code, if any. A registered
    /// explicit code wins the resolution chain even when it turns out to be
    /// unusable; an unregistered one falls through to the SKU and category
    /// assignments. Usage is incremented only when the price is actually
    /// reduced.
    pub fn quote(
        &mut self,
        product: &Product,
        quantity: i64,
        explicit_code: Option<&str>,
    ) -> CoreResult<PriceQuote> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }

        let base_total = product.price.multiply_quantity(quantity);

        let resolved_code: Option<String> = match explicit_code {
            Some(code) if self.get(code).is_some() => Some(code.to_string()),
            _ => self.assigned_code_for(product).map(str::to_string),
        };

        let mut final_total = base_total;
        let mut applied_code = None;

        if let Some(code) = resolved_code {
            let discount = self
                .discounts
                .iter_mut()
                .find(|d| d.code == code)
                .expect("resolved codes are registered");
            if discount.is_usable() && quantity >= discount.min_quantity {
                final_total = discount.apply(base_total);
                discount.uses += 1;
                applied_code = Some(code);
            }
        }

        Ok(PriceQuote {
            sku: product.sku.clone(),
            name: product.name.clone(),
            quantity,
            unit_price: product.price,
            base_total,
            final_total,
            discount_code: applied_code,
            savings: base_total - final_total,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::CategoryDetails;

    fn widget() -> Product {
        Product::new(
            "SKU-A",
            "Alpha Widget",
            Money::from_cents(1000),
            100,
            "",
            CategoryDetails::Other {
                category: "General".to_string(),
            },
        )
    }

    #[test]
    fn test_percentage_apply() {
        let discount = Discount::new("TEN", "", DiscountKind::Percentage { bps: 1000 });
        assert_eq!(
            discount.apply(Money::from_cents(10000)),
            Money::from_cents(9000)
        );
    }

    #[test]
    fn test_fixed_apply_floors_at_zero() {
        let discount = Discount::new(
            "VOUCHER",
            "",
            DiscountKind::Fixed {
                amount: Money::from_cents(5000),
            },
        );
        assert_eq!(discount.apply(Money::from_cents(700)), Money::zero());
        assert_eq!(
            discount.apply(Money::from_cents(8000)),
            Money::from_cents(3000)
        );
    }

    #[test]
    fn test_quote_with_explicit_code() {
        let mut pricing = PricingService::with_standard_discounts();
        let quote = pricing.quote(&widget(), 10, Some("BULK10")).unwrap();

        assert_eq!(quote.base_total, Money::from_cents(10000));
        assert_eq!(quote.final_total, Money::from_cents(9000));
        assert_eq!(quote.savings, Money::from_cents(1000));
        assert_eq!(quote.discount_code.as_deref(), Some("BULK10"));
        assert_eq!(pricing.get("BULK10").unwrap().uses, 1);
    }

    #[test]
    fn test_below_min_quantity_charges_full_price_without_use() {
        let mut pricing = PricingService::with_standard_discounts();
        let quote = pricing.quote(&widget(), 9, Some("BULK10")).unwrap();

        assert_eq!(quote.final_total, quote.base_total);
        assert_eq!(quote.discount_code, None);
        assert_eq!(quote.savings, Money::zero());
        assert_eq!(pricing.get("BULK10").unwrap().uses, 0);
    }

    #[test]
    fn test_inactive_explicit_code_blocks_fallthrough() {
        let mut pricing = PricingService::with_standard_discounts();
        pricing.assign_to_product("SKU-A", "NEWYEAR").unwrap();
        pricing.deactivate("BULK10").unwrap();

        // BULK10 is registered, so it wins the chain even though inactive;
        // the SKU's NEWYEAR assignment never gets a look-in.
        let quote = pricing.quote(&widget(), 10, Some("BULK10")).unwrap();
        assert_eq!(quote.final_total, quote.base_total);
        assert_eq!(quote.discount_code, None);
        assert_eq!(pricing.get("NEWYEAR").unwrap().uses, 0);
    }

    #[test]
    fn test_unknown_explicit_code_falls_through_to_assignments() {
        let mut pricing = PricingService::with_standard_discounts();
        pricing.assign_to_category("General", "NEWYEAR").unwrap();

        let quote = pricing.quote(&widget(), 2, Some("NO-SUCH-CODE")).unwrap();
        assert_eq!(quote.discount_code.as_deref(), Some("NEWYEAR"));
        assert_eq!(quote.final_total, Money::from_cents(1700));
    }

    #[test]
    fn test_product_assignment_beats_category_assignment() {
        let mut pricing = PricingService::with_standard_discounts();
        pricing.assign_to_product("SKU-A", "NEWYEAR").unwrap();
        pricing.assign_to_category("General", "BULK10").unwrap();

        let quote = pricing.quote(&widget(), 10, None).unwrap();
        assert_eq!(quote.discount_code.as_deref(), Some("NEWYEAR"));
    }

    #[test]
    fn test_use_cap_exhausts_discount() {
        let mut pricing = PricingService::new();
        pricing.register(
            Discount::new("ONCE", "", DiscountKind::Percentage { bps: 500 }).with_max_uses(1),
        );

        let first = pricing.quote(&widget(), 1, Some("ONCE")).unwrap();
        assert_eq!(first.discount_code.as_deref(), Some("ONCE"));

        let second = pricing.quote(&widget(), 1, Some("ONCE")).unwrap();
        assert_eq!(second.discount_code, None);
        assert_eq!(second.final_total, second.base_total);
        assert_eq!(pricing.get("ONCE").unwrap().uses, 1);
    }

    #[test]
    fn test_assign_unknown_code_fails() {
        let mut pricing = PricingService::new();
        assert!(matches!(
            pricing.assign_to_product("SKU-A", "GHOST"),
            Err(CoreError::DiscountNotFound(_))
        ));
        assert!(matches!(
            pricing.assign_to_category("General", "GHOST"),
            Err(CoreError::DiscountNotFound(_))
        ));
    }

    #[test]
    fn test_create_custom_registers_percentage() {
        let mut pricing = PricingService::new();
        let code = pricing.create_custom(2500, "flash sale");
        assert!(code.starts_with("CUSTOM_"));

        let discount = pricing.get(&code).unwrap();
        assert_eq!(discount.kind, DiscountKind::Percentage { bps: 2500 });
        assert!(discount.active);
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut pricing = PricingService::with_standard_discounts();
        pricing.register(Discount::new(
            "BULK10",
            "replacement",
            DiscountKind::Percentage { bps: 1100 },
        ));

        assert_eq!(pricing.discounts().len(), 3);
        assert_eq!(pricing.discounts()[0].description, "replacement");
    }
}

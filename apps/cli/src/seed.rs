//! Demo data for first runs.
//!
//! Loaded on startup unless `DEPOT_SEED_DEMO=false`, so every menu screen
//! has something to show.

use chrono::{Duration, Utc};

use depot_core::{CategoryDetails, Dimensions, Money, Product, Warehouse};
use depot_services::{Supplier, SupplierManager};

/// A small catalog spanning every category.
pub fn demo_warehouse() -> Warehouse {
    let today = Utc::now().date_naive();
    let mut warehouse = Warehouse::new("Main", "Dock 4, Harbor Street 12");

    warehouse.add(Product::new(
        "FOOD-001",
        "Organic Milk 2.5%",
        Money::from_cents(455),
        120,
        "Organic milk from local farms, 1L",
        CategoryDetails::Food {
            expires_on: today + Duration::days(10),
            weight_kg: 1.0,
            organic: true,
        },
    ));
    warehouse.add(Product::new(
        "FOOD-002",
        "Rye Bread",
        Money::from_cents(320),
        40,
        "Whole-grain rye loaf, 500g",
        CategoryDetails::Food {
            expires_on: today + Duration::days(4),
            weight_kg: 0.5,
            organic: false,
        },
    ));
    warehouse.add(Product::new(
        "ELEC-001",
        "Smartphone X200",
        Money::from_cents(59_900),
        15,
        "6.1\" display, 128GB",
        CategoryDetails::Electronics {
            brand: "Nordix".to_string(),
            warranty_months: 24,
            power_watts: 20.0,
        },
    ));
    warehouse.add(Product::new(
        "ELEC-002",
        "Laptop Pro 15",
        Money::from_cents(129_900),
        8,
        "15\" laptop, 16GB RAM",
        CategoryDetails::Electronics {
            brand: "Nordix".to_string(),
            warranty_months: 12,
            power_watts: 65.0,
        },
    ));
    warehouse.add(Product::new(
        "CLTH-001",
        "Denim Jeans",
        Money::from_cents(4_990),
        60,
        "Classic straight fit",
        CategoryDetails::Clothing {
            size: "32/32".to_string(),
            color: "indigo".to_string(),
            material: "denim".to_string(),
            gender: "unisex".to_string(),
        },
    ));
    warehouse.add(Product::new(
        "HOME-001",
        "Fabric Sofa",
        Money::from_cents(45_000),
        4,
        "Three-seat fabric sofa",
        CategoryDetails::Household {
            room: "living room".to_string(),
            dimensions: Dimensions {
                width_cm: 210,
                height_cm: 85,
                depth_cm: 95,
            },
            weight_kg: 48.0,
        },
    ));
    warehouse.add(Product::new(
        "MISC-001",
        "Gift Card $25",
        Money::from_cents(2_500),
        200,
        "Store gift card",
        CategoryDetails::Other {
            category: "Vouchers".to_string(),
        },
    ));

    warehouse
}

/// Two suppliers with SKU links into the demo catalog.
pub fn demo_suppliers() -> SupplierManager {
    let mut manager = SupplierManager::new();

    let foods = manager.add(Supplier::new(
        "Acme Foods",
        "orders@acmefoods.example",
        "+1-555-0101",
        "14 Mill Road, Ridgefield",
    ));
    let electronics = manager.add(Supplier::new(
        "Volt Wholesale",
        "sales@voltwholesale.example",
        "+1-555-0202",
        "Unit 9, Cargo Park East",
    ));

    // links can only fail for unknown supplier ids, which we just created
    let _ = manager.link_sku(&foods, "FOOD-001");
    let _ = manager.link_sku(&foods, "FOOD-002");
    let _ = manager.link_sku(&electronics, "ELEC-001");
    let _ = manager.link_sku(&electronics, "ELEC-002");

    manager
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_shape() {
        let warehouse = demo_warehouse();
        assert_eq!(warehouse.product_count(), 7);
        assert!(warehouse.get("FOOD-001").is_some());
        assert!(warehouse.total_value().is_positive());
        // every built-in category is represented
        for category in ["Food", "Electronics", "Clothing", "Household", "Vouchers"] {
            assert!(!warehouse.by_category(category).is_empty(), "{category}");
        }
    }

    #[test]
    fn test_demo_suppliers_linked() {
        let manager = demo_suppliers();
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.suppliers_for_sku("FOOD-001").len(), 1);
        assert_eq!(manager.suppliers_for_sku("ELEC-002").len(), 1);
    }
}

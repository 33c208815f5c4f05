//! # Supplier Directory
//!
//! Suppliers and their SKU links. The directory is the authority on who
//! supplies what; products themselves do not know their suppliers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};

// =============================================================================
// Supplier Types
// =============================================================================

/// One supplier and the SKUs it supplies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    /// Short id, same shape as order ids.
    pub id: String,
    pub name: String,
    pub contact_email: String,
    pub phone: String,
    pub address: String,
    /// Linked SKUs, no duplicates.
    pub skus: Vec<String>,
}

impl Supplier {
    pub fn new(
        name: impl Into<String>,
        contact_email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Supplier {
            id: Uuid::new_v4().simple().to_string()[..8].to_uppercase(),
            name: name.into(),
            contact_email: contact_email.into(),
            phone: phone.into(),
            address: address.into(),
            skus: Vec::new(),
        }
    }
}

// =============================================================================
// Supplier Manager
// =============================================================================

/// Directory of suppliers in registration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierManager {
    suppliers: Vec<Supplier>,
}

impl SupplierManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a supplier and returns its id.
    pub fn add(&mut self, supplier: Supplier) -> String {
        let id = supplier.id.clone();
        self.suppliers.push(supplier);
        id
    }

    /// Removes a supplier, returning the removed entry.
    pub fn remove(&mut self, id: &str) -> ServiceResult<Supplier> {
        let pos = self
            .suppliers
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ServiceError::SupplierNotFound(id.to_string()))?;
        Ok(self.suppliers.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    pub fn all(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// Case-insensitive substring search over names and addresses.
    pub fn search(&self, query: &str) -> Vec<&Supplier> {
        let needle = query.to_lowercase();
        self.suppliers
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle)
                    || s.address.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Links a SKU to a supplier. Linking twice is a no-op.
    pub fn link_sku(&mut self, id: &str, sku: &str) -> ServiceResult<()> {
        let supplier = self
            .suppliers
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ServiceError::SupplierNotFound(id.to_string()))?;
        if !supplier.skus.iter().any(|s| s == sku) {
            supplier.skus.push(sku.to_string());
        }
        Ok(())
    }

    /// All suppliers linked to a SKU.
    pub fn suppliers_for_sku(&self, sku: &str) -> Vec<&Supplier> {
        self.suppliers
            .iter()
            .filter(|s| s.skus.iter().any(|linked| linked == sku))
            .collect()
    }

    /// Suppliers that could replace `excluding_id` for a SKU.
    pub fn alternatives(&self, sku: &str, excluding_id: &str) -> Vec<&Supplier> {
        self.suppliers_for_sku(sku)
            .into_iter()
            .filter(|s| s.id != excluding_id)
            .collect()
    }

    /// Supplier count and number of distinct linked SKUs.
    pub fn coverage(&self) -> (usize, usize) {
        let mut skus: Vec<&str> = self
            .suppliers
            .iter()
            .flat_map(|s| s.skus.iter().map(String::as_str))
            .collect();
        skus.sort_unstable();
        skus.dedup();
        (self.suppliers.len(), skus.len())
    }

    /// Contact sheet rows (name, email, phone, address) for exports.
    pub fn contact_rows(&self) -> Vec<[String; 4]> {
        self.suppliers
            .iter()
            .map(|s| {
                [
                    s.name.clone(),
                    s.contact_email.clone(),
                    s.phone.clone(),
                    s.address.clone(),
                ]
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> Supplier {
        Supplier::new(
            "Acme Foods",
            "orders@acme.test",
            "+1-555-0101",
            "12 Harbor Street",
        )
    }

    fn globex() -> Supplier {
        Supplier::new(
            "Globex",
            "sales@globex.test",
            "+1-555-0202",
            "99 Canal Road",
        )
    }

    #[test]
    fn test_add_get_remove() {
        let mut manager = SupplierManager::new();
        let id = manager.add(acme());

        assert_eq!(manager.get(&id).unwrap().name, "Acme Foods");
        assert_eq!(manager.len(), 1);

        let removed = manager.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(manager.is_empty());
        assert!(matches!(
            manager.remove(&id),
            Err(ServiceError::SupplierNotFound(_))
        ));
    }

    #[test]
    fn test_sku_links_dedupe() {
        let mut manager = SupplierManager::new();
        let id = manager.add(acme());

        manager.link_sku(&id, "FOOD-001").unwrap();
        manager.link_sku(&id, "FOOD-001").unwrap();
        assert_eq!(manager.get(&id).unwrap().skus, vec!["FOOD-001"]);

        assert!(matches!(
            manager.link_sku("NOPE", "FOOD-001"),
            Err(ServiceError::SupplierNotFound(_))
        ));
    }

    #[test]
    fn test_suppliers_for_sku_and_alternatives() {
        let mut manager = SupplierManager::new();
        let a = manager.add(acme());
        let b = manager.add(globex());

        manager.link_sku(&a, "FOOD-001").unwrap();
        manager.link_sku(&b, "FOOD-001").unwrap();

        let names: Vec<&str> = manager
            .suppliers_for_sku("FOOD-001")
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Acme Foods", "Globex"]);

        let alternatives = manager.alternatives("FOOD-001", &a);
        assert_eq!(alternatives.len(), 1);
        assert_eq!(alternatives[0].name, "Globex");

        assert!(manager.suppliers_for_sku("ELEC-001").is_empty());
    }

    #[test]
    fn test_search_matches_name_and_address() {
        let mut manager = SupplierManager::new();
        manager.add(acme());
        manager.add(globex());

        assert_eq!(manager.search("acme").len(), 1);
        assert_eq!(manager.search("CANAL").len(), 1);
        assert_eq!(manager.search("street").len(), 1);
        assert!(manager.search("nothing").is_empty());
    }

    #[test]
    fn test_coverage_counts_distinct_skus() {
        let mut manager = SupplierManager::new();
        let a = manager.add(acme());
        let b = manager.add(globex());
        manager.link_sku(&a, "FOOD-001").unwrap();
        manager.link_sku(&b, "FOOD-001").unwrap();
        manager.link_sku(&b, "ELEC-001").unwrap();

        assert_eq!(manager.coverage(), (2, 2));
    }

    #[test]
    fn test_contact_rows() {
        let mut manager = SupplierManager::new();
        manager.add(acme());

        let rows = manager.contact_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "Acme Foods");
        assert_eq!(rows[0][3], "12 Harbor Street");
    }
}

//! # Export Service
//!
//! Writes catalog data and rendered reports to timestamped files:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Export Formats                                │
//! │                                                                     │
//! │  products_20260830_142501.csv   semicolon-delimited catalog         │
//! │  products_20260830_142501.json  pretty-printed product array        │
//! │  <prefix>_20260830_142501.txt   any rendered report                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! CSV uses `;` as the delimiter so files open cleanly in spreadsheet
//! locales where `,` is the decimal separator. Prices are exported as raw
//! cents; formatting is the consumer's concern.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use depot_core::{Product, Warehouse};

use crate::error::ServiceResult;
use crate::supplier::SupplierManager;

/// CSV column delimiter.
const CSV_DELIMITER: u8 = b';';

/// Envelope written around JSON catalog exports.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogExport {
    pub exported_at: DateTime<Utc>,
    pub warehouse_name: String,
    pub product_count: usize,
    pub products: Vec<Product>,
}

/// Writes exports into a configured output directory, creating it on
/// first use.
#[derive(Debug, Clone)]
pub struct ExportService {
    output_dir: PathBuf,
}

impl ExportService {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        ExportService {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<prefix>_YYYYmmdd_HHMMSS.<ext>` inside the output directory.
    fn timestamped_path(&self, prefix: &str, ext: &str) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        self.output_dir.join(format!("{prefix}_{stamp}.{ext}"))
    }

    fn ensure_dir(&self) -> ServiceResult<()> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Exports the full catalog as semicolon-delimited CSV.
    /// Returns the path of the written file.
    pub fn export_products_csv(&self, warehouse: &Warehouse) -> ServiceResult<PathBuf> {
        self.ensure_dir()?;
        let path = self.timestamped_path("products", "csv");

        let mut writer = csv::WriterBuilder::new()
            .delimiter(CSV_DELIMITER)
            .from_path(&path)?;

        writer.write_record([
            "sku",
            "name",
            "category",
            "price_cents",
            "quantity",
            "description",
        ])?;
        for product in warehouse.products() {
            writer.write_record([
                product.sku.as_str(),
                product.name.as_str(),
                product.category(),
                &product.price.cents().to_string(),
                &product.quantity.to_string(),
                product.description.as_str(),
            ])?;
        }
        writer.flush()?;

        info!(
            path = %path.display(),
            products = warehouse.product_count(),
            "catalog exported to CSV"
        );
        Ok(path)
    }

    /// Exports the full catalog as pretty-printed JSON wrapped in a
    /// [`CatalogExport`] envelope.
    pub fn export_products_json(&self, warehouse: &Warehouse) -> ServiceResult<PathBuf> {
        self.ensure_dir()?;
        let path = self.timestamped_path("products", "json");

        let envelope = CatalogExport {
            exported_at: Utc::now(),
            warehouse_name: warehouse.name.clone(),
            product_count: warehouse.product_count(),
            products: warehouse.products().to_vec(),
        };
        fs::write(&path, serde_json::to_string_pretty(&envelope)?)?;

        info!(
            path = %path.display(),
            products = envelope.product_count,
            "catalog exported to JSON"
        );
        Ok(path)
    }

    /// Exports the supplier contact sheet as semicolon-delimited CSV.
    pub fn export_supplier_contacts_csv(
        &self,
        suppliers: &SupplierManager,
    ) -> ServiceResult<PathBuf> {
        self.ensure_dir()?;
        let path = self.timestamped_path("suppliers", "csv");

        let mut writer = csv::WriterBuilder::new()
            .delimiter(CSV_DELIMITER)
            .from_path(&path)?;
        writer.write_record(["name", "email", "phone", "address"])?;
        for row in suppliers.contact_rows() {
            writer.write_record(&row)?;
        }
        writer.flush()?;

        info!(
            path = %path.display(),
            suppliers = suppliers.len(),
            "supplier contacts exported to CSV"
        );
        Ok(path)
    }

    /// Writes an already-rendered report as a text file under the given
    /// name prefix.
    pub fn export_report_text(&self, prefix: &str, contents: &str) -> ServiceResult<PathBuf> {
        self.ensure_dir()?;
        let path = self.timestamped_path(prefix, "txt");
        fs::write(&path, contents)?;

        info!(path = %path.display(), "report exported");
        Ok(path)
    }

    /// Writes an already-serialized operation history as a JSON file.
    pub fn export_history_json(&self, json: &str) -> ServiceResult<PathBuf> {
        self.ensure_dir()?;
        let path = self.timestamped_path("history", "json");
        fs::write(&path, json)?;

        info!(path = %path.display(), "history exported");
        Ok(path)
    }

    /// File names of all exports in the output directory, newest first.
    /// An absent directory counts as empty.
    pub fn list(&self) -> ServiceResult<Vec<String>> {
        let mut names = Vec::new();
        let entries = match fs::read_dir(&self.output_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        // timestamped names sort lexicographically in date order
        names.sort_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Deletes a named export file.
    pub fn delete(&self, file_name: &str) -> ServiceResult<()> {
        fs::remove_file(self.output_dir.join(file_name))?;
        info!(file = %file_name, "export deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::{CategoryDetails, Money, Product};

    fn stocked() -> Warehouse {
        let mut warehouse = Warehouse::new("Main", "Dock 4");
        warehouse.add(Product::new(
            "SKU-A",
            "Alpha Widget",
            Money::from_cents(1000),
            10,
            "plain widget; industrial",
            CategoryDetails::Other {
                category: "General".to_string(),
            },
        ));
        warehouse.add(Product::new(
            "SKU-B",
            "Beta Gadget",
            Money::from_cents(2500),
            4,
            "",
            CategoryDetails::Other {
                category: "General".to_string(),
            },
        ));
        warehouse
    }

    #[test]
    fn test_csv_export_shape() {
        let dir = tempfile::tempdir().unwrap();
        let service = ExportService::new(dir.path());

        let path = service.export_products_csv(&stocked()).unwrap();
        assert!(path.exists());
        assert_eq!(path.extension().unwrap(), "csv");

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "sku;name;category;price_cents;quantity;description"
        );
        // description containing the delimiter must be quoted
        let first = lines.next().unwrap();
        assert!(first.starts_with("SKU-A;Alpha Widget;General;1000;10;"));
        assert!(first.contains("\"plain widget; industrial\""));
        assert_eq!(contents.lines().count(), 3);
    }

    #[test]
    fn test_json_export_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let service = ExportService::new(dir.path());

        let path = service.export_products_json(&stocked()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let envelope: CatalogExport = serde_json::from_str(&contents).unwrap();
        assert_eq!(envelope.warehouse_name, "Main");
        assert_eq!(envelope.product_count, 2);
        assert_eq!(envelope.products[0].sku, "SKU-A");
    }

    #[test]
    fn test_supplier_contacts_csv() {
        let dir = tempfile::tempdir().unwrap();
        let service = ExportService::new(dir.path());

        let mut suppliers = SupplierManager::new();
        suppliers.add(crate::supplier::Supplier::new(
            "Acme Foods",
            "orders@acme.test",
            "+1-555-0101",
            "12 Harbor Street",
        ));

        let path = service.export_supplier_contacts_csv(&suppliers).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().next().unwrap(), "name;email;phone;address");
        assert!(contents.contains("Acme Foods;orders@acme.test"));
    }

    #[test]
    fn test_list_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let service = ExportService::new(dir.path());
        assert!(service.list().unwrap().is_empty());

        let path = service.export_report_text("inventory", "BODY").unwrap();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert_eq!(service.list().unwrap(), vec![name.clone()]);

        service.delete(&name).unwrap();
        assert!(service.list().unwrap().is_empty());
        assert!(service.delete(&name).is_err());
    }

    #[test]
    fn test_text_export_and_dir_creation() {
        let dir = tempfile::tempdir().unwrap();
        // nested directory does not exist yet
        let service = ExportService::new(dir.path().join("out/reports"));

        let path = service
            .export_report_text("inventory", "REPORT BODY")
            .unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("inventory_"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "REPORT BODY");
    }
}

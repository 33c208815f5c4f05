//! # Backup Service
//!
//! Versioned JSON snapshots of the whole application state with simple
//! retention.
//!
//! ## Backup File Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  backups/                                                           │
//! │  ├── backup_20260830_090000.json                                    │
//! │  ├── backup_20260829_090000.json                                    │
//! │  └── ...                                                            │
//! │                                                                     │
//! │  {                                                                  │
//! │    "version": "2.5",          <- format version, checked on load    │
//! │    "created_at": "...",                                             │
//! │    "warehouse": { ... },      <- full ledger incl. products         │
//! │    "suppliers": { ... },                                            │
//! │    "orders": [ ... ]                                                │
//! │  }                                                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Restoring rebuilds the ledger entry by entry through `Warehouse::add`,
//! so a restored catalog satisfies the same invariants as a live one
//! (no zero-quantity entries survive the round trip). Loading never
//! mutates application state by itself; the caller decides what to do
//! with the [`RestoredState`]. Timestamped names sort lexicographically
//! in chronological order, which `list` and `cleanup` rely on.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use depot_core::{Order, Warehouse};

use crate::error::{ServiceError, ServiceResult};
use crate::supplier::SupplierManager;

/// Format version written into every backup and required on load.
pub const BACKUP_FORMAT_VERSION: &str = "2.5";

const BACKUP_PREFIX: &str = "backup_";
const BACKUP_EXT: &str = "json";

// =============================================================================
// Backup Types
// =============================================================================

/// On-disk backup payload.
#[derive(Debug, Serialize, Deserialize)]
struct BackupFile {
    version: String,
    created_at: DateTime<Utc>,
    warehouse: Warehouse,
    suppliers: SupplierManager,
    orders: Vec<Order>,
}

/// Summary of one backup on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub product_count: usize,
    pub total_units: i64,
}

/// Everything a backup restores.
#[derive(Debug)]
pub struct RestoredState {
    pub warehouse: Warehouse,
    pub suppliers: SupplierManager,
    pub orders: Vec<Order>,
}

// =============================================================================
// Backup Service
// =============================================================================

/// Creates, lists, restores, and prunes backups in one directory.
#[derive(Debug, Clone)]
pub struct BackupService {
    backup_dir: PathBuf,
}

impl BackupService {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        BackupService {
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    fn path_for(&self, file_name: &str) -> PathBuf {
        self.backup_dir.join(file_name)
    }

    /// Writes a new backup of the full application state, returning its
    /// summary.
    pub fn create(
        &self,
        warehouse: &Warehouse,
        suppliers: &SupplierManager,
        orders: &[Order],
    ) -> ServiceResult<BackupInfo> {
        fs::create_dir_all(&self.backup_dir)?;

        let payload = BackupFile {
            version: BACKUP_FORMAT_VERSION.to_string(),
            created_at: Utc::now(),
            warehouse: warehouse.clone(),
            suppliers: suppliers.clone(),
            orders: orders.to_vec(),
        };
        let file_name = format!(
            "{BACKUP_PREFIX}{}.{BACKUP_EXT}",
            payload.created_at.format("%Y%m%d_%H%M%S")
        );
        let path = self.path_for(&file_name);
        fs::write(&path, serde_json::to_string_pretty(&payload)?)?;

        let size_bytes = fs::metadata(&path)?.len();
        info!(path = %path.display(), size_bytes, "backup created");

        Ok(BackupInfo {
            file_name,
            path,
            size_bytes,
            version: payload.version,
            created_at: payload.created_at,
            product_count: warehouse.product_count(),
            total_units: warehouse.total_units(),
        })
    }

    /// File names of all backups, newest first. An absent directory
    /// counts as empty.
    pub fn list(&self) -> ServiceResult<Vec<String>> {
        let mut names = Vec::new();
        let entries = match fs::read_dir(&self.backup_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with(BACKUP_PREFIX) && name.ends_with(&format!(".{BACKUP_EXT}")) {
                names.push(name);
            }
        }
        names.sort_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Reads the summary of one backup without restoring it.
    pub fn inspect(&self, file_name: &str) -> ServiceResult<BackupInfo> {
        let path = self.path_for(file_name);
        if !path.exists() {
            return Err(ServiceError::BackupNotFound(file_name.to_string()));
        }

        let payload: BackupFile = serde_json::from_str(&fs::read_to_string(&path)?)?;
        Ok(BackupInfo {
            file_name: file_name.to_string(),
            size_bytes: fs::metadata(&path)?.len(),
            path,
            version: payload.version,
            created_at: payload.created_at,
            product_count: payload.warehouse.product_count(),
            total_units: payload.warehouse.total_units(),
        })
    }

    /// Restores application state from a named backup.
    ///
    /// Fails on a version mismatch rather than guessing at a migration.
    pub fn load(&self, file_name: &str) -> ServiceResult<RestoredState> {
        let path = self.path_for(file_name);
        if !path.exists() {
            return Err(ServiceError::BackupNotFound(file_name.to_string()));
        }

        let payload: BackupFile = serde_json::from_str(&fs::read_to_string(&path)?)?;
        if payload.version != BACKUP_FORMAT_VERSION {
            return Err(ServiceError::UnsupportedBackupVersion {
                found: payload.version,
                expected: BACKUP_FORMAT_VERSION.to_string(),
            });
        }

        // Rebuild through the front door so ledger invariants hold.
        let mut warehouse =
            Warehouse::new(payload.warehouse.name.clone(), payload.warehouse.location.clone());
        for product in payload.warehouse.products() {
            warehouse.add(product.clone());
        }

        info!(
            path = %path.display(),
            products = warehouse.product_count(),
            orders = payload.orders.len(),
            "backup restored"
        );
        Ok(RestoredState {
            warehouse,
            suppliers: payload.suppliers,
            orders: payload.orders,
        })
    }

    /// Deletes a named backup.
    pub fn delete(&self, file_name: &str) -> ServiceResult<()> {
        let path = self.path_for(file_name);
        if !path.exists() {
            return Err(ServiceError::BackupNotFound(file_name.to_string()));
        }
        fs::remove_file(&path)?;
        info!(path = %path.display(), "backup deleted");
        Ok(())
    }

    /// Keeps the newest `keep` backups and deletes the rest, returning
    /// how many were removed.
    pub fn cleanup(&self, keep: usize) -> ServiceResult<usize> {
        let names = self.list()?;
        let mut deleted = 0;
        for name in names.iter().skip(keep) {
            if let Err(e) = self.delete(name) {
                warn!(file = %name, error = %e, "failed to delete old backup");
            } else {
                deleted += 1;
            }
        }
        if deleted > 0 {
            info!(deleted, keep, "backup retention applied");
        }
        Ok(deleted)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supplier::Supplier;
    use depot_core::{CategoryDetails, Money, Product};

    fn stocked() -> Warehouse {
        let mut warehouse = Warehouse::new("Main", "Dock 4");
        warehouse.add(Product::new(
            "SKU-A",
            "Alpha Widget",
            Money::from_cents(1000),
            10,
            "",
            CategoryDetails::Other {
                category: "General".to_string(),
            },
        ));
        warehouse
    }

    fn directory() -> SupplierManager {
        let mut manager = SupplierManager::new();
        let id = manager.add(Supplier::new(
            "Acme Foods",
            "orders@acme.test",
            "+1-555-0101",
            "12 Harbor Street",
        ));
        manager.link_sku(&id, "SKU-A").unwrap();
        manager
    }

    /// Writes a minimal valid backup under a fixed name.
    fn write_fixture(service: &BackupService, name: &str, version: &str) {
        fs::create_dir_all(service.backup_dir()).unwrap();
        let payload = BackupFile {
            version: version.to_string(),
            created_at: Utc::now(),
            warehouse: stocked(),
            suppliers: directory(),
            orders: Vec::new(),
        };
        fs::write(
            service.backup_dir().join(name),
            serde_json::to_string(&payload).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn test_create_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let service = BackupService::new(dir.path());

        let mut warehouse = stocked();
        let mut order = Order::new("Ada");
        order.add_line("SKU-A", 2).unwrap();
        order.fulfill(&mut warehouse).unwrap();

        let info = service
            .create(&warehouse, &directory(), &[order.clone()])
            .unwrap();
        assert_eq!(info.version, BACKUP_FORMAT_VERSION);
        assert_eq!(info.product_count, 1);
        assert!(info.size_bytes > 0);

        let restored = service.load(&info.file_name).unwrap();
        assert_eq!(restored.warehouse.name, "Main");
        assert_eq!(restored.warehouse.get("SKU-A").unwrap().quantity, 8);
        assert_eq!(restored.suppliers.len(), 1);
        assert_eq!(restored.orders.len(), 1);
        assert_eq!(restored.orders[0].id, order.id);
        assert_eq!(restored.orders[0].fulfilled_total, order.fulfilled_total);
    }

    #[test]
    fn test_load_rejects_other_versions() {
        let dir = tempfile::tempdir().unwrap();
        let service = BackupService::new(dir.path());
        write_fixture(&service, "backup_20260101_000000.json", "1.0");

        let err = service.load("backup_20260101_000000.json").unwrap_err();
        assert!(matches!(
            err,
            ServiceError::UnsupportedBackupVersion { ref found, .. } if found == "1.0"
        ));
    }

    #[test]
    fn test_list_newest_first_and_filters_strays() {
        let dir = tempfile::tempdir().unwrap();
        let service = BackupService::new(dir.path());
        write_fixture(&service, "backup_20260101_000000.json", BACKUP_FORMAT_VERSION);
        write_fixture(&service, "backup_20260201_000000.json", BACKUP_FORMAT_VERSION);
        fs::write(dir.path().join("notes.txt"), "stray").unwrap();

        let names = service.list().unwrap();
        assert_eq!(
            names,
            vec![
                "backup_20260201_000000.json",
                "backup_20260101_000000.json"
            ]
        );
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let service = BackupService::new(dir.path().join("never_created"));
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_cleanup_keeps_newest() {
        let dir = tempfile::tempdir().unwrap();
        let service = BackupService::new(dir.path());
        for day in 1..=5 {
            write_fixture(
                &service,
                &format!("backup_2026010{day}_000000.json"),
                BACKUP_FORMAT_VERSION,
            );
        }

        let deleted = service.cleanup(2).unwrap();
        assert_eq!(deleted, 3);
        assert_eq!(
            service.list().unwrap(),
            vec![
                "backup_20260105_000000.json",
                "backup_20260104_000000.json"
            ]
        );
    }

    #[test]
    fn test_missing_backup_errors() {
        let dir = tempfile::tempdir().unwrap();
        let service = BackupService::new(dir.path());

        assert!(matches!(
            service.load("backup_nope.json"),
            Err(ServiceError::BackupNotFound(_))
        ));
        assert!(matches!(
            service.delete("backup_nope.json"),
            Err(ServiceError::BackupNotFound(_))
        ));
        assert!(matches!(
            service.inspect("backup_nope.json"),
            Err(ServiceError::BackupNotFound(_))
        ));
    }
}

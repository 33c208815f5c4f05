//! # depot-services: Reports, Files, and Notifications for Depot
//!
//! Everything the application does *around* the core ledger: rendering
//! reports, computing statistics, writing exports and backups to disk,
//! keeping the operation history, raising notifications, and managing the
//! supplier directory.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  apps/cli (menu loop)                               │
//! └───────────────────────────┬─────────────────────────────────────────┘
//!                             │
//! ┌───────────────────────────▼─────────────────────────────────────────┐
//! │             ★ depot-services (THIS CRATE) ★                         │
//! │                                                                     │
//! │  ┌────────┐ ┌───────┐ ┌────────┐ ┌────────┐ ┌─────────┐ ┌────────┐ │
//! │  │ report │ │ stats │ │ export │ │ backup │ │ history │ │ notify │ │
//! │  └────────┘ └───────┘ └────────┘ └────────┘ └─────────┘ └────────┘ │
//! │                                                                     │
//! │  OWNS: std::fs, csv, serde_json file I/O, tracing spans             │
//! └───────────────────────────┬─────────────────────────────────────────┘
//!                             │
//! ┌───────────────────────────▼─────────────────────────────────────────┐
//! │                 depot-core (pure, no I/O)                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`report`] - Inventory, low-stock, and sales reports
//! - [`stats`] - Distributions, top lists, price range, stock health
//! - [`export`] - Timestamped CSV/JSON/text files
//! - [`backup`] - Versioned JSON snapshots with retention cleanup
//! - [`history`] - Bounded in-memory audit trail
//! - [`notify`] - Severity-tagged notification center with stock sweeps
//! - [`supplier`] - Supplier directory and SKU links
//! - [`error`] - Service error types

pub mod backup;
pub mod error;
pub mod export;
pub mod history;
pub mod notify;
pub mod report;
pub mod stats;
pub mod supplier;

pub use backup::{BackupInfo, BackupService, RestoredState, BACKUP_FORMAT_VERSION};
pub use error::{ServiceError, ServiceResult};
pub use export::{CatalogExport, ExportService};
pub use history::{HistoryEntry, OperationHistory, OperationKind};
pub use notify::{Notification, NotificationCenter, Severity};
pub use report::{inventory_report, low_stock_report, sales_report};
pub use stats::{compute_stats, render_bar_chart, PriceRange, StockHealth, TopProduct, WarehouseStats};
pub use supplier::{Supplier, SupplierManager};

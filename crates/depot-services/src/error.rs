//! # Service Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Service Error Categories                        │
//! │                                                                     │
//! │  ┌───────────────┐  ┌────────────────┐  ┌──────────────────────┐   │
//! │  │   Wrapped     │  │    Backup      │  │      Directory       │   │
//! │  │               │  │                │  │                      │   │
//! │  │  Io           │  │  BackupNotFound│  │  SupplierNotFound    │   │
//! │  │  Json         │  │  BadVersion    │  │                      │   │
//! │  │  Csv          │  │                │  │                      │   │
//! │  └───────────────┘  └────────────────┘  └──────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from the file, report, and directory services.
#[derive(Debug, Error)]
pub enum ServiceError {
    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// File system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // =========================================================================
    // Backup Errors
    // =========================================================================
    /// Named backup file does not exist in the backup directory.
    #[error("Backup not found: {0}")]
    BackupNotFound(String),

    /// Backup file carries a format version this build cannot restore.
    #[error("Unsupported backup version {found} (expected {expected})")]
    UnsupportedBackupVersion { found: String, expected: String },

    // =========================================================================
    // Directory Errors
    // =========================================================================
    /// Supplier id absent from the directory.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(String),
}

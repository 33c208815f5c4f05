//! # Operation History
//!
//! A bounded, in-memory audit trail of everything the operator did this
//! session. Owned explicitly by the application and passed where needed;
//! there is no global instance.
//!
//! The trail is capped: once full, recording drops the oldest entry. It
//! is a session log, not durable storage; backups are the durability
//! story.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ServiceResult;

/// Default entry cap.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Actor recorded when no operator name is given.
pub const DEFAULT_ACTOR: &str = "operator";

// =============================================================================
// History Types
// =============================================================================

/// What kind of operation an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    ProductAdded,
    ProductRemoved,
    StockReceived,
    StockIssued,
    PriceChanged,
    OrderCreated,
    OrderFulfilled,
    OrderCancelled,
    DiscountCreated,
    DiscountAssigned,
    BackupCreated,
    BackupRestored,
    Export,
    SupplierAdded,
}

impl OperationKind {
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::ProductAdded => "product added",
            OperationKind::ProductRemoved => "product removed",
            OperationKind::StockReceived => "stock received",
            OperationKind::StockIssued => "stock issued",
            OperationKind::PriceChanged => "price changed",
            OperationKind::OrderCreated => "order created",
            OperationKind::OrderFulfilled => "order fulfilled",
            OperationKind::OrderCancelled => "order cancelled",
            OperationKind::DiscountCreated => "discount created",
            OperationKind::DiscountAssigned => "discount assigned",
            OperationKind::BackupCreated => "backup created",
            OperationKind::BackupRestored => "backup restored",
            OperationKind::Export => "export",
            OperationKind::SupplierAdded => "supplier added",
        }
    }
}

/// One recorded operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Short id, same shape as order ids.
    pub id: String,
    pub at: DateTime<Utc>,
    pub kind: OperationKind,
    /// Who performed the operation.
    pub actor: String,
    /// Human-readable detail, e.g. "FOOD-001 x5".
    pub detail: String,
}

// =============================================================================
// Operation History
// =============================================================================

/// Bounded log of operations, oldest first.
#[derive(Debug, Clone)]
pub struct OperationHistory {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for OperationHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl OperationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        OperationHistory {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Records an operation under [`DEFAULT_ACTOR`], evicting the oldest
    /// entry when full.
    pub fn record(&mut self, kind: OperationKind, detail: impl Into<String>) {
        self.record_as(DEFAULT_ACTOR, kind, detail);
    }

    /// Records an operation attributed to a named actor.
    pub fn record_as(
        &mut self,
        actor: impl Into<String>,
        kind: OperationKind,
        detail: impl Into<String>,
    ) {
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(HistoryEntry {
            id: Uuid::new_v4().simple().to_string()[..8].to_uppercase(),
            at: Utc::now(),
            kind,
            actor: actor.into(),
            detail: detail.into(),
        });
    }

    /// The most recent `n` entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    /// All entries of one kind, oldest first.
    pub fn by_kind(&self, kind: OperationKind) -> Vec<&HistoryEntry> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    /// Entry counts per kind, in first-seen order.
    pub fn counts_by_kind(&self) -> Vec<(OperationKind, usize)> {
        let mut counts: Vec<(OperationKind, usize)> = Vec::new();
        for entry in &self.entries {
            match counts.iter_mut().find(|(kind, _)| *kind == entry.kind) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.kind, 1)),
            }
        }
        counts
    }

    /// The whole trail as pretty-printed JSON, oldest first.
    pub fn to_json(&self) -> ServiceResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_recent_order() {
        let mut history = OperationHistory::new();
        history.record(OperationKind::ProductAdded, "SKU-A");
        history.record(OperationKind::StockIssued, "SKU-A x3");
        history.record(OperationKind::OrderCreated, "3F2A9C1B");

        let recent = history.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].detail, "3F2A9C1B"); // newest first
        assert_eq!(recent[1].detail, "SKU-A x3");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = OperationHistory::with_capacity(2);
        history.record(OperationKind::ProductAdded, "first");
        history.record(OperationKind::ProductAdded, "second");
        history.record(OperationKind::ProductAdded, "third");

        assert_eq!(history.len(), 2);
        let recent = history.recent(10);
        assert_eq!(recent[0].detail, "third");
        assert_eq!(recent[1].detail, "second");
    }

    #[test]
    fn test_by_kind_filters() {
        let mut history = OperationHistory::new();
        history.record(OperationKind::ProductAdded, "SKU-A");
        history.record(OperationKind::StockIssued, "SKU-A x1");
        history.record(OperationKind::ProductAdded, "SKU-B");

        let added = history.by_kind(OperationKind::ProductAdded);
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].detail, "SKU-A"); // oldest first
    }

    #[test]
    fn test_counts_by_kind() {
        let mut history = OperationHistory::new();
        history.record(OperationKind::ProductAdded, "SKU-A");
        history.record(OperationKind::StockIssued, "SKU-A x1");
        history.record(OperationKind::ProductAdded, "SKU-B");

        assert_eq!(
            history.counts_by_kind(),
            vec![
                (OperationKind::ProductAdded, 2),
                (OperationKind::StockIssued, 1)
            ]
        );
    }

    #[test]
    fn test_entries_carry_id_and_actor() {
        let mut history = OperationHistory::new();
        history.record(OperationKind::ProductAdded, "SKU-A");
        history.record_as("jane", OperationKind::StockIssued, "SKU-A x1");

        let recent = history.recent(2);
        assert_eq!(recent[0].actor, "jane");
        assert_eq!(recent[1].actor, DEFAULT_ACTOR);
        assert_eq!(recent[0].id.len(), 8);
        assert_ne!(recent[0].id, recent[1].id);
    }

    #[test]
    fn test_to_json_lists_entries() {
        let mut history = OperationHistory::new();
        history.record(OperationKind::Export, "products.csv");

        let json = history.to_json().unwrap();
        assert!(json.contains("\"export\""));
        assert!(json.contains("products.csv"));
    }

    #[test]
    fn test_clear() {
        let mut history = OperationHistory::new();
        history.record(OperationKind::Export, "products.csv");
        history.clear();
        assert!(history.is_empty());
        assert!(history.recent(5).is_empty());
    }
}

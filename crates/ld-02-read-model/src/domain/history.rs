//! # Revenue History
//!
//! Revenue entries confirmed in this session. The contract only stores the
//! running total, so the list lives next to the view model rather than in
//! it and is never reconciled against the ledger.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Description used for entries recorded without one.
pub const DEFAULT_REVENUE_LABEL: &str = "Revenue";

/// A revenue entry recorded in this session. Never read from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// When the entry was confirmed.
    pub recorded_at: DateTime<Utc>,
    /// User-supplied description.
    pub description: String,
    /// Amount in IDR.
    pub amount: u64,
}

impl HistoryEntry {
    /// `d/m/yyyy`, the way the Indonesian locale writes dates.
    pub fn date_label(&self) -> String {
        self.recorded_at.format("%-d/%-m/%Y").to_string()
    }
}

/// Session revenue log, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RevenueHistory {
    entries: Vec<HistoryEntry>,
}

impl RevenueHistory {
    /// Log a confirmed entry. A blank description becomes
    /// [`DEFAULT_REVENUE_LABEL`].
    pub fn record(&mut self, amount: u64, description: &str, recorded_at: DateTime<Utc>) {
        let description = match description.trim() {
            "" => DEFAULT_REVENUE_LABEL.to_string(),
            trimmed => trimmed.to_string(),
        };
        self.entries.insert(
            0,
            HistoryEntry {
                recorded_at,
                description,
                amount,
            },
        );
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

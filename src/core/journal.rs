//! Journal of mutation requests.
//!
//! Every request made through the editor is recorded together with its
//! [`Outcome`], so skipped requests (stale row or product references) stay
//! visible after the fact instead of vanishing. The journal is bounded:
//! once it holds its capacity the oldest record is dropped for each new one.

use super::layout::Outcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A mutation request as issued by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOp {
    AddRow {
        row_id: String,
    },
    RemoveRow {
        row_id: String,
    },
    MoveRow {
        from: usize,
        to: usize,
    },
    UpdateRowTemplate {
        row_id: String,
        template_id: String,
    },
    MoveProduct {
        source_row_id: Option<String>,
        destination_row_id: Option<String>,
        product_id: String,
        destination_index: Option<usize>,
    },
}

impl EditOp {
    pub fn name(&self) -> &str {
        match self {
            Self::AddRow { .. } => "add_row",
            Self::RemoveRow { .. } => "remove_row",
            Self::MoveRow { .. } => "move_row",
            Self::UpdateRowTemplate { .. } => "update_row_template",
            Self::MoveProduct { .. } => "move_product",
        }
    }
}

/// One journal entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditRecord {
    pub op: EditOp,
    pub outcome: Outcome,
    pub timestamp: DateTime<Utc>,
}

/// Records kept by [`EditJournal::new`].
pub const DEFAULT_JOURNAL_CAPACITY: usize = 1000;

fn default_capacity() -> usize {
    DEFAULT_JOURNAL_CAPACITY
}

/// Ordered list of the most recent edit records, oldest first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EditJournal {
    records: Vec<EditRecord>,
    #[serde(default = "default_capacity")]
    capacity: usize,
}

impl EditJournal {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_JOURNAL_CAPACITY)
    }

    /// A journal that keeps at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a request and its outcome, stamped with the current time.
    ///
    /// Drops the oldest record when the journal is full.
    pub fn record(&mut self, op: EditOp, outcome: Outcome) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() >= self.capacity {
            let excess = self.records.len() + 1 - self.capacity;
            self.records.drain(..excess);
        }
        self.records.push(EditRecord {
            op,
            outcome,
            timestamp: Utc::now(),
        });
    }

    pub fn records(&self) -> &[EditRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose request was ignored.
    pub fn skipped(&self) -> impl Iterator<Item = &EditRecord> {
        self.records.iter().filter(|r| !r.outcome.is_applied())
    }

    /// Time between the first and last record, `None` when empty.
    pub fn span(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let span = last.timestamp.signed_duration_since(first.timestamp);
            span.to_std().ok()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for EditJournal {
    fn default() -> Self {
        Self::new()
    }
}

//! Bounded decision history.
//!
//! Appending past the cap trims the log to its most recent `trim_to` entries
//! in the same call, so no caller ever observes more than `cap` records.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::DecisionRecord;

/// Maximum number of records kept.
pub const DEFAULT_HISTORY_CAP: usize = 1000;

/// Records retained after an overflow trim.
pub const DEFAULT_HISTORY_TRIM_TO: usize = 500;

/// Capacity rules for a [`DecisionHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLimits {
    cap: usize,
    trim_to: usize,
}

impl HistoryLimits {
    /// Creates limits; `trim_to` must be non-zero and below `cap`.
    pub fn new(cap: usize, trim_to: usize) -> Result<Self, ValidationError> {
        if cap == 0 {
            return Err(ValidationError::out_of_range("history_cap", 1.0, f64::MAX, 0.0));
        }
        if trim_to == 0 || trim_to >= cap {
            return Err(ValidationError::out_of_range(
                "history_trim_to",
                1.0,
                (cap - 1) as f64,
                trim_to as f64,
            ));
        }
        Ok(Self { cap, trim_to })
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn trim_to(&self) -> usize {
        self.trim_to
    }
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            cap: DEFAULT_HISTORY_CAP,
            trim_to: DEFAULT_HISTORY_TRIM_TO,
        }
    }
}

/// Ordered, capped sequence of decision records (oldest first).
#[derive(Debug, Clone, Default)]
pub struct DecisionHistory {
    limits: HistoryLimits,
    records: VecDeque<DecisionRecord>,
}

impl DecisionHistory {
    pub fn new(limits: HistoryLimits) -> Self {
        Self {
            limits,
            records: VecDeque::new(),
        }
    }

    /// Rebuilds a history from stored records, applying the trim rule if the
    /// stored list is already over the cap.
    pub fn from_records(limits: HistoryLimits, records: Vec<DecisionRecord>) -> Self {
        let mut history = Self {
            limits,
            records: records.into(),
        };
        history.enforce_cap();
        history
    }

    /// Appends a record, trimming when the cap is exceeded.
    ///
    /// Returns `true` if a trim happened.
    pub fn push(&mut self, record: DecisionRecord) -> bool {
        self.records.push_back(record);
        self.enforce_cap()
    }

    /// Most recent `limit` records in chronological order.
    pub fn recent(&self, limit: usize) -> Vec<DecisionRecord> {
        let skip = self.records.len().saturating_sub(limit);
        self.records.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limits(&self) -> HistoryLimits {
        self.limits
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecisionRecord> {
        self.records.iter()
    }

    fn enforce_cap(&mut self) -> bool {
        if self.records.len() <= self.limits.cap {
            return false;
        }
        let excess = self.records.len() - self.limits.trim_to;
        self.records.drain(..excess);
        true
    }
}

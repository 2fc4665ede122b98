//! In-memory command history with usage analytics.
//!
//! Owned by whoever fronts the engine and passed around explicitly; the
//! resolver itself never touches it. Bounded: the oldest entries are evicted
//! once `limit` is reached.

use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ii_protocol::{AnalyticsSummary, Intent, ValidationReport};

/// Default number of entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// One recorded, successfully resolved command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Entry ID (UUIDv7 for time-sortability).
    pub id: Uuid,
    /// Raw command text as typed.
    pub input: String,
    pub intent: Intent,
    pub validation: ValidationReport,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only command log guarded by a `RwLock`.
#[derive(Debug)]
pub struct CommandHistory {
    entries: RwLock<VecDeque<HistoryEntry>>,
    limit: usize,
}

impl CommandHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            limit: limit.max(1),
        }
    }

    /// Record a resolved intent, stamping its timestamp with the record time.
    pub fn record(
        &self,
        input: impl Into<String>,
        mut intent: Intent,
        validation: ValidationReport,
    ) -> HistoryEntry {
        let now = Utc::now();
        intent.timestamp = now;
        let entry = HistoryEntry {
            id: Uuid::now_v7(),
            input: input.into(),
            intent,
            validation,
            recorded_at: now,
        };

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.push_back(entry.clone());
        while entries.len() > self.limit {
            if let Some(evicted) = entries.pop_front() {
                tracing::debug!(id = %evicted.id, limit = self.limit, "history full, evicted oldest entry");
            }
        }
        entry
    }

    /// Snapshot of all entries, oldest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn analytics(&self) -> AnalyticsSummary {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        AnalyticsSummary::from_intents(entries.iter().map(|e| &e.intent))
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

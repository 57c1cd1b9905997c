use super::{Action, Decision, FileIndex, SessionState};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One recorded keep/discard action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub action: Action,
    pub item_name: String,
    pub cursor_before: usize,
}

/// Result of asking the ledger to record a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    /// Cursor is already past the last item
    ReviewComplete,
    /// The named item is not the one under the cursor (repeat or stale submit)
    Stale,
}

/// Keep set, discard set and cursor derived from a ledger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerProjection {
    pub keep_list: Vec<String>,
    pub discard_list: Vec<String>,
    pub cursor: usize,
}

impl LedgerProjection {
    fn apply(&mut self, entry: &LedgerEntry) {
        self.keep_list.retain(|n| n != &entry.item_name);
        self.discard_list.retain(|n| n != &entry.item_name);

        match entry.action {
            Action::Keep => self.keep_list.push(entry.item_name.clone()),
            Action::Discard => self.discard_list.push(entry.item_name.clone()),
        }
        self.cursor = entry.cursor_before + 1;
    }
}

/// Replays `entries` in order from an empty state.
///
/// Each name lands in the set of its latest entry, so the two lists are
/// always disjoint. Lists are ordered by the position of that latest entry.
pub fn replay(entries: &[LedgerEntry]) -> LedgerProjection {
    let mut projection = LedgerProjection::default();
    for entry in entries {
        projection.apply(entry);
    }
    projection
}

impl SessionState {
    pub fn record_keep(&mut self, item_name: &str, index: &FileIndex) -> RecordOutcome {
        self.record(Action::Keep, item_name, index)
    }

    pub fn record_discard(&mut self, item_name: &str, index: &FileIndex) -> RecordOutcome {
        self.record(Action::Discard, item_name, index)
    }

    /// Appends a decision for the item under the cursor and advances it.
    ///
    /// `item_name` must name the item at the cursor in `index`; anything else
    /// is ignored so a double submit cannot record twice.
    pub fn record(&mut self, action: Action, item_name: &str, index: &FileIndex) -> RecordOutcome {
        let current = match index.get(self.cursor) {
            Some(item) => item,
            None => return RecordOutcome::ReviewComplete,
        };

        if current.name != item_name {
            debug!(
                expected = %current.name,
                got = item_name,
                "ignoring decision for item not under the cursor"
            );
            return RecordOutcome::Stale;
        }

        let entry = LedgerEntry {
            action,
            item_name: item_name.to_string(),
            cursor_before: self.cursor,
        };

        let mut projection = LedgerProjection {
            keep_list: std::mem::take(&mut self.keep_list),
            discard_list: std::mem::take(&mut self.discard_list),
            cursor: self.cursor,
        };
        projection.apply(&entry);
        projection.cursor = projection.cursor.min(index.len());

        self.keep_list = projection.keep_list;
        self.discard_list = projection.discard_list;
        self.cursor = projection.cursor;
        self.ledger.push(entry);

        debug!(action = action.as_str(), item = item_name, cursor = self.cursor, "recorded decision");
        RecordOutcome::Recorded
    }

    /// Pops the latest entry and restores the cursor it was recorded at.
    ///
    /// Sets are rebuilt from the remaining entries, so a name decided twice
    /// falls back to its earlier decision.
    pub fn undo(&mut self) -> Option<LedgerEntry> {
        let entry = self.ledger.pop()?;

        let projection = replay(&self.ledger);
        self.keep_list = projection.keep_list;
        self.discard_list = projection.discard_list;
        self.cursor = entry.cursor_before;

        debug!(item = %entry.item_name, cursor = self.cursor, "undid decision");
        Some(entry)
    }

    /// Current decision for `name`
    pub fn decision_for(&self, name: &str) -> Decision {
        if self.keep_list.iter().any(|n| n == name) {
            Decision::Keep
        } else if self.discard_list.iter().any(|n| n == name) {
            Decision::Discard
        } else {
            Decision::Undecided
        }
    }

    /// Decided names with their action, ordered by their latest ledger entry
    pub fn decided(&self) -> Vec<(&str, Action)> {
        let mut decided: Vec<(&str, Action)> = Vec::new();
        for entry in &self.ledger {
            decided.retain(|(name, _)| *name != entry.item_name);
            decided.push((entry.item_name.as_str(), entry.action));
        }
        decided
    }

    /// Current state as derived by replay
    pub fn projection(&self) -> LedgerProjection {
        LedgerProjection {
            keep_list: self.keep_list.clone(),
            discard_list: self.discard_list.clone(),
            cursor: self.cursor,
        }
    }
}

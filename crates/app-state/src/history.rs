//! Snapshot-based undo/redo history manager.
//!
//! - Undo/redo stacks of [`HistorySnapshot`]s, bounded by `max_entries`
//!   (oldest entries are dropped first)
//! - Linear history: pushing a new entry after an undo discards the redo stack
//! - Batch grouping to collapse a whole drag gesture into one undo step
//!
//! # Usage
//!
//! ```ignore
//! let mut history = HistoryManager::new(50);
//!
//! // Before a structural edit, capture the current document
//! history.push("Delete clips", HistorySnapshot::capture(&doc));
//!
//! // Undo: hand in the current state, get back the one to restore
//! if let Some(prev) = history.undo(HistorySnapshot::capture(&doc)) {
//!     doc = prev.into_document();
//! }
//!
//! // Batch grouping (for drag gestures)
//! history.start_batch("Move clips", HistorySnapshot::capture(&doc));
//! // ... many edits, push() calls are suppressed ...
//! history.end_batch(&doc);
//! ```

use std::sync::Arc;

use crate::document::Document;
use crate::snapshot::HistorySnapshot;

/// A single entry in the undo/redo history.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    /// Human-readable label describing the action (e.g., "Move clips", "Delete track").
    pub label: String,
    /// The state snapshot at this point in history.
    pub snapshot: HistorySnapshot,
}

/// Manages undo/redo history using document snapshots.
///
/// - The undo stack holds the states *before* each recorded action
/// - Undoing moves the current state onto the redo stack, and redo does the reverse
/// - Batch mode suppresses individual pushes and records one entry on end
pub struct HistoryManager {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    max_entries: usize,
    /// When Some, we are in batch mode and push() calls are suppressed.
    /// The string is the batch label.
    batch_label: Option<String>,
    /// Snapshot captured at the start of a batch (the "before" state).
    batch_start_snapshot: Option<HistorySnapshot>,
}

impl HistoryManager {
    /// Create a new history manager with the given maximum number of undo entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries,
            batch_label: None,
            batch_start_snapshot: None,
        }
    }

    /// Push a new snapshot onto the undo stack, representing the state *before*
    /// the current action.
    ///
    /// - Clears the redo stack.
    /// - If in batch mode, the push is suppressed.
    pub fn push(&mut self, label: &str, snapshot: HistorySnapshot) {
        if self.batch_label.is_some() {
            tracing::trace!(label, "Push suppressed: batch in progress");
            return;
        }

        self.record(label.to_string(), snapshot);

        tracing::debug!(
            label,
            undo_depth = self.undo_stack.len(),
            "History entry pushed"
        );
    }

    /// Undo the last action.
    ///
    /// `current` is the state being left; it goes onto the redo stack so redo can
    /// return to it. Returns the snapshot to restore, or `None` if there is
    /// nothing to undo.
    pub fn undo(&mut self, current: HistorySnapshot) -> Option<HistorySnapshot> {
        self.end_stuck_batch("undo");

        let entry = self.undo_stack.pop()?;
        tracing::debug!(
            label = %entry.label,
            undo_remaining = self.undo_stack.len(),
            "Undo"
        );

        self.redo_stack.push(HistoryEntry {
            label: entry.label,
            snapshot: current,
        });
        Some(entry.snapshot)
    }

    /// Redo the last undone action. Returns the snapshot to restore, or `None`
    /// if there is nothing to redo.
    pub fn redo(&mut self, current: HistorySnapshot) -> Option<HistorySnapshot> {
        self.end_stuck_batch("redo");

        let entry = self.redo_stack.pop()?;
        tracing::debug!(
            label = %entry.label,
            redo_remaining = self.redo_stack.len(),
            "Redo"
        );

        self.undo_stack.push(HistoryEntry {
            label: entry.label,
            snapshot: current,
        });
        self.enforce_max();
        Some(entry.snapshot)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Start a batch operation. While batching, individual `push()` calls are
    /// suppressed. `before` captures the state before the batch begins.
    pub fn start_batch(&mut self, label: &str, before: HistorySnapshot) {
        if self.batch_label.is_some() {
            tracing::warn!(label, "start_batch called while already batching, ignoring");
            return;
        }

        self.batch_label = Some(label.to_string());
        self.batch_start_snapshot = Some(before);

        tracing::debug!(label, "Batch started");
    }

    /// End the current batch. Records a single undo entry holding the state
    /// captured at `start_batch`, unless `current` is still that very document
    /// (nothing changed). Returns whether an entry was recorded.
    pub fn end_batch(&mut self, current: &Arc<Document>) -> bool {
        let (Some(label), Some(start_snapshot)) =
            (self.batch_label.take(), self.batch_start_snapshot.take())
        else {
            return false;
        };

        if start_snapshot.same_document(current) {
            tracing::debug!(label = %label, "Batch ended without changes");
            return false;
        }

        self.record(label, start_snapshot);
        tracing::debug!(
            undo_depth = self.undo_stack.len(),
            "Batch ended, entry pushed"
        );
        true
    }

    /// Abandon the current batch without recording it. Returns the snapshot
    /// captured at `start_batch` so the caller can roll back to it.
    pub fn cancel_batch(&mut self) -> Option<HistorySnapshot> {
        let label = self.batch_label.take()?;
        tracing::debug!(label = %label, "Batch cancelled");
        self.batch_start_snapshot.take()
    }

    /// Whether a batch operation is currently in progress.
    pub fn is_batching(&self) -> bool {
        self.batch_label.is_some()
    }

    /// Get the label of the action that would be undone next.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().map(|e| e.label.as_str())
    }

    /// Get the label of the action that would be redone next.
    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.last().map(|e| e.label.as_str())
    }

    /// Number of entries on the undo stack.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of entries on the redo stack.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all history (undo and redo stacks) and any open batch.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.batch_label = None;
        self.batch_start_snapshot = None;
        tracing::debug!("History cleared");
    }

    /// Get the maximum number of undo entries.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Set the maximum number of undo entries. Trims the oldest entries if needed.
    pub fn set_max_entries(&mut self, max: usize) {
        self.max_entries = max;
        self.enforce_max();
    }

    fn record(&mut self, label: String, snapshot: HistorySnapshot) {
        self.redo_stack.clear();
        self.undo_stack.push(HistoryEntry { label, snapshot });
        self.enforce_max();
    }

    fn enforce_max(&mut self) {
        if self.undo_stack.len() > self.max_entries {
            let excess = self.undo_stack.len() - self.max_entries;
            self.undo_stack.drain(..excess);
        }
    }

    // A batch left open (lost pointer-up) must not swallow the next undo/redo.
    fn end_stuck_batch(&mut self, op: &str) {
        if self.batch_label.is_some() {
            tracing::warn!(op, "Ending stuck batch");
            self.batch_label = None;
            self.batch_start_snapshot = None;
        }
    }
}

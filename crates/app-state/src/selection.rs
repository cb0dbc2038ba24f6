//! Clip selection state.

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// The set of selected clip ids, kept in selection order.
///
/// The store prunes it against the document after every structural edit and
/// every undo/redo, so it never names a clip that does not exist.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    selected_clips: Vec<String>,
}

impl SelectionState {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a clip. If `multi` is false, clears the previous selection first.
    pub fn select_clip(&mut self, clip_id: &str, multi: bool) {
        if !multi {
            self.selected_clips.clear();
        }
        if !self.is_clip_selected(clip_id) {
            self.selected_clips.push(clip_id.to_string());
        }
    }

    /// Add the clip if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle_clip(&mut self, clip_id: &str) -> bool {
        if self.is_clip_selected(clip_id) {
            self.deselect_clip(clip_id);
            false
        } else {
            self.selected_clips.push(clip_id.to_string());
            true
        }
    }

    /// Deselect a specific clip by ID.
    pub fn deselect_clip(&mut self, clip_id: &str) {
        self.selected_clips.retain(|id| id != clip_id);
    }

    /// Replace the selection with the given ids (duplicates collapse).
    pub fn set_clips<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selected_clips.clear();
        for id in ids {
            self.select_clip(id.as_ref(), true);
        }
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected_clips.clear();
    }

    /// Drop ids that no longer name a clip in `doc`. Returns how many were dropped.
    pub fn retain_existing(&mut self, doc: &Document) -> usize {
        let before = self.selected_clips.len();
        self.selected_clips.retain(|id| doc.contains_clip(id));
        let pruned = before - self.selected_clips.len();
        if pruned > 0 {
            tracing::debug!(pruned, remaining = self.selected_clips.len(), "Selection pruned");
        }
        pruned
    }

    /// Get the list of currently selected clip IDs.
    pub fn selected_clips(&self) -> &[String] {
        &self.selected_clips
    }

    /// Check if a clip is currently selected.
    pub fn is_clip_selected(&self, clip_id: &str) -> bool {
        self.selected_clips.iter().any(|id| id == clip_id)
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected_clips.is_empty()
    }

    pub fn count(&self) -> usize {
        self.selected_clips.len()
    }
}

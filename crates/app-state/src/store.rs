//! The timeline store: canonical owner of the editor state and the single
//! entry point for structural mutation.
//!
//! Every structural change goes through [`TimelineStore::apply`], which
//!
//! 1. applies the [`Edit`] to a private copy of the document,
//! 2. on success publishes the copy by replacing the `Arc` (readers holding the
//!    previous `Arc` keep seeing the complete previous state),
//! 3. records the previous document in history, and
//! 4. prunes the selection against the new clip set.
//!
//! Selection, viewport and playhead changes are not structural and bypass history.

use std::sync::Arc;

use tl_common::{CoordinateMapper, EditError, EditResult, EditorConfig, MediaProvider, TrackKind};

use crate::clipboard::Clipboard;
use crate::document::{Clip, ClipPatch, Document, Marker, Track};
use crate::edit::Edit;
use crate::history::HistoryManager;
use crate::playback::PlaybackState;
use crate::selection::SelectionState;
use crate::snapshot::HistorySnapshot;
use crate::viewport::Viewport;

/// Length given to clips of sources that report no duration (text, solids).
const DEFAULT_CLIP_DURATION: f64 = 5.0;

/// Canonical editor state plus undo/redo history.
pub struct TimelineStore {
    config: EditorConfig,
    document: Arc<Document>,
    selection: SelectionState,
    viewport: Viewport,
    playback: PlaybackState,
    history: HistoryManager,
    clipboard: Clipboard,
    snap_enabled: bool,
    ripple_enabled: bool,
}

impl TimelineStore {
    /// Create a store with an empty document.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_document(config, Document::new())
    }

    /// Create a store around an existing document. History starts empty.
    pub fn with_document(config: EditorConfig, document: Document) -> Self {
        Self {
            viewport: Viewport::new(&config),
            history: HistoryManager::new(config.max_history),
            snap_enabled: config.snap_enabled,
            ripple_enabled: config.ripple_enabled,
            config,
            document: Arc::new(document),
            selection: SelectionState::new(),
            playback: PlaybackState::new(),
            clipboard: Clipboard::new(),
        }
    }

    // --- Read access ---

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The published document. Cheap to clone; never changes after it is handed out.
    pub fn document(&self) -> Arc<Document> {
        Arc::clone(&self.document)
    }

    /// Borrow the current document without bumping the reference count.
    pub fn doc(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    pub fn ripple_enabled(&self) -> bool {
        self.ripple_enabled
    }

    /// The coordinate transform for the current viewport.
    pub fn mapper(&self) -> CoordinateMapper {
        self.viewport.mapper(&self.config)
    }

    /// Shortest duration a trim may leave a clip with at the current zoom.
    pub fn minimum_duration(&self) -> f64 {
        self.config.minimum_duration(self.viewport.zoom())
    }

    // --- Structural mutation ---

    /// Apply a structural edit, labelled by its kind.
    pub fn apply(&mut self, edit: Edit) -> EditResult<()> {
        let label = edit.describe();
        self.apply_labeled(label, edit)
    }

    /// Apply a structural edit with an explicit history label.
    ///
    /// On `Err` neither the document nor history changes. An edit that leaves
    /// the document equal to the current one is accepted but not recorded.
    pub fn apply_labeled(&mut self, label: &str, edit: Edit) -> EditResult<()> {
        let mut next = Document::clone(&self.document);
        next.apply_edit(edit).map_err(|e| {
            tracing::debug!(label, error = %e, "Edit rejected");
            e
        })?;
        if next == *self.document {
            tracing::trace!(label, "Edit left document unchanged");
            return Ok(());
        }

        let previous = std::mem::replace(&mut self.document, Arc::new(next));
        self.history.push(label, HistorySnapshot::capture(&previous));
        self.selection.retain_existing(&self.document);

        tracing::debug!(
            label,
            tracks = self.document.tracks.len(),
            clips = self.document.clips.len(),
            "Edit applied"
        );
        Ok(())
    }

    /// Add a new track at the bottom of the display order. Returns its id.
    pub fn add_track(&mut self, kind: TrackKind, name: &str) -> EditResult<String> {
        let track = Track::new(
            kind,
            name,
            self.document.next_track_order(),
            self.config.default_track_height,
        );
        let id = track.id.clone();
        self.apply(Edit::AddTrack(track))?;
        Ok(id)
    }

    /// Delete a track, its clips, and their selection entries as one step.
    pub fn delete_track(&mut self, track_id: &str) -> EditResult<()> {
        self.apply(Edit::DeleteTrack(track_id.to_string()))
    }

    /// Add a clip. Returns its id.
    pub fn add_clip(&mut self, clip: Clip) -> EditResult<String> {
        let id = clip.id.clone();
        self.apply(Edit::AddClip(clip))?;
        Ok(id)
    }

    /// Place a whole media source on a track. The provider's duration becomes the
    /// trim ceiling; sources without one get a default length of 5 seconds.
    pub fn add_media_clip(
        &mut self,
        provider: &dyn MediaProvider,
        media_id: &str,
        track_id: &str,
        start_time: f64,
    ) -> EditResult<String> {
        let info = provider
            .media(media_id)
            .ok_or_else(|| EditError::media_not_found(media_id))?;
        self.add_clip(Clip::from_media(track_id, &info, start_time, DEFAULT_CLIP_DURATION))
    }

    pub fn update_clip(&mut self, clip_id: &str, patch: ClipPatch) -> EditResult<()> {
        self.apply(Edit::UpdateClip {
            id: clip_id.to_string(),
            patch,
        })
    }

    pub fn delete_clips(&mut self, ids: &[String]) -> EditResult<()> {
        self.apply(Edit::DeleteClips(ids.to_vec()))
    }

    /// Add a marker at `time`. Returns its id.
    pub fn add_marker(&mut self, time: f64, label: &str) -> EditResult<String> {
        let marker = Marker::new(time, label);
        let id = marker.id.clone();
        self.apply(Edit::AddMarker(marker))?;
        Ok(id)
    }

    pub fn delete_marker(&mut self, marker_id: &str) -> EditResult<()> {
        self.apply(Edit::DeleteMarker(marker_id.to_string()))
    }

    /// Delete every selected, editable clip as one step. With ripple enabled,
    /// later clips on the same track close the gap. Returns how many clips went.
    pub fn delete_selection(&mut self) -> EditResult<usize> {
        let doc = Arc::clone(&self.document);
        let targets: Vec<&Clip> = self
            .selection
            .selected_clips()
            .iter()
            .filter_map(|id| doc.clip(id))
            .filter(|c| doc.is_clip_editable(c))
            .collect();
        if targets.is_empty() {
            return Ok(0);
        }

        let ids: Vec<String> = targets.iter().map(|c| c.id.clone()).collect();
        let mut edits = vec![Edit::DeleteClips(ids.clone())];
        if self.ripple_enabled {
            let shifts = ripple_shifts(&doc, &targets);
            if !shifts.is_empty() {
                edits.push(Edit::UpdateClips(shifts));
            }
        }

        let label = if self.ripple_enabled {
            "Ripple delete"
        } else {
            "Delete clips"
        };
        self.apply_labeled(label, Edit::Batch(edits))?;
        Ok(ids.len())
    }

    // --- Clipboard ---

    /// Copy the selected clips. Returns how many were copied.
    pub fn copy_selection(&mut self) -> usize {
        self.clipboard
            .copy(&self.document, self.selection.selected_clips())
    }

    /// Copy then delete the selection. Returns how many clips were removed.
    pub fn cut_selection(&mut self) -> EditResult<usize> {
        if self.copy_selection() == 0 {
            return Ok(0);
        }
        self.delete_selection()
    }

    /// Paste the clipboard at the playhead as one step and select the pasted
    /// clips. Clips whose track no longer exists are skipped. Returns new ids.
    pub fn paste(&mut self) -> EditResult<Vec<String>> {
        let pasted: Vec<Clip> = self
            .clipboard
            .paste_at(self.playback.current_time)
            .into_iter()
            .filter(|c| {
                let exists = self.document.track(&c.track_id).is_some();
                if !exists {
                    tracing::warn!(track_id = %c.track_id, "Paste target track missing, clip skipped");
                }
                exists
            })
            .collect();
        if pasted.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = pasted.iter().map(|c| c.id.clone()).collect();
        self.apply_labeled("Paste", Edit::Batch(pasted.into_iter().map(Edit::AddClip).collect()))?;
        self.selection.set_clips(&ids);
        Ok(ids)
    }

    // --- Selection ---

    /// Select a clip, replacing the selection unless `multi`.
    pub fn select_clip(&mut self, clip_id: &str, multi: bool) -> EditResult<()> {
        self.require_clip(clip_id)?;
        self.selection.select_clip(clip_id, multi);
        Ok(())
    }

    /// Toggle a clip's membership. Returns whether it is now selected.
    pub fn toggle_clip(&mut self, clip_id: &str) -> EditResult<bool> {
        self.require_clip(clip_id)?;
        Ok(self.selection.toggle_clip(clip_id))
    }

    /// Replace the selection. Ids that name no clip are ignored.
    pub fn set_selection<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selection.set_clips(ids);
        self.selection.retain_existing(&self.document);
    }

    pub fn select_all(&mut self) {
        let doc = Arc::clone(&self.document);
        self.selection.set_clips(doc.clips.iter().map(|c| c.id.as_str()));
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- Viewport & playhead ---

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn zoom_in(&mut self) -> bool {
        self.viewport.zoom_in(&self.config)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.viewport.zoom_out(&self.config)
    }

    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.viewport.set_zoom(zoom, &self.config)
    }

    /// Move the playhead, clamped to `[0, total duration]`.
    pub fn seek(&mut self, time: f64) -> f64 {
        let total = self.document.total_duration();
        self.playback.seek(time, total)
    }

    pub fn step_frames(&mut self, frames: i32) -> f64 {
        let total = self.document.total_duration();
        self.playback
            .step_frames(frames, self.config.frame_rate, total)
    }

    pub fn set_in_point(&mut self) {
        self.playback.set_in_point();
    }

    pub fn set_out_point(&mut self) {
        self.playback.set_out_point();
    }

    pub fn clear_in_out(&mut self) {
        self.playback.clear_in_out();
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap_enabled = enabled;
        tracing::debug!(enabled, "Snapping toggled");
    }

    pub fn set_ripple_enabled(&mut self, enabled: bool) {
        self.ripple_enabled = enabled;
        tracing::debug!(enabled, "Ripple toggled");
    }

    // --- History ---

    /// Restore the state before the last recorded step. Returns false at the oldest entry.
    pub fn undo(&mut self) -> bool {
        let current = HistorySnapshot::capture(&self.document);
        match self.history.undo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Reapply the last undone step. Returns false at the tip.
    pub fn redo(&mut self) -> bool {
        let current = HistorySnapshot::capture(&self.document);
        match self.history.redo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Open a gesture: subsequent edits collapse into one undo step.
    pub fn begin_gesture(&mut self, label: &str) {
        self.history
            .start_batch(label, HistorySnapshot::capture(&self.document));
    }

    /// Close the current gesture. Returns whether it recorded an undo step.
    pub fn end_gesture(&mut self) -> bool {
        self.history.end_batch(&self.document)
    }

    /// Abandon the current gesture and roll the document back to where it began.
    /// Returns false if no gesture was open.
    pub fn cancel_gesture(&mut self) -> bool {
        match self.history.cancel_batch() {
            Some(before) => {
                self.restore(before);
                true
            }
            None => false,
        }
    }

    /// Replace the whole document (project load). Clears history and prunes selection.
    pub fn load_document(&mut self, document: Document) {
        self.document = Arc::new(document);
        self.history.clear();
        self.selection.retain_existing(&self.document);
        let total = self.document.total_duration();
        self.playback.seek(self.playback.current_time, total);
        tracing::info!(
            tracks = self.document.tracks.len(),
            clips = self.document.clips.len(),
            markers = self.document.markers.len(),
            "Document loaded"
        );
    }

    fn restore(&mut self, snapshot: HistorySnapshot) {
        self.document = snapshot.into_document();
        self.selection.retain_existing(&self.document);
        tracing::debug!(
            tracks = self.document.tracks.len(),
            clips = self.document.clips.len(),
            "Snapshot restored"
        );
    }

    fn require_clip(&self, clip_id: &str) -> EditResult<()> {
        if self.document.contains_clip(clip_id) {
            Ok(())
        } else {
            Err(EditError::clip_not_found(clip_id))
        }
    }
}

/// Per-clip start shifts that close the gaps left by deleting `removed`.
fn ripple_shifts(doc: &Document, removed: &[&Clip]) -> Vec<(String, ClipPatch)> {
    doc.clips
        .iter()
        .filter(|c| doc.is_clip_editable(c))
        .filter(|c| !removed.iter().any(|r| r.id == c.id))
        .filter_map(|c| {
            let shift: f64 = removed
                .iter()
                .filter(|r| r.track_id == c.track_id && r.end_time() <= c.start_time + 1e-9)
                .map(|r| r.duration)
                .sum();
            (shift > 0.0).then(|| {
                (
                    c.id.clone(),
                    ClipPatch {
                        start_time: Some((c.start_time - shift).max(0.0)),
                        ..Default::default()
                    },
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SourceRef;

    fn source() -> SourceRef {
        SourceRef {
            media_id: "m1".into(),
            kind: TrackKind::Video,
            duration: Some(100.0),
        }
    }

    fn make_clip(id: &str, track_id: &str, start: f64, duration: f64) -> Clip {
        Clip {
            id: id.to_string(),
            ..Clip::new(track_id, source(), start, duration)
        }
    }

    /// Store with track `v1` holding c1 [0,2) c2 [2,5) c3 [6,7) and track `v2` holding c4.
    fn make_store() -> (TimelineStore, String, String) {
        let mut store = TimelineStore::new(EditorConfig::default());
        let v1 = store.add_track(TrackKind::Video, "Video 1").unwrap();
        let v2 = store.add_track(TrackKind::Video, "Video 2").unwrap();
        store.add_clip(make_clip("c1", &v1, 0.0, 2.0)).unwrap();
        store.add_clip(make_clip("c2", &v1, 2.0, 3.0)).unwrap();
        store.add_clip(make_clip("c3", &v1, 6.0, 1.0)).unwrap();
        store.add_clip(make_clip("c4", &v2, 0.0, 4.0)).unwrap();
        (store, v1, v2)
    }

    #[test]
    fn add_track_assigns_increasing_order() {
        let (store, v1, v2) = make_store();
        let t1 = store.doc().track(&v1).unwrap();
        let t2 = store.doc().track(&v2).unwrap();
        assert!(t1.order < t2.order);
        assert_eq!(t1.height, 60.0);
    }

    #[test]
    fn apply_records_history_and_publishes_new_arc() {
        let (mut store, _, _) = make_store();
        let before = store.document();
        let depth = store.history().undo_count();

        store.delete_clips(&["c1".into()]).unwrap();

        assert!(!Arc::ptr_eq(&before, &store.document()));
        assert!(before.contains_clip("c1"), "old readers keep the old state");
        assert!(!store.doc().contains_clip("c1"));
        assert_eq!(store.history().undo_count(), depth + 1);
    }

    #[test]
    fn failed_edit_changes_nothing() {
        let (mut store, _, _) = make_store();
        let before = store.document();
        let depth = store.history().undo_count();

        let err = store.update_clip("nope", ClipPatch::default()).unwrap_err();
        assert!(err.is_not_found());
        assert!(Arc::ptr_eq(&before, &store.document()));
        assert_eq!(store.history().undo_count(), depth);
    }

    #[test]
    fn unchanged_edit_is_not_recorded() {
        let (mut store, _, _) = make_store();
        let before = store.document();
        let depth = store.history().undo_count();

        store.update_clip("c1", ClipPatch::default()).unwrap();
        assert!(Arc::ptr_eq(&before, &store.document()));
        assert_eq!(store.history().undo_count(), depth);

        store.update_clip("c1", ClipPatch { start_time: Some(0.5), ..Default::default() }).unwrap();
        assert_eq!(store.history().undo_count(), depth + 1);
    }

    #[test]
    fn delete_track_cascades_into_selection() {
        let (mut store, v1, _) = make_store();
        store.set_selection(["c1", "c2", "c4"]);

        store.delete_track(&v1).unwrap();

        assert_eq!(store.doc().clips.len(), 1);
        assert_eq!(store.selection().selected_clips(), ["c4"]);
    }

    #[test]
    fn undo_redo_revalidate_selection() {
        let (mut store, v1, _) = make_store();
        store.add_clip(make_clip("c5", &v1, 9.0, 1.0)).unwrap();
        store.set_selection(["c5", "c1"]);

        assert!(store.undo());
        assert!(!store.doc().contains_clip("c5"));
        assert_eq!(store.selection().selected_clips(), ["c1"]);

        assert!(store.redo());
        assert!(store.doc().contains_clip("c5"));
        // Selection is not part of history; the pruned id stays pruned.
        assert_eq!(store.selection().selected_clips(), ["c1"]);
    }

    #[test]
    fn undo_at_oldest_and_redo_at_tip_are_noops() {
        let mut store = TimelineStore::new(EditorConfig::default());
        assert!(!store.undo());
        assert!(!store.redo());
        store.add_track(TrackKind::Audio, "A1").unwrap();
        assert!(!store.redo());
        assert!(store.undo());
        assert!(store.doc().tracks.is_empty());
        assert!(!store.undo());
    }

    #[test]
    fn select_unknown_clip_is_not_found() {
        let (mut store, _, _) = make_store();
        assert_eq!(
            store.select_clip("ghost", false).unwrap_err(),
            EditError::clip_not_found("ghost")
        );
        assert!(store.toggle_clip("ghost").is_err());
        store.set_selection(["ghost", "c2"]);
        assert_eq!(store.selection().selected_clips(), ["c2"]);
    }

    #[test]
    fn delete_selection_skips_locked() {
        let (mut store, _, _) = make_store();
        store
            .update_clip(
                "c2",
                ClipPatch {
                    locked: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        store.set_selection(["c1", "c2"]);
        assert_eq!(store.delete_selection().unwrap(), 1);
        assert!(store.doc().contains_clip("c2"));
        assert_eq!(store.selection().selected_clips(), ["c2"]);
    }

    #[test]
    fn ripple_delete_closes_gap_on_same_track_only() {
        let (mut store, _, _) = make_store();
        store.set_ripple_enabled(true);
        store.set_selection(["c2"]);
        let depth = store.history().undo_count();

        assert_eq!(store.delete_selection().unwrap(), 1);

        assert_eq!(store.doc().clip("c1").unwrap().start_time, 0.0);
        assert!((store.doc().clip("c3").unwrap().start_time - 3.0).abs() < 1e-9);
        assert_eq!(store.doc().clip("c4").unwrap().start_time, 0.0);
        assert_eq!(store.history().undo_count(), depth + 1);
        assert_eq!(store.history().undo_label(), Some("Ripple delete"));
    }

    #[test]
    fn copy_paste_at_playhead() {
        let (mut store, _, _) = make_store();
        store.set_selection(["c2", "c3"]);
        assert_eq!(store.copy_selection(), 2);

        store.seek(4.0);
        let ids = store.paste().unwrap();
        assert_eq!(ids.len(), 2);
        let starts: Vec<f64> = ids
            .iter()
            .map(|id| store.doc().clip(id).unwrap().start_time)
            .collect();
        assert!((starts[0] - 4.0).abs() < 1e-9);
        assert!((starts[1] - 8.0).abs() < 1e-9);
        assert_eq!(store.selection().selected_clips(), ids.as_slice());
        assert_eq!(store.history().undo_label(), Some("Paste"));
    }

    #[test]
    fn cut_removes_and_fills_clipboard() {
        let (mut store, _, _) = make_store();
        store.set_selection(["c3"]);
        assert_eq!(store.cut_selection().unwrap(), 1);
        assert!(!store.doc().contains_clip("c3"));
        assert_eq!(store.clipboard().len(), 1);
    }

    #[test]
    fn paste_skips_clips_of_deleted_tracks() {
        let (mut store, v1, _) = make_store();
        store.set_selection(["c1"]);
        store.copy_selection();
        store.delete_track(&v1).unwrap();
        assert!(store.paste().unwrap().is_empty());
    }

    #[test]
    fn gesture_records_single_step_and_cancel_rolls_back() {
        let (mut store, _, _) = make_store();
        let depth = store.history().undo_count();

        store.begin_gesture("Move clips");
        for t in [1.0, 2.0, 3.0] {
            store
                .update_clip(
                    "c3",
                    ClipPatch {
                        start_time: Some(6.0 + t),
                        ..Default::default()
                    },
                )
                .unwrap();
        }
        assert!(store.end_gesture());
        assert_eq!(store.history().undo_count(), depth + 1);
        assert!(store.undo());
        assert_eq!(store.doc().clip("c3").unwrap().start_time, 6.0);

        store.begin_gesture("Move clips");
        store
            .update_clip(
                "c3",
                ClipPatch {
                    start_time: Some(20.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(store.cancel_gesture());
        assert_eq!(store.doc().clip("c3").unwrap().start_time, 6.0);
        assert!(!store.cancel_gesture());
    }

    #[test]
    fn seek_clamped_to_total_duration() {
        let (mut store, _, _) = make_store();
        assert_eq!(store.seek(100.0), 7.0);
        assert_eq!(store.seek(-3.0), 0.0);
        store.seek(1.0);
        let t = store.step_frames(30);
        assert!((t - 2.0).abs() < 1e-9);
    }

    #[test]
    fn load_document_resets_history() {
        let (mut store, _, _) = make_store();
        store.set_selection(["c1"]);
        assert!(store.history().can_undo());

        store.load_document(Document::new());
        assert!(!store.history().can_undo());
        assert!(store.selection().is_empty());
    }

    #[test]
    fn media_clip_takes_source_duration() {
        use tl_common::{MediaInfo, StaticMediaProvider};

        let mut provider = StaticMediaProvider::new();
        provider.insert(MediaInfo {
            id: "interview".into(),
            kind: TrackKind::Audio,
            url: "file:///media/interview.wav".into(),
            duration: Some(42.0),
            thumbnail: None,
            waveform: Vec::new(),
        });
        let mut store = TimelineStore::new(EditorConfig::default());
        let track = store.add_track(TrackKind::Audio, "A1").unwrap();

        let id = store.add_media_clip(&provider, "interview", &track, 1.0).unwrap();
        let clip = store.doc().clip(&id).unwrap();
        assert_eq!(clip.duration, 42.0);
        assert_eq!(clip.max_duration(), Some(42.0));

        let err = store.add_media_clip(&provider, "missing", &track, 0.0).unwrap_err();
        assert_eq!(err, EditError::media_not_found("missing"));
    }

    #[test]
    fn markers_go_through_history() {
        let mut store = TimelineStore::new(EditorConfig::default());
        let id = store.add_marker(3.0, "CTA").unwrap();
        assert_eq!(store.doc().marker(&id).unwrap().label, "CTA");
        store.delete_marker(&id).unwrap();
        assert!(store.doc().markers.is_empty());
        assert!(store.delete_marker(&id).unwrap_err().is_not_found());
        assert!(store.undo());
        assert_eq!(store.doc().markers.len(), 1);
    }
}

//! The editor facade: pointer events and commands in, render views out.

use tl_app_state::TimelineStore;
use tl_common::{EditResult, EditorConfig, Point};

use crate::commands::Command;
use crate::drag::{DragController, DragState, Modifiers};
use crate::view::RenderView;

/// Owns the store and the drag controller; the host's only entry point.
pub struct TimelineEditor {
    store: TimelineStore,
    drag: DragController,
}

impl TimelineEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_store(TimelineStore::new(config))
    }

    pub fn with_store(store: TimelineStore) -> Self {
        Self {
            store,
            drag: DragController::new(),
        }
    }

    pub fn store(&self) -> &TimelineStore {
        &self.store
    }

    /// Direct store access for non-pointer operations (adding tracks, loading projects).
    pub fn store_mut(&mut self) -> &mut TimelineStore {
        &mut self.store
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn pointer_down(&mut self, point: Point, modifiers: Modifiers) -> EditResult<DragState> {
        self.drag.pointer_down(&mut self.store, point, modifiers)
    }

    pub fn pointer_move(&mut self, point: Point) -> EditResult<()> {
        self.drag.pointer_move(&mut self.store, point)
    }

    /// Finish the gesture. Returns whether an undo step was recorded.
    pub fn pointer_up(&mut self) -> bool {
        self.drag.pointer_up(&mut self.store)
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel(&mut self.store)
    }

    /// Run a command. Returns whether anything changed.
    ///
    /// Document-changing commands are ignored while a drag is in progress.
    pub fn execute(&mut self, command: Command) -> EditResult<bool> {
        if command.is_structural() && self.drag.is_dragging() {
            tracing::debug!(?command, "Command ignored during drag");
            return Ok(false);
        }

        let store = &mut self.store;
        let changed = match command {
            Command::DeleteSelection => store.delete_selection()? > 0,
            Command::SelectAll => {
                let before = store.selection().count();
                store.select_all();
                store.selection().count() != before
            }
            Command::ClearSelection => {
                let had = !store.selection().is_empty();
                store.clear_selection();
                had
            }
            Command::SetInPoint => {
                store.set_in_point();
                true
            }
            Command::SetOutPoint => {
                store.set_out_point();
                true
            }
            Command::ToggleRipple => {
                let enabled = !store.ripple_enabled();
                store.set_ripple_enabled(enabled);
                true
            }
            Command::ToggleSnap => {
                let enabled = !store.snap_enabled();
                store.set_snap_enabled(enabled);
                true
            }
            Command::ZoomIn => store.zoom_in(),
            Command::ZoomOut => store.zoom_out(),
            Command::StepFrames(frames) => {
                let before = store.playback().current_time;
                store.step_frames(frames) != before
            }
            Command::Undo => store.undo(),
            Command::Redo => store.redo(),
            Command::Copy => store.copy_selection() > 0,
            Command::Paste => !store.paste()?.is_empty(),
            Command::Cut => store.cut_selection()? > 0,
            Command::CancelDrag => self.drag.cancel(store),
        };
        tracing::debug!(?command, changed, "Command executed");
        Ok(changed)
    }

    /// Snapshot of the committed state for drawing.
    pub fn render_view(&self) -> RenderView {
        RenderView {
            document: self.store.document(),
            viewport: *self.store.viewport(),
            selection: self.store.selection().clone(),
            playback: self.store.playback().clone(),
            snap_enabled: self.store.snap_enabled(),
            ripple_enabled: self.store.ripple_enabled(),
            drag: self.drag.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tl_app_state::{Clip, SourceRef};
    use tl_common::TrackKind;

    fn make_editor() -> TimelineEditor {
        let mut editor = TimelineEditor::new(EditorConfig::default());
        let store = editor.store_mut();
        let track = store.add_track(TrackKind::Audio, "A1").unwrap();
        let source = SourceRef {
            media_id: "m".into(),
            kind: TrackKind::Audio,
            duration: None,
        };
        store
            .add_clip(Clip {
                id: "a".into(),
                ..Clip::new(&track, source, 0.0, 2.0)
            })
            .unwrap();
        editor
    }

    #[test]
    fn commands_report_changes() {
        let mut editor = make_editor();
        assert!(!editor.execute(Command::ClearSelection).unwrap());
        assert!(editor.execute(Command::SelectAll).unwrap());
        assert!(!editor.execute(Command::SelectAll).unwrap());
        assert!(editor.execute(Command::ZoomIn).unwrap());
        assert_eq!(editor.store().viewport().zoom(), 2.0);
        assert!(editor.execute(Command::ToggleSnap).unwrap());
        assert!(!editor.store().snap_enabled());
        assert!(editor.execute(Command::StepFrames(15)).unwrap());
        assert!((editor.store().playback().current_time - 0.5).abs() < 1e-9);
        assert!(editor.execute(Command::StepFrames(-30)).unwrap());
        assert_eq!(editor.store().playback().current_time, 0.0);
        assert!(!editor.execute(Command::StepFrames(-1)).unwrap());
    }

    #[test]
    fn delete_then_undo_via_commands() {
        let mut editor = make_editor();
        editor.execute(Command::SelectAll).unwrap();
        assert!(editor.execute(Command::DeleteSelection).unwrap());
        assert!(editor.store().doc().clips.is_empty());
        assert!(editor.store().selection().is_empty());
        assert!(editor.execute(Command::Undo).unwrap());
        assert_eq!(editor.store().doc().clips.len(), 1);
        assert!(editor.execute(Command::Redo).unwrap());
        assert!(!editor.execute(Command::Redo).unwrap());
    }

    #[test]
    fn copy_paste_cut_commands() {
        let mut editor = make_editor();
        assert!(!editor.execute(Command::Paste).unwrap());
        editor.execute(Command::SelectAll).unwrap();
        assert!(editor.execute(Command::Copy).unwrap());
        editor.store_mut().seek(2.0);
        assert!(editor.execute(Command::Paste).unwrap());
        assert_eq!(editor.store().doc().clips.len(), 2);
        assert!(editor.execute(Command::Cut).unwrap());
        assert_eq!(editor.store().doc().clips.len(), 1);
    }

    #[test]
    fn structural_commands_wait_for_drag_end() {
        let mut editor = make_editor();
        // Clip body of "a" spans x 200..400 on the first row.
        editor
            .pointer_down(Point::new(300.0, 60.0), Modifiers::default())
            .unwrap();
        assert!(!editor.execute(Command::DeleteSelection).unwrap());
        assert!(editor.store().doc().contains_clip("a"));
        assert!(editor.render_view().drag.is_some());

        assert!(editor.execute(Command::CancelDrag).unwrap());
        assert_eq!(editor.drag_state(), DragState::Idle);
        assert!(editor.render_view().drag.is_none());
    }

    #[test]
    fn render_view_is_detached_from_later_edits() {
        let mut editor = make_editor();
        let view = editor.render_view();
        editor.execute(Command::SelectAll).unwrap();
        editor.execute(Command::DeleteSelection).unwrap();
        assert_eq!(view.document.clips.len(), 1);
        assert!(!view.is_selected("a"));
        assert_eq!(view.playhead(), 0.0);
    }
}

//! Read-only per-frame view for the renderer.

use std::sync::Arc;

use tl_app_state::{Document, PlaybackState, SelectionState, Viewport};

use crate::drag::DragSummary;

/// Everything the renderer needs for one frame. Holding it never blocks edits;
/// the document is the committed state at the time the view was taken.
#[derive(Clone, Debug)]
pub struct RenderView {
    pub document: Arc<Document>,
    pub viewport: Viewport,
    pub selection: SelectionState,
    pub playback: PlaybackState,
    pub snap_enabled: bool,
    pub ripple_enabled: bool,
    pub drag: Option<DragSummary>,
}

impl RenderView {
    pub fn is_selected(&self, clip_id: &str) -> bool {
        self.selection.is_clip_selected(clip_id)
    }

    pub fn playhead(&self) -> f64 {
        self.playback.current_time
    }
}

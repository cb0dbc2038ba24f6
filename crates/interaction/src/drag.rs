//! Pointer gesture state machine.
//!
//! A gesture begins on pointer-down, mutates on every pointer-move, and ends on
//! pointer-up. Each move recomputes the mutation from the values captured at
//! pointer-down and the total pointer offset, so long gestures never drift.
//! Clip-editing gestures run inside a history batch and record one undo step.

use serde::{Deserialize, Serialize};
use tl_app_state::{ClipPatch, Document, Edit, TimelineStore};
use tl_common::{EditResult, Point, Rect};

use crate::hit_test::{ClipEdge, HitTarget, HitTester};
use crate::layout::TrackLayout;
use crate::snap::SnapResolver;

/// The kind of gesture in progress.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    Move,
    TrimStart,
    TrimEnd,
    SeekPlayhead,
    Marquee,
}

impl DragMode {
    fn history_label(self) -> &'static str {
        match self {
            Self::Move => "Move clips",
            Self::TrimStart => "Trim clip start",
            Self::TrimEnd => "Trim clip end",
            Self::SeekPlayhead => "Seek",
            Self::Marquee => "Marquee select",
        }
    }

    /// Whether the gesture edits clips (and so runs inside a history batch).
    pub fn edits_clips(self) -> bool {
        matches!(self, Self::Move | Self::TrimStart | Self::TrimEnd)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragState {
    Idle,
    Dragging(DragMode),
}

/// Keyboard modifiers held during pointer-down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Toggle clips into the selection instead of replacing it.
    pub multi_select: bool,
}

/// A clip's timing as it was when the gesture started.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipSnapshot {
    pub clip_id: String,
    pub start_time: f64,
    pub duration: f64,
    pub trim_start: f64,
    pub trim_end: f64,
    /// Longest duration the source allows at this in-point.
    max_duration: Option<f64>,
}

/// What the renderer needs to draw an in-progress gesture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragSummary {
    pub mode: DragMode,
    pub origin: Point,
    pub current: Point,
    /// Clips being moved or trimmed.
    pub clip_ids: Vec<String>,
    pub marquee: Option<Rect>,
}

#[derive(Debug)]
struct DragSession {
    mode: DragMode,
    origin: Point,
    current: Point,
    multi_select: bool,
    clips: Vec<ClipSnapshot>,
    /// Selection right after pointer-down; marquee unions onto it.
    base_selection: Vec<String>,
    /// Selection and playhead before pointer-down, restored on cancel.
    prior_selection: Vec<String>,
    prior_playhead: f64,
}

impl DragSession {
    fn clip_ids(&self) -> Vec<String> {
        self.clips.iter().map(|c| c.clip_id.clone()).collect()
    }
}

/// Turns pointer events into store mutations.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        match &self.session {
            Some(s) => DragState::Dragging(s.mode),
            None => DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Start a gesture from whatever is under `point`.
    ///
    /// A pointer-down while already dragging is ignored.
    pub fn pointer_down(
        &mut self,
        store: &mut TimelineStore,
        point: Point,
        modifiers: Modifiers,
    ) -> EditResult<DragState> {
        if let Some(session) = &self.session {
            tracing::warn!(mode = ?session.mode, "Pointer down during drag ignored");
            return Ok(self.state());
        }

        let target = {
            let doc = store.doc();
            let layout = TrackLayout::compute(doc, store.config());
            HitTester::new(
                doc,
                &layout,
                store.mapper(),
                store.config(),
                store.playback().current_time,
            )
            .hit(point)
        };
        tracing::debug!(x = point.x, y = point.y, ?target, "Pointer down");

        let prior_selection = store.selection().selected_clips().to_vec();
        let prior_playhead = store.playback().current_time;

        let (mode, clip_ids) = match target {
            HitTarget::PlayheadHotspot => (DragMode::SeekPlayhead, Vec::new()),
            HitTarget::Ruler { time } => {
                store.seek(time);
                return Ok(DragState::Idle);
            }
            HitTarget::TrackHeader { .. } => return Ok(DragState::Idle),
            HitTarget::ClipHandle { clip_id, edge } => {
                let ids = if store.selection().is_clip_selected(&clip_id) {
                    prior_selection.clone()
                } else {
                    vec![clip_id]
                };
                let mode = match edge {
                    ClipEdge::Start => DragMode::TrimStart,
                    ClipEdge::End => DragMode::TrimEnd,
                };
                (mode, ids)
            }
            HitTarget::ClipBody { clip_id } => {
                if modifiers.multi_select {
                    store.toggle_clip(&clip_id)?;
                } else if !store.selection().is_clip_selected(&clip_id) {
                    store.select_clip(&clip_id, false)?;
                }
                (DragMode::Move, store.selection().selected_clips().to_vec())
            }
            HitTarget::EmptyCanvas => {
                if !modifiers.multi_select {
                    store.clear_selection();
                }
                (DragMode::Marquee, Vec::new())
            }
        };

        let clips = snapshot_editable(store.doc(), &clip_ids);
        if mode.edits_clips() {
            store.begin_gesture(mode.history_label());
        }

        self.session = Some(DragSession {
            mode,
            origin: point,
            current: point,
            multi_select: modifiers.multi_select,
            clips,
            base_selection: store.selection().selected_clips().to_vec(),
            prior_selection,
            prior_playhead,
        });
        tracing::debug!(?mode, "Drag started");
        Ok(DragState::Dragging(mode))
    }

    /// Apply the active gesture for the pointer at `point`. No-op when idle.
    pub fn pointer_move(&mut self, store: &mut TimelineStore, point: Point) -> EditResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        session.current = point;
        let session = &*session;
        let mapper = store.mapper();

        match session.mode {
            DragMode::Move | DragMode::TrimStart | DragMode::TrimEnd => {
                let delta = mapper.pixel_to_time(point.x - session.origin.x);
                let patches = clip_patches(store, session, delta);
                if !patches.is_empty() {
                    store.apply_labeled(session.mode.history_label(), Edit::UpdateClips(patches))?;
                }
            }
            DragMode::Marquee => {
                let rect = Rect::from_corners(session.origin, point);
                let doc = store.doc();
                let layout = TrackLayout::compute(doc, store.config());
                let hits = doc.clips.iter().filter(|c| {
                    layout
                        .clip_rect(c, &mapper)
                        .is_some_and(|r| r.intersects(&rect))
                });
                let mut selection = if session.multi_select {
                    session.base_selection.clone()
                } else {
                    Vec::new()
                };
                for clip in hits {
                    if !selection.contains(&clip.id) {
                        selection.push(clip.id.clone());
                    }
                }
                store.set_selection(selection);
            }
            DragMode::SeekPlayhead => {
                store.seek(mapper.screen_x_to_time(point.x));
            }
        }
        Ok(())
    }

    /// End the gesture. Returns whether an undo step was recorded.
    pub fn pointer_up(&mut self, store: &mut TimelineStore) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        let recorded = session.mode.edits_clips() && store.end_gesture();
        tracing::debug!(mode = ?session.mode, recorded, "Drag finished");
        recorded
    }

    /// Abandon the gesture: document, selection and playhead return to how they
    /// were before pointer-down. Returns false when idle.
    pub fn cancel(&mut self, store: &mut TimelineStore) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        if session.mode.edits_clips() {
            store.cancel_gesture();
        }
        store.set_selection(&session.prior_selection);
        store.seek(session.prior_playhead);
        tracing::debug!(mode = ?session.mode, "Drag cancelled");
        true
    }

    /// Rendering view of the current gesture.
    pub fn summary(&self) -> Option<DragSummary> {
        self.session.as_ref().map(|s| DragSummary {
            mode: s.mode,
            origin: s.origin,
            current: s.current,
            clip_ids: s.clip_ids(),
            marquee: (s.mode == DragMode::Marquee).then(|| Rect::from_corners(s.origin, s.current)),
        })
    }
}

/// Capture timing for the listed clips that may be edited; locked clips and
/// clips on locked tracks are left out.
fn snapshot_editable(doc: &Document, ids: &[String]) -> Vec<ClipSnapshot> {
    ids.iter()
        .filter_map(|id| doc.clip(id))
        .filter(|c| doc.is_clip_editable(c))
        .map(|c| ClipSnapshot {
            clip_id: c.id.clone(),
            start_time: c.start_time,
            duration: c.duration,
            trim_start: c.trim_start,
            trim_end: c.trim_end,
            max_duration: c.max_duration(),
        })
        .collect()
}

/// Per-clip patches for a move or trim by `delta` seconds. Each clip is computed
/// from its own snapshot; a clip whose result is invalid is skipped on its own.
///
/// Snapping ignores every selected clip, including locked ones that do not move.
fn clip_patches(store: &TimelineStore, session: &DragSession, delta: f64) -> Vec<(String, ClipPatch)> {
    let doc = store.doc();
    let min_duration = store.minimum_duration();
    let snap = (session.mode == DragMode::Move && store.snap_enabled()).then(|| {
        SnapResolver::new(
            doc,
            store.playback(),
            store.selection().selected_clips(),
            &store.mapper(),
            store.config().snap_threshold_px,
        )
    });

    let mut patches = Vec::new();
    for orig in &session.clips {
        let Some(current) = doc.clip(&orig.clip_id) else {
            continue;
        };
        let patch = match session.mode {
            DragMode::Move => {
                let raw = orig.start_time + delta;
                let start = snap.as_ref().map_or(raw, |s| s.resolve(raw)).max(0.0);
                if start == current.start_time {
                    continue;
                }
                ClipPatch {
                    start_time: Some(start),
                    ..Default::default()
                }
            }
            DragMode::TrimStart => {
                let start = (orig.start_time + delta).max(0.0);
                let shift = start - orig.start_time;
                let duration = orig.duration - shift;
                if too_short(duration, min_duration) || start == current.start_time {
                    continue;
                }
                ClipPatch {
                    start_time: Some(start),
                    duration: Some(duration),
                    trim_start: Some(orig.trim_start + shift),
                    trim_end: Some(orig.trim_end),
                    ..Default::default()
                }
            }
            DragMode::TrimEnd => {
                let mut duration = orig.duration + delta;
                if let Some(max) = orig.max_duration {
                    duration = duration.min(max);
                }
                if too_short(duration, min_duration) || duration == current.duration {
                    continue;
                }
                ClipPatch {
                    duration: Some(duration),
                    trim_end: Some(orig.trim_start + duration),
                    ..Default::default()
                }
            }
            DragMode::SeekPlayhead | DragMode::Marquee => continue,
        };
        patches.push((orig.clip_id.clone(), patch));
    }
    patches
}

/// Durations must stay positive even when the configured floor is zero.
fn too_short(duration: f64, min_duration: f64) -> bool {
    !(duration > 0.0) || duration < min_duration
}

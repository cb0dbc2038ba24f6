//! Structural edits: the only way tracks, clips and markers change.
//!
//! An [`Edit`] is applied to a scratch copy of the document by the store. If any
//! reference is dangling the copy is discarded, so a failed edit (including a
//! failed step inside a [`Edit::Batch`]) leaves the live document untouched.

use tl_common::{EditError, EditResult};

use crate::document::{Clip, ClipPatch, Document, Marker, Track, TrackPatch};

/// A structural mutation of the timeline document.
#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    AddTrack(Track),
    UpdateTrack { id: String, patch: TrackPatch },
    /// Removes the track and every clip it owns.
    DeleteTrack(String),
    AddClip(Clip),
    UpdateClip { id: String, patch: ClipPatch },
    /// Several clip updates recorded as one step (drag gestures).
    UpdateClips(Vec<(String, ClipPatch)>),
    DeleteClips(Vec<String>),
    AddMarker(Marker),
    DeleteMarker(String),
    /// Applied in order as a single undo step.
    Batch(Vec<Edit>),
}

impl Edit {
    /// Short description used for logging and history labels.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::AddTrack(_) => "Add track",
            Self::UpdateTrack { .. } => "Update track",
            Self::DeleteTrack(_) => "Delete track",
            Self::AddClip(_) => "Add clip",
            Self::UpdateClip { .. } => "Update clip",
            Self::UpdateClips(_) => "Update clips",
            Self::DeleteClips(_) => "Delete clips",
            Self::AddMarker(_) => "Add marker",
            Self::DeleteMarker(_) => "Delete marker",
            Self::Batch(_) => "Batch edit",
        }
    }
}

impl Document {
    /// Apply an edit in place. On `Err` the document may be partially modified;
    /// callers apply edits to a copy and discard it on failure.
    pub fn apply_edit(&mut self, edit: Edit) -> EditResult<()> {
        match edit {
            Edit::AddTrack(track) => {
                self.ensure_unused_id(&track.id)?;
                self.tracks.push(track);
            }
            Edit::UpdateTrack { id, patch } => {
                self.track_mut(&id)
                    .ok_or_else(|| EditError::track_not_found(&id))?
                    .apply_patch(&patch);
            }
            Edit::DeleteTrack(id) => {
                let pos = self
                    .tracks
                    .iter()
                    .position(|t| t.id == id)
                    .ok_or_else(|| EditError::track_not_found(&id))?;
                self.tracks.remove(pos);
                let before = self.clips.len();
                self.clips.retain(|c| c.track_id != id);
                tracing::debug!(
                    track_id = %id,
                    removed_clips = before - self.clips.len(),
                    "Track deleted with its clips"
                );
            }
            Edit::AddClip(clip) => {
                if self.track(&clip.track_id).is_none() {
                    return Err(EditError::track_not_found(&clip.track_id));
                }
                self.ensure_unused_id(&clip.id)?;
                validate_clip(&clip)?;
                self.clips.push(clip);
            }
            Edit::UpdateClip { id, patch } => self.update_clip(&id, &patch)?,
            Edit::UpdateClips(updates) => {
                for (id, patch) in &updates {
                    self.update_clip(id, patch)?;
                }
            }
            Edit::DeleteClips(ids) => {
                if let Some(missing) = ids.iter().find(|id| !self.contains_clip(id)) {
                    return Err(EditError::clip_not_found(missing.as_str()));
                }
                self.clips.retain(|c| !ids.contains(&c.id));
            }
            Edit::AddMarker(mut marker) => {
                self.ensure_unused_id(&marker.id)?;
                marker.time = marker.time.max(0.0);
                self.markers.push(marker);
            }
            Edit::DeleteMarker(id) => {
                let pos = self
                    .markers
                    .iter()
                    .position(|m| m.id == id)
                    .ok_or_else(|| EditError::marker_not_found(&id))?;
                self.markers.remove(pos);
            }
            Edit::Batch(edits) => {
                for edit in edits {
                    self.apply_edit(edit)?;
                }
            }
        }
        Ok(())
    }

    fn update_clip(&mut self, id: &str, patch: &ClipPatch) -> EditResult<()> {
        if let Some(track_id) = &patch.track_id {
            if self.track(track_id).is_none() {
                return Err(EditError::track_not_found(track_id.as_str()));
            }
        }
        let clip = self
            .clip_mut(id)
            .ok_or_else(|| EditError::clip_not_found(id))?;
        clip.apply_patch(patch);
        validate_clip(clip)
    }

    fn ensure_unused_id(&self, id: &str) -> EditResult<()> {
        let used = self.track(id).is_some() || self.contains_clip(id) || self.marker(id).is_some();
        if used {
            return Err(EditError::DuplicateId { id: id.to_string() });
        }
        Ok(())
    }
}

fn validate_clip(clip: &Clip) -> EditResult<()> {
    if !(clip.duration > 0.0) {
        return Err(EditError::InvalidClip {
            id: clip.id.clone(),
            reason: format!("duration must be > 0, got {}", clip.duration),
        });
    }
    if !(clip.start_time >= 0.0) {
        return Err(EditError::InvalidClip {
            id: clip.id.clone(),
            reason: format!("start time must be >= 0, got {}", clip.start_time),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SourceRef;
    use tl_common::TrackKind;

    fn make_track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            ..Track::new(TrackKind::Video, id, 0, 60.0)
        }
    }

    fn make_clip(id: &str, track_id: &str, start: f64, duration: f64) -> Clip {
        let source = SourceRef {
            media_id: "m1".into(),
            kind: TrackKind::Video,
            duration: None,
        };
        Clip {
            id: id.to_string(),
            ..Clip::new(track_id, source, start, duration)
        }
    }

    fn doc_with_clips() -> Document {
        let mut doc = Document::new();
        doc.apply_edit(Edit::AddTrack(make_track("t1"))).unwrap();
        doc.apply_edit(Edit::AddTrack(make_track("t2"))).unwrap();
        doc.apply_edit(Edit::AddClip(make_clip("c1", "t1", 0.0, 2.0))).unwrap();
        doc.apply_edit(Edit::AddClip(make_clip("c2", "t1", 2.0, 2.0))).unwrap();
        doc.apply_edit(Edit::AddClip(make_clip("c3", "t2", 0.0, 2.0))).unwrap();
        doc
    }

    #[test]
    fn add_clip_requires_existing_track() {
        let mut doc = Document::new();
        let err = doc
            .apply_edit(Edit::AddClip(make_clip("c1", "missing", 0.0, 1.0)))
            .unwrap_err();
        assert_eq!(err, EditError::track_not_found("missing"));
    }

    #[test]
    fn add_clip_rejects_duplicate_and_invalid() {
        let mut doc = doc_with_clips();
        let err = doc
            .apply_edit(Edit::AddClip(make_clip("c1", "t1", 5.0, 1.0)))
            .unwrap_err();
        assert!(matches!(err, EditError::DuplicateId { .. }));

        let err = doc
            .apply_edit(Edit::AddClip(make_clip("c9", "t1", 5.0, 0.0)))
            .unwrap_err();
        assert!(matches!(err, EditError::InvalidClip { .. }));
    }

    #[test]
    fn overlapping_clips_are_allowed() {
        let mut doc = doc_with_clips();
        doc.apply_edit(Edit::AddClip(make_clip("c4", "t1", 1.0, 2.0)))
            .expect("overlap permitted");
        assert_eq!(doc.clips_on_track("t1").count(), 3);
    }

    #[test]
    fn delete_track_cascades_clips() {
        let mut doc = doc_with_clips();
        doc.apply_edit(Edit::DeleteTrack("t1".into())).unwrap();
        assert!(doc.track("t1").is_none());
        assert_eq!(doc.clips.len(), 1);
        assert_eq!(doc.clips[0].id, "c3");
    }

    #[test]
    fn delete_unknown_ids_are_not_found() {
        let mut doc = doc_with_clips();
        assert!(doc.apply_edit(Edit::DeleteTrack("nope".into())).unwrap_err().is_not_found());
        assert!(doc
            .apply_edit(Edit::DeleteClips(vec!["c1".into(), "nope".into()]))
            .unwrap_err()
            .is_not_found());
        // Validation happens before removal.
        assert!(doc.contains_clip("c1"));
        assert!(doc.apply_edit(Edit::DeleteMarker("nope".into())).unwrap_err().is_not_found());
    }

    #[test]
    fn update_clip_validates_result() {
        let mut doc = doc_with_clips();
        doc.apply_edit(Edit::UpdateClip {
            id: "c1".into(),
            patch: ClipPatch {
                start_time: Some(7.0),
                ..Default::default()
            },
        })
        .unwrap();
        assert_eq!(doc.clip("c1").unwrap().start_time, 7.0);

        let err = doc
            .apply_edit(Edit::UpdateClip {
                id: "c1".into(),
                patch: ClipPatch {
                    duration: Some(-1.0),
                    ..Default::default()
                },
            })
            .unwrap_err();
        assert!(matches!(err, EditError::InvalidClip { .. }));
    }

    #[test]
    fn update_clip_track_must_exist() {
        let mut doc = doc_with_clips();
        let err = doc
            .apply_edit(Edit::UpdateClip {
                id: "c1".into(),
                patch: ClipPatch {
                    track_id: Some("t9".into()),
                    ..Default::default()
                },
            })
            .unwrap_err();
        assert_eq!(err, EditError::track_not_found("t9"));
    }

    #[test]
    fn markers_clamped_to_zero() {
        let mut doc = Document::new();
        let marker = Marker {
            id: "m1".into(),
            time: -3.0,
            label: "Hook".into(),
        };
        doc.apply_edit(Edit::AddMarker(marker)).unwrap();
        assert_eq!(doc.marker("m1").unwrap().time, 0.0);
        doc.apply_edit(Edit::DeleteMarker("m1".into())).unwrap();
        assert!(doc.markers.is_empty());
    }

    #[test]
    fn batch_applies_in_order() {
        let mut doc = doc_with_clips();
        doc.apply_edit(Edit::Batch(vec![
            Edit::DeleteClips(vec!["c1".into()]),
            Edit::UpdateClip {
                id: "c2".into(),
                patch: ClipPatch {
                    start_time: Some(0.0),
                    ..Default::default()
                },
            },
        ]))
        .unwrap();
        assert!(!doc.contains_clip("c1"));
        assert_eq!(doc.clip("c2").unwrap().start_time, 0.0);
    }

    #[test]
    fn describe_labels() {
        assert_eq!(Edit::DeleteTrack("t".into()).describe(), "Delete track");
        assert_eq!(Edit::Batch(Vec::new()).describe(), "Batch edit");
    }
}

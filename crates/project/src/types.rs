//! The on-disk project record and its conversion to and from a live document.

use serde::{Deserialize, Serialize};
use tl_app_state::{Clip, Document, Marker, Track};
use tl_common::OrphanPolicy;

use crate::migrate::CURRENT_VERSION;

/// Serialized timeline: every time field is in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub version: u32,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub clips: Vec<Clip>,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl Default for ProjectFile {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            tracks: Vec::new(),
            clips: Vec::new(),
            markers: Vec::new(),
        }
    }
}

/// What had to be set aside while turning a record into a document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    /// Clips whose track does not exist in the record.
    pub orphaned_clips: Vec<Clip>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.orphaned_clips.is_empty()
    }
}

impl ProjectFile {
    /// Capture a document at the current format version.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            version: CURRENT_VERSION,
            tracks: doc.tracks.clone(),
            clips: doc.clips.clone(),
            markers: doc.markers.clone(),
        }
    }

    /// Build a document, removing clips that reference a missing track.
    ///
    /// With [`OrphanPolicy::Report`] the removed clips come back in the report;
    /// with [`OrphanPolicy::Drop`] they are only logged.
    pub fn into_document(self, policy: OrphanPolicy) -> (Document, LoadReport) {
        let Self {
            tracks,
            clips,
            markers,
            ..
        } = self;

        let (clips, orphaned): (Vec<Clip>, Vec<Clip>) = clips
            .into_iter()
            .partition(|c| tracks.iter().any(|t| t.id == c.track_id));

        for clip in &orphaned {
            tracing::warn!(
                clip_id = %clip.id,
                track_id = %clip.track_id,
                "Clip references non-existent track, removed"
            );
        }

        let report = match policy {
            OrphanPolicy::Report => LoadReport {
                orphaned_clips: orphaned,
            },
            OrphanPolicy::Drop => {
                if !orphaned.is_empty() {
                    tracing::info!(count = orphaned.len(), "Orphaned clips dropped");
                }
                LoadReport::default()
            }
        };

        (
            Document {
                tracks,
                clips,
                markers,
            },
            report,
        )
    }
}

//! Media source collaborator seam.
//!
//! The engine never decodes media. It asks a [`MediaProvider`] for the metadata
//! of a source when a clip is created, and treats the reported duration as the
//! ceiling for extending a trim.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::TrackKind;

/// Metadata for one media source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TrackKind,
    pub url: String,
    /// Length of the source in seconds. `None` for generated sources (text, solids).
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Peak samples for waveform drawing (audio sources only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub waveform: Vec<f32>,
}

/// Supplies per-source metadata.
pub trait MediaProvider {
    fn media(&self, id: &str) -> Option<MediaInfo>;
}

/// In-memory provider keyed by media id.
#[derive(Clone, Debug, Default)]
pub struct StaticMediaProvider {
    entries: HashMap<String, MediaInfo>,
}

impl StaticMediaProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, info: MediaInfo) {
        self.entries.insert(info.id.clone(), info);
    }
}

impl MediaProvider for StaticMediaProvider {
    fn media(&self, id: &str) -> Option<MediaInfo> {
        self.entries.get(id).cloned()
    }
}

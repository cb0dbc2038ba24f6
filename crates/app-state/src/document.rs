//! Timeline document: tracks, clips and markers.
//!
//! `Document` is the structural part of the editor state, the part that history
//! snapshots capture. Selection, viewport and playhead live beside it in the
//! store and are never snapshotted.

use serde::{Deserialize, Serialize};
use tl_common::{generate_id, MediaInfo, TrackKind};

/// A lane on the timeline holding clips of one media kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Media kind this track holds.
    #[serde(rename = "type")]
    pub kind: TrackKind,
    /// Display order, ascending top to bottom. Ties keep insertion order.
    pub order: u32,
    /// Expanded row height in pixels.
    pub height: f64,
    /// Locked tracks reject move/trim/delete of their clips.
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub solo: bool,
    /// Collapsed tracks are drawn at the configured collapsed height.
    #[serde(default)]
    pub collapsed: bool,
}

impl Track {
    /// Create an unlocked, expanded track with a fresh id.
    pub fn new(kind: TrackKind, name: impl Into<String>, order: u32, height: f64) -> Self {
        Self {
            id: generate_id("track"),
            name: name.into(),
            kind,
            order,
            height,
            locked: false,
            muted: false,
            solo: false,
            collapsed: false,
        }
    }
}

/// Reference to the media a clip plays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    /// Media identifier known to the media provider.
    pub media_id: String,
    #[serde(rename = "type")]
    pub kind: TrackKind,
    /// Source length in seconds; the ceiling for trim extension. `None` = unbounded.
    #[serde(default)]
    pub duration: Option<f64>,
}

impl From<&MediaInfo> for SourceRef {
    fn from(info: &MediaInfo) -> Self {
        Self {
            media_id: info.id.clone(),
            kind: info.kind,
            duration: info.duration,
        }
    }
}

/// An effect applied to a clip. Opaque to the editing engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipEffect {
    /// Effect type identifier.
    pub name: String,
    pub enabled: bool,
    /// Parameter values as (name, value) pairs.
    #[serde(default)]
    pub params: Vec<(String, f64)>,
}

/// A placed, trimmed reference to a media source on a track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    /// Unique clip identifier.
    pub id: String,
    /// Owning track.
    pub track_id: String,
    /// Timeline position of the clip's first frame (seconds, >= 0).
    pub start_time: f64,
    /// Length on the timeline (seconds, > 0).
    pub duration: f64,
    /// Source in-point (seconds into the source).
    pub trim_start: f64,
    /// Source out-point (seconds into the source).
    pub trim_end: f64,
    pub source: SourceRef,
    #[serde(default)]
    pub effects: Vec<ClipEffect>,
    #[serde(default)]
    pub locked: bool,
}

impl Clip {
    /// Create a clip showing `duration` seconds of `source` from its beginning.
    pub fn new(track_id: impl Into<String>, source: SourceRef, start_time: f64, duration: f64) -> Self {
        Self {
            id: generate_id("clip"),
            track_id: track_id.into(),
            start_time,
            duration,
            trim_start: 0.0,
            trim_end: duration,
            source,
            effects: Vec::new(),
            locked: false,
        }
    }

    /// Create a clip spanning the whole of a media source.
    ///
    /// Sources without a known length get `fallback_duration`.
    pub fn from_media(
        track_id: impl Into<String>,
        info: &MediaInfo,
        start_time: f64,
        fallback_duration: f64,
    ) -> Self {
        let duration = info.duration.unwrap_or(fallback_duration);
        Self::new(track_id, SourceRef::from(info), start_time, duration)
    }

    /// Timeline time of the clip's last frame.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Longest duration the clip may take given its in-point and the source length.
    pub fn max_duration(&self) -> Option<f64> {
        self.source.duration.map(|d| d - self.trim_start)
    }

    /// Apply a patch in place.
    pub fn apply_patch(&mut self, patch: &ClipPatch) {
        if let Some(v) = &patch.track_id {
            self.track_id = v.clone();
        }
        if let Some(v) = patch.start_time {
            self.start_time = v;
        }
        if let Some(v) = patch.duration {
            self.duration = v;
        }
        if let Some(v) = patch.trim_start {
            self.trim_start = v;
        }
        if let Some(v) = patch.trim_end {
            self.trim_end = v;
        }
        if let Some(v) = &patch.effects {
            self.effects = v.clone();
        }
        if let Some(v) = patch.locked {
            self.locked = v;
        }
    }
}

/// Partial update for a clip. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipPatch {
    pub track_id: Option<String>,
    pub start_time: Option<f64>,
    pub duration: Option<f64>,
    pub trim_start: Option<f64>,
    pub trim_end: Option<f64>,
    pub effects: Option<Vec<ClipEffect>>,
    pub locked: Option<bool>,
}

impl ClipPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial update for a track. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackPatch {
    pub name: Option<String>,
    pub order: Option<u32>,
    pub height: Option<f64>,
    pub locked: Option<bool>,
    pub muted: Option<bool>,
    pub solo: Option<bool>,
    pub collapsed: Option<bool>,
}

impl Track {
    pub fn apply_patch(&mut self, patch: &TrackPatch) {
        if let Some(v) = &patch.name {
            self.name = v.clone();
        }
        if let Some(v) = patch.order {
            self.order = v;
        }
        if let Some(v) = patch.height {
            self.height = v;
        }
        if let Some(v) = patch.locked {
            self.locked = v;
        }
        if let Some(v) = patch.muted {
            self.muted = v;
        }
        if let Some(v) = patch.solo {
            self.solo = v;
        }
        if let Some(v) = patch.collapsed {
            self.collapsed = v;
        }
    }
}

/// A labelled point on the timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    /// Time position in seconds.
    pub time: f64,
    pub label: String,
}

impl Marker {
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        Self {
            id: generate_id("marker"),
            time,
            label: label.into(),
        }
    }
}

/// The structural timeline content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// All tracks, in insertion order. Display order comes from `Track::order`.
    pub tracks: Vec<Track>,
    /// All clips. Index order is z-order: a clip later in the list is drawn
    /// above, and hit before, any earlier clip it overlaps.
    pub clips: Vec<Clip>,
    pub markers: Vec<Marker>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn track_mut(&mut self, id: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == id)
    }

    pub fn clip(&self, id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    pub fn clip_mut(&mut self, id: &str) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == id)
    }

    pub fn marker(&self, id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn contains_clip(&self, id: &str) -> bool {
        self.clips.iter().any(|c| c.id == id)
    }

    /// Clips owned by a track, in z-order.
    pub fn clips_on_track<'a>(&'a self, track_id: &'a str) -> impl Iterator<Item = &'a Clip> + 'a {
        self.clips.iter().filter(move |c| c.track_id == track_id)
    }

    /// Tracks sorted for display: ascending `order`, insertion order on ties.
    pub fn sorted_tracks(&self) -> Vec<&Track> {
        let mut tracks: Vec<&Track> = self.tracks.iter().collect();
        tracks.sort_by_key(|t| t.order);
        tracks
    }

    /// The order value one past the current maximum.
    pub fn next_track_order(&self) -> u32 {
        self.tracks.iter().map(|t| t.order + 1).max().unwrap_or(0)
    }

    /// End time of the latest clip, or 0 for an empty timeline.
    pub fn total_duration(&self) -> f64 {
        self.clips.iter().map(Clip::end_time).fold(0.0_f64, f64::max)
    }

    /// Whether a clip may be moved, trimmed or deleted: neither it nor its track is locked.
    pub fn is_clip_editable(&self, clip: &Clip) -> bool {
        !clip.locked && self.track(&clip.track_id).map_or(true, |t| !t.locked)
    }

    /// Whether any id is used twice across tracks, clips and markers.
    pub fn first_duplicate_id(&self) -> Option<&str> {
        first_duplicate_id(&self.tracks, &self.clips, &self.markers)
    }
}

/// First id used twice across tracks, clips and markers.
///
/// Takes the three lists separately so project records can be checked
/// without first building a `Document`.
pub fn first_duplicate_id<'a>(tracks: &'a [Track], clips: &'a [Clip], markers: &'a [Marker]) -> Option<&'a str> {
    let mut seen = std::collections::HashSet::new();
    tracks
        .iter()
        .map(|t| t.id.as_str())
        .chain(clips.iter().map(|c| c.id.as_str()))
        .chain(markers.iter().map(|m| m.id.as_str()))
        .find(|id| !seen.insert(*id))
}

//! Snapping dragged times to nearby significant points.

use tl_app_state::{Clip, Document, PlaybackState};
use tl_common::CoordinateMapper;

/// Snap targets and tolerance for one pointer-move event.
///
/// Built fresh on every move: the time tolerance depends on the zoom and the
/// targets depend on clip positions, both of which can change mid-gesture.
#[derive(Clone, Debug)]
pub struct SnapResolver {
    candidates: Vec<f64>,
    threshold: f64,
}

impl SnapResolver {
    /// Collect targets: 0, the in/out points, and the start and end of every
    /// clip not listed in `excluded`. The timeline end is taken over those same
    /// clips, so a dragged clip never snaps to an end it defines itself.
    pub fn new(
        doc: &Document,
        playback: &PlaybackState,
        excluded: &[String],
        mapper: &CoordinateMapper,
        threshold_px: f64,
    ) -> Self {
        let others: Vec<&Clip> = doc.clips.iter().filter(|c| !excluded.contains(&c.id)).collect();
        let end = others.iter().map(|c| c.end_time()).fold(0.0_f64, f64::max);

        let mut candidates = vec![0.0, end];
        candidates.extend(playback.in_point);
        candidates.extend(playback.out_point);
        for clip in others {
            candidates.push(clip.start_time);
            candidates.push(clip.end_time());
        }
        Self {
            candidates,
            threshold: mapper.pixels_as_duration(threshold_px),
        }
    }

    pub fn candidates(&self) -> &[f64] {
        &self.candidates
    }

    /// The tolerance in seconds.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The nearest target within tolerance, or `time` unchanged.
    pub fn resolve(&self, time: f64) -> f64 {
        self.candidates
            .iter()
            .copied()
            .map(|c| (c, (c - time).abs()))
            .filter(|(_, dist)| *dist <= self.threshold)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(time, |(c, _)| c)
    }
}

//! Vertical placement of tracks and screen rectangles of clips.

use tl_app_state::{Clip, Document};
use tl_common::{CoordinateMapper, EditorConfig, Rect};

/// One track's band in content space (y = 0 is the top of the first track).
#[derive(Clone, Debug, PartialEq)]
pub struct TrackRow {
    pub track_id: String,
    pub y: f64,
    pub height: f64,
}

impl TrackRow {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Tracks stacked top to bottom by ascending `order` below the ruler.
///
/// Hit-testing, marquee selection and rendering all read clip positions from here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackLayout {
    rows: Vec<TrackRow>,
}

impl TrackLayout {
    pub fn compute(doc: &Document, config: &EditorConfig) -> Self {
        let mut y = 0.0;
        let rows = doc
            .sorted_tracks()
            .into_iter()
            .map(|track| {
                let height = if track.collapsed {
                    config.collapsed_track_height
                } else {
                    track.height
                };
                let row = TrackRow {
                    track_id: track.id.clone(),
                    y,
                    height,
                };
                y += height;
                row
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[TrackRow] {
        &self.rows
    }

    pub fn row(&self, track_id: &str) -> Option<&TrackRow> {
        self.rows.iter().find(|r| r.track_id == track_id)
    }

    /// The row covering a content-space y, if any.
    pub fn row_at(&self, content_y: f64) -> Option<&TrackRow> {
        self.rows
            .iter()
            .find(|r| content_y >= r.y && content_y < r.bottom())
    }

    pub fn total_height(&self) -> f64 {
        self.rows.last().map_or(0.0, TrackRow::bottom)
    }

    /// Screen rectangle of a clip, or `None` if its track is not laid out.
    pub fn clip_rect(&self, clip: &Clip, mapper: &CoordinateMapper) -> Option<Rect> {
        let row = self.row(&clip.track_id)?;
        Some(Rect::new(
            mapper.time_to_screen_x(clip.start_time),
            mapper.content_to_screen_y(row.y),
            mapper.time_to_pixel(clip.duration),
            row.height,
        ))
    }
}

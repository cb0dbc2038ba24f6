//! Time ↔ pixel coordinate mapping.
//!
//! Every consumer that converts between timeline seconds and canvas pixels
//! (hit-testing, drag gestures, marquee selection, the renderer) goes through
//! these functions so the three can never disagree about where a clip is.

use crate::config::EditorConfig;
use crate::types::Point;

/// Convert a timeline time (seconds) to a pixel distance at the given zoom.
///
/// `pixels_per_second` is the width of one second at zoom 1.0.
pub fn time_to_pixel(time: f64, zoom: f64, pixels_per_second: f64) -> f64 {
    time * zoom * pixels_per_second
}

/// Convert a pixel distance to a timeline time (seconds) at the given zoom.
pub fn pixel_to_time(px: f64, zoom: f64, pixels_per_second: f64) -> f64 {
    px / (zoom * pixels_per_second)
}

/// The full screen transform for one frame: zoom, scroll offsets and the fixed
/// chrome (track header column, ruler strip).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordinateMapper {
    pub pixels_per_second: f64,
    pub zoom: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub track_header_width: f64,
    pub ruler_height: f64,
}

impl CoordinateMapper {
    /// Build a mapper from the editor configuration and the current viewport values.
    pub fn new(config: &EditorConfig, zoom: f64, scroll_x: f64, scroll_y: f64) -> Self {
        Self {
            pixels_per_second: config.pixels_per_second,
            zoom,
            scroll_x,
            scroll_y,
            track_header_width: config.track_header_width,
            ruler_height: config.ruler_height,
        }
    }

    /// Seconds → pixel distance at the current zoom.
    pub fn time_to_pixel(&self, time: f64) -> f64 {
        time_to_pixel(time, self.zoom, self.pixels_per_second)
    }

    /// Pixel distance → seconds at the current zoom.
    pub fn pixel_to_time(&self, px: f64) -> f64 {
        pixel_to_time(px, self.zoom, self.pixels_per_second)
    }

    /// Screen x of a timeline time: header column + mapped time − horizontal scroll.
    pub fn time_to_screen_x(&self, time: f64) -> f64 {
        self.track_header_width + self.time_to_pixel(time) - self.scroll_x
    }

    /// Timeline time under a screen x. Not clamped; callers clamp to their own range.
    pub fn screen_x_to_time(&self, x: f64) -> f64 {
        self.pixel_to_time(x - self.track_header_width + self.scroll_x)
    }

    /// Screen y of a content-space y offset (0 = top of the first track).
    pub fn content_to_screen_y(&self, y: f64) -> f64 {
        self.ruler_height + y - self.scroll_y
    }

    /// Content-space y under a screen y.
    pub fn screen_to_content_y(&self, y: f64) -> f64 {
        y - self.ruler_height + self.scroll_y
    }

    /// Whether the point is in the ruler strip above the track area.
    pub fn in_ruler(&self, p: Point) -> bool {
        p.y < self.ruler_height
    }

    /// Whether the point is in the track header column.
    pub fn in_track_header(&self, p: Point) -> bool {
        p.x < self.track_header_width
    }

    /// Converts a fixed pixel width to a duration at the current zoom.
    pub fn pixels_as_duration(&self, px: f64) -> f64 {
        self.pixel_to_time(px)
    }
}

//! Viewport state: discrete zoom and clamped scroll offsets.

use serde::{Deserialize, Serialize};
use tl_common::{CoordinateMapper, EditorConfig};

/// Zoom and scroll position of the timeline canvas.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current zoom factor; always one of the configured zoom levels.
    zoom: f64,
    /// Horizontal scroll in pixels (>= 0).
    scroll_x: f64,
    /// Vertical scroll in pixels (>= 0).
    scroll_y: f64,
}

impl Viewport {
    /// A viewport at the configured default zoom, scrolled to the origin.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            zoom: config.nearest_zoom(config.default_zoom),
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn scroll_x(&self) -> f64 {
        self.scroll_x
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Set the zoom, snapped to the nearest configured level. Returns the applied zoom.
    pub fn set_zoom(&mut self, zoom: f64, config: &EditorConfig) -> f64 {
        self.zoom = config.nearest_zoom(zoom);
        tracing::debug!(zoom = self.zoom, "Zoom set");
        self.zoom
    }

    /// Step to the next higher zoom level. Returns false at the top level.
    pub fn zoom_in(&mut self, config: &EditorConfig) -> bool {
        match config.zoom_levels.iter().copied().find(|z| *z > self.zoom) {
            Some(next) => {
                self.zoom = next;
                tracing::debug!(zoom = self.zoom, "Zoomed in");
                true
            }
            None => false,
        }
    }

    /// Step to the next lower zoom level. Returns false at the bottom level.
    pub fn zoom_out(&mut self, config: &EditorConfig) -> bool {
        match config.zoom_levels.iter().rev().copied().find(|z| *z < self.zoom) {
            Some(prev) => {
                self.zoom = prev;
                tracing::debug!(zoom = self.zoom, "Zoomed out");
                true
            }
            None => false,
        }
    }

    /// Set both scroll offsets, clamped to >= 0.
    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.scroll_x = x.max(0.0);
        self.scroll_y = y.max(0.0);
    }

    /// Scroll by a delta, clamped to >= 0.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.set_scroll(self.scroll_x + dx, self.scroll_y + dy);
    }

    /// The coordinate transform for this viewport.
    pub fn mapper(&self, config: &EditorConfig) -> CoordinateMapper {
        CoordinateMapper::new(config, self.zoom, self.scroll_x, self.scroll_y)
    }
}

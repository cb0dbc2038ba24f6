//! Editor configuration: pixel metrics, zoom set, snapping, history depth.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do with clips that reference a track id missing from a loaded project.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrphanPolicy {
    /// Remove orphaned clips from the document and hand them back to the caller.
    #[default]
    Report,
    /// Remove orphaned clips and only log them.
    Drop,
}

/// Errors raised by [`EditorConfig::validate`] and [`EditorConfig::from_json_str`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level editor configuration.
///
/// All pixel values are canvas pixels and independent of zoom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Width of one second at zoom 1.0 (K).
    pub pixels_per_second: f64,
    /// Allowed zoom factors, strictly ascending.
    pub zoom_levels: Vec<f64>,
    /// Zoom used by a fresh viewport. Snapped to the nearest level.
    pub default_zoom: f64,
    /// Width of the track header column on the left.
    pub track_header_width: f64,
    /// Height of the time ruler strip on top.
    pub ruler_height: f64,
    pub default_track_height: f64,
    pub collapsed_track_height: f64,
    /// Width of the trim handle zone at each clip edge.
    pub resize_handle_width: f64,
    /// Narrowest a clip may be trimmed to, in pixels at the current zoom.
    pub min_clip_width_px: f64,
    /// Grab width of the playhead head in the ruler.
    pub playhead_hotspot_width: f64,
    pub snap_threshold_px: f64,
    pub snap_enabled: bool,
    pub ripple_enabled: bool,
    /// Maximum number of retained undo steps.
    pub max_history: usize,
    /// Frames per second used for frame stepping.
    pub frame_rate: f64,
    pub orphan_policy: OrphanPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pixels_per_second: 100.0,
            zoom_levels: vec![0.1, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0],
            default_zoom: 1.0,
            track_header_width: 200.0,
            ruler_height: 32.0,
            default_track_height: 60.0,
            collapsed_track_height: 24.0,
            resize_handle_width: 8.0,
            min_clip_width_px: 10.0,
            playhead_hotspot_width: 12.0,
            snap_threshold_px: 10.0,
            snap_enabled: true,
            ripple_enabled: false,
            max_history: 50,
            frame_rate: 30.0,
            orphan_policy: OrphanPolicy::Report,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        tracing::debug!(
            zoom_levels = config.zoom_levels.len(),
            max_history = config.max_history,
            "Editor config loaded"
        );
        Ok(config)
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pixels_per_second > 0.0) {
            return Err(ConfigError::Invalid {
                field: "pixelsPerSecond",
                reason: format!("must be > 0, got {}", self.pixels_per_second),
            });
        }
        if self.zoom_levels.is_empty() {
            return Err(ConfigError::Invalid {
                field: "zoomLevels",
                reason: "must not be empty".into(),
            });
        }
        if self.zoom_levels.iter().any(|z| !(*z > 0.0)) {
            return Err(ConfigError::Invalid {
                field: "zoomLevels",
                reason: "every level must be > 0".into(),
            });
        }
        if self.zoom_levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::Invalid {
                field: "zoomLevels",
                reason: "levels must be strictly ascending".into(),
            });
        }
        if self.max_history == 0 {
            return Err(ConfigError::Invalid {
                field: "maxHistory",
                reason: "must be at least 1".into(),
            });
        }
        if !(self.frame_rate > 0.0) {
            return Err(ConfigError::Invalid {
                field: "frameRate",
                reason: format!("must be > 0, got {}", self.frame_rate),
            });
        }
        if !(self.min_clip_width_px > 0.0) {
            return Err(ConfigError::Invalid {
                field: "minClipWidthPx",
                reason: format!("must be > 0, got {}", self.min_clip_width_px),
            });
        }
        if self.resize_handle_width < 0.0 {
            return Err(ConfigError::Invalid {
                field: "resizeHandleWidth",
                reason: "must be non-negative".into(),
            });
        }
        Ok(())
    }

    /// The zoom level closest to `zoom`.
    pub fn nearest_zoom(&self, zoom: f64) -> f64 {
        self.zoom_levels
            .iter()
            .copied()
            .min_by(|a, b| (a - zoom).abs().total_cmp(&(b - zoom).abs()))
            .unwrap_or(1.0)
    }

    /// Minimum clip duration at a zoom: the fixed pixel floor converted to seconds.
    pub fn minimum_duration(&self, zoom: f64) -> f64 {
        crate::coords::pixel_to_time(self.min_clip_width_px, zoom, self.pixels_per_second)
    }
}

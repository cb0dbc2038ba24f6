//! `tl-common` -- Shared types, configuration and errors for the timeline editing engine.
//!
//! This crate is the foundation the other engine crates depend on:
//!
//! - **Types**: `TrackKind`, `Point`, `Rect` (screen-space geometry)
//! - **Coordinates**: `CoordinateMapper`, `time_to_pixel`, `pixel_to_time`
//!   (the single time↔pixel transform shared by hit-testing, dragging and rendering)
//! - **Config**: `EditorConfig`, `OrphanPolicy`
//! - **Errors**: `EditError`, `EditResult` (thiserror-based)
//! - **Media**: `MediaInfo`, `MediaProvider` (media source collaborator seam)
//! - **Ids**: `generate_id`

pub mod config;
pub mod coords;
pub mod error;
pub mod id;
pub mod media;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{ConfigError, EditorConfig, OrphanPolicy};
pub use coords::{pixel_to_time, time_to_pixel, CoordinateMapper};
pub use error::{EditError, EditResult};
pub use id::generate_id;
pub use media::{MediaInfo, MediaProvider, StaticMediaProvider};
pub use types::{Point, Rect, TrackKind};

//! Error types for timeline edits (thiserror-based).
//!
//! Only dangling references are errors. Boundary cases (undo with empty history,
//! over-trims, drags past zero) clamp or no-op instead of failing.

use thiserror::Error;

/// Errors returned by structural edits on the timeline document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Clip not found: {id}")]
    ClipNotFound { id: String },

    #[error("Track not found: {id}")]
    TrackNotFound { id: String },

    #[error("Marker not found: {id}")]
    MarkerNotFound { id: String },

    #[error("Media not found: {id}")]
    MediaNotFound { id: String },

    #[error("Duplicate id: {id}")]
    DuplicateId { id: String },

    #[error("Invalid clip {id}: {reason}")]
    InvalidClip { id: String, reason: String },
}

impl EditError {
    pub fn clip_not_found(id: impl Into<String>) -> Self {
        Self::ClipNotFound { id: id.into() }
    }

    pub fn track_not_found(id: impl Into<String>) -> Self {
        Self::TrackNotFound { id: id.into() }
    }

    pub fn marker_not_found(id: impl Into<String>) -> Self {
        Self::MarkerNotFound { id: id.into() }
    }

    pub fn media_not_found(id: impl Into<String>) -> Self {
        Self::MediaNotFound { id: id.into() }
    }

    /// Whether this is a dangling-reference error.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ClipNotFound { .. }
                | Self::TrackNotFound { .. }
                | Self::MarkerNotFound { .. }
                | Self::MediaNotFound { .. }
        )
    }
}

/// Convenience Result type for edit operations.
pub type EditResult<T> = Result<T, EditError>;

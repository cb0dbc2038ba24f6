//! Error types for project persistence (thiserror-based).

use thiserror::Error;

/// Errors that can occur while reading, migrating or writing a project record.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The record was written by a newer format than this build understands.
    #[error("Unsupported project version: {version} (newest supported is {supported})")]
    UnsupportedVersion { version: u32, supported: u32 },

    /// The record parsed but breaks a structural rule.
    #[error("Invalid project file: {reason}")]
    InvalidProject { reason: String },

    #[error("Migration failed from version {from} to {to}: {reason}")]
    MigrationFailed { from: u32, to: u32, reason: String },

    #[error("Project file not found: {path}")]
    NotFound { path: String },
}

impl ProjectError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidProject {
            reason: reason.into(),
        }
    }
}

/// Convenience Result type for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

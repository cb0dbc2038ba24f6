//! Project serialization: writing `ProjectFile` to JSON.

use std::path::Path;

use tl_app_state::Document;
use tracing::{debug, info};

use crate::error::{ProjectError, ProjectResult};
use crate::types::ProjectFile;

/// Serialize a project to a pretty-printed JSON string.
pub fn to_json_string(project: &ProjectFile) -> ProjectResult<String> {
    let json = serde_json::to_string_pretty(project)?;
    debug!(json_len = json.len(), "Serialized project to JSON");
    Ok(json)
}

/// Serialize a project to a compact JSON string.
pub fn to_json_string_compact(project: &ProjectFile) -> ProjectResult<String> {
    let json = serde_json::to_string(project)?;
    debug!(json_len = json.len(), "Serialized project to compact JSON");
    Ok(json)
}

/// Save a project to `path`.
///
/// The JSON is written to a sibling `.tmp` file and renamed over the target, so
/// an interrupted save never leaves a truncated project behind.
pub fn save_project(project: &ProjectFile, path: &Path) -> ProjectResult<()> {
    let json = to_json_string(project)?;
    let temp_path = temp_path_for(path);

    std::fs::write(&temp_path, json.as_bytes()).map_err(|e| {
        tracing::error!(path = %temp_path.display(), error = %e, "Failed to write temp file");
        ProjectError::Io(e)
    })?;

    std::fs::rename(&temp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        tracing::error!(
            from = %temp_path.display(),
            to = %path.display(),
            error = %e,
            "Failed to rename temp file to target"
        );
        ProjectError::Io(e)
    })?;

    info!(
        path = %path.display(),
        tracks = project.tracks.len(),
        clips = project.clips.len(),
        "Project saved successfully"
    );
    Ok(())
}

/// Save a live document at the current format version.
pub fn save_document(doc: &Document, path: &Path) -> ProjectResult<()> {
    save_project(&ProjectFile::from_document(doc), path)
}

fn temp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

//! Project deserialization: loading a `ProjectFile` from JSON.

use std::path::Path;

use tl_app_state::{first_duplicate_id, Document};
use tl_common::OrphanPolicy;
use tracing::{debug, info};

use crate::error::{ProjectError, ProjectResult};
use crate::migrate::migrate_project;
use crate::types::{LoadReport, ProjectFile};

/// Deserialize a project from a JSON string, migrating older formats first.
pub fn from_json_string(json: &str) -> ProjectResult<ProjectFile> {
    let mut value: serde_json::Value = serde_json::from_str(json)?;

    let from_version = migrate_project(&mut value)?;
    debug!(from_version, "Project version after migration");

    let project: ProjectFile = serde_json::from_value(value)?;
    validate_project(&project)?;

    debug!(
        tracks = project.tracks.len(),
        clips = project.clips.len(),
        markers = project.markers.len(),
        "Deserialized project from JSON"
    );
    Ok(project)
}

/// Load a project from a file at the given path.
pub fn load_project(path: &Path) -> ProjectResult<ProjectFile> {
    if !path.exists() {
        return Err(ProjectError::NotFound {
            path: path.display().to_string(),
        });
    }

    let json = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read project file");
        ProjectError::Io(e)
    })?;

    let project = from_json_string(&json)?;

    info!(
        path = %path.display(),
        tracks = project.tracks.len(),
        clips = project.clips.len(),
        "Project loaded successfully"
    );
    Ok(project)
}

/// Load a project file straight into a document, applying the orphan policy.
pub fn load_document(path: &Path, policy: OrphanPolicy) -> ProjectResult<(Document, LoadReport)> {
    Ok(load_project(path)?.into_document(policy))
}

/// Reject records that could never have come from a valid document.
///
/// Clips pointing at missing tracks are not an error here; they are handled by
/// [`ProjectFile::into_document`].
fn validate_project(project: &ProjectFile) -> ProjectResult<()> {
    if let Some(id) = first_duplicate_id(&project.tracks, &project.clips, &project.markers) {
        return Err(ProjectError::invalid(format!("duplicate id: {id}")));
    }

    for clip in &project.clips {
        if clip.duration <= 0.0 {
            return Err(ProjectError::invalid(format!(
                "clip {} has non-positive duration {}",
                clip.id, clip.duration
            )));
        }
        if clip.start_time < 0.0 {
            return Err(ProjectError::invalid(format!(
                "clip {} has negative start time {}",
                clip.id, clip.start_time
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::{save_project, to_json_string};
    use serde_json::json;
    use tl_app_state::{Clip, SourceRef, Track};
    use tl_common::TrackKind;

    fn sample_project() -> ProjectFile {
        let source = SourceRef {
            media_id: "media-1".into(),
            kind: TrackKind::Video,
            duration: Some(10.0),
        };
        ProjectFile {
            tracks: vec![Track {
                id: "v1".into(),
                ..Track::new(TrackKind::Video, "Video 1", 0, 60.0)
            }],
            clips: vec![Clip {
                id: "clip-1".into(),
                ..Clip::new("v1", source, 1.0, 5.0)
            }],
            ..ProjectFile::default()
        }
    }

    fn clip_json(id: &str, track_id: &str, start: f64, duration: f64) -> serde_json::Value {
        json!({
            "id": id,
            "trackId": track_id,
            "startTime": start,
            "duration": duration,
            "trimStart": 0.0,
            "trimEnd": duration,
            "source": { "mediaId": "m", "type": "video" }
        })
    }

    #[test]
    fn from_json_string_basic() {
        let json = to_json_string(&sample_project()).expect("serialize");
        let loaded = from_json_string(&json).expect("deserialize");
        assert_eq!(loaded, sample_project());
    }

    #[test]
    fn load_project_file_roundtrip() {
        let dir = std::env::temp_dir().join("tl_project_load_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("load_test.tlp");

        save_project(&sample_project(), &path).expect("save");
        let (doc, report) = load_document(&path, OrphanPolicy::Report).expect("load");
        assert!(report.is_clean());
        assert_eq!(doc.clips[0].id, "clip-1");
        assert_eq!(doc.tracks.len(), 1);

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn load_project_nonexistent_file() {
        let path = std::path::PathBuf::from("/nonexistent/path/project.tlp");
        let err = load_project(&path).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }

    #[test]
    fn from_json_string_invalid_json() {
        assert!(matches!(
            from_json_string("this is not json").unwrap_err(),
            ProjectError::Json(_)
        ));
    }

    #[test]
    fn legacy_record_loads() {
        let json = json!({
            "tracks": [{ "id": "v1", "name": "V", "type": "video", "order": 0, "height": 60.0 }],
            "clips": [{
                "id": "c1",
                "trackId": "v1",
                "startTime": 0.0,
                "duration": 2.0,
                "inPoint": 3.0,
                "outPoint": 5.0,
                "source": { "mediaId": "m", "type": "video" }
            }]
        });
        let loaded = from_json_string(&json.to_string()).expect("load");
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.clips[0].trim_start, 3.0);
        assert_eq!(loaded.clips[0].trim_end, 5.0);
        assert!(loaded.markers.is_empty());
    }

    #[test]
    fn validate_rejects_zero_duration() {
        let json = json!({ "version": 1, "clips": [clip_json("c1", "v1", 0.0, 0.0)] });
        let err = from_json_string(&json.to_string()).unwrap_err();
        assert!(err.to_string().contains("duration"));
    }

    #[test]
    fn validate_rejects_negative_start() {
        let json = json!({ "version": 1, "clips": [clip_json("c1", "v1", -1.0, 2.0)] });
        let err = from_json_string(&json.to_string()).unwrap_err();
        assert!(err.to_string().contains("start time"));
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let json = json!({
            "version": 1,
            "clips": [clip_json("dup", "v1", 0.0, 1.0), clip_json("dup", "v1", 2.0, 1.0)]
        });
        let err = from_json_string(&json.to_string()).unwrap_err();
        assert!(err.to_string().contains("duplicate id: dup"));
    }

    #[test]
    fn orphaned_clip_is_tolerated() {
        let json = json!({
            "version": 1,
            "tracks": [{ "id": "v1", "name": "V", "type": "video", "order": 0, "height": 60.0 }],
            "clips": [clip_json("c1", "v1", 0.0, 1.0), clip_json("c2", "gone", 0.0, 1.0)]
        });
        let project = from_json_string(&json.to_string()).expect("orphans are not fatal");
        let (doc, report) = project.into_document(OrphanPolicy::Report);
        assert_eq!(doc.clips.len(), 1);
        assert_eq!(report.orphaned_clips[0].id, "c2");
    }
}

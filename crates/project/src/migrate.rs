//! Version migration: upgrades older project JSON to the current layout in place.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{ProjectError, ProjectResult};

/// Current project format version.
pub const CURRENT_VERSION: u32 = 1;

/// Migrate a project JSON value to [`CURRENT_VERSION`] in place.
///
/// Returns the version the record started at. Records from a newer format are
/// rejected rather than guessed at.
pub fn migrate_project(value: &mut Value) -> ProjectResult<u32> {
    let obj = value
        .as_object_mut()
        .ok_or_else(|| ProjectError::invalid("project root must be a JSON object"))?;

    let version = extract_version(obj)?;

    if version > CURRENT_VERSION {
        return Err(ProjectError::UnsupportedVersion {
            version,
            supported: CURRENT_VERSION,
        });
    }

    if version == CURRENT_VERSION {
        debug!(version, "Project is at current version, no migration needed");
        return Ok(version);
    }

    let mut current = version;
    while current < CURRENT_VERSION {
        let next = current + 1;
        info!(from = current, to = next, "Migrating project");
        match current {
            0 => migrate_v0_to_v1(obj)?,
            other => {
                return Err(ProjectError::MigrationFailed {
                    from: other,
                    to: other + 1,
                    reason: format!("no migration path from version {other}"),
                });
            }
        }
        current = next;
    }

    obj.insert("version".to_string(), Value::Number(CURRENT_VERSION.into()));
    info!(from = version, to = CURRENT_VERSION, "Project migration complete");
    Ok(version)
}

fn extract_version(obj: &Map<String, Value>) -> ProjectResult<u32> {
    match obj.get("version") {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| ProjectError::invalid("version must be a non-negative integer")),
        Some(Value::String(s)) => s
            .parse::<u32>()
            .map_err(|_| ProjectError::invalid(format!("cannot parse version string: {s}"))),
        Some(_) => Err(ProjectError::invalid("version field has unexpected type")),
        None => {
            warn!("Project has no version field, assuming version 0");
            Ok(0)
        }
    }
}

/// Version 0 stored source offsets as `inPoint`/`outPoint` and could omit
/// empty collections.
fn migrate_v0_to_v1(obj: &mut Map<String, Value>) -> ProjectResult<()> {
    for key in ["tracks", "clips", "markers"] {
        obj.entry(key).or_insert_with(|| Value::Array(Vec::new()));
    }

    let clips = obj
        .get_mut("clips")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| ProjectError::MigrationFailed {
            from: 0,
            to: 1,
            reason: "clips is not an array".into(),
        })?;

    let mut renamed = 0usize;
    for clip in clips.iter_mut().filter_map(Value::as_object_mut) {
        for (old, new) in [("inPoint", "trimStart"), ("outPoint", "trimEnd")] {
            if let Some(v) = clip.remove(old) {
                clip.entry(new).or_insert(v);
                renamed += 1;
            }
        }
    }
    debug!(renamed, "Renamed legacy clip trim fields");
    Ok(())
}

//! Manifest loading and the single mutation a sweep performs on it.
//!
//! The base manifest on disk is only ever read. Each sweep point works on its
//! own deep copy and hands the service a uniquely named temporary file that is
//! removed when the point is done.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::{Map, Value};
use tempfile::{Builder, TempPath};
use tracing::{debug, warn};

use crate::error::ManifestError;

pub const BALANCED_OPTICS_PRESET: &str = "balanced-optics";
const TEMP_PREFIX: &str = "indra-manifest-";
const TEMP_SUFFIX: &str = ".json";

/// Numeric field at `controls.presets[id == preset_id].panels.<panel>.<field>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetField {
    pub preset_id: String,
    pub panel: String,
    pub field: String,
}

impl PresetField {
    pub fn new(
        preset_id: impl Into<String>,
        panel: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            preset_id: preset_id.into(),
            panel: panel.into(),
            field: field.into(),
        }
    }

    /// Compositor blend of the `balanced-optics` preset.
    pub fn balanced_blend() -> Self {
        Self::new(BALANCED_OPTICS_PRESET, "compositor", "blend")
    }
}

pub fn load_manifest(path: &Path) -> Result<Value, ManifestError> {
    let raw = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Set `target` to `value` on every preset whose id matches.
///
/// Missing `panels` or panel objects are created. Returns the number of
/// presets updated; zero means the document is left as it was.
pub fn apply_preset_value(
    document: &mut Value,
    target: &PresetField,
    value: f64,
) -> Result<usize, ManifestError> {
    let Some(presets) = document
        .get_mut("controls")
        .and_then(|controls| controls.get_mut("presets"))
        .and_then(Value::as_array_mut)
    else {
        warn!(preset = %target.preset_id, "manifest has no controls.presets list");
        return Ok(0);
    };

    let mut updated = 0;
    for preset in presets.iter_mut() {
        if preset.get("id").and_then(Value::as_str) != Some(target.preset_id.as_str()) {
            continue;
        }
        let Some(preset) = preset.as_object_mut() else {
            continue;
        };
        let panels = child_object(preset, "panels", &target.preset_id)?;
        let panel = child_object(panels, &target.panel, &target.preset_id)?;
        panel.insert(target.field.clone(), Value::from(value));
        updated += 1;
    }

    if updated == 0 {
        // Kept as a no-op: the point renders with the unmodified document.
        warn!(
            preset = %target.preset_id,
            value,
            "preset not found in manifest; sweep point uses the base document"
        );
    }
    Ok(updated)
}

fn child_object<'a>(
    parent: &'a mut Map<String, Value>,
    key: &str,
    preset_id: &str,
) -> Result<&'a mut Map<String, Value>, ManifestError> {
    parent
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| ManifestError::UnexpectedShape {
            preset_id: preset_id.to_string(),
            key: key.to_string(),
        })
}

/// Write `document` to a fresh `indra-manifest-*.json` file.
///
/// The returned path deletes the file when dropped, so every exit path of the
/// caller releases it.
pub fn write_temp_manifest(
    document: &Value,
    scratch_dir: Option<&Path>,
) -> Result<TempPath, ManifestError> {
    let mut builder = Builder::new();
    builder.prefix(TEMP_PREFIX).suffix(TEMP_SUFFIX);
    let mut file = match scratch_dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(ManifestError::WriteTemp)?;

    serde_json::to_writer(&mut file, document).map_err(ManifestError::Serialize)?;
    file.flush().map_err(ManifestError::WriteTemp)?;
    let path = file.into_temp_path();
    debug!(path = %path.display(), "wrote temporary manifest");
    Ok(path)
}

/// Remove a temporary manifest now. A file that is already gone is fine.
pub fn discard_temp_manifest(path: TempPath) {
    let location = path.to_path_buf();
    match path.close() {
        Ok(()) => debug!(path = %location.display(), "removed temporary manifest"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!(
            path = %location.display(),
            error = %err,
            "failed to remove temporary manifest"
        ),
    }
}

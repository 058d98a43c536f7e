//! Sidecar files: the raw model response stored beside each image.
//!
//! For an image at `P` the sidecar is always `P` with `.json` appended
//! (`photo.jpg` → `photo.jpg.json`). Writing replaces any previous sidecar.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

/// Suffix appended to the full image file name.
pub const SIDECAR_SUFFIX: &str = ".json";

/// Path of the sidecar for `image`.
pub fn sidecar_path(image: &Path) -> PathBuf {
    let mut raw = OsString::from(image.as_os_str());
    raw.push(SIDECAR_SUFFIX);
    PathBuf::from(raw)
}

/// Serialize `value` as JSON with a 4-space indent.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Write `response` to the sidecar of `image`, overwriting it.
///
/// Returns the sidecar path.
pub fn write_sidecar(image: &Path, response: &serde_json::Value) -> PipelineResult<PathBuf> {
    let path = sidecar_path(image);
    let bytes = to_pretty_json(response).map_err(|e| PipelineError::Sidecar {
        path: path.clone(),
        message: e.to_string(),
    })?;
    std::fs::write(&path, bytes).map_err(|e| PipelineError::Sidecar {
        path: path.clone(),
        message: e.to_string(),
    })?;
    tracing::debug!("Wrote sidecar {:?}", path);
    Ok(path)
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Atomic `ScanResult` persistence.
//!
//! The artifact is written to a temp file in the same directory, then
//! renamed into place, so a reader never observes a partially-written file.
//! A full JSON dump is also written to `scan_debug.log` alongside it.

use std::path::{Path, PathBuf};

use wd_core::ScanResult;
use wd_error::{ErrorCode, WdError};

const DEBUG_LOG_FILE_NAME: &str = "scan_debug.log";

/// Where a scan result for `scanner`/`scope` would be written under
/// `output_dir`, as `scan.<scanner>.<scope>.json`.
#[must_use]
pub fn artifact_path(output_dir: &Path, scanner: &str, scope: &str) -> PathBuf {
    output_dir.join(format!("scan.{scanner}.{scope}.json"))
}

/// Write `result` atomically to `scan.<scanner>.<scope>.json` under
/// `output_dir`, and append the full JSON dump to `scan_debug.log`.
///
/// # Errors
///
/// Returns [`ErrorCode::IoArtifactWriteFailed`] if `output_dir` cannot be
/// created, the result cannot be serialized, or either file write fails.
pub fn write_scan_result(
    output_dir: &Path,
    scanner: &str,
    scope: &str,
    result: &ScanResult,
) -> Result<PathBuf, WdError> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        WdError::new(ErrorCode::IoArtifactWriteFailed, format!("cannot create output dir: {e}"))
            .with_context("output_dir", output_dir.display().to_string())
    })?;

    let json = serde_json::to_string_pretty(result).map_err(|e| {
        WdError::new(ErrorCode::IoArtifactWriteFailed, format!("cannot serialize scan result: {e}"))
    })?;

    let path = artifact_path(output_dir, scanner, scope);
    write_atomically(&path, json.as_bytes())?;
    append_debug_log(output_dir, &json)?;
    Ok(path)
}

/// Write `bytes` to `path` by first writing a sibling temp file, then
/// renaming it into place — rename is atomic on the same filesystem.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), WdError> {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("artifact");
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

    std::fs::write(&tmp_path, bytes).map_err(|e| {
        WdError::new(ErrorCode::IoArtifactWriteFailed, format!("cannot write temp artifact: {e}"))
            .with_context("path", tmp_path.display().to_string())
    })?;

    std::fs::rename(&tmp_path, path).map_err(|e| {
        WdError::new(ErrorCode::IoArtifactWriteFailed, format!("cannot rename artifact into place: {e}"))
            .with_context("path", path.display().to_string())
    })
}

fn append_debug_log(output_dir: &Path, json: &str) -> Result<(), WdError> {
    let path = output_dir.join(DEBUG_LOG_FILE_NAME);
    std::fs::write(&path, json).map_err(|e| {
        WdError::new(ErrorCode::IoArtifactWriteFailed, format!("cannot write debug log: {e}"))
            .with_context("path", path.display().to_string())
    })
}

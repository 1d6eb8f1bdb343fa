//! Shortcut (`.mblink`) indirection files.
//!
//! A shortcut is a small text file whose content is the path it points to.
//! Libraries use them to expose media stored elsewhere without copying it.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::encoding::decode_detected;
use crate::error::{require_path, require_str, FsResult};

/// File extension that marks a shortcut, including the dot.
pub const SHORTCUT_EXTENSION: &str = ".mblink";

/// Whether `filename` names a shortcut, judged by extension alone.
pub fn is_shortcut(filename: &str) -> FsResult<bool> {
    require_str("filename", filename)?;

    Ok(paths::extension(filename)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SHORTCUT_EXTENSION)))
}

/// Read the target of the shortcut at `path`.
///
/// Returns `None` when `path` is not a shortcut or the shortcut is empty.
/// The target is trimmed of surrounding whitespace and normalized.
pub fn resolve_shortcut(path: &Path) -> FsResult<Option<String>> {
    require_path("filename", path)?;

    if !is_shortcut(&path.to_string_lossy())? {
        return Ok(None);
    }

    let bytes = fs::read(path)?;
    let contents = decode_detected(&bytes)?;
    let target = contents.trim();
    if target.is_empty() {
        debug!(path = %path.display(), "Shortcut has no target");
        return Ok(None);
    }

    Ok(Some(paths::normalize_path(target)?))
}

/// Write `target` as the content of the shortcut at `shortcut_path`,
/// replacing any existing file.
pub fn create_shortcut(shortcut_path: &Path, target: &str) -> FsResult<()> {
    require_path("shortcut_path", shortcut_path)?;
    require_str("target", target)?;

    fs::write(shortcut_path, target)?;
    debug!(
        shortcut = %shortcut_path.display(),
        to = %target,
        "Created shortcut"
    );
    Ok(())
}

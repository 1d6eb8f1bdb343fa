//! File name and extension parsing.
//!
//! These follow string rules rather than `std::path` component rules: an
//! extension is everything from the last `.` of the final name, a leading dot
//! counts (`.nfo` has an extension), and a trailing dot does not.

use std::path::Path;

use crate::separators::is_directory_separator;

/// The final name of `path`: everything after the last directory separator.
///
/// A path ending in a separator has an empty file name.
pub fn file_name(path: &str) -> &str {
    match path.rfind(is_directory_separator) {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// The extension of `path` including its leading dot, if there is one.
///
/// Returns `None` when the file name has no dot or ends with one.
pub fn extension(path: &str) -> Option<&str> {
    let name = file_name(path);
    let dot = name.rfind('.')?;
    if dot + 1 == name.len() {
        return None;
    }
    Some(&name[dot..])
}

/// Whether `path` ends in an extension-shaped suffix.
pub fn has_extension(path: &str) -> bool {
    extension(path).is_some()
}

/// The file name of `path` with its final extension removed.
pub fn file_name_without_extension(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    }
}

/// The parent directory of `path`, if it has one.
pub fn directory_name(path: &str) -> Option<&str> {
    Path::new(path).parent().and_then(Path::to_str)
}

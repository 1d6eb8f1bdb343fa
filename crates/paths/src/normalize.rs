//! Path normalization, substitution and comparison.

use crate::error::{require_non_blank, require_non_empty, PathResult};
use crate::matching::{
    eq_ignore_case, replace_ignore_case, starts_with_ignore_case, strip_prefix_len,
};
use crate::names::directory_name;
use crate::separators::{is_any_separator, DIRECTORY_SEPARATOR};

/// Whether `path` is a bare drive root such as `C:\`.
pub fn is_drive_root(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'\\'
}

/// Strip trailing directory separators from `path`.
///
/// Drive roots (`C:\`) are returned unchanged since they are only valid with
/// their separator. A path made only of separators collapses to a single
/// separator.
///
/// ```rust
/// use paths::{normalize_path, DIRECTORY_SEPARATOR};
///
/// let path = format!("{0}media{0}movies{0}{0}", DIRECTORY_SEPARATOR);
/// assert_eq!(normalize_path(&path).unwrap(), format!("{0}media{0}movies", DIRECTORY_SEPARATOR));
/// assert_eq!(normalize_path("C:\\").unwrap(), "C:\\");
/// ```
pub fn normalize_path(path: &str) -> PathResult<String> {
    require_non_empty("path", path)?;

    if is_drive_root(path) {
        return Ok(path.to_string());
    }

    let trimmed = path.trim_end_matches(DIRECTORY_SEPARATOR);
    if trimmed.is_empty() {
        return Ok(DIRECTORY_SEPARATOR.to_string());
    }
    Ok(trimmed.to_string())
}

/// Replace `from` with `to` in `path`, ignoring case.
///
/// When anything was replaced, the separator style of the whole result is
/// flipped to match `to`: if `to` contains `/` every `\` becomes `/`,
/// otherwise every `/` becomes `\`. An unmatched path is returned as is.
pub fn substitute_path(path: &str, from: &str, to: &str) -> PathResult<String> {
    require_non_blank("path", path)?;
    require_non_blank("from", from)?;
    require_non_blank("to", to)?;

    let (substituted, replaced) = replace_ignore_case(path, from, to);
    if !replaced {
        return Ok(substituted);
    }

    if to.contains('/') {
        Ok(substituted.replace('\\', "/"))
    } else {
        Ok(substituted.replace('/', "\\"))
    }
}

/// Whether `path` contains `parent` followed by a separator, ignoring case.
///
/// This is a substring test: `parent` may appear anywhere in `path`, but it
/// must be followed by `/` or `\`, so `/data/media` is not found in
/// `/data/mediaextra/file`.
pub fn contains_sub_path(parent: &str, path: &str) -> PathResult<bool> {
    require_non_empty("parent", parent)?;
    require_non_empty("path", path)?;

    let parent = parent.trim_end_matches(is_any_separator);
    if parent.is_empty() {
        return Ok(path.contains(is_any_separator));
    }

    Ok(path.char_indices().any(|(start, _)| {
        strip_prefix_len(&path[start..], parent)
            .is_some_and(|len| path[start + len..].starts_with(is_any_separator))
    }))
}

/// Whether `path` has no parent directory.
pub fn is_root_path(path: &str) -> bool {
    directory_name(path).is_none_or(str::is_empty)
}

/// Whether `path` names a local file rather than a URI.
///
/// Anything with a `://` scheme separator is a URI unless the scheme is
/// `file://`.
pub fn is_path_file(path: &str) -> bool {
    !path.contains("://") || starts_with_ignore_case(path, "file://")
}

/// Compare two paths after normalization, ignoring case.
pub fn are_equal(first: &str, second: &str) -> PathResult<bool> {
    let first = normalize_path(first)?;
    let second = normalize_path(second)?;
    Ok(eq_ignore_case(&first, &second))
}

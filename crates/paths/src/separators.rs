//! Directory separator conventions.

/// The host's primary directory separator.
pub const DIRECTORY_SEPARATOR: char = std::path::MAIN_SEPARATOR;

/// The separator used by the opposite convention.
pub const ALT_SEPARATOR: char = if DIRECTORY_SEPARATOR == '/' { '\\' } else { '/' };

/// Whether `c` separates directories on this host.
///
/// Windows accepts both `\` and `/`; every other host only `/`.
pub fn is_directory_separator(c: char) -> bool {
    c == DIRECTORY_SEPARATOR || (cfg!(windows) && c == ALT_SEPARATOR)
}

/// Whether `c` is a separator under either convention.
pub fn is_any_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

//! # MediaFS Path Rules
//!
//! Pure, I/O-free path logic shared by every MediaFS host.
//!
//! ## Overview
//!
//! Paths handled by a media server frequently travel between hosts with
//! different conventions: a library scanned on a Windows box is served from a
//! Linux container, a network share is mounted under a different prefix, and
//! filenames created on one host must stay legal on another. This crate holds
//! the string-level rules for that:
//!
//! - **Normalization**: trailing separators, drive roots
//! - **Substitution**: case-insensitive prefix rewriting with separator-style flipping
//! - **Sub-path tests**: case-insensitive containment that requires a separator boundary
//! - **Name parsing**: file names, extensions, parent directories
//! - **Sanitization**: replacing characters that are illegal in filenames
//!
//! Nothing here touches the filesystem; the `filesystem` crate builds the
//! I/O facade on top of these functions.
//!
//! ## Example
//!
//! ```rust
//! use paths::{substitute_path, InvalidCharPolicy, InvalidCharacterSet};
//!
//! let mapped = substitute_path("/movies/show/ep1.mkv", "/movies", "\\\\nas\\movies").unwrap();
//! assert_eq!(mapped, "\\\\nas\\movies\\show\\ep1.mkv");
//!
//! let strict = InvalidCharacterSet::for_policy(InvalidCharPolicy::Strict);
//! assert_eq!(strict.get_valid_filename("a:b?").unwrap(), "a b ");
//! ```

pub mod error;
pub mod matching;
pub mod names;
pub mod normalize;
pub mod sanitize;
pub mod separators;

pub use error::{PathError, PathResult};
pub use names::{
    directory_name, extension, file_name, file_name_without_extension, has_extension,
};
pub use normalize::{
    are_equal, contains_sub_path, is_drive_root, is_path_file, is_root_path, normalize_path,
    substitute_path,
};
pub use sanitize::{
    InvalidCharPolicy, InvalidCharacterSet, NATIVE_INVALID_FILENAME_CHARS,
    STRICT_INVALID_FILENAME_CHARS,
};
pub use separators::{ALT_SEPARATOR, DIRECTORY_SEPARATOR};

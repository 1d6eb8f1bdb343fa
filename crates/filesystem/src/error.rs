//! Error types for the filesystem facade.

use std::io;
use std::path::Path;

use paths::PathError;
use thiserror::Error;

/// Errors returned by [`FileSystem`](crate::FileSystem) operations.
///
/// Platform failures are passed through untouched in [`FsError::Io`]; the
/// facade never retries.
#[derive(Debug, Error)]
pub enum FsError {
    /// A required argument was empty, blank or an invalid combination.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl FsError {
    /// The underlying platform error kind, if this is a platform failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io(e) => Some(e.kind()),
            Self::InvalidArgument { .. } => None,
        }
    }

    /// Whether this error was caused by the caller's arguments.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

impl From<PathError> for FsError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::InvalidArgument { name, reason } => Self::InvalidArgument { name, reason },
        }
    }
}

impl From<walkdir::Error> for FsError {
    fn from(err: walkdir::Error) -> Self {
        Self::Io(err.into())
    }
}

/// Result alias for filesystem operations.
pub type FsResult<T> = Result<T, FsError>;

/// Reject an empty path argument.
pub(crate) fn require_path(name: &'static str, path: &Path) -> FsResult<()> {
    if path.as_os_str().is_empty() {
        return Err(FsError::InvalidArgument {
            name,
            reason: "must not be empty",
        });
    }
    Ok(())
}

/// Reject an empty string argument.
pub(crate) fn require_str(name: &'static str, value: &str) -> FsResult<()> {
    paths::error::require_non_empty(name, value).map_err(FsError::from)
}

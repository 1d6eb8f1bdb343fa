//! Error types for the paths crate.

use thiserror::Error;

/// Errors raised by path rules.
///
/// Every variant is a caller bug; none of them are worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A required argument was empty or blank.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Result alias for path rules.
pub type PathResult<T> = Result<T, PathError>;

/// Reject an empty string argument.
pub fn require_non_empty(name: &'static str, value: &str) -> PathResult<()> {
    if value.is_empty() {
        return Err(PathError::InvalidArgument {
            name,
            reason: "must not be empty",
        });
    }
    Ok(())
}

/// Reject an empty or whitespace-only string argument.
pub fn require_non_blank(name: &'static str, value: &str) -> PathResult<()> {
    if value.trim().is_empty() {
        return Err(PathError::InvalidArgument {
            name,
            reason: "must not be empty or whitespace",
        });
    }
    Ok(())
}

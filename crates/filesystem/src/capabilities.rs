//! Construction-time capability flags.

use paths::InvalidCharPolicy;

use crate::config::{Config, FileSystemConfig};

/// Host features fixed when a [`FileSystem`](crate::FileSystem) is built.
///
/// These are supplied by the embedding application and never detected or
/// changed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Whether the host supports asynchronous file handles.
    pub supports_async_io: bool,
    /// Which invalid filename character table to enforce.
    pub invalid_chars: InvalidCharPolicy,
}

impl Capabilities {
    /// Create capability flags from explicit values.
    pub fn new(supports_async_io: bool, invalid_chars: InvalidCharPolicy) -> Self {
        Self {
            supports_async_io,
            invalid_chars,
        }
    }

    /// Set async file handle support.
    pub fn with_async_io(mut self, enabled: bool) -> Self {
        self.supports_async_io = enabled;
        self
    }

    /// Set the invalid character policy.
    pub fn with_invalid_chars(mut self, policy: InvalidCharPolicy) -> Self {
        self.invalid_chars = policy;
        self
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::new(true, InvalidCharPolicy::Native)
    }
}

impl From<&FileSystemConfig> for Capabilities {
    fn from(config: &FileSystemConfig) -> Self {
        Self::new(config.enable_async_io, config.invalid_chars)
    }
}

impl From<&Config> for Capabilities {
    fn from(config: &Config) -> Self {
        Self::from(&config.filesystem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let caps = Capabilities::default()
            .with_async_io(false)
            .with_invalid_chars(InvalidCharPolicy::Strict);
        assert!(!caps.supports_async_io);
        assert_eq!(caps.invalid_chars, InvalidCharPolicy::Strict);
    }

    #[test]
    fn test_from_config() {
        let config = FileSystemConfig {
            enable_async_io: false,
            invalid_chars: InvalidCharPolicy::Strict,
            ..FileSystemConfig::default()
        };
        let caps = Capabilities::from(&config);
        assert_eq!(caps, Capabilities::new(false, InvalidCharPolicy::Strict));
    }
}

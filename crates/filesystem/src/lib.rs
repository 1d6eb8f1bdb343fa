//! # MediaFS Filesystem Library
//!
//! This crate provides the filesystem abstraction a media server uses to
//! reach its libraries, whatever host or share they live on.
//!
//! ## Overview
//!
//! The [`FileSystem`] facade combines the pure path rules from the `paths`
//! crate with host file primitives:
//!
//! - **Path Rules**: Normalization, prefix substitution, containment checks
//! - **Entry Resolution**: File or directory descriptors with a kind heuristic
//! - **Enumeration**: Lazy, optionally recursive directory walks
//! - **Shortcuts**: `.mblink` files that point at media stored elsewhere
//! - **File Operations**: Copy, move, delete, streams, text with encodings
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      FileSystem                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────┐  ┌────────────┐  ┌────────────────────┐  │
//! │  │   paths    │  │  Shortcut  │  │    Enumeration     │  │
//! │  │   rules    │  │   files    │  │     (walkdir)      │  │
//! │  └────────────┘  └────────────┘  └────────────────────┘  │
//! │  ┌────────────┐  ┌────────────┐  ┌────────────────────┐  │
//! │  │ Timestamps │  │    Swap    │  │ Streams/Attributes │  │
//! │  └────────────┘  └────────────┘  └────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use filesystem::{Config, FileSystem};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default()?;
//!     let fs = FileSystem::from_config(&config);
//!
//!     for entry in fs.get_files("/media/movies", true)? {
//!         let entry = entry?;
//!         println!("{} {}", entry.path().display(), fs.get_last_write_time_utc(&entry));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and defaults
//! - [`capabilities`]: Host feature flags fixed at construction
//! - [`entry`]: File and directory descriptors
//! - [`enumerate`]: Lazy directory iterators
//! - [`shortcut`]: `.mblink` indirection files
//! - [`swap`]: Content exchange between two files
//! - [`stream`]: File open modes and sync/async streams

pub mod attributes;
pub mod capabilities;
pub mod config;
pub mod encoding;
pub mod entry;
pub mod enumerate;
pub mod error;
pub mod filesystem;
pub mod shortcut;
pub mod stream;
pub mod swap;
pub mod times;

// Re-export paths for convenience
pub use paths;

// Re-export the facade
pub use filesystem::FileSystem;

// Re-export config types for convenience
pub use capabilities::Capabilities;
pub use config::{Config, ConfigError};

// Re-export entry types for convenience
pub use entry::{EntryKind, FileSystemEntry};
pub use enumerate::{Entries, EntryFilter, EntryPaths};

// Re-export I/O types for convenience
pub use encoding::TextEncoding;
pub use error::{FsError, FsResult};
pub use shortcut::SHORTCUT_EXTENSION;
pub use stream::{FileAccess, FileMode, FileShare, FileStream};
pub use times::{TimestampKind, MIN_TIMESTAMP};

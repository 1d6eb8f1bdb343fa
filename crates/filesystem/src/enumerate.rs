//! Lazy directory enumeration.
//!
//! Each iterator walks the tree one entry at a time with `walkdir`, so a
//! caller can stop consuming to abandon a large scan. Entries added or removed
//! while a walk is in progress may or may not be seen.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::entry::{EntryKind, FileSystemEntry};
use crate::error::FsResult;

/// Which kinds of entry an enumeration yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFilter {
    Files,
    Directories,
    All,
}

impl EntryFilter {
    fn accepts(&self, kind: EntryKind) -> bool {
        match self {
            Self::Files => kind.is_file(),
            Self::Directories => kind.is_directory(),
            Self::All => true,
        }
    }
}

/// Iterator over the entries below a directory.
///
/// The root itself is never yielded. Errors (including a missing root) are
/// yielded in place and enumeration continues where the walker can.
pub struct Entries {
    walker: walkdir::IntoIter,
    filter: EntryFilter,
    extensions: Option<Vec<String>>,
}

impl Entries {
    pub(crate) fn new(root: &Path, recursive: bool, filter: EntryFilter) -> Self {
        let walker = WalkDir::new(root).min_depth(1);
        let walker = if recursive { walker } else { walker.max_depth(1) };
        Self {
            walker: walker.into_iter(),
            filter,
            extensions: None,
        }
    }

    /// Only yield files whose extension is in `extensions`, ignoring case.
    ///
    /// Extensions may be given with or without the leading dot.
    pub(crate) fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().trim().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        self.extensions = Some(normalized);
        self
    }

    /// Yield paths instead of descriptors.
    pub fn paths(self) -> EntryPaths {
        EntryPaths { inner: self }
    }

    fn matches_extension(&self, kind: EntryKind, path: &Path) -> bool {
        let Some(extensions) = &self.extensions else {
            return true;
        };
        if kind.is_directory() {
            return false;
        }
        let name = path.to_string_lossy();
        paths::extension(&name)
            .is_some_and(|ext| extensions.iter().any(|wanted| *wanted == ext.to_lowercase()))
    }
}

impl Iterator for Entries {
    type Item = FsResult<FileSystemEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };

            let Some(kind) = classify(&entry) else {
                continue;
            };
            if !self.filter.accepts(kind) || !self.matches_extension(kind, entry.path()) {
                continue;
            }

            return Some(Ok(FileSystemEntry::existing(entry.into_path(), kind)));
        }
    }
}

/// Iterator over the paths below a directory.
pub struct EntryPaths {
    inner: Entries,
}

impl Iterator for EntryPaths {
    type Item = FsResult<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|result| result.map(FileSystemEntry::into_path))
    }
}

/// Decide whether a walked entry is a file or directory.
///
/// Symlinks are classified by their target; dangling links and special files
/// are skipped.
fn classify(entry: &DirEntry) -> Option<EntryKind> {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        return Some(EntryKind::Directory);
    }
    if file_type.is_file() {
        return Some(EntryKind::File);
    }
    if file_type.is_symlink() {
        let metadata = fs::metadata(entry.path()).ok()?;
        if metadata.is_dir() {
            return Some(EntryKind::Directory);
        }
        if metadata.is_file() {
            return Some(EntryKind::File);
        }
    }
    None
}

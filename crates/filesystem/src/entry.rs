//! Filesystem entry descriptors.
//!
//! A [`FileSystemEntry`] describes one file or directory by path. It is a
//! snapshot of what was known when it was created: the kind and existence
//! flag are fixed, while timestamps and length are resolved on demand through
//! [`FileSystem`](crate::FileSystem) so that building large listings stays
//! cheap.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Whether an entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Whether this is the file kind.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Whether this is the directory kind.
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// A file or directory described by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemEntry {
    path: PathBuf,
    kind: EntryKind,
    exists: bool,
}

impl FileSystemEntry {
    /// Describe `path` as `kind`, checking existence now.
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        let path = path.into();
        let exists = match kind {
            EntryKind::File => path.is_file(),
            EntryKind::Directory => path.is_dir(),
        };
        Self { path, kind, exists }
    }

    /// Describe `path` as a file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::File)
    }

    /// Describe `path` as a directory.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::Directory)
    }

    /// Describe an entry already known to exist, such as one produced by
    /// directory enumeration.
    pub(crate) fn existing(path: PathBuf, kind: EntryKind) -> Self {
        Self {
            path,
            kind,
            exists: true,
        }
    }

    /// Full path of the entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the descriptor, returning its path.
    pub fn into_path(self) -> PathBuf {
        self.path
    }

    /// Whether the entry is described as a file or a directory.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Whether the entry is described as a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Whether the entry is described as a directory.
    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }

    /// Whether the entry existed, as its kind, when the descriptor was made.
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Final name of the entry.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }

    /// Extension including its leading dot. Directories have none.
    pub fn extension(&self) -> Option<String> {
        match self.kind {
            EntryKind::Directory => None,
            EntryKind::File => paths::extension(&self.name()).map(str::to_string),
        }
    }

    /// The entry's name without its extension.
    ///
    /// Directory names are returned whole since directories have no
    /// extension semantics.
    pub fn name_without_extension(&self) -> String {
        let name = self.name();
        match self.kind {
            EntryKind::Directory => name,
            EntryKind::File => paths::file_name_without_extension(&name).to_string(),
        }
    }

    /// Size in bytes, resolved now. Directories report 0.
    pub fn length(&self) -> io::Result<u64> {
        match self.kind {
            EntryKind::Directory => Ok(0),
            EntryKind::File => Ok(fs::metadata(&self.path)?.len()),
        }
    }

    /// Re-check existence and return a fresh descriptor of the same kind.
    pub fn refresh(&self) -> Self {
        Self::new(self.path.clone(), self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_entry() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("movie.mkv");
        fs::write(&path, "12345").unwrap();

        let entry = FileSystemEntry::file(&path);
        assert!(entry.exists());
        assert!(entry.is_file());
        assert_eq!(entry.name(), "movie.mkv");
        assert_eq!(entry.extension().as_deref(), Some(".mkv"));
        assert_eq!(entry.name_without_extension(), "movie");
        assert_eq!(entry.length().unwrap(), 5);
    }

    #[test]
    fn test_directory_entry_has_no_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Season.01");
        fs::create_dir(&path).unwrap();

        let entry = FileSystemEntry::directory(&path);
        assert!(entry.exists());
        assert!(entry.is_directory());
        assert_eq!(entry.extension(), None);
        assert_eq!(entry.name_without_extension(), "Season.01");
        assert_eq!(entry.length().unwrap(), 0);
    }

    #[test]
    fn test_existence_respects_kind() {
        let temp_dir = TempDir::new().unwrap();
        let entry = FileSystemEntry::file(temp_dir.path());
        assert!(!entry.exists());
        assert!(FileSystemEntry::directory(temp_dir.path()).exists());
    }

    #[test]
    fn test_refresh() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("late.txt");

        let entry = FileSystemEntry::file(&path);
        assert!(!entry.exists());

        fs::write(&path, "now").unwrap();
        assert!(entry.refresh().exists());
    }
}

//! The filesystem facade.
//!
//! [`FileSystem`] bundles every path rule and file primitive behind one
//! value. It holds only what was fixed at construction (the invalid character
//! set, the capability flags and a temp directory), so a single instance can
//! be shared by reference across threads without locking. Thread safety of
//! the operations themselves is whatever the host filesystem provides.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use paths::InvalidCharacterSet;
use tracing::debug;

use crate::attributes;
use crate::capabilities::Capabilities;
use crate::config::Config;
use crate::encoding::{decode_detected, TextEncoding};
use crate::entry::{EntryKind, FileSystemEntry};
use crate::enumerate::{Entries, EntryFilter, EntryPaths};
use crate::error::{require_path, FsResult};
use crate::shortcut;
use crate::stream::{open_options, FileAccess, FileMode, FileShare, FileStream};
use crate::swap;
use crate::times::{timestamp_utc, TimestampKind};

/// Cross-platform filesystem facade.
#[derive(Debug, Clone)]
pub struct FileSystem {
    /// Characters rejected in filenames.
    invalid_chars: InvalidCharacterSet,
    /// Host features fixed at construction.
    capabilities: Capabilities,
    /// Directory for swap temporaries.
    temp_dir: PathBuf,
}

impl FileSystem {
    /// Create a filesystem with the given capabilities.
    ///
    /// Temporary files go to a `mediafs` directory under the host temp dir.
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            invalid_chars: InvalidCharacterSet::for_policy(capabilities.invalid_chars),
            capabilities,
            temp_dir: crate::config::default_temp_dir(),
        }
    }

    /// Create a filesystem from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Capabilities::from(config))
            .with_temp_dir(config.filesystem.temp_dir.clone())
    }

    /// Set the directory used for temporary files.
    pub fn with_temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.temp_dir = temp_dir;
        self
    }

    /// Capability flags fixed at construction.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The active invalid filename character set.
    pub fn invalid_filename_chars(&self) -> &InvalidCharacterSet {
        &self.invalid_chars
    }

    /// Directory used for swap temporaries.
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Strip trailing separators, keeping drive roots intact.
    pub fn normalize_path(&self, path: &str) -> FsResult<String> {
        Ok(paths::normalize_path(path)?)
    }

    /// Case-insensitive prefix rewrite with separator-style flipping.
    pub fn substitute_path(&self, path: &str, from: &str, to: &str) -> FsResult<String> {
        Ok(paths::substitute_path(path, from, to)?)
    }

    /// Whether `path` contains `parent` followed by a separator.
    pub fn contains_sub_path(&self, parent: &str, path: &str) -> FsResult<bool> {
        Ok(paths::contains_sub_path(parent, path)?)
    }

    /// Whether `path` has no parent directory component.
    pub fn is_root_path(&self, path: &str) -> bool {
        paths::is_root_path(path)
    }

    /// Whether `path` is a local path rather than a non-file URI.
    pub fn is_path_file(&self, path: &str) -> bool {
        paths::is_path_file(path)
    }

    /// Compare two paths after normalization, ignoring case.
    pub fn are_equal(&self, first: &str, second: &str) -> FsResult<bool> {
        Ok(paths::are_equal(first, second)?)
    }

    /// Replace every invalid filename character in `name` with a space.
    pub fn get_valid_filename(&self, name: &str) -> FsResult<String> {
        Ok(self.invalid_chars.get_valid_filename(name)?)
    }

    /// Describe `path`, guessing its kind from its extension.
    ///
    /// A path with an extension is checked as a file first and falls back to
    /// a directory descriptor; a path without one is checked as a directory
    /// first and falls back to a file descriptor. The fallback is returned
    /// without a second existence check, so a missing path is described as
    /// the opposite of its guessed kind. Never fails for a missing path.
    pub fn get_file_system_info<P: AsRef<Path>>(&self, path: P) -> FsResult<FileSystemEntry> {
        let path = path.as_ref();
        require_path("path", path)?;

        let guess = if paths::has_extension(&path.to_string_lossy()) {
            EntryKind::File
        } else {
            EntryKind::Directory
        };

        let entry = FileSystemEntry::new(path, guess);
        if entry.exists() {
            return Ok(entry);
        }

        Ok(match guess {
            EntryKind::File => FileSystemEntry::directory(path),
            EntryKind::Directory => FileSystemEntry::file(path),
        })
    }

    /// Describe `path` as a file.
    pub fn get_file_info<P: AsRef<Path>>(&self, path: P) -> FsResult<FileSystemEntry> {
        let path = path.as_ref();
        require_path("path", path)?;
        Ok(FileSystemEntry::file(path))
    }

    /// Describe `path` as a directory.
    pub fn get_directory_info<P: AsRef<Path>>(&self, path: P) -> FsResult<FileSystemEntry> {
        let path = path.as_ref();
        require_path("path", path)?;
        Ok(FileSystemEntry::directory(path))
    }

    /// Creation time of `entry`, or the minimum timestamp if unavailable.
    pub fn get_creation_time_utc(&self, entry: &FileSystemEntry) -> DateTime<Utc> {
        timestamp_utc(entry.path(), TimestampKind::Creation)
    }

    /// Last write time of `entry`, or the minimum timestamp if unavailable.
    pub fn get_last_write_time_utc(&self, entry: &FileSystemEntry) -> DateTime<Utc> {
        timestamp_utc(entry.path(), TimestampKind::LastWrite)
    }

    /// Creation time of the entry at `path`, or the minimum timestamp.
    pub fn get_creation_time_utc_for_path<P: AsRef<Path>>(&self, path: P) -> DateTime<Utc> {
        timestamp_utc(path.as_ref(), TimestampKind::Creation)
    }

    /// Last write time of the entry at `path`, or the minimum timestamp.
    pub fn get_last_write_time_utc_for_path<P: AsRef<Path>>(&self, path: P) -> DateTime<Utc> {
        timestamp_utc(path.as_ref(), TimestampKind::LastWrite)
    }

    /// Name of `entry` without extension; directories keep their full name.
    pub fn get_file_name_without_extension(&self, entry: &FileSystemEntry) -> String {
        entry.name_without_extension()
    }

    /// Whether `filename` has the shortcut extension.
    pub fn is_shortcut(&self, filename: &str) -> FsResult<bool> {
        shortcut::is_shortcut(filename)
    }

    /// Normalized target of a shortcut, or `None` for non-shortcuts.
    pub fn resolve_shortcut<P: AsRef<Path>>(&self, filename: P) -> FsResult<Option<String>> {
        shortcut::resolve_shortcut(filename.as_ref())
    }

    /// Write a shortcut pointing at `target`, replacing any existing file.
    pub fn create_shortcut<P: AsRef<Path>>(&self, shortcut_path: P, target: &str) -> FsResult<()> {
        shortcut::create_shortcut(shortcut_path.as_ref(), target)
    }

    /// Exchange the contents of two files. Not atomic; see [`crate::swap`].
    pub fn swap_files<P: AsRef<Path>, Q: AsRef<Path>>(&self, file1: P, file2: Q) -> FsResult<()> {
        swap::swap_files(&self.temp_dir, file1.as_ref(), file2.as_ref())
    }

    fn entries(&self, path: &Path, recursive: bool, filter: EntryFilter) -> FsResult<Entries> {
        require_path("path", path)?;
        Ok(Entries::new(path, recursive, filter))
    }

    /// Directories below `path`; the whole subtree when `recursive`.
    pub fn get_directories<P: AsRef<Path>>(&self, path: P, recursive: bool) -> FsResult<Entries> {
        self.entries(path.as_ref(), recursive, EntryFilter::Directories)
    }

    /// Files below `path`; the whole subtree when `recursive`.
    pub fn get_files<P: AsRef<Path>>(&self, path: P, recursive: bool) -> FsResult<Entries> {
        self.entries(path.as_ref(), recursive, EntryFilter::Files)
    }

    /// Files below `path` whose extension is one of `extensions`.
    pub fn get_files_with_extensions<P, I, S>(
        &self,
        path: P,
        extensions: I,
        recursive: bool,
    ) -> FsResult<Entries>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self
            .entries(path.as_ref(), recursive, EntryFilter::Files)?
            .with_extensions(extensions))
    }

    /// Files and directories below `path`.
    pub fn get_file_system_entries<P: AsRef<Path>>(
        &self,
        path: P,
        recursive: bool,
    ) -> FsResult<Entries> {
        self.entries(path.as_ref(), recursive, EntryFilter::All)
    }

    /// Paths of the directories below `path`.
    pub fn get_directory_paths<P: AsRef<Path>>(
        &self,
        path: P,
        recursive: bool,
    ) -> FsResult<EntryPaths> {
        Ok(self.get_directories(path, recursive)?.paths())
    }

    /// Paths of the files below `path`.
    pub fn get_file_paths<P: AsRef<Path>>(&self, path: P, recursive: bool) -> FsResult<EntryPaths> {
        Ok(self.get_files(path, recursive)?.paths())
    }

    /// Paths of the files and directories below `path`.
    pub fn get_file_system_entry_paths<P: AsRef<Path>>(
        &self,
        path: P,
        recursive: bool,
    ) -> FsResult<EntryPaths> {
        Ok(self.get_file_system_entries(path, recursive)?.paths())
    }

    /// Whether `path` names an existing file. Empty paths are never files.
    pub fn file_exists<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        !path.as_os_str().is_empty() && path.is_file()
    }

    /// Whether `path` names an existing directory.
    pub fn directory_exists<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        !path.as_os_str().is_empty() && path.is_dir()
    }

    /// Delete the file at `path`.
    pub fn delete_file<P: AsRef<Path>>(&self, path: P) -> FsResult<()> {
        let path = path.as_ref();
        require_path("path", path)?;
        fs::remove_file(path)?;
        Ok(())
    }

    /// Delete a directory; with `recursive`, everything in it as well.
    pub fn delete_directory<P: AsRef<Path>>(&self, path: P, recursive: bool) -> FsResult<()> {
        let path = path.as_ref();
        require_path("path", path)?;
        if recursive {
            fs::remove_dir_all(path)?;
        } else {
            fs::remove_dir(path)?;
        }
        Ok(())
    }

    /// Create a directory and any missing parents.
    pub fn create_directory<P: AsRef<Path>>(&self, path: P) -> FsResult<()> {
        let path = path.as_ref();
        require_path("path", path)?;
        fs::create_dir_all(path)?;
        Ok(())
    }

    /// Copy `source` to `target`. Without `overwrite`, an existing target is
    /// an `AlreadyExists` error.
    pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        source: P,
        target: Q,
        overwrite: bool,
    ) -> FsResult<()> {
        let (source, target) = (source.as_ref(), target.as_ref());
        require_path("source", source)?;
        require_path("target", target)?;

        if overwrite {
            fs::copy(source, target)?;
            return Ok(());
        }

        // The host rejects an existing target when the file is opened.
        let mut reader = File::open(source)?;
        let permissions = reader.metadata()?.permissions();
        let mut writer = OpenOptions::new().write(true).create_new(true).open(target)?;
        io::copy(&mut reader, &mut writer)?;
        fs::set_permissions(target, permissions)?;
        Ok(())
    }

    /// Move a file, replacing an existing target file.
    ///
    /// Moves across volumes fall back to copy-then-delete.
    pub fn move_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, source: P, target: Q) -> FsResult<()> {
        let (source, target) = (source.as_ref(), target.as_ref());
        require_path("source", source)?;
        require_path("target", target)?;

        match fs::rename(source, target) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                debug!(
                    source = %source.display(),
                    target = %target.display(),
                    "Rename crosses devices, copying instead"
                );
                fs::copy(source, target)?;
                fs::remove_file(source)?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Move a directory. Both paths must be on the same volume.
    pub fn move_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        source: P,
        target: Q,
    ) -> FsResult<()> {
        let (source, target) = (source.as_ref(), target.as_ref());
        require_path("source", source)?;
        require_path("target", target)?;
        fs::rename(source, target)?;
        Ok(())
    }

    /// Open a file for blocking reads.
    pub fn open_read<P: AsRef<Path>>(&self, path: P) -> FsResult<File> {
        let path = path.as_ref();
        require_path("path", path)?;
        Ok(File::open(path)?)
    }

    /// Open a file stream.
    ///
    /// `is_async` is only honoured when the host supports async file
    /// handles; otherwise a blocking stream is returned.
    pub fn get_file_stream<P: AsRef<Path>>(
        &self,
        path: P,
        mode: FileMode,
        access: FileAccess,
        share: FileShare,
        is_async: bool,
    ) -> FsResult<FileStream> {
        let path = path.as_ref();
        require_path("path", path)?;

        let file = open_options(mode, access, share)?.open(path)?;

        if is_async && self.capabilities.supports_async_io {
            return Ok(FileStream::Async(tokio::fs::File::from_std(file)));
        }
        if is_async {
            debug!(path = %path.display(), "Async file handles unsupported, using sync stream");
        }
        Ok(FileStream::Sync(file))
    }

    /// Read a whole file into memory.
    pub fn read_all_bytes<P: AsRef<Path>>(&self, path: P) -> FsResult<Vec<u8>> {
        let path = path.as_ref();
        require_path("path", path)?;
        Ok(fs::read(path)?)
    }

    /// Write `bytes` to `path`, creating or truncating it.
    pub fn write_all_bytes<P: AsRef<Path>>(&self, path: P, bytes: &[u8]) -> FsResult<()> {
        let path = path.as_ref();
        require_path("path", path)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Read a whole file as text.
    ///
    /// Without an explicit encoding the byte order mark decides, defaulting
    /// to UTF-8.
    pub fn read_all_text<P: AsRef<Path>>(
        &self,
        path: P,
        encoding: Option<TextEncoding>,
    ) -> FsResult<String> {
        let bytes = self.read_all_bytes(path)?;
        let text = match encoding {
            Some(encoding) => encoding.decode(&bytes)?,
            None => decode_detected(&bytes)?,
        };
        Ok(text)
    }

    /// Write `text` to `path`, UTF-8 without BOM unless an encoding is given.
    pub fn write_all_text<P: AsRef<Path>>(
        &self,
        path: P,
        text: &str,
        encoding: Option<TextEncoding>,
    ) -> FsResult<()> {
        let bytes = encoding.unwrap_or_default().encode(text);
        self.write_all_bytes(path, &bytes)
    }

    /// Read a whole file as lines, without line terminators.
    pub fn read_all_lines<P: AsRef<Path>>(
        &self,
        path: P,
        encoding: Option<TextEncoding>,
    ) -> FsResult<Vec<String>> {
        let text = self.read_all_text(path, encoding)?;
        Ok(text.lines().map(str::to_string).collect())
    }

    /// Write each line followed by the host line terminator.
    pub fn write_all_lines<P, I, S>(
        &self,
        path: P,
        lines: I,
        encoding: Option<TextEncoding>,
    ) -> FsResult<()>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let newline = if cfg!(windows) { "\r\n" } else { "\n" };
        let mut text = String::new();
        for line in lines {
            text.push_str(line.as_ref());
            text.push_str(newline);
        }
        self.write_all_text(path, &text, encoding)
    }

    /// Whether the entry at `path` is hidden.
    pub fn is_hidden<P: AsRef<Path>>(&self, path: P) -> FsResult<bool> {
        let path = path.as_ref();
        require_path("path", path)?;
        Ok(attributes::is_hidden(path)?)
    }

    /// Set or clear the hidden attribute.
    pub fn set_hidden<P: AsRef<Path>>(&self, path: P, hidden: bool) -> FsResult<()> {
        let path = path.as_ref();
        require_path("path", path)?;
        Ok(attributes::set_hidden(path, hidden)?)
    }

    /// Set or clear the read-only attribute.
    pub fn set_read_only<P: AsRef<Path>>(&self, path: P, read_only: bool) -> FsResult<()> {
        let path = path.as_ref();
        require_path("path", path)?;
        Ok(attributes::set_read_only(path, read_only)?)
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new(Capabilities::default())
    }
}

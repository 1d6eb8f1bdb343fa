//! File stream modes and handles.
//!
//! [`FileMode`], [`FileAccess`] and [`FileShare`] describe how a stream is
//! opened; [`open_options`] turns them into `std::fs::OpenOptions`. The
//! resulting handle is either a blocking `std::fs::File` or, when async I/O
//! was requested and the host supports it, a `tokio::fs::File`.

use std::fs::{File, OpenOptions};

use crate::error::{FsError, FsResult};

/// How the operating system should open a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// Create a new file; fail if it already exists.
    CreateNew,
    /// Create a new file or truncate an existing one.
    Create,
    /// Open an existing file; fail if it is missing.
    Open,
    /// Open the file if it exists, otherwise create it.
    OpenOrCreate,
    /// Open an existing file and truncate it to zero bytes.
    Truncate,
    /// Open or create the file and position writes at its end.
    Append,
}

/// Read/write access requested on a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAccess {
    Read,
    Write,
    ReadWrite,
}

impl FileAccess {
    /// Whether reads are allowed.
    pub fn can_read(&self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }

    /// Whether writes are allowed.
    pub fn can_write(&self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite)
    }
}

/// Access other handles may have to the same file while the stream is open.
///
/// Enforced as a share mode on Windows; advisory on other hosts, which have
/// no mandatory sharing control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileShare {
    None,
    #[default]
    Read,
    Write,
    ReadWrite,
    Delete,
}

impl FileShare {
    /// Windows `FILE_SHARE_*` bits for this share mode.
    pub fn share_mode_bits(&self) -> u32 {
        const FILE_SHARE_READ: u32 = 0x1;
        const FILE_SHARE_WRITE: u32 = 0x2;
        const FILE_SHARE_DELETE: u32 = 0x4;

        match self {
            Self::None => 0,
            Self::Read => FILE_SHARE_READ,
            Self::Write => FILE_SHARE_WRITE,
            Self::ReadWrite => FILE_SHARE_READ | FILE_SHARE_WRITE,
            Self::Delete => FILE_SHARE_DELETE,
        }
    }
}

/// An open file stream.
#[derive(Debug)]
pub enum FileStream {
    /// Blocking handle.
    Sync(File),
    /// Handle whose reads and writes run on the tokio blocking pool.
    Async(tokio::fs::File),
}

impl FileStream {
    /// Whether this stream is backed by a tokio handle.
    pub fn is_async(&self) -> bool {
        matches!(self, Self::Async(_))
    }

    /// The blocking handle, if this is a synchronous stream.
    pub fn into_sync(self) -> Option<File> {
        match self {
            Self::Sync(file) => Some(file),
            Self::Async(_) => None,
        }
    }

    /// The tokio handle, if this is an asynchronous stream.
    pub fn into_async(self) -> Option<tokio::fs::File> {
        match self {
            Self::Async(file) => Some(file),
            Self::Sync(_) => None,
        }
    }
}

fn invalid_combination(reason: &'static str) -> FsError {
    FsError::InvalidArgument {
        name: "mode",
        reason,
    }
}

/// Build `OpenOptions` for a mode/access/share combination.
///
/// Combinations the host cannot honour are rejected up front: every mode that
/// may create or truncate needs write access, and `Append` must be
/// write-only.
pub fn open_options(mode: FileMode, access: FileAccess, share: FileShare) -> FsResult<OpenOptions> {
    let mut options = OpenOptions::new();
    options.read(access.can_read()).write(access.can_write());

    match mode {
        FileMode::Open => {}
        FileMode::CreateNew => {
            if !access.can_write() {
                return Err(invalid_combination("CreateNew requires write access"));
            }
            options.create_new(true);
        }
        FileMode::Create => {
            if !access.can_write() {
                return Err(invalid_combination("Create requires write access"));
            }
            options.create(true).truncate(true);
        }
        FileMode::OpenOrCreate => {
            if !access.can_write() {
                return Err(invalid_combination("OpenOrCreate requires write access"));
            }
            options.create(true);
        }
        FileMode::Truncate => {
            if !access.can_write() {
                return Err(invalid_combination("Truncate requires write access"));
            }
            options.truncate(true);
        }
        FileMode::Append => {
            if access != FileAccess::Write {
                return Err(invalid_combination("Append requires write-only access"));
            }
            options.write(false).append(true).create(true);
        }
    }

    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        options.share_mode(share.share_mode_bits());
    }
    #[cfg(not(windows))]
    let _ = share;

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Read, Write};
    use tempfile::TempDir;

    #[test]
    fn test_access_flags() {
        assert!(FileAccess::Read.can_read());
        assert!(!FileAccess::Read.can_write());
        assert!(FileAccess::ReadWrite.can_read() && FileAccess::ReadWrite.can_write());
    }

    #[test]
    fn test_share_bits() {
        assert_eq!(FileShare::None.share_mode_bits(), 0);
        assert_eq!(FileShare::ReadWrite.share_mode_bits(), 0x3);
        assert_eq!(FileShare::Delete.share_mode_bits(), 0x4);
    }

    #[test]
    fn test_create_new_fails_on_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.bin");

        let options =
            open_options(FileMode::CreateNew, FileAccess::Write, FileShare::None).unwrap();
        options.open(&path).unwrap();
        let err = options.open(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_create_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.txt");
        fs::write(&path, "long old content").unwrap();

        let mut file = open_options(FileMode::Create, FileAccess::Write, FileShare::Read)
            .unwrap()
            .open(&path)
            .unwrap();
        file.write_all(b"new").unwrap();
        drop(file);

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_append() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("log.txt");
        fs::write(&path, "one").unwrap();

        let mut file = open_options(FileMode::Append, FileAccess::Write, FileShare::Read)
            .unwrap()
            .open(&path)
            .unwrap();
        file.write_all(b"two").unwrap();
        drop(file);

        assert_eq!(fs::read_to_string(&path).unwrap(), "onetwo");
    }

    #[test]
    fn test_open_missing_fails() {
        let temp_dir = TempDir::new().unwrap();
        let options = open_options(FileMode::Open, FileAccess::Read, FileShare::Read).unwrap();
        let err = options.open(temp_dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_open_or_create_read_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rw.txt");

        let mut file = open_options(FileMode::OpenOrCreate, FileAccess::ReadWrite, FileShare::None)
            .unwrap()
            .open(&path)
            .unwrap();
        file.write_all(b"x").unwrap();
        drop(file);

        let mut file = open_options(FileMode::Open, FileAccess::Read, FileShare::Read)
            .unwrap()
            .open(&path)
            .unwrap();
        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "x");
    }

    #[test]
    fn test_invalid_combinations() {
        for (mode, access) in [
            (FileMode::CreateNew, FileAccess::Read),
            (FileMode::Create, FileAccess::Read),
            (FileMode::OpenOrCreate, FileAccess::Read),
            (FileMode::Truncate, FileAccess::Read),
            (FileMode::Append, FileAccess::ReadWrite),
            (FileMode::Append, FileAccess::Read),
        ] {
            let err = open_options(mode, access, FileShare::Read).unwrap_err();
            assert!(err.is_invalid_argument(), "{mode:?}/{access:?} should be rejected");
        }
    }
}

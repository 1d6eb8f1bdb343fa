//! Hidden and read-only attributes.
//!
//! Windows stores "hidden" as an attribute bit. Unix-like hosts have no such
//! bit: a leading dot in the name is the hidden convention, and it cannot be
//! changed without renaming, so [`set_hidden`] only verifies the entry exists
//! there.

use std::fs;
use std::io;
use std::path::Path;

#[cfg(windows)]
mod imp {
    use std::fs;
    use std::io;
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;
    use std::os::windows::fs::MetadataExt;
    use std::path::Path;

    use windows_sys::Win32::Storage::FileSystem::{SetFileAttributesW, FILE_ATTRIBUTE_HIDDEN};

    pub fn is_hidden(path: &Path) -> io::Result<bool> {
        let attributes = fs::metadata(path)?.file_attributes();
        Ok(attributes & FILE_ATTRIBUTE_HIDDEN != 0)
    }

    pub fn set_hidden(path: &Path, hidden: bool) -> io::Result<()> {
        let attributes = fs::metadata(path)?.file_attributes();
        let updated = if hidden {
            attributes | FILE_ATTRIBUTE_HIDDEN
        } else {
            attributes & !FILE_ATTRIBUTE_HIDDEN
        };
        if updated == attributes {
            return Ok(());
        }

        let wide: Vec<u16> = path.as_os_str().encode_wide().chain(once(0)).collect();
        // SAFETY: `wide` is a NUL-terminated UTF-16 string that outlives the call.
        let ok = unsafe { SetFileAttributesW(wide.as_ptr(), updated) };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

#[cfg(not(windows))]
mod imp {
    use std::fs;
    use std::io;
    use std::path::Path;

    pub fn is_hidden(path: &Path) -> io::Result<bool> {
        fs::symlink_metadata(path)?;
        Ok(path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.')))
    }

    pub fn set_hidden(path: &Path, hidden: bool) -> io::Result<()> {
        fs::symlink_metadata(path)?;
        tracing::trace!(
            path = %path.display(),
            hidden,
            "Hidden attribute is name-based on this host"
        );
        Ok(())
    }
}

/// Whether the entry at `path` is hidden.
pub fn is_hidden(path: &Path) -> io::Result<bool> {
    imp::is_hidden(path)
}

/// Set or clear the hidden attribute of the entry at `path`.
pub fn set_hidden(path: &Path, hidden: bool) -> io::Result<()> {
    imp::set_hidden(path, hidden)
}

/// Set or clear the read-only attribute of the entry at `path`.
pub fn set_read_only(path: &Path, read_only: bool) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    if permissions.readonly() == read_only {
        return Ok(());
    }
    permissions.set_readonly(read_only);
    fs::set_permissions(path, permissions)
}

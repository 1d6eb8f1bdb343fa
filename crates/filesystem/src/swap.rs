//! Content swap between two files via temporary copies.
//!
//! # Limitations
//!
//! The swap is **not atomic**. It runs four blocking copies in sequence and
//! never rolls back:
//!
//! 1. `file1` → `temp1`
//! 2. `file2` → `temp2`
//! 3. `temp1` → `file2`
//! 4. `temp2` → `file1`
//!
//! A failure after step 3 leaves `file2` already replaced while `file1` still
//! holds its original bytes, with one or both temporaries on disk. The
//! temporaries always hold the complete original contents, so a caller can
//! recover manually; their paths are logged at debug level before any target
//! is touched.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::attributes::set_hidden;
use crate::error::{require_path, FsResult};

/// Build a unique temporary file path in `temp_dir`.
fn temp_path(temp_dir: &Path) -> PathBuf {
    temp_dir.join(format!("swap_{}.tmp", Uuid::new_v4().simple()))
}

/// Exchange the contents of `file1` and `file2`.
///
/// Both files must exist. The hidden attribute is cleared on both first since
/// copying onto a hidden file fails on some hosts.
pub fn swap_files(temp_dir: &Path, file1: &Path, file2: &Path) -> FsResult<()> {
    require_path("file1", file1)?;
    require_path("file2", file2)?;

    set_hidden(file1, false)?;
    set_hidden(file2, false)?;

    fs::create_dir_all(temp_dir)?;
    let temp1 = temp_path(temp_dir);
    let temp2 = temp_path(temp_dir);
    debug!(
        file1 = %file1.display(),
        file2 = %file2.display(),
        temp1 = %temp1.display(),
        temp2 = %temp2.display(),
        "Swapping files"
    );

    fs::copy(file1, &temp1)?;
    fs::copy(file2, &temp2)?;

    fs::copy(&temp1, file2)?;
    fs::copy(&temp2, file1)?;

    fs::remove_file(&temp1)?;
    fs::remove_file(&temp2)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_swap_exchanges_contents() {
        let work = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let a = work.path().join("a.nfo");
        let b = work.path().join("b.nfo");
        fs::write(&a, "first file, longer content").unwrap();
        fs::write(&b, [0u8, 159, 146, 150]).unwrap();

        swap_files(scratch.path(), &a, &b).unwrap();

        assert_eq!(fs::read(&a).unwrap(), vec![0u8, 159, 146, 150]);
        assert_eq!(fs::read_to_string(&b).unwrap(), "first file, longer content");
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_swap_twice_restores() {
        let work = TempDir::new().unwrap();
        let a = work.path().join("a");
        let b = work.path().join("b");
        fs::write(&a, "A").unwrap();
        fs::write(&b, "B").unwrap();

        let scratch = work.path().join("tmp");
        swap_files(&scratch, &a, &b).unwrap();
        swap_files(&scratch, &a, &b).unwrap();

        assert_eq!(fs::read_to_string(&a).unwrap(), "A");
        assert_eq!(fs::read_to_string(&b).unwrap(), "B");
    }

    #[test]
    fn test_swap_missing_file_fails_before_copying() {
        let work = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let a = work.path().join("a");
        fs::write(&a, "A").unwrap();

        let err = swap_files(scratch.path(), &a, &work.path().join("missing")).unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
        assert_eq!(fs::read_to_string(&a).unwrap(), "A");
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_swap_rejects_empty_paths() {
        let scratch = TempDir::new().unwrap();
        let err = swap_files(scratch.path(), Path::new(""), Path::new("b")).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_temp_paths_are_unique() {
        let dir = Path::new("/tmp");
        assert_ne!(temp_path(dir), temp_path(dir));
    }
}

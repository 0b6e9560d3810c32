//! Temporary plaintext files.
//!
//! The file is created exclusively (`create_new`) with owner-only
//! permissions on Unix, so there is no window in which another user can
//! open it.  Nothing removes it automatically: whoever maps a file is
//! responsible for erasing it.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::errors::{CofferError, Result};

/// Prefix for every temporary file we create.
const FILE_PREFIX: &str = "coffer-";

/// Write `contents` to a fresh, uniquely named file inside `dir`.
///
/// Returns the path of the new file.
pub fn write_private_file(dir: &Path, contents: &[u8]) -> Result<PathBuf> {
    let path = dir.join(format!("{FILE_PREFIX}{}", Uuid::new_v4().simple()));

    let mut file = create_private(&path).map_err(|e| CofferError::file_access(&path, e))?;
    let written = file
        .write_all(contents)
        .and_then(|()| file.sync_all());

    if let Err(e) = written {
        drop(file);
        let _ = fs::remove_file(&path);
        return Err(CofferError::file_access(&path, e));
    }

    debug!(path = %path.display(), bytes = contents.len(), "wrote temporary plaintext file");
    Ok(path)
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<File> {
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_contents_to_new_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_private_file(tmp.path(), b"\x00\x01binary\xff").unwrap();

        assert!(path.starts_with(tmp.path()));
        assert_eq!(fs::read(&path).unwrap(), b"\x00\x01binary\xff");
    }

    #[test]
    fn each_call_gets_a_new_path() {
        let tmp = TempDir::new().unwrap();
        let a = write_private_file(tmp.path(), b"a").unwrap();
        let b = write_private_file(tmp.path(), b"a").unwrap();
        assert_ne!(a, b);
    }

    #[cfg(unix)]
    #[test]
    fn file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = write_private_file(tmp.path(), b"x").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn missing_directory_is_file_access_error() {
        let tmp = TempDir::new().unwrap();
        let err = write_private_file(&tmp.path().join("missing"), b"x").unwrap_err();
        assert!(matches!(err, CofferError::FileAccess { .. }));
    }
}

//! File helpers for plaintext that leaves the vault.
//!
//! - Secure overwrite-and-delete (`erase`)
//! - Owner-only temporary files for mapped attachments (`temp`)

pub mod erase;
pub mod temp;

pub use erase::{secure_erase, secure_erase_with, Eraser, SecureEraser, DEFAULT_ITERATIONS};
pub use temp::write_private_file;

use std::path::Path;

use crate::errors::{CofferError, Result};

/// Read a whole file, reporting failures as `FileAccess` on that path.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| CofferError::file_access(path, e))
}

/// Write a whole file, reporting failures as `FileAccess` on that path.
pub fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| CofferError::file_access(path, e))
}

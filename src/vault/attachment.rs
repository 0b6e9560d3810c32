//! Moving attachment bytes between the vault and the filesystem.
//!
//! An attachment is either *unmapped* or *mapped* to a temporary
//! plaintext file:
//!
//! ```text
//! Unmapped --map()--> Mapped(path) --unmap()--> Unmapped
//! ```
//!
//! `map` on a mapped attachment returns the existing path; `unmap` on an
//! unmapped one does nothing.  Mapped files are plaintext on disk until
//! unmapped, so callers should unmap as soon as they are done.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::record::Attachment;
use crate::errors::Result;
use crate::fs::{self, Eraser};

impl Attachment {
    /// Replace `content` with the bytes of the file at `path`.
    ///
    /// If `eraser` is given, the source file is securely erased once its
    /// bytes are stored.
    pub fn upload(&mut self, path: &Path, eraser: Option<&mut dyn Eraser>) -> Result<()> {
        self.content = fs::read_file(path)?;
        debug!(path = %path.display(), bytes = self.content.len(), "uploaded attachment");

        if let Some(eraser) = eraser {
            eraser.erase(path)?;
        }
        Ok(())
    }

    /// Map the content to a plaintext file in the system temp directory.
    ///
    /// Depending on the system, that directory may live on disk or in RAM.
    pub fn map(&mut self) -> Result<PathBuf> {
        self.map_in(&std::env::temp_dir())
    }

    /// Map the content to a plaintext file inside `dir`.
    ///
    /// Idempotent: while mapped, returns the current path without
    /// touching the filesystem.
    pub fn map_in(&mut self, dir: &Path) -> Result<PathBuf> {
        if let Some(path) = &self.mapped_path {
            return Ok(path.clone());
        }

        let path = fs::write_private_file(dir, &self.content)?;
        self.mapped_path = Some(path.clone());
        Ok(path)
    }

    /// Erase the mapped file and forget its path.  No-op when unmapped.
    ///
    /// If erasing fails the attachment stays mapped, so the call can be
    /// retried.
    pub fn unmap(&mut self, eraser: &mut dyn Eraser) -> Result<()> {
        if let Some(path) = self.mapped_path.take() {
            if let Err(e) = eraser.erase(&path) {
                self.mapped_path = Some(path);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Write the plaintext bytes to a path of the caller's choosing.
    ///
    /// Unlike `map`, the resulting file is not tracked.
    pub fn export_to(&self, path: &Path) -> Result<()> {
        fs::write_file(path, &self.content)
    }

    pub fn is_mapped(&self) -> bool {
        self.mapped_path.is_some()
    }

    /// Path of the plaintext file while mapped.
    pub fn mapped_path(&self) -> Option<&Path> {
        self.mapped_path.as_deref()
    }
}

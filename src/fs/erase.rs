//! Secure deletion of plaintext files.
//!
//! A file is overwritten in place with fresh random bytes for a number of
//! passes, each pass starting again at offset zero, and then removed.
//! On SSDs and copy-on-write filesystems the overwrite may not reach the
//! original sectors; one pass is as good as ten there.

use std::fs::{self, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use rand::rngs::ThreadRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};

use crate::errors::{CofferError, Result};

/// Number of overwrite passes used when nothing else is configured.
pub const DEFAULT_ITERATIONS: u32 = 10;

/// Random data is produced and written in chunks of this size.
const CHUNK_LEN: usize = 64 * 1024;

/// Something that can make a file on disk go away for good.
pub trait Eraser {
    fn erase(&mut self, path: &Path) -> Result<()>;
}

/// Overwrite-then-delete eraser backed by a CSPRNG.
#[derive(Debug)]
pub struct SecureEraser<R = ThreadRng> {
    rng: R,
    iterations: u32,
}

impl SecureEraser<ThreadRng> {
    /// Eraser using the thread-local CSPRNG.
    pub fn new(iterations: u32) -> Self {
        Self::with_rng(rand::rng(), iterations)
    }
}

impl Default for SecureEraser<ThreadRng> {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl<R: RngCore + CryptoRng> SecureEraser<R> {
    /// Eraser drawing its overwrite data from `rng`.
    pub fn with_rng(rng: R, iterations: u32) -> Self {
        Self { rng, iterations }
    }

    /// Number of overwrite passes per file.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl<R: RngCore + CryptoRng> Eraser for SecureEraser<R> {
    fn erase(&mut self, path: &Path) -> Result<()> {
        secure_erase_with(&mut self.rng, path, self.iterations)
    }
}

/// Overwrite `path` `iterations` times with random data, then delete it.
pub fn secure_erase(path: &Path, iterations: u32) -> Result<()> {
    secure_erase_with(&mut rand::rng(), path, iterations)
}

/// Like [`secure_erase`], drawing random bytes from `rng`.
///
/// Either the file is fully overwritten and removed, or an error is
/// returned; there is no partial-progress report.
pub fn secure_erase_with<R>(rng: &mut R, path: &Path, iterations: u32) -> Result<()>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let access = |source: std::io::Error| CofferError::file_access(path, source);

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(access)?;
    let len = file.metadata().map_err(access)?.len();

    let buf_len = usize::try_from(len).map_or(CHUNK_LEN, |l| l.min(CHUNK_LEN));
    let mut buf = vec![0u8; buf_len];

    for pass in 0..iterations {
        file.seek(SeekFrom::Start(0)).map_err(access)?;

        let mut remaining = len;
        while remaining > 0 {
            let n = usize::try_from(remaining).map_or(buf_len, |r| r.min(buf_len));
            rng.fill_bytes(&mut buf[..n]);
            file.write_all(&buf[..n]).map_err(access)?;
            remaining -= n as u64;
        }

        file.sync_data().map_err(access)?;
        trace!(pass, "overwrite pass complete");
    }

    drop(file);
    fs::remove_file(path).map_err(access)?;

    debug!(path = %path.display(), iterations, bytes = len, "securely erased file");
    Ok(())
}

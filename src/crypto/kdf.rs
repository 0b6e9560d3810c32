//! Password-to-key derivation.
//!
//! The vault key is the password's UTF-8 bytes, zero-padded on the right
//! to 32 bytes or truncated to 32 bytes.  There is no salt and no
//! stretching: the same password always yields the same key, and existing
//! vault files depend on exactly this mapping.
//!
//! A salted, memory-hard KDF would need a place to store the salt, which
//! the current file format does not have.

use zeroize::Zeroize;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte vault key that zeroes its memory when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to key the block cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VaultKey(..)")
    }
}

/// Derive the vault key from a master password.
pub fn derive_key(password: &str) -> VaultKey {
    let bytes = password.as_bytes();
    let take = bytes.len().min(KEY_LEN);

    let mut key = [0u8; KEY_LEN];
    key[..take].copy_from_slice(&bytes[..take]);

    let vault_key = VaultKey::new(key);
    key.zeroize();
    vault_key
}

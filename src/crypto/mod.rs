//! Cryptographic primitives for Coffer.
//!
//! This module provides:
//! - AES-256-CBC with ciphertext stealing (`encryption`)
//! - Password-to-key derivation (`kdf`)
//! - Random password generation (`password`)

pub mod encryption;
pub mod kdf;
pub mod password;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt, AesCbcCts, VaultCipher};
pub use kdf::{derive_key, VaultKey};
pub use password::{generate_password, DEFAULT_SPECIAL_CHARACTERS};

//! AES-256 in CBC mode with ciphertext stealing.
//!
//! The output is always exactly as long as the input, so no padding is
//! ever stored.  The IV is sixteen zero bytes on every call.
//!
//! Length handling:
//!   - 0 bytes: empty output.
//!   - 1..15 bytes: XOR with `AES(key, IV)` (the IV is "stolen").
//!   - 16 bytes: a single CBC block.
//!   - more: CBC-CS3, i.e. the final full ciphertext block is truncated
//!     to the length of the last partial block and swapped behind the
//!     block that encrypts the zero-extended tail.
//!
//! There is no authentication tag.  Decrypting with the wrong key
//! succeeds and returns garbage; the caller notices only when the
//! plaintext fails to parse.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes256, Block};

use super::kdf::VaultKey;
use crate::errors::Result;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// The fixed, all-zero initialization vector.
const IV: [u8; BLOCK_LEN] = [0u8; BLOCK_LEN];

/// A symmetric byte transform the container encrypts its document with.
///
/// `AesCbcCts` is the only production implementation; the trait exists so
/// tests can swap in a transparent or failing codec.
pub trait VaultCipher {
    fn encrypt(&self, key: &VaultKey, plaintext: &[u8]) -> Result<Vec<u8>>;
    fn decrypt(&self, key: &VaultKey, ciphertext: &[u8]) -> Result<Vec<u8>>;
}

/// AES-256-CBC with ciphertext stealing and a zero IV.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesCbcCts;

impl VaultCipher for AesCbcCts {
    fn encrypt(&self, key: &VaultKey, plaintext: &[u8]) -> Result<Vec<u8>> {
        Ok(encrypt(key, plaintext))
    }

    fn decrypt(&self, key: &VaultKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
        Ok(decrypt(key, ciphertext))
    }
}

/// Encrypt `plaintext` under `key`.  The output has the same length.
pub fn encrypt(key: &VaultKey, plaintext: &[u8]) -> Vec<u8> {
    let cipher = Aes256::new(GenericArray::from_slice(key.as_bytes()));
    let len = plaintext.len();

    if len < BLOCK_LEN {
        return xor_with_stolen_iv(&cipher, plaintext);
    }

    let mut output = Vec::with_capacity(len);
    let mut chain = Block::clone_from_slice(&IV);

    if len == BLOCK_LEN {
        output.extend_from_slice(&cbc_encrypt_block(&cipher, &mut chain, plaintext));
        return output;
    }

    let (head, last_full, tail) = split_for_stealing(plaintext);

    for chunk in head.chunks_exact(BLOCK_LEN) {
        output.extend_from_slice(&cbc_encrypt_block(&cipher, &mut chain, chunk));
    }

    // C[n-1] is computed normally but only its first `tail.len()` bytes
    // make it into the output.
    let penultimate = cbc_encrypt_block(&cipher, &mut chain, last_full);

    let mut padded = [0u8; BLOCK_LEN];
    padded[..tail.len()].copy_from_slice(tail);
    let last = cbc_encrypt_block(&cipher, &mut chain, &padded);

    output.extend_from_slice(&last);
    output.extend_from_slice(&penultimate[..tail.len()]);
    output
}

/// Decrypt data produced by [`encrypt`] with the same key.
///
/// Never fails: any byte string decrypts to *something*.
pub fn decrypt(key: &VaultKey, ciphertext: &[u8]) -> Vec<u8> {
    let cipher = Aes256::new(GenericArray::from_slice(key.as_bytes()));
    let len = ciphertext.len();

    if len < BLOCK_LEN {
        return xor_with_stolen_iv(&cipher, ciphertext);
    }

    let mut output = Vec::with_capacity(len);
    let mut chain = Block::clone_from_slice(&IV);

    if len == BLOCK_LEN {
        output.extend_from_slice(&cbc_decrypt_block(&cipher, &mut chain, ciphertext));
        return output;
    }

    let (head, swapped, tail) = split_for_stealing(ciphertext);

    for chunk in head.chunks_exact(BLOCK_LEN) {
        output.extend_from_slice(&cbc_decrypt_block(&cipher, &mut chain, chunk));
    }

    // D(C[n]) = C[n-1] ^ (P[n] || 0): its first bytes recover P[n], its
    // remaining bytes restore the part of C[n-1] that was stolen.
    let mut decrypted = Block::clone_from_slice(swapped);
    cipher.decrypt_block(&mut decrypted);

    let mut last_plain = decrypted[..tail.len()].to_vec();
    xor_in_place(&mut last_plain, tail);

    let mut penultimate = [0u8; BLOCK_LEN];
    penultimate[..tail.len()].copy_from_slice(tail);
    penultimate[tail.len()..].copy_from_slice(&decrypted[tail.len()..]);

    output.extend_from_slice(&cbc_decrypt_block(&cipher, &mut chain, &penultimate));
    output.extend_from_slice(&last_plain);
    output
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Split an input longer than one block into
/// `(whole blocks, last whole block, trailing 1..=16 bytes)`.
fn split_for_stealing(data: &[u8]) -> (&[u8], &[u8], &[u8]) {
    let tail_len = match data.len() % BLOCK_LEN {
        0 => BLOCK_LEN,
        rem => rem,
    };
    let head_len = data.len() - tail_len - BLOCK_LEN;

    let (head, rest) = data.split_at(head_len);
    let (last_full, tail) = rest.split_at(BLOCK_LEN);
    (head, last_full, tail)
}

fn cbc_encrypt_block(cipher: &Aes256, chain: &mut Block, plain: &[u8]) -> Block {
    let mut block = Block::clone_from_slice(plain);
    xor_in_place(&mut block, chain);
    cipher.encrypt_block(&mut block);
    *chain = block;
    block
}

fn cbc_decrypt_block(cipher: &Aes256, chain: &mut Block, encrypted: &[u8]) -> Block {
    let mut block = Block::clone_from_slice(encrypted);
    cipher.decrypt_block(&mut block);
    xor_in_place(&mut block, chain);
    chain.copy_from_slice(encrypted);
    block
}

/// Sub-block inputs: XOR with the encrypted IV.  Symmetric, so it serves
/// both directions.
fn xor_with_stolen_iv(cipher: &Aes256, data: &[u8]) -> Vec<u8> {
    let mut keystream = Block::clone_from_slice(&IV);
    cipher.encrypt_block(&mut keystream);

    let mut output = data.to_vec();
    xor_in_place(&mut output, &keystream[..data.len()]);
    output
}

fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

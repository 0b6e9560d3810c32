//! Integration tests for the Coffer crypto module.

use coffer::crypto::{
    decrypt, derive_key, encrypt, generate_password, AesCbcCts, VaultCipher, VaultKey,
    DEFAULT_SPECIAL_CHARACTERS,
};

fn key(byte: u8) -> VaultKey {
    VaultKey::new([byte; 32])
}

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn roundtrip_every_length_up_to_four_blocks() {
    let k = key(0xAB);
    for len in 0..=64 {
        let plaintext: Vec<u8> = (0..len as u8).map(|b| b.wrapping_mul(37)).collect();
        let ciphertext = encrypt(&k, &plaintext);

        assert_eq!(ciphertext.len(), plaintext.len(), "length changed at {len}");
        assert_eq!(decrypt(&k, &ciphertext), plaintext, "roundtrip failed at {len}");
    }
}

#[test]
fn roundtrip_large_document() {
    let k = derive_key("correct horse battery staple");
    let plaintext = vec![b'x'; 100_003];
    assert_eq!(decrypt(&k, &encrypt(&k, &plaintext)), plaintext);
}

#[test]
fn encryption_is_deterministic() {
    // Fixed IV: the same key and plaintext always give the same bytes.
    let k = key(0x42);
    let plaintext = br#"{"logins":[],"notes":[],"files":[],"contacts":[]}"#;
    assert_eq!(encrypt(&k, plaintext), encrypt(&k, plaintext));
}

#[test]
fn ciphertext_differs_from_plaintext() {
    let k = key(0x01);
    for len in [1usize, 15, 16, 17, 33] {
        let plaintext = vec![0u8; len];
        assert_ne!(encrypt(&k, &plaintext), plaintext, "identity at {len}");
    }
}

#[test]
fn wrong_key_gives_garbage_not_error() {
    let plaintext = b"DATABASE_URL=postgres://localhost/mydb";
    let ciphertext = encrypt(&key(0x11), plaintext);

    let recovered = decrypt(&key(0x22), &ciphertext);
    assert_eq!(recovered.len(), plaintext.len());
    assert_ne!(recovered, plaintext.to_vec());
}

#[test]
fn cipher_trait_matches_free_functions() {
    let k = key(0x7F);
    let plaintext = b"thirty-one bytes of plaintext!!";
    let via_trait = AesCbcCts.encrypt(&k, plaintext).unwrap();

    assert_eq!(via_trait, encrypt(&k, plaintext));
    assert_eq!(AesCbcCts.decrypt(&k, &via_trait).unwrap(), plaintext);
}

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

#[test]
fn derive_key_is_deterministic_and_32_bytes() {
    let long = "long".repeat(20);
    for pw in ["", "a", "hunter2", long.as_str()] {
        let a = derive_key(pw);
        let b = derive_key(pw);
        assert_eq!(a, b);
        assert_eq!(a.as_bytes().len(), 32);
    }
}

#[test]
fn derive_key_pads_and_truncates() {
    assert_eq!(&derive_key("abc").as_bytes()[..4], b"abc\0");

    let long = "0123456789abcdef0123456789abcdefEXTRA";
    assert_eq!(derive_key(long), derive_key(&long[..32]));
}

#[test]
fn different_passwords_decrypt_differently() {
    let plaintext = b"secret note contents";
    let ciphertext = encrypt(&derive_key("right"), plaintext);
    assert_ne!(decrypt(&derive_key("wrong"), &ciphertext), plaintext.to_vec());
}

// ---------------------------------------------------------------------------
// Password generation
// ---------------------------------------------------------------------------

#[test]
fn generated_password_has_requested_length() {
    for len in [1usize, 8, 20, 64] {
        assert_eq!(
            generate_password(len, DEFAULT_SPECIAL_CHARACTERS).chars().count(),
            len
        );
    }
}

#[test]
fn generated_password_without_specials_is_alphanumeric() {
    let pw = generate_password(500, "");
    assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
}

//! Random password generation.
//!
//! Passwords always draw from `a-z`, `A-Z` and `0-9`; callers may extend
//! the alphabet with a set of special characters.

use rand::{CryptoRng, Rng};

/// Letters and digits every generated password may use.
const BASE_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

/// Special characters used when the caller does not pick their own.
pub const DEFAULT_SPECIAL_CHARACTERS: &str = "!@#$%^&*()`~-_=+[{]}\\|;:'\",<.>/?";

/// Generate a password of `length` characters using the thread-local CSPRNG.
pub fn generate_password(length: usize, special_characters: &str) -> String {
    generate_password_with(&mut rand::rng(), length, special_characters)
}

/// Generate a password drawing every character uniformly from the
/// alphabet, using the given random source.
pub fn generate_password_with<R>(rng: &mut R, length: usize, special_characters: &str) -> String
where
    R: Rng + CryptoRng + ?Sized,
{
    let alphabet: Vec<char> = BASE_ALPHABET.chars().chain(special_characters.chars()).collect();

    (0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn has_requested_length() {
        assert_eq!(generate_password(0, "").chars().count(), 0);
        assert_eq!(generate_password(32, "").chars().count(), 32);
    }

    #[test]
    fn without_specials_only_alphanumerics() {
        let password = generate_password(200, "");
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn specials_are_used() {
        let mut rng = StdRng::seed_from_u64(7);
        let password = generate_password_with(&mut rng, 2000, "#");
        assert!(password.contains('#'));
        assert!(password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '#'));
    }

    #[test]
    fn multibyte_specials_are_whole_characters() {
        let mut rng = StdRng::seed_from_u64(11);
        let password = generate_password_with(&mut rng, 2000, "§");
        assert_eq!(password.chars().count(), 2000);
        assert!(password.contains('§'));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a = generate_password_with(&mut StdRng::seed_from_u64(1), 24, DEFAULT_SPECIAL_CHARACTERS);
        let b = generate_password_with(&mut StdRng::seed_from_u64(1), 24, DEFAULT_SPECIAL_CHARACTERS);
        assert_eq!(a, b);
    }
}

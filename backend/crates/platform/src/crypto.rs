//! Cryptographic Utilities

use rand::{Rng, RngCore, rngs::OsRng};

const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// `len` バイトの乱数を16進文字列で返す（出力長は `len * 2`）
///
/// ```rust
/// let token = platform::crypto::random_hex_token(32);
/// assert_eq!(token.len(), 64);
/// ```
pub fn random_hex_token(len: usize) -> String {
    hex::encode(random_bytes(len))
}

/// Random lowercase base36 string of `len` characters
pub fn random_base36(len: usize) -> String {
    let mut rng = OsRng;
    (0..len)
        .map(|_| BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_random_hex_token() {
        let a = random_hex_token(32);
        let b = random_hex_token(32);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_base36() {
        let s = random_base36(9);
        assert_eq!(s.len(), 9);
        assert!(s.bytes().all(|b| BASE36_ALPHABET.contains(&b)));
    }
}

use sha2::{Digest, Sha256};

use crate::credentials::Credentials;
use crate::security;

/// Compute the expected HashInfo for an EncryptInfo blob.
///
/// The digest is the uppercase hex of `SHA256(hash_key ++ encrypt_info ++
/// hash_iv)` — raw UTF-8 byte concatenation, no separators. The construction
/// (including the static IV doubling as salt suffix) is fixed by the PayUNi
/// protocol and must be reproduced exactly or verification against the real
/// gateway breaks.
pub fn compute_hash_info(credentials: &Credentials, encrypt_info: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(credentials.hash_key().as_bytes());
    hasher.update(encrypt_info.as_bytes());
    hasher.update(credentials.hash_iv().as_bytes());
    hex::encode_upper(hasher.finalize())
}

/// Check a claimed HashInfo against the recomputed digest.
///
/// Returns `false` on mismatch — never errors; the caller decides how to
/// react. The digest is always computed and the comparison is constant-time.
pub fn verify_hash_info(credentials: &Credentials, encrypt_info: &str, claimed: &str) -> bool {
    let expected = compute_hash_info(credentials, encrypt_info);
    security::constant_time_eq(expected.as_bytes(), claimed.as_bytes())
}

pub(crate) mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().fold(String::new(), |mut s, b| {
            use std::fmt::Write;
            let _ = write!(s, "{b:02x}");
            s
        })
    }

    pub fn encode_upper(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().fold(String::new(), |mut s, b| {
            use std::fmt::Write;
            let _ = write!(s, "{b:02X}");
            s
        })
    }

    pub fn decode(s: &str) -> Result<Vec<u8>, ()> {
        if !s.len().is_multiple_of(2) || !s.is_ascii() {
            return Err(());
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| ()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("M1", &"k".repeat(32), &"i".repeat(16), "168001").unwrap()
    }

    #[test]
    fn test_digest_is_uppercase_hex() {
        let digest = compute_hash_info(&creds(), "abcdef");
        assert_eq!(digest.len(), 64);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_deterministic() {
        let a = compute_hash_info(&creds(), "abcdef");
        let b = compute_hash_info(&creds(), "abcdef");
        assert_eq!(a, b);
        assert!(verify_hash_info(&creds(), "abcdef", &a));
    }

    #[test]
    fn test_changed_encrypt_info_rejects() {
        let digest = compute_hash_info(&creds(), "abcdef");
        assert!(!verify_hash_info(&creds(), "abcdeg", &digest));
    }

    #[test]
    fn test_changed_key_rejects() {
        let digest = compute_hash_info(&creds(), "abcdef");
        let other = Credentials::new("M1", &"K".repeat(32), &"i".repeat(16), "168001").unwrap();
        assert!(!verify_hash_info(&other, "abcdef", &digest));
    }

    #[test]
    fn test_changed_iv_rejects() {
        let digest = compute_hash_info(&creds(), "abcdef");
        let other = Credentials::new("M1", &"k".repeat(32), &"I".repeat(16), "168001").unwrap();
        assert!(!verify_hash_info(&other, "abcdef", &digest));
    }

    #[test]
    fn test_lowercase_claim_rejects() {
        // The gateway sends uppercase hex; the match is case-sensitive.
        let digest = compute_hash_info(&creds(), "abcdef");
        assert!(!verify_hash_info(&creds(), "abcdef", &digest.to_lowercase()));
    }

    #[test]
    fn test_hex_decode_roundtrip() {
        assert_eq!(hex::decode("00ff10").unwrap(), vec![0x00, 0xff, 0x10]);
        assert_eq!(hex::encode([0x00, 0xff, 0x10]), "00ff10");
        assert!(hex::decode("0").is_err());
        assert!(hex::decode("zz").is_err());
    }
}

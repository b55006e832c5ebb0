use crate::error::NotifyError;

/// AES-256 key length; PayUNi issues the HashKey as 32 ASCII characters.
pub const HASH_KEY_LEN: usize = 32;

/// GCM IV length fixed by the PayUNi protocol (not the usual 96-bit nonce).
pub const HASH_IV_LEN: usize = 16;

/// Shared-secret credentials for one PayUNi merchant account.
///
/// Constructed once at startup and passed by reference into every
/// verification call. The pipeline holds no global state, so multiple
/// credential sets can coexist in one process (and in tests).
#[derive(Clone)]
pub struct Credentials {
    mer_id: String,
    hash_key: String,
    hash_iv: String,
    donation_code: String,
}

impl Credentials {
    /// Validate and build a credential set.
    ///
    /// The key and IV double as the hash salt, so they are kept as text and
    /// their UTF-8 bytes are length-checked against the cipher requirements.
    pub fn new(
        mer_id: &str,
        hash_key: &str,
        hash_iv: &str,
        donation_code: &str,
    ) -> Result<Self, NotifyError> {
        if mer_id.is_empty() {
            return Err(NotifyError::Config("merchant id must not be empty".into()));
        }
        if hash_key.len() != HASH_KEY_LEN {
            return Err(NotifyError::Config(format!(
                "hash key must be {HASH_KEY_LEN} bytes, got {}",
                hash_key.len()
            )));
        }
        if hash_iv.len() != HASH_IV_LEN {
            return Err(NotifyError::Config(format!(
                "hash iv must be {HASH_IV_LEN} bytes, got {}",
                hash_iv.len()
            )));
        }
        Ok(Self {
            mer_id: mer_id.to_string(),
            hash_key: hash_key.to_string(),
            hash_iv: hash_iv.to_string(),
            donation_code: donation_code.to_string(),
        })
    }

    pub fn mer_id(&self) -> &str {
        &self.mer_id
    }

    /// The shared HashKey: AES-256 key and hash-salt prefix.
    pub fn hash_key(&self) -> &str {
        &self.hash_key
    }

    /// The shared HashIV: GCM nonce and hash-salt suffix.
    pub fn hash_iv(&self) -> &str {
        &self.hash_iv
    }

    /// Donation code used when a paid trade carries neither a carrier nor
    /// a buyer email.
    pub fn donation_code(&self) -> &str {
        &self.donation_code
    }
}

// Keep key material out of debug output and logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("mer_id", &self.mer_id)
            .field("hash_key", &"<redacted>")
            .field("hash_iv", &"<redacted>")
            .field("donation_code", &self.donation_code)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        let creds = Credentials::new("M1", &"k".repeat(32), &"i".repeat(16), "168001").unwrap();
        assert_eq!(creds.mer_id(), "M1");
        assert_eq!(creds.donation_code(), "168001");
    }

    #[test]
    fn test_rejects_short_key() {
        let err = Credentials::new("M1", "short", &"i".repeat(16), "168001").unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_rejects_wrong_iv_length() {
        let err = Credentials::new("M1", &"k".repeat(32), &"i".repeat(17), "168001").unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_rejects_empty_merchant() {
        let err = Credentials::new("", &"k".repeat(32), &"i".repeat(16), "168001").unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("M1", &"k".repeat(32), &"i".repeat(16), "168001").unwrap();
        let out = format!("{creds:?}");
        assert!(!out.contains(&"k".repeat(32)));
        assert!(out.contains("<redacted>"));
    }
}

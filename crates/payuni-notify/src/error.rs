use thiserror::Error;

/// Errors returned by notify verification.
///
/// Every variant is terminal: PayUNi resends the notify on its own schedule,
/// so nothing here is retried locally.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A required notify field was absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The MerID in the request is not the configured merchant. Logged
    /// distinctly from other failures — this is the spoofing signal.
    #[error("merchant id mismatch")]
    MerchantMismatch,

    /// The claimed HashInfo did not match the recomputed digest.
    #[error("hash verification failed")]
    HashMismatch,

    /// Decryption failed. Carries no detail by design: which decode step
    /// failed goes to internal logs only, so the external response cannot
    /// be used as a decryption oracle.
    #[error("payload decryption failed")]
    Decryption,

    /// The decrypted plaintext did not carry the expected transaction
    /// fields. Rare — implies the gateway changed its payload format.
    #[error("payload decode failed: {0}")]
    Decode(String),

    /// Invalid credential material (wrong key/IV length, empty merchant).
    #[error("config error: {0}")]
    Config(String),
}

impl NotifyError {
    /// Stable label for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NotifyError::MissingField(_) => "missing_field",
            NotifyError::MerchantMismatch => "merchant_mismatch",
            NotifyError::HashMismatch => "hash_mismatch",
            NotifyError::Decryption => "decryption",
            NotifyError::Decode(_) => "decode",
            NotifyError::Config(_) => "config",
        }
    }
}

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::credentials::Credentials;
use crate::error::NotifyError;
use crate::hash::hex;

/// AES-256-GCM parameterized for the 16-byte IV the PayUNi protocol uses
/// instead of the usual 96-bit nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Separator between the base64 ciphertext and base64 tag inside the
/// hex-decoded EncryptInfo.
const SEGMENT_DELIMITER: &str = ":::";

/// GCM authentication tag length in bytes.
const TAG_LEN: usize = 16;

/// Decrypt an EncryptInfo blob into the plaintext query string.
///
/// Wire format: `hex( base64(ciphertext) ++ ":::" ++ base64(tag) )`. The tag
/// is handed to the cipher by appending it to the ciphertext (RustCrypto AEAD
/// convention) and is verified during finalization.
///
/// All failures collapse into the opaque [`NotifyError::Decryption`]. The
/// failing step is logged at DEBUG only and never reaches the caller, so the
/// external response cannot distinguish malformed input from a bad tag.
pub fn decrypt_encrypt_info(
    credentials: &Credentials,
    encrypt_info: &str,
) -> Result<String, NotifyError> {
    let raw = hex::decode(encrypt_info).map_err(|_| {
        tracing::debug!("EncryptInfo is not valid hex");
        NotifyError::Decryption
    })?;
    let joined = String::from_utf8(raw).map_err(|_| {
        tracing::debug!("hex-decoded EncryptInfo is not UTF-8");
        NotifyError::Decryption
    })?;

    let mut segments = joined.split(SEGMENT_DELIMITER);
    let (cipher_b64, tag_b64) = match (segments.next(), segments.next(), segments.next()) {
        (Some(c), Some(t), None) => (c, t),
        _ => {
            tracing::debug!("EncryptInfo does not split into exactly two segments");
            return Err(NotifyError::Decryption);
        }
    };

    let mut ciphertext = BASE64.decode(cipher_b64).map_err(|_| {
        tracing::debug!("ciphertext segment is not valid base64");
        NotifyError::Decryption
    })?;
    let tag = BASE64.decode(tag_b64).map_err(|_| {
        tracing::debug!("tag segment is not valid base64");
        NotifyError::Decryption
    })?;
    ciphertext.extend_from_slice(&tag);

    let cipher = Aes256Gcm16::new_from_slice(credentials.hash_key().as_bytes()).map_err(|_| {
        tracing::debug!("cipher init failed");
        NotifyError::Decryption
    })?;
    let nonce = Nonce::<U16>::from_slice(credentials.hash_iv().as_bytes());

    let plaintext = cipher.decrypt(nonce, ciphertext.as_slice()).map_err(|_| {
        tracing::debug!("GCM decryption failed (tag mismatch or corrupt ciphertext)");
        NotifyError::Decryption
    })?;

    String::from_utf8(plaintext).map_err(|_| {
        tracing::debug!("decrypted plaintext is not UTF-8");
        NotifyError::Decryption
    })
}

/// Encrypt a plaintext query string into EncryptInfo wire format.
///
/// The inverse of [`decrypt_encrypt_info`]; used to build outbound payloads
/// and test fixtures.
pub fn encrypt_plaintext(
    credentials: &Credentials,
    plaintext: &str,
) -> Result<String, NotifyError> {
    let cipher = Aes256Gcm16::new_from_slice(credentials.hash_key().as_bytes())
        .map_err(|_| NotifyError::Decryption)?;
    let nonce = Nonce::<U16>::from_slice(credentials.hash_iv().as_bytes());

    let sealed = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|_| NotifyError::Decryption)?;

    // encrypt() appends the tag; split it back out for the wire format
    let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);
    let joined = format!(
        "{}{SEGMENT_DELIMITER}{}",
        BASE64.encode(ciphertext),
        BASE64.encode(tag)
    );
    Ok(hex::encode(joined.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("M1", &"k".repeat(32), &"i".repeat(16), "168001").unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let plaintext = "Status=SUCCESS&MerTradeNo=T100&TradeAmt=30";
        let encrypt_info = encrypt_plaintext(&creds(), plaintext).unwrap();
        let decrypted = decrypt_encrypt_info(&creds(), &encrypt_info).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_rejects_truncated_hex() {
        let encrypt_info = encrypt_plaintext(&creds(), "Status=SUCCESS").unwrap();
        let truncated = &encrypt_info[..encrypt_info.len() - 1];
        assert!(matches!(
            decrypt_encrypt_info(&creds(), truncated),
            Err(NotifyError::Decryption)
        ));
    }

    #[test]
    fn test_rejects_non_hex_input() {
        assert!(matches!(
            decrypt_encrypt_info(&creds(), "not hex at all"),
            Err(NotifyError::Decryption)
        ));
    }

    #[test]
    fn test_rejects_missing_delimiter() {
        let no_delimiter = hex::encode(b"c2VnbWVudA==");
        assert!(matches!(
            decrypt_encrypt_info(&creds(), &no_delimiter),
            Err(NotifyError::Decryption)
        ));
    }

    #[test]
    fn test_rejects_three_segments() {
        let three = hex::encode(b"YQ==:::YQ==:::YQ==");
        assert!(matches!(
            decrypt_encrypt_info(&creds(), &three),
            Err(NotifyError::Decryption)
        ));
    }

    #[test]
    fn test_rejects_non_base64_segment() {
        let bad = hex::encode(b"!!!not-base64!!!:::YQ==");
        assert!(matches!(
            decrypt_encrypt_info(&creds(), &bad),
            Err(NotifyError::Decryption)
        ));
    }

    #[test]
    fn test_rejects_tampered_tag() {
        let encrypt_info = encrypt_plaintext(&creds(), "Status=SUCCESS").unwrap();

        // Flip one bit inside the tag segment and re-encode the blob
        let joined = String::from_utf8(hex::decode(&encrypt_info).unwrap()).unwrap();
        let (cipher_b64, tag_b64) = joined.split_once(SEGMENT_DELIMITER).unwrap();
        let mut tag = BASE64.decode(tag_b64).unwrap();
        tag[0] ^= 0x01;
        let tampered = hex::encode(
            format!("{cipher_b64}{SEGMENT_DELIMITER}{}", BASE64.encode(tag)).as_bytes(),
        );

        assert!(matches!(
            decrypt_encrypt_info(&creds(), &tampered),
            Err(NotifyError::Decryption)
        ));
    }

    #[test]
    fn test_rejects_wrong_key() {
        let encrypt_info = encrypt_plaintext(&creds(), "Status=SUCCESS").unwrap();
        let other = Credentials::new("M1", &"K".repeat(32), &"i".repeat(16), "168001").unwrap();
        assert!(matches!(
            decrypt_encrypt_info(&other, &encrypt_info),
            Err(NotifyError::Decryption)
        ));
    }
}

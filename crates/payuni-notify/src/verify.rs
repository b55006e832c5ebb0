use crate::credentials::Credentials;
use crate::decode;
use crate::decrypt;
use crate::error::NotifyError;
use crate::hash;
use crate::notify::{NotifyRequest, TransactionRecord};

/// Verify an inbound notify end to end.
///
/// Checks run in a fixed order, each with its own typed rejection:
/// required fields, merchant identity, HashInfo digest, decryption, decode.
/// The hash check always runs before decryption so unauthenticated
/// ciphertext never reaches the cipher.
///
/// Verification is all-or-nothing: the caller gets either a complete
/// [`TransactionRecord`] or the first failure.
pub fn verify_notify(
    credentials: &Credentials,
    request: &NotifyRequest,
) -> Result<TransactionRecord, NotifyError> {
    if request.mer_id.is_empty() {
        return Err(NotifyError::MissingField("MerID"));
    }
    if request.encrypt_info.is_empty() {
        return Err(NotifyError::MissingField("EncryptInfo"));
    }
    if request.hash_info.is_empty() {
        return Err(NotifyError::MissingField("HashInfo"));
    }

    if request.mer_id != credentials.mer_id() {
        return Err(NotifyError::MerchantMismatch);
    }

    if !hash::verify_hash_info(credentials, &request.encrypt_info, &request.hash_info) {
        return Err(NotifyError::HashMismatch);
    }

    let plaintext = decrypt::decrypt_encrypt_info(credentials, &request.encrypt_info)?;
    TransactionRecord::from_fields(decode::decode_notify_fields(&plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("M1", &"k".repeat(32), &"i".repeat(16), "168001").unwrap()
    }

    fn valid_request(plaintext: &str) -> NotifyRequest {
        let encrypt_info = decrypt::encrypt_plaintext(&creds(), plaintext).unwrap();
        let hash_info = hash::compute_hash_info(&creds(), &encrypt_info);
        NotifyRequest {
            mer_id: "M1".to_string(),
            encrypt_info,
            hash_info,
        }
    }

    #[test]
    fn test_valid_notify_decodes() {
        let request = valid_request("Status=SUCCESS&MerTradeNo=T100&TradeAmt=30");
        let record = verify_notify(&creds(), &request).unwrap();
        assert_eq!(record.status(), "SUCCESS");
        assert_eq!(record.mer_trade_no(), "T100");
        assert_eq!(record.trade_amt(), "30");
    }

    #[test]
    fn test_empty_mer_id_is_missing_field() {
        let mut request = valid_request("Status=SUCCESS&MerTradeNo=T100&TradeAmt=30");
        request.mer_id.clear();
        assert!(matches!(
            verify_notify(&creds(), &request),
            Err(NotifyError::MissingField("MerID"))
        ));
    }

    #[test]
    fn test_empty_encrypt_info_is_missing_field() {
        let mut request = valid_request("Status=SUCCESS&MerTradeNo=T100&TradeAmt=30");
        request.encrypt_info.clear();
        assert!(matches!(
            verify_notify(&creds(), &request),
            Err(NotifyError::MissingField("EncryptInfo"))
        ));
    }

    #[test]
    fn test_empty_hash_info_is_missing_field() {
        let mut request = valid_request("Status=SUCCESS&MerTradeNo=T100&TradeAmt=30");
        request.hash_info.clear();
        assert!(matches!(
            verify_notify(&creds(), &request),
            Err(NotifyError::MissingField("HashInfo"))
        ));
    }

    #[test]
    fn test_unknown_merchant_rejected_before_hash() {
        let mut request = valid_request("Status=SUCCESS&MerTradeNo=T100&TradeAmt=30");
        request.mer_id = "M2".to_string();
        // Hash is still valid — merchant identity alone causes the rejection
        assert!(matches!(
            verify_notify(&creds(), &request),
            Err(NotifyError::MerchantMismatch)
        ));
    }

    #[test]
    fn test_tampered_hash_rejected_without_decrypting() {
        let mut request = valid_request("Status=SUCCESS&MerTradeNo=T100&TradeAmt=30");
        request.hash_info = "0".repeat(64);
        assert!(matches!(
            verify_notify(&creds(), &request),
            Err(NotifyError::HashMismatch)
        ));
    }

    #[test]
    fn test_payload_without_required_fields_is_decode_error() {
        let request = valid_request("Status=SUCCESS&SomethingElse=1");
        assert!(matches!(
            verify_notify(&creds(), &request),
            Err(NotifyError::Decode(_))
        ));
    }
}

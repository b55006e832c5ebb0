use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

/// Decrypted-payload field names, as PayUNi spells them on the wire.
pub const FIELD_STATUS: &str = "Status";
pub const FIELD_MER_TRADE_NO: &str = "MerTradeNo";
pub const FIELD_TRADE_AMT: &str = "TradeAmt";
pub const FIELD_USR_MAIL: &str = "UsrMail";
pub const FIELD_CARRIER_TYPE: &str = "CarrierType";
pub const FIELD_CARRIER_INFO: &str = "CarrierInfo";

/// Raw inbound notify callback, as the gateway posts it.
///
/// Fields arrive via JSON body, form body, or query string; absent fields
/// default to empty and are rejected by the verifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifyRequest {
    #[serde(rename = "MerID", default)]
    pub mer_id: String,
    #[serde(rename = "EncryptInfo", default)]
    pub encrypt_info: String,
    #[serde(rename = "HashInfo", default)]
    pub hash_info: String,
}

/// A verified, decoded transaction.
///
/// Wraps the decoded field map; construction checks that the three fields
/// every notify must carry are present. Everything else stays optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    fields: HashMap<String, String>,
}

impl TransactionRecord {
    /// Build a record from decoded fields, requiring Status, MerTradeNo
    /// and TradeAmt.
    pub fn from_fields(fields: HashMap<String, String>) -> Result<Self, NotifyError> {
        for required in [FIELD_STATUS, FIELD_MER_TRADE_NO, FIELD_TRADE_AMT] {
            if !fields.contains_key(required) {
                return Err(NotifyError::Decode(format!("missing field {required}")));
            }
        }
        Ok(Self { fields })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn status(&self) -> &str {
        self.get(FIELD_STATUS).unwrap_or_default()
    }

    pub fn mer_trade_no(&self) -> &str {
        self.get(FIELD_MER_TRADE_NO).unwrap_or_default()
    }

    pub fn trade_amt(&self) -> &str {
        self.get(FIELD_TRADE_AMT).unwrap_or_default()
    }

    /// Buyer email, if present and non-empty.
    pub fn usr_mail(&self) -> Option<&str> {
        self.get(FIELD_USR_MAIL).filter(|v| !v.is_empty())
    }

    /// E-invoice carrier type, if present and non-empty.
    pub fn carrier_type(&self) -> Option<&str> {
        self.get(FIELD_CARRIER_TYPE).filter(|v| !v.is_empty())
    }

    /// E-invoice carrier number, if present and non-empty.
    pub fn carrier_info(&self) -> Option<&str> {
        self.get(FIELD_CARRIER_INFO).filter(|v| !v.is_empty())
    }

    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }
}

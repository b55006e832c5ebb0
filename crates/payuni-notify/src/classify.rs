use crate::credentials::Credentials;
use crate::notify::TransactionRecord;

/// Trade status PayUNi reports for a captured payment.
pub const STATUS_SUCCESS: &str = "SUCCESS";

/// How the e-invoice reaches the buyer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Buyer supplied an e-invoice carrier.
    Carrier {
        carrier_type: String,
        carrier_info: Option<String>,
    },
    /// No carrier; deliver to the buyer's email.
    Email { address: String },
    /// Neither carrier nor email; donate the invoice under the configured
    /// charity code.
    Donation { code: String },
}

/// What to do with a verified transaction record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceAction {
    /// Trade did not complete; no invoice is issued.
    Ignored,
    /// Issue an invoice for this trade.
    Issue {
        mer_trade_no: String,
        trade_amt: String,
        mode: DeliveryMode,
    },
}

/// Classify a verified record into an invoice action.
///
/// Anything but a SUCCESS status is ignored. Delivery priority is carrier,
/// then email, then donation — a fixed business rule of the invoicing flow;
/// do not reorder.
pub fn classify(record: &TransactionRecord, credentials: &Credentials) -> InvoiceAction {
    if record.status() != STATUS_SUCCESS {
        return InvoiceAction::Ignored;
    }

    let mode = if let Some(carrier_type) = record.carrier_type() {
        DeliveryMode::Carrier {
            carrier_type: carrier_type.to_string(),
            carrier_info: record.carrier_info().map(str::to_string),
        }
    } else if let Some(address) = record.usr_mail() {
        DeliveryMode::Email {
            address: address.to_string(),
        }
    } else {
        DeliveryMode::Donation {
            code: credentials.donation_code().to_string(),
        }
    };

    InvoiceAction::Issue {
        mer_trade_no: record.mer_trade_no().to_string(),
        trade_amt: record.trade_amt().to_string(),
        mode,
    }
}

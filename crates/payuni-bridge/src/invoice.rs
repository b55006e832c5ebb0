use serde::Serialize;

use payuni_notify::{DeliveryMode, InvoiceAction};

/// Request body sent to the e-invoice endpoint for a paid trade.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub mer_trade_no: String,
    pub trade_amt: String,
    /// One of `carrier`, `email`, `donation`.
    pub delivery_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_code: Option<String>,
}

impl InvoiceRequest {
    /// Flatten a classified action into the issuer's wire shape.
    /// Returns `None` for ignored trades.
    pub fn from_action(action: &InvoiceAction) -> Option<Self> {
        let InvoiceAction::Issue {
            mer_trade_no,
            trade_amt,
            mode,
        } = action
        else {
            return None;
        };

        let mut request = InvoiceRequest {
            mer_trade_no: mer_trade_no.clone(),
            trade_amt: trade_amt.clone(),
            delivery_mode: String::new(),
            buyer_email: None,
            carrier_type: None,
            carrier_info: None,
            donation_code: None,
        };

        match mode {
            DeliveryMode::Carrier {
                carrier_type,
                carrier_info,
            } => {
                request.delivery_mode = "carrier".to_string();
                request.carrier_type = Some(carrier_type.clone());
                request.carrier_info = carrier_info.clone();
            }
            DeliveryMode::Email { address } => {
                request.delivery_mode = "email".to_string();
                request.buyer_email = Some(address.clone());
            }
            DeliveryMode::Donation { code } => {
                request.delivery_mode = "donation".to_string();
                request.donation_code = Some(code.clone());
            }
        }
        Some(request)
    }
}

/// Forward an invoice request to the configured issuer, fire-and-forget.
///
/// Delivery failures are logged and never affect the notify acknowledgement;
/// PayUNi must get its reply regardless of the issuer's health. Without a
/// configured URL the request is logged and dropped (issuance stub).
pub fn submit_invoice(client: &reqwest::Client, url: Option<&str>, request: InvoiceRequest) {
    let Some(url) = url else {
        tracing::info!(
            mer_trade_no = %request.mer_trade_no,
            delivery_mode = %request.delivery_mode,
            "no EINVOICE_URL configured — invoice issuance stubbed"
        );
        return;
    };

    let client = client.clone();
    let url = url.to_string();

    tokio::spawn(async move {
        let result = client
            .post(&url)
            .timeout(std::time::Duration::from_secs(5))
            .json(&request)
            .send()
            .await;
        match result {
            Ok(resp) => tracing::info!(
                mer_trade_no = %request.mer_trade_no,
                status = %resp.status(),
                "invoice request forwarded"
            ),
            Err(e) => tracing::warn!(
                mer_trade_no = %request.mer_trade_no,
                error = %e,
                "invoice request failed"
            ),
        }
    });
}

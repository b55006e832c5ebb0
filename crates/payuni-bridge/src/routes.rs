use std::collections::HashMap;

use actix_web::{get, route, web, HttpMessage, HttpRequest, HttpResponse};
use url::form_urlencoded;

use ::payuni_notify::{classify, security, verify_notify, InvoiceAction, NotifyError, NotifyRequest};

use crate::invoice::{self, InvoiceRequest};
use crate::metrics;
use crate::state::AppState;

/// The three literal acknowledgement bodies the gateway accepts. Always sent
/// with HTTP 200 — a non-200 or unexpected body triggers PayUNi's resend
/// schedule, so even internal failures acknowledge cleanly.
const ACK_SUCCESS: &str = "SUCCESS";
const ACK_OK: &str = "OK";
const ACK_ERROR: &str = "ERROR";

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().body("OK - PayUNi invoice bridge is running.")
}

/// Pull the notify fields out of the request, wherever PayUNi put them.
///
/// The gateway sends JSON or form-encoded bodies and sometimes query
/// parameters; body fields take precedence over the query string. Anything
/// missing stays empty and is rejected by the verifier, not here.
fn extract_notify(req: &HttpRequest, body: &[u8]) -> NotifyRequest {
    let mut fields: HashMap<String, String> = form_urlencoded::parse(req.query_string().as_bytes())
        .into_owned()
        .collect();

    if req.content_type().starts_with("application/json") {
        if let Ok(serde_json::Value::Object(map)) = serde_json::from_slice(body) {
            for (key, value) in map {
                if let Some(s) = value.as_str() {
                    fields.insert(key, s.to_string());
                }
            }
        }
    } else if !body.is_empty() {
        fields.extend(form_urlencoded::parse(body).into_owned());
    }

    let mut take = |key: &str| fields.remove(key).unwrap_or_default();
    NotifyRequest {
        mer_id: take("MerID"),
        encrypt_info: take("EncryptInfo"),
        hash_info: take("HashInfo"),
    }
}

/// Run the verification pipeline and map the outcome to the fixed
/// acknowledgement string. Diagnostic detail goes to logs and metrics only;
/// the gateway never learns which step failed.
fn handle_notify(state: &AppState, notify: &NotifyRequest) -> &'static str {
    match verify_notify(&state.credentials, notify) {
        Ok(record) => {
            let action = classify(&record, &state.credentials);
            match &action {
                InvoiceAction::Ignored => {
                    tracing::info!(
                        mer_trade_no = record.mer_trade_no(),
                        status = record.status(),
                        "notify verified, trade not captured — no invoice"
                    );
                    metrics::NOTIFY_REQUESTS
                        .with_label_values(&["ignored"])
                        .inc();
                    ACK_OK
                }
                InvoiceAction::Issue { mer_trade_no, .. } => {
                    tracing::info!(
                        mer_trade_no = %mer_trade_no,
                        trade_amt = record.trade_amt(),
                        "notify verified — forwarding invoice request"
                    );
                    if let Some(request) = InvoiceRequest::from_action(&action) {
                        invoice::submit_invoice(
                            &state.http_client,
                            state.invoice_url.as_deref(),
                            request,
                        );
                    }
                    metrics::NOTIFY_REQUESTS
                        .with_label_values(&["success"])
                        .inc();
                    ACK_SUCCESS
                }
            }
        }
        Err(e) => {
            metrics::NOTIFY_REQUESTS.with_label_values(&["error"]).inc();
            metrics::VERIFY_FAILURES.with_label_values(&[e.kind()]).inc();
            match e {
                // Distinct signal: wrong merchant id on an otherwise
                // well-formed notify smells like a spoof attempt.
                NotifyError::MerchantMismatch => tracing::warn!(
                    mer_id = %notify.mer_id,
                    "notify rejected: merchant id mismatch (possible spoof)"
                ),
                _ => tracing::warn!(error = %e, "notify rejected"),
            }
            ACK_ERROR
        }
    }
}

#[route("/payuni/notify", method = "GET", method = "POST")]
pub async fn payuni_notify(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> HttpResponse {
    let notify = extract_notify(&req, &body);
    let ack = handle_notify(&state, &notify);
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(ack)
}

/// O'Pay background notifies are only acknowledged, not verified — the
/// gateway contract requires the literal `1|OK` reply.
#[route("/opay/notify", method = "GET", method = "POST")]
pub async fn opay_notify(req: HttpRequest, body: web::Bytes) -> HttpResponse {
    tracing::info!(
        method = %req.method(),
        query = req.query_string(),
        body_len = body.len(),
        "received O'Pay notify"
    );
    HttpResponse::Ok().body("1|OK")
}

#[get("/metrics")]
pub async fn metrics_endpoint(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    match &state.metrics_token {
        Some(token) => {
            let authorized = req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|t| security::constant_time_eq(t.as_bytes(), token))
                .unwrap_or(false);

            if !authorized {
                return HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "unauthorized",
                    "message": "Valid Bearer token required for /metrics"
                }));
            }
        }
        None => {
            // No token configured — metrics stay protected by default.
            // Set BRIDGE_PUBLIC_METRICS=true to opt in to unauthenticated access.
            let public_metrics = std::env::var("BRIDGE_PUBLIC_METRICS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false);
            if !public_metrics {
                return HttpResponse::Forbidden().json(serde_json::json!({
                    "error": "forbidden",
                    "message": "Set METRICS_TOKEN or BRIDGE_PUBLIC_METRICS=true to access /metrics"
                }));
            }
        }
    }
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics::metrics_output())
}

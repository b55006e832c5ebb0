use payuni_notify::Credentials;

/// Shared application state for the bridge server.
pub struct AppState {
    /// Merchant credentials, validated at startup. Read-only afterwards, so
    /// notify handling needs no locking.
    pub credentials: Credentials,
    /// Downstream e-invoice endpoint. `None` leaves issuance stubbed to logs.
    pub invoice_url: Option<String>,
    pub http_client: reqwest::Client,
    /// Bearer token guarding /metrics.
    pub metrics_token: Option<Vec<u8>>,
}

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payuni_notify::Credentials;

use payuni_bridge::routes;
use payuni_bridge::state::AppState;

/// Fallback donation code used when DONATION_CODE is not configured.
const DEFAULT_DONATION_CODE: &str = "168001";

fn require_env(name: &str) -> String {
    match std::env::var(name).ok().filter(|s| !s.is_empty()) {
        Some(value) => value,
        None => {
            tracing::error!(
                "{name} is required — the bridge refuses to start without its \
                 PayUNi merchant secrets"
            );
            std::process::exit(1);
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mer_id = require_env("PAYUNI_MER_ID");
    let hash_key = require_env("PAYUNI_HASH_KEY");
    let hash_iv = require_env("PAYUNI_HASH_IV");

    let donation_code = std::env::var("DONATION_CODE")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| {
            tracing::warn!("DONATION_CODE not set — using default {DEFAULT_DONATION_CODE}");
            DEFAULT_DONATION_CODE.to_string()
        });

    let credentials = match Credentials::new(&mer_id, &hash_key, &hash_iv, &donation_code) {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("invalid PayUNi credentials: {e}");
            std::process::exit(1);
        }
    };

    let invoice_url = std::env::var("EINVOICE_URL").ok().filter(|s| !s.is_empty());
    match &invoice_url {
        Some(url) => tracing::info!("e-invoice endpoint: {url}"),
        None => tracing::warn!("EINVOICE_URL not set — invoice issuance is stubbed to logs"),
    }

    let metrics_token = std::env::var("METRICS_TOKEN")
        .ok()
        .filter(|s| !s.is_empty())
        .map(|s| s.into_bytes());

    if metrics_token.is_none() {
        tracing::warn!("METRICS_TOKEN not set — /metrics requires BRIDGE_PUBLIC_METRICS=true");
    }

    let state = web::Data::new(AppState {
        credentials,
        invoice_url,
        http_client: reqwest::Client::new(),
        metrics_token,
    });

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let rate_limit_rpm: u64 = std::env::var("RATE_LIMIT_RPM")
        .ok()
        .and_then(|r| r.parse().ok())
        .unwrap_or(120);

    tracing::info!("PayUNi invoice bridge listening on port {port}");
    tracing::info!("Merchant: {mer_id}");
    tracing::info!("Rate limit: {rate_limit_rpm} req/min per IP");
    tracing::info!("  POST http://localhost:{port}/payuni/notify");
    tracing::info!("  POST http://localhost:{port}/opay/notify");

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_minute(rate_limit_rpm)
        .finish()
        .expect("failed to build rate limiter config");

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .app_data(state.clone())
            .service(routes::index)
            .service(routes::payuni_notify)
            .service(routes::opay_notify)
            .service(routes::metrics_endpoint)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

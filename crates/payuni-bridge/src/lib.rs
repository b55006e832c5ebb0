//! PayUNi invoice bridge — receives payment notify callbacks and drives
//! e-invoice issuance.
//!
//! The bridge accepts PayUNi's asynchronous notifies, runs the verification
//! pipeline from the [`payuni_notify`] crate, and answers with the fixed
//! acknowledgement strings the gateway expects. Verified, paid trades are
//! classified into a delivery mode and forwarded to the e-invoice endpoint
//! (or logged, when none is configured). Verification lives in the core
//! crate; this crate provides the HTTP server, state, and metrics.
//!
//! # Modules
//!
//! - [`routes`] — HTTP endpoints (notify callbacks, health, metrics)
//! - [`state`] — Shared [`AppState`](state::AppState)
//! - [`invoice`] — fire-and-forget forwarding to the invoice issuer
//! - [`metrics`] — Prometheus metrics for notify handling

pub mod invoice;
pub mod metrics;
pub mod routes;
pub mod state;

//! PayUNi notify verification.
//!
//! PayUNi reports transaction outcomes through asynchronous server-to-server
//! callbacks ("notify"). Each notify carries an AES-256-GCM-encrypted payload
//! plus a salted SHA-256 digest over it; this crate authenticates the digest,
//! decrypts the payload, and decodes it into a [`TransactionRecord`].
//!
//! The pipeline is pure and stateless: [`Credentials`] are read-only after
//! construction and every intermediate value is local to one call, so
//! concurrent verification needs no synchronization.
//!
//! # Modules
//!
//! - [`hash`] — salted-SHA-256 HashInfo computation and constant-time check
//! - [`decrypt`] — EncryptInfo wire format and AES-256-GCM decryption
//! - [`decode`] — query-string payload decoding
//! - [`verify`] — the orchestrator composing the three stages
//! - [`classify`] — business outcome: invoice delivery mode or ignore

pub mod classify;
pub mod credentials;
pub mod decode;
pub mod decrypt;
pub mod error;
pub mod hash;
pub mod notify;
pub mod security;
pub mod verify;

pub use classify::{classify, DeliveryMode, InvoiceAction, STATUS_SUCCESS};
pub use credentials::Credentials;
pub use error::NotifyError;
pub use notify::{NotifyRequest, TransactionRecord};
pub use verify::verify_notify;

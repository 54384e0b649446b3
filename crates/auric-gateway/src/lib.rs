#![deny(missing_docs)]

//! # auric-gateway — Ledger Gateway Call Contract
//!
//! The remote ledger is an external collaborator consumed through a fixed
//! call contract: it accepts (encrypted payload, proof, public value
//! transfer) per operation kind and exposes read-only confidential value
//! references. This crate defines that contract as the [`LedgerGateway`]
//! trait plus two implementations:
//!
//! - [`HttpLedgerGateway`]: a `reqwest`-backed adapter with per-request
//!   timeouts, bearer-token auth, and exponential-backoff retry on
//!   transient transport errors (connection failures only for
//!   submissions, which are never re-sent after a timeout);
//! - [`mock::InMemoryLedger`]: a deterministic in-process ledger for
//!   tests and demos, with a call log for call-count assertions and
//!   scripted failure/delay hooks.
//!
//! Values returned by the read queries are [`ConfidentialValue`]s: callers
//! format them for display but never compute on them. Arithmetic on
//! confidential amounts happens only inside the ledger/encoder boundary.

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod mock;
pub(crate) mod retry;
pub mod types;

pub use config::{ConfigError, GatewayConfig};
pub use error::GatewayError;
pub use gateway::LedgerGateway;
pub use http::HttpLedgerGateway;
pub use types::{AddressError, ConfidentialValue, LedgerEvent, SessionAddress, TxRef};

#![deny(missing_docs)]

//! # auric-pipeline — Confidential Operation Submission
//!
//! Orchestrates the path from a validated plaintext intent to a settled
//! (or terminally failed) ledger operation:
//!
//! ```text
//! IDLE ──▶ ENCRYPTING ──▶ PROVING ──▶ SUBMITTING ──▶ SETTLED
//!              │              │            │
//!              └──────────────┴────────────┴────────▶ FAILED
//! ```
//!
//! One [`OperationSubmitter`] instance drives one logical submission
//! attempt. Transitions are monotonic forward; `SETTLED` and `FAILED` are
//! terminal. A failed attempt is retried only by constructing a new
//! [`Operation`](auric_core::Operation) and a new submitter; partial
//! encrypted artifacts from a failed attempt are discarded, never reused,
//! because a stale ciphertext/proof pairing is a correctness hazard.
//!
//! ## Failure locality
//!
//! Validation failures and proof self-verification failures resolve
//! locally and never reach the network: a doomed submission costs zero
//! gateway calls (and, against a real chain, zero gas). Gateway-originated
//! failures surface verbatim with the raw cause preserved.
//!
//! ## Concurrency
//!
//! Submitters are independent; the surrounding application may run many
//! concurrently against one shared gateway handle and one shared
//! [`BalanceCache`]. No ordering is assumed across concurrent operations;
//! the ledger is the sole arbiter of settlement order.

pub mod context;
pub mod state;
pub mod submitter;

pub use context::{BalanceCache, SessionContext};
pub use state::{SubmissionState, SubmitErrorKind};
pub use submitter::{OperationSubmitter, PipelineConfig, SubmissionOutcome};

#![deny(missing_docs)]

//! # auric-core — Foundational Types for the Auric Confidential Ledger Client
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies, only `serde`, `thiserror`,
//! and `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every value is a distinct
//!    validated type. You cannot pass a raw string where an [`Amount`] is
//!    expected, and an [`Amount`] cannot be constructed negative.
//!
//! 2. **No floats in value-bearing paths.** Amounts and prices are parsed
//!    from decimal strings into integer minor units (18 decimal places, the
//!    ledger-native unit). Float intermediates would silently lose precision
//!    on exactly the values a custodial ledger must not lose.
//!
//! 3. **[`Operation`] is immutable.** Once constructed and validated it is
//!    the unit submitted to the pipeline; retrying after failure means
//!    constructing a new one.
//!
//! 4. **Structured errors.** Every rejecting constructor returns a
//!    [`ValidationError`] built with `thiserror`, no `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod amount;
pub mod error;
pub mod operation;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use amount::{Amount, OrderDuration, TokenId};
pub use error::ValidationError;
pub use operation::{Operation, OperationKind, Side};
pub use temporal::Timestamp;

//! # Gateway Error Types
//!
//! Errors originating at or beyond the ledger gateway. These surface to
//! the caller verbatim, with the raw cause preserved for diagnostics;
//! the pipeline never rewrites a gateway reason.

use thiserror::Error;

/// Errors from ledger gateway calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The remote call was received and declined (reverted, rejected,
    /// or returned a non-success status).
    #[error("gateway rejected the submission: {reason}")]
    Rejected {
        /// The raw rejection reason from the ledger.
        reason: String,
    },

    /// Transport-level failure: the call may never have reached the ledger.
    #[error("network error: {reason}")]
    Network {
        /// The underlying transport error.
        reason: String,
    },

    /// The bounded wait elapsed. The underlying operation may still have
    /// landed. Callers must treat this as "unknown outcome, check ledger
    /// state", never as a guaranteed non-event.
    #[error("gateway call timed out after {elapsed_ms}ms; outcome unknown, reconcile via a balance read")]
    Timeout {
        /// How long the call waited before giving up.
        elapsed_ms: u64,
    },
}

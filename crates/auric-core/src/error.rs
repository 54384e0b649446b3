//! # Validation Errors
//!
//! Structured errors for the domain primitives, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Validation errors carry the rejected input and the reason so that a
//! terminal `Failed` submission state can reproduce the decision without
//! re-running the pipeline.

use thiserror::Error;

/// Validation errors for domain primitive newtypes.
///
/// Every constructor that can reject input returns one of these. They are
/// raised before any key material is obtained or ciphertext produced, so a
/// doomed submission never costs a network round trip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Amount string failed to parse into ledger-native minor units.
    #[error("invalid amount \"{value}\": {reason}")]
    InvalidAmount {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Amount was zero where a strictly positive value is required.
    #[error("amount must be positive for {operation}")]
    ZeroAmount {
        /// The operation kind that required a positive amount.
        operation: String,
    },

    /// Token identifier was zero.
    #[error("invalid token id: {0} (must be a positive integer)")]
    InvalidTokenId(u64),

    /// Order duration was zero or exceeded the configured maximum.
    #[error("invalid order duration {secs}s: {reason}")]
    InvalidDuration {
        /// The rejected duration in seconds.
        secs: u64,
        /// Why it was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_carries_input() {
        let err = ValidationError::InvalidAmount {
            value: "-1".to_string(),
            reason: "negative amounts are not permitted".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("-1"));
        assert!(msg.contains("negative"));
    }

    #[test]
    fn invalid_token_id_display() {
        let err = ValidationError::InvalidTokenId(0);
        assert!(format!("{err}").contains("token id"));
    }

    #[test]
    fn zero_amount_names_operation() {
        let err = ValidationError::ZeroAmount {
            operation: "deposit".to_string(),
        };
        assert!(format!("{err}").contains("deposit"));
    }
}

//! # Confidential-Layer Error Types
//!
//! Structured errors for key generation, encoding, and proof generation.
//! Verification deliberately has no error type: a malformed proof verifies
//! to `false`, never panics, never errors.

use thiserror::Error;

/// The entropy or key source was unavailable.
///
/// Fatal to the submission attempt, not to the process.
#[derive(Error, Debug)]
pub enum KeyGenerationError {
    /// The underlying entropy source failed.
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Errors during confidential encoding and decoding.
#[derive(Error, Debug)]
pub enum EncodingError {
    /// The plaintext record failed validation before encoding.
    #[error("invalid plaintext record: {0}")]
    InvalidInput(String),

    /// The encoder failed internally.
    #[error("encoding failed: {0}")]
    EncodeFailed(String),

    /// The ciphertext or auth tag is malformed or was tampered with.
    #[error("integrity check failed: {0}")]
    IntegrityCheckFailed(String),

    /// The private key does not match the payload's public key.
    #[error("key mismatch: payload was not encoded under this key pair")]
    KeyMismatch,
}

/// Errors during proof generation.
#[derive(Error, Debug)]
pub enum ProofGenerationError {
    /// The payload is malformed (empty ciphertext, missing key reference).
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Proof generation failed internally.
    #[error("proof generation failed: {0}")]
    GenerationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_generation_error_display() {
        let err = KeyGenerationError::EntropyUnavailable("rng fault".to_string());
        assert!(format!("{err}").contains("rng fault"));
    }

    #[test]
    fn encoding_error_display() {
        let err = EncodingError::IntegrityCheckFailed("tag mismatch".to_string());
        assert!(format!("{err}").contains("tag mismatch"));
    }

    #[test]
    fn proof_error_display() {
        let err = ProofGenerationError::MalformedPayload("empty ciphertext".to_string());
        assert!(format!("{err}").contains("empty ciphertext"));
    }
}

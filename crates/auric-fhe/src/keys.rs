//! # Session Key Material
//!
//! Key pairs are generated per session from the operating system's entropy
//! source, held in memory for the session, and discarded with it. They are
//! never persisted or transmitted; only the public half travels inside an
//! [`EncryptedPayload`](crate::EncryptedPayload).
//!
//! In the mock scheme the public half is the SHA-256 image of the private
//! seed, which lets the decoder re-derive the matching public key from the
//! private half alone. A real FHE backend replaces the derivation; the
//! ownership and lifecycle rules stay.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::KeyGenerationError;
use crate::hex;

/// The public half of a session key pair.
///
/// Travels with every encrypted payload so a verifier can associate
/// ciphertext with the key that produced it. Hex-encoded, 32 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(String);

impl PublicKey {
    /// The hex-encoded key bytes.
    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Whether the key reference is structurally well-formed
    /// (64 lowercase hex characters).
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 64 && self.0.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The private half of a session key pair. Never serialized; `Debug`
/// output is redacted to prevent leakage through logs.
#[derive(Clone)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// The raw seed bytes.
    pub(crate) fn seed(&self) -> &[u8; 32] {
        &self.0
    }

    /// Re-derive the matching public key from this private half.
    pub fn derive_public(&self) -> PublicKey {
        let digest = Sha256::digest(self.0);
        PublicKey(hex::encode(&digest))
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PrivateKey").field(&"[REDACTED]").finish()
    }
}

/// A session-scoped encryption key pair.
///
/// Owned exclusively by the session that generated it. Reuse within a
/// session across multiple operations is allowed and expected; reuse
/// across sessions is not required and not provided for.
#[derive(Debug, Clone)]
pub struct KeyPair {
    /// The public half, referenced by encrypted payloads.
    pub public: PublicKey,
    /// The private half, held in memory only.
    pub private: PrivateKey,
}

/// Source of fresh session key pairs.
///
/// Implementations must be safe to call concurrently from multiple pending
/// operations: each call is independent, with no shared mutable state
/// beyond a task-safe entropy source.
pub trait KeyMaterialProvider: Send + Sync {
    /// Produce a fresh, unpredictable key pair.
    ///
    /// # Errors
    ///
    /// Returns [`KeyGenerationError`] only if the underlying entropy source
    /// is unavailable. Fatal to the attempt, not to the process.
    fn obtain_key_pair(&self) -> Result<KeyPair, KeyGenerationError>;
}

/// Default key provider backed by the operating system RNG.
///
/// Stateless; a single instance may be shared across all concurrent
/// submissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionKeyProvider;

impl KeyMaterialProvider for SessionKeyProvider {
    fn obtain_key_pair(&self) -> Result<KeyPair, KeyGenerationError> {
        let mut seed = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut seed)
            .map_err(|e| KeyGenerationError::EntropyUnavailable(e.to_string()))?;
        let private = PrivateKey(seed);
        let public = private.derive_public();
        Ok(KeyPair { public, private })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_pair_is_fresh() {
        let provider = SessionKeyProvider;
        let a = provider.obtain_key_pair().unwrap();
        let b = provider.obtain_key_pair().unwrap();
        assert_ne!(a.public, b.public);
    }

    #[test]
    fn public_derives_from_private() {
        let pair = SessionKeyProvider.obtain_key_pair().unwrap();
        assert_eq!(pair.private.derive_public(), pair.public);
    }

    #[test]
    fn public_key_is_well_formed() {
        let pair = SessionKeyProvider.obtain_key_pair().unwrap();
        assert!(pair.public.is_well_formed());
    }

    #[test]
    fn private_key_debug_is_redacted() {
        let pair = SessionKeyProvider.obtain_key_pair().unwrap();
        let debug = format!("{:?}", pair.private);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(pair.public.as_hex()));
    }
}

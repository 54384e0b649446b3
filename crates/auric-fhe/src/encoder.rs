//! # Confidential Encoder
//!
//! Turns a validated [`PlaintextRecord`] into an [`EncryptedPayload`] bound
//! to a session public key. Encoding is a pure transformation: no network,
//! no side effects beyond drawing a nonce from the entropy source.
//!
//! ## Mock Backend
//!
//! [`MockFheEncoder`] is a transparent stand-in for a real homomorphic
//! scheme. It XORs the canonical JSON bytes of the record with a
//! SHA-256-derived keystream under a fresh random nonce, and appends an
//! integrity tag over (public key ‖ nonce ‖ plaintext).
//!
//! **NOT CONFIDENTIAL.** Anyone holding the public key can reconstruct the
//! keystream. The mock exists to pin the contract: randomized ciphertexts,
//! bit-for-bit round-trip under the matching private key, tamper detection,
//! and immutability of produced payloads.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use auric_core::{Amount, TokenId};

use crate::error::EncodingError;
use crate::hex;
use crate::keys::{PrivateKey, PublicKey};

/// Nonce length in bytes, prepended to the mock ciphertext.
const NONCE_LEN: usize = 16;

/// The plaintext input to confidential encoding.
///
/// Either a single amount (deposit, withdraw, mint) or the structured
/// record a trade order encrypts (amount, price, token id). Field
/// validation happens at construction of the wrapped types; a negative or
/// non-numeric value is unrepresentable here and can never reach the
/// encoder, let alone the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum PlaintextRecord {
    /// A single confidential amount.
    Amount {
        /// The value, ledger-native unit.
        amount: Amount,
    },
    /// The confidential fields of a trade order.
    Trade {
        /// Order size, ledger-native unit.
        amount: Amount,
        /// Limit price per token, ledger-native unit.
        price: Amount,
        /// The token being traded.
        token_id: TokenId,
    },
}

/// An opaque encrypted payload produced by a [`ConfidentialEncoder`].
///
/// Immutable once created: any change in input requires a new payload.
/// The ciphertext is never human-decodable without the matching private
/// key (under a production backend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    /// Hex-encoded opaque ciphertext blob (nonce-prefixed in the mock).
    pub ciphertext: String,
    /// Reference to the public half of the key pair that encrypted this.
    pub public_key: PublicKey,
    /// Hex-encoded integrity tag over the payload contents.
    pub auth_tag: String,
}

impl EncryptedPayload {
    /// SHA-256 digest of the ciphertext, hex-encoded. This is the payload
    /// reference embedded in proof public inputs.
    pub fn ciphertext_digest(&self) -> String {
        hex::encode(&Sha256::digest(self.ciphertext.as_bytes()))
    }

    /// Structural well-formedness: non-empty ciphertext and a well-formed
    /// public key reference.
    pub fn is_well_formed(&self) -> bool {
        !self.ciphertext.is_empty() && self.public_key.is_well_formed()
    }
}

/// Interface for confidential encoding backends.
///
/// Deliberately open: the mock, a production homomorphic scheme, and
/// failure-injecting test doubles all slot in behind the same contract.
/// `Send + Sync` so a single encoder instance can serve all concurrent
/// submissions.
pub trait ConfidentialEncoder: Send + Sync {
    /// Encode a plaintext record under a session public key.
    ///
    /// Two calls with identical input and key are permitted to produce
    /// different ciphertexts (semantic-security shape); every produced
    /// payload must round-trip under [`ConfidentialEncoder::decode`] with
    /// the matching private key.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::InvalidInput`] for records the backend
    /// cannot represent, [`EncodingError::EncodeFailed`] on internal
    /// failure.
    fn encode(
        &self,
        record: &PlaintextRecord,
        key: &PublicKey,
    ) -> Result<EncryptedPayload, EncodingError>;

    /// Decode a payload with the matching private key.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::KeyMismatch`] if the private key does not
    /// correspond to the payload's public key, and
    /// [`EncodingError::IntegrityCheckFailed`] on any ciphertext or tag
    /// tamper.
    fn decode(
        &self,
        payload: &EncryptedPayload,
        key: &PrivateKey,
    ) -> Result<PlaintextRecord, EncodingError>;
}

/// Transparent mock encoder. See the module docs for the security warning.
#[cfg(feature = "mock")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MockFheEncoder;

#[cfg(feature = "mock")]
impl MockFheEncoder {
    /// Derive the XOR keystream for `len` bytes from the public key and
    /// nonce. Block `i` is `SHA256(public_key_hex || nonce || i_le)`.
    fn keystream(key: &PublicKey, nonce: &[u8], len: usize) -> Vec<u8> {
        let mut stream = Vec::with_capacity(len + 32);
        let mut block: u64 = 0;
        while stream.len() < len {
            let mut hasher = Sha256::new();
            hasher.update(key.as_hex().as_bytes());
            hasher.update(nonce);
            hasher.update(block.to_le_bytes());
            stream.extend_from_slice(&hasher.finalize());
            block += 1;
        }
        stream.truncate(len);
        stream
    }

    /// Integrity tag over (public key ‖ nonce ‖ plaintext).
    fn tag(key: &PublicKey, nonce: &[u8], plaintext: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(key.as_hex().as_bytes());
        hasher.update(nonce);
        hasher.update(plaintext);
        hex::encode(&hasher.finalize())
    }
}

#[cfg(feature = "mock")]
impl ConfidentialEncoder for MockFheEncoder {
    fn encode(
        &self,
        record: &PlaintextRecord,
        key: &PublicKey,
    ) -> Result<EncryptedPayload, EncodingError> {
        if !key.is_well_formed() {
            return Err(EncodingError::InvalidInput(
                "public key reference is malformed".to_string(),
            ));
        }

        let plaintext = serde_json::to_vec(record)
            .map_err(|e| EncodingError::EncodeFailed(format!("record serialization: {e}")))?;

        let mut nonce = [0u8; NONCE_LEN];
        OsRng
            .try_fill_bytes(&mut nonce)
            .map_err(|e| EncodingError::EncodeFailed(format!("nonce entropy: {e}")))?;

        let stream = Self::keystream(key, &nonce, plaintext.len());
        let mut body: Vec<u8> = nonce.to_vec();
        body.extend(plaintext.iter().zip(stream.iter()).map(|(p, k)| p ^ k));

        Ok(EncryptedPayload {
            ciphertext: hex::encode(&body),
            auth_tag: Self::tag(key, &nonce, &plaintext),
            public_key: key.clone(),
        })
    }

    fn decode(
        &self,
        payload: &EncryptedPayload,
        key: &PrivateKey,
    ) -> Result<PlaintextRecord, EncodingError> {
        let public = key.derive_public();
        if public != payload.public_key {
            return Err(EncodingError::KeyMismatch);
        }

        let body = hex::decode(&payload.ciphertext).ok_or_else(|| {
            EncodingError::IntegrityCheckFailed("ciphertext is not valid hex".to_string())
        })?;
        if body.len() < NONCE_LEN {
            return Err(EncodingError::IntegrityCheckFailed(
                "ciphertext shorter than nonce".to_string(),
            ));
        }
        let (nonce, encrypted) = body.split_at(NONCE_LEN);

        let stream = Self::keystream(&public, nonce, encrypted.len());
        let plaintext: Vec<u8> = encrypted
            .iter()
            .zip(stream.iter())
            .map(|(c, k)| c ^ k)
            .collect();

        if Self::tag(&public, nonce, &plaintext) != payload.auth_tag {
            return Err(EncodingError::IntegrityCheckFailed(
                "auth tag mismatch".to_string(),
            ));
        }

        serde_json::from_slice(&plaintext).map_err(|_| {
            EncodingError::IntegrityCheckFailed(
                "decrypted bytes are not a plaintext record".to_string(),
            )
        })
    }
}

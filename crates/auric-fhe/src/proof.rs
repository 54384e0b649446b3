//! # Proof Scheme
//!
//! Produces and checks the non-interactive attestation that binds an
//! [`EncryptedPayload`] to the operation it authorizes. The proof's public
//! inputs embed, in order, the payload's ciphertext digest and the
//! operation kind, so a verifier can tie the proof to exactly this
//! (payload, operation) pair.
//!
//! ## Structural vs. cryptographic validity
//!
//! [`ProofScheme::verify`] checks structure and temporal validity only:
//! the blob decodes to a well-formed statement whose digest matches the
//! public inputs, and the creation timestamp is positive and not in the
//! future. This is necessary but **not sufficient** for soundness: a
//! production backend must additionally verify the zero-knowledge relation
//! itself. [`ProofScheme::verify_binding`] makes the payload/kind
//! association checkable regardless of backend; a real scheme must uphold
//! the same rejection guarantee cryptographically.
//!
//! Verification never errors: malformed input yields `false`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use auric_core::{OperationKind, Timestamp};

use crate::encoder::EncryptedPayload;
use crate::error::ProofGenerationError;
use crate::hex;

/// A non-interactive attestation over an encrypted payload and the
/// operation it authorizes.
///
/// Valid only in association with the exact payload and operation kind it
/// was generated for; a proof reused against any other pair is rejected by
/// [`ProofScheme::verify_binding`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Opaque attestation blob (hex-encoded statement in the mock).
    pub proof_blob: String,
    /// Ordered public inputs: ciphertext digest, operation kind, then
    /// sorted `key=value` public-context pairs.
    pub public_inputs: Vec<String>,
    /// Identifier of the verification key this proof was generated under.
    pub verification_key_id: String,
    /// When the proof was generated.
    pub created_at: Timestamp,
}

/// The decoded statement inside a mock proof blob.
#[derive(Debug, Serialize, Deserialize)]
struct ProofStatement {
    /// SHA-256 digest over the length-prefixed public inputs.
    statement_digest: String,
    /// Creation time in milliseconds, mirrored from the proof envelope.
    created_at_millis: i64,
}

/// Interface for proof backends: generation, structural verification, and
/// binding-aware verification. Open for the same reason as
/// [`ConfidentialEncoder`](crate::ConfidentialEncoder): backends and test
/// doubles interchange without touching callers.
pub trait ProofScheme: Send + Sync {
    /// Generate a proof binding `payload` to `kind`, folding the sorted
    /// `public_context` pairs into the public inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ProofGenerationError::MalformedPayload`] if the payload
    /// has an empty ciphertext or malformed key reference, and
    /// [`ProofGenerationError::GenerationFailed`] on internal failure.
    fn prove(
        &self,
        payload: &EncryptedPayload,
        kind: OperationKind,
        public_context: &BTreeMap<String, String>,
    ) -> Result<Proof, ProofGenerationError>;

    /// Structural and temporal check. Never panics, never errors;
    /// malformed input yields `false`.
    fn verify(&self, proof: &Proof) -> bool;

    /// Binding-aware check: structural validity plus public inputs that
    /// reference exactly this payload's ciphertext digest and this kind.
    fn verify_binding(
        &self,
        proof: &Proof,
        payload: &EncryptedPayload,
        kind: OperationKind,
    ) -> bool;
}

/// Verification key identifier stamped by the mock scheme.
#[cfg(feature = "mock")]
const MOCK_VK_ID: &str = "auric-mock-vk-1";

/// Transparent mock proof scheme.
///
/// The "proof" is the SHA-256 digest of the length-prefixed public inputs
/// wrapped with the creation time. Anyone can recompute it, so it carries
/// no zero-knowledge weight. It exists to pin the structural, temporal,
/// and binding invariants any real backend must also satisfy.
#[cfg(feature = "mock")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProofScheme;

#[cfg(feature = "mock")]
impl MockProofScheme {
    /// Digest the public inputs with length prefixes so that input
    /// boundaries are unambiguous.
    fn statement_digest(public_inputs: &[String]) -> String {
        let mut hasher = Sha256::new();
        for input in public_inputs {
            hasher.update((input.len() as u64).to_le_bytes());
            hasher.update(input.as_bytes());
        }
        hex::encode(&hasher.finalize())
    }

    fn decode_statement(proof: &Proof) -> Option<ProofStatement> {
        let bytes = hex::decode(&proof.proof_blob)?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[cfg(feature = "mock")]
impl ProofScheme for MockProofScheme {
    fn prove(
        &self,
        payload: &EncryptedPayload,
        kind: OperationKind,
        public_context: &BTreeMap<String, String>,
    ) -> Result<Proof, ProofGenerationError> {
        if !payload.is_well_formed() {
            return Err(ProofGenerationError::MalformedPayload(
                "payload has empty ciphertext or malformed public key reference".to_string(),
            ));
        }

        let mut public_inputs = vec![payload.ciphertext_digest(), kind.as_str().to_string()];
        // BTreeMap iteration is key-sorted, keeping input order canonical.
        public_inputs.extend(public_context.iter().map(|(k, v)| format!("{k}={v}")));

        let created_at = Timestamp::now();
        let statement = ProofStatement {
            statement_digest: Self::statement_digest(&public_inputs),
            created_at_millis: created_at.unix_millis(),
        };
        let blob_bytes = serde_json::to_vec(&statement)
            .map_err(|e| ProofGenerationError::GenerationFailed(format!("statement encoding: {e}")))?;

        Ok(Proof {
            proof_blob: hex::encode(&blob_bytes),
            public_inputs,
            verification_key_id: MOCK_VK_ID.to_string(),
            created_at,
        })
    }

    fn verify(&self, proof: &Proof) -> bool {
        let statement = match Self::decode_statement(proof) {
            Some(s) => s,
            None => return false,
        };
        if statement.statement_digest != Self::statement_digest(&proof.public_inputs) {
            return false;
        }
        if statement.created_at_millis != proof.created_at.unix_millis() {
            return false;
        }
        proof.created_at.is_plausible()
    }

    fn verify_binding(
        &self,
        proof: &Proof,
        payload: &EncryptedPayload,
        kind: OperationKind,
    ) -> bool {
        if !self.verify(proof) {
            return false;
        }
        match proof.public_inputs.as_slice() {
            [digest, kind_tag, ..] => {
                *digest == payload.ciphertext_digest() && kind_tag == kind.as_str()
            }
            _ => false,
        }
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::encoder::{ConfidentialEncoder, MockFheEncoder, PlaintextRecord};
    use crate::keys::{KeyMaterialProvider, SessionKeyProvider};
    use auric_core::Amount;

    fn payload_for(amount: &str) -> EncryptedPayload {
        let pair = SessionKeyProvider.obtain_key_pair().unwrap();
        let record = PlaintextRecord::Amount {
            amount: Amount::parse(amount).unwrap(),
        };
        MockFheEncoder.encode(&record, &pair.public).unwrap()
    }

    fn ctx() -> BTreeMap<String, String> {
        BTreeMap::from([("address".to_string(), "0xab".to_string())])
    }

    #[test]
    fn freshly_generated_proof_verifies() {
        let payload = payload_for("0.1");
        let proof = MockProofScheme
            .prove(&payload, OperationKind::Deposit, &ctx())
            .unwrap();
        assert!(MockProofScheme.verify(&proof));
        assert!(MockProofScheme.verify_binding(&proof, &payload, OperationKind::Deposit));
    }

    #[test]
    fn public_inputs_embed_payload_and_kind() {
        let payload = payload_for("1");
        let proof = MockProofScheme
            .prove(&payload, OperationKind::Withdraw, &ctx())
            .unwrap();
        assert_eq!(proof.public_inputs[0], payload.ciphertext_digest());
        assert_eq!(proof.public_inputs[1], "withdraw");
        assert_eq!(proof.public_inputs[2], "address=0xab");
        assert_eq!(proof.verification_key_id, MOCK_VK_ID);
    }

    #[test]
    fn binding_rejects_different_payload() {
        let p1 = payload_for("1");
        let p2 = payload_for("1");
        let proof = MockProofScheme
            .prove(&p1, OperationKind::Deposit, &BTreeMap::new())
            .unwrap();
        assert!(proof.public_inputs[0] != p2.ciphertext_digest());
        assert!(!MockProofScheme.verify_binding(&proof, &p2, OperationKind::Deposit));
    }

    #[test]
    fn binding_rejects_different_kind() {
        let payload = payload_for("1");
        let proof = MockProofScheme
            .prove(&payload, OperationKind::Deposit, &BTreeMap::new())
            .unwrap();
        assert!(!MockProofScheme.verify_binding(&proof, &payload, OperationKind::Withdraw));
    }

    #[test]
    fn tampered_public_inputs_fail_verification() {
        let payload = payload_for("1");
        let mut proof = MockProofScheme
            .prove(&payload, OperationKind::Deposit, &BTreeMap::new())
            .unwrap();
        proof.public_inputs[1] = "withdraw".to_string();
        assert!(!MockProofScheme.verify(&proof));
    }

    #[test]
    fn non_positive_timestamp_invalidates() {
        let payload = payload_for("1");
        let mut proof = MockProofScheme
            .prove(&payload, OperationKind::Deposit, &BTreeMap::new())
            .unwrap();
        let epoch = Timestamp::from_unix_millis(0).unwrap();
        let statement = ProofStatement {
            statement_digest: MockProofScheme::statement_digest(&proof.public_inputs),
            created_at_millis: epoch.unix_millis(),
        };
        proof.proof_blob = hex::encode(&serde_json::to_vec(&statement).unwrap());
        proof.created_at = epoch;
        assert!(!MockProofScheme.verify(&proof));
    }

    #[test]
    fn future_timestamp_invalidates() {
        let payload = payload_for("1");
        let mut proof = MockProofScheme
            .prove(&payload, OperationKind::Deposit, &BTreeMap::new())
            .unwrap();
        let future =
            Timestamp::from_unix_millis(Timestamp::now().unix_millis() + 3_600_000).unwrap();
        let statement = ProofStatement {
            statement_digest: MockProofScheme::statement_digest(&proof.public_inputs),
            created_at_millis: future.unix_millis(),
        };
        proof.proof_blob = hex::encode(&serde_json::to_vec(&statement).unwrap());
        proof.created_at = future;
        assert!(!MockProofScheme.verify(&proof));
    }

    #[test]
    fn malformed_blob_yields_false_not_panic() {
        let payload = payload_for("1");
        let mut proof = MockProofScheme
            .prove(&payload, OperationKind::Deposit, &BTreeMap::new())
            .unwrap();
        proof.proof_blob = "not-hex-at-all".to_string();
        assert!(!MockProofScheme.verify(&proof));

        proof.proof_blob = hex::encode(b"not json");
        assert!(!MockProofScheme.verify(&proof));
    }

    #[test]
    fn malformed_payload_fails_generation() {
        let mut payload = payload_for("1");
        payload.ciphertext.clear();
        let err = MockProofScheme
            .prove(&payload, OperationKind::Deposit, &BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, ProofGenerationError::MalformedPayload(_)));
    }

    #[test]
    fn proof_serde_roundtrip() {
        let payload = payload_for("1");
        let proof = MockProofScheme
            .prove(&payload, OperationKind::MintToken, &ctx())
            .unwrap();
        let json = serde_json::to_string(&proof).unwrap();
        let back: Proof = serde_json::from_str(&json).unwrap();
        assert_eq!(proof, back);
        assert!(MockProofScheme.verify(&back));
    }
}

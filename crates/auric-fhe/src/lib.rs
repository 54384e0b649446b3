#![deny(missing_docs)]

//! # auric-fhe — Confidential Encoding Layer
//!
//! Turns validated plaintext records into encrypted payloads and binds them
//! to the operations they authorize with non-interactive proofs. The ledger
//! only ever sees ciphertext; the numeric parameters of an operation never
//! leave this layer in the clear.
//!
//! ## Architecture
//!
//! The [`ConfidentialEncoder`] and [`ProofScheme`] traits define the
//! interface for all backends. They are open, like
//! [`KeyMaterialProvider`]: the mock constructions, a production backend,
//! and failure-injecting test doubles all interchange behind the same
//! contract without touching callers.
//!
//! The default `mock` feature ships [`MockFheEncoder`] and
//! [`MockProofScheme`]: transparent constructions that satisfy every
//! structural and binding invariant of the contract while providing **no
//! cryptographic confidentiality**. A production backend (a real
//! homomorphic scheme plus a zero-knowledge circuit) replaces them behind
//! the same traits without changing callers.
//!
//! ## Invariants (backend-independent)
//!
//! - Encoding is randomized: identical input and key may produce different
//!   ciphertexts, and always round-trips bit-for-bit under the matching
//!   private key.
//! - A proof is valid only for the exact payload and operation kind it was
//!   generated over; verification of a proof against any other pair must
//!   reject.
//! - Proof timestamps are stamped at generation; a non-positive or future
//!   timestamp invalidates the proof.

pub mod encoder;
pub mod error;
pub(crate) mod hex;
pub mod keys;
pub mod proof;

#[cfg(feature = "mock")]
pub use encoder::MockFheEncoder;
pub use encoder::{ConfidentialEncoder, EncryptedPayload, PlaintextRecord};
pub use error::{EncodingError, KeyGenerationError, ProofGenerationError};
pub use keys::{KeyMaterialProvider, KeyPair, PrivateKey, PublicKey, SessionKeyProvider};
#[cfg(feature = "mock")]
pub use proof::MockProofScheme;
pub use proof::{Proof, ProofScheme};

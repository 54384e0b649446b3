//! # Submission States and Failure Taxonomy
//!
//! [`SubmissionState`] is the observable position of one in-flight
//! submission attempt. Exactly one state exists per attempt at any time;
//! transitions are monotonic forward and the two terminal states have no
//! outgoing transitions.
//!
//! The canonical UPPER-case names appear in logs and the transition log
//! that tests assert against.

use serde::{Deserialize, Serialize};

use auric_gateway::TxRef;

/// Which step failed, and why: the machine-readable half of a terminal
/// `Failed` state. The human-readable message travels alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitErrorKind {
    /// Bad amount, price, token id, or duration, caught before any key
    /// material was obtained.
    InvalidInput,
    /// The entropy/key source was unavailable.
    KeyGeneration,
    /// The confidential encoder failed.
    Encoding,
    /// Proof generation failed.
    ProofGeneration,
    /// Self-verification of the fresh proof failed; the submission was
    /// aborted before reaching the network.
    ProofInvalid,
    /// No session address; the wallet-connection collaborator has not
    /// supplied one.
    WalletNotConnected,
    /// The ledger received the submission and declined it.
    GatewayRejected,
    /// Transport-level failure talking to the ledger.
    Network,
    /// The bounded submit wait elapsed. Unknown outcome; reconcile via a
    /// balance read, never assume the operation did not land.
    Timeout,
}

impl std::fmt::Display for SubmitErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InvalidInput => "invalid_input",
            Self::KeyGeneration => "key_generation",
            Self::Encoding => "encoding",
            Self::ProofGeneration => "proof_generation",
            Self::ProofInvalid => "proof_invalid",
            Self::WalletNotConnected => "wallet_not_connected",
            Self::GatewayRejected => "gateway_rejected",
            Self::Network => "network",
            Self::Timeout => "timeout",
        };
        write!(f, "{s}")
    }
}

/// Observable state of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    /// Constructed, not yet started.
    Idle,
    /// Obtaining key material and producing ciphertext.
    Encrypting,
    /// Generating and self-verifying the proof.
    Proving,
    /// The gateway call is in flight. From here the attempt runs to a
    /// terminal state; cancellation is no longer exposed.
    Submitting,
    /// The ledger confirmed the operation. Terminal.
    Settled {
        /// The ledger-issued transaction reference.
        tx_ref: TxRef,
    },
    /// The attempt failed. Terminal; retry requires a brand-new operation
    /// and submitter.
    Failed {
        /// Which step failed.
        kind: SubmitErrorKind,
        /// Human-readable cause, preserved verbatim from its origin.
        message: String,
    },
}

impl SubmissionState {
    /// The canonical state name for logs and transition records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Encrypting => "ENCRYPTING",
            Self::Proving => "PROVING",
            Self::Submitting => "SUBMITTING",
            Self::Settled { .. } => "SETTLED",
            Self::Failed { .. } => "FAILED",
        }
    }

    /// Whether this state has no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled { .. } | Self::Failed { .. })
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

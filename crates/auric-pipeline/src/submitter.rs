//! # The Operation Submitter
//!
//! Drives one submission attempt through the pipeline: validate, obtain
//! key material, encode, prove, self-verify, dispatch to the ledger
//! gateway, and schedule the post-settlement balance refresh.
//!
//! ## Lifecycle
//!
//! A submitter is constructed per attempt and consumed by
//! [`OperationSubmitter::submit`]. It cannot be restarted: terminal states
//! have no outgoing transitions, and retrying means a new operation and a
//! new submitter. Dropping the returned future before the `SUBMITTING`
//! transition abandons the attempt with no side effects, since nothing has
//! reached the network. Once `SUBMITTING` begins, the flow runs to a
//! terminal state; the gateway call itself is irrevocable.
//!
//! ## Observability
//!
//! Every transition is published on a `tokio::sync::watch` channel
//! (subscribe via [`OperationSubmitter::state`]) and traced. The final
//! [`SubmissionOutcome`] carries the full transition log.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use auric_core::{Operation, OperationKind};
use auric_fhe::{
    ConfidentialEncoder, EncodingError, KeyMaterialProvider, MockFheEncoder, MockProofScheme,
    PlaintextRecord, ProofScheme, SessionKeyProvider,
};
use auric_gateway::{GatewayConfig, GatewayError, LedgerGateway, SessionAddress, TxRef};

use crate::context::{BalanceCache, SessionContext};
use crate::state::{SubmissionState, SubmitErrorKind};

/// Tunables for the submission flow.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Bound on the whole `SUBMITTING` step. Exceeding it yields
    /// `Failed { Timeout }` with unknown-outcome semantics.
    pub submit_timeout: Duration,
    /// Delay before the post-settlement balance refresh, tolerating
    /// eventual consistency of the read path.
    pub balance_refresh_delay: Duration,
    /// Upper bound on trade-order durations, in seconds.
    pub max_order_duration_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            submit_timeout: Duration::from_secs(30),
            balance_refresh_delay: Duration::from_millis(2000),
            max_order_duration_secs: 86_400,
        }
    }
}

impl From<&GatewayConfig> for PipelineConfig {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            submit_timeout: Duration::from_secs(config.submit_timeout_secs),
            balance_refresh_delay: Duration::from_millis(config.balance_refresh_delay_ms),
            max_order_duration_secs: config.max_order_duration_secs,
        }
    }
}

/// The result of one consumed submission attempt.
#[derive(Debug)]
pub struct SubmissionOutcome {
    /// The terminal state (`SETTLED` or `FAILED`).
    pub state: SubmissionState,
    /// Every state this attempt passed through, in order, starting at
    /// `IDLE`.
    pub transition_log: Vec<&'static str>,
    /// The spawned post-settlement balance refresh, when one was
    /// scheduled (settled deposits and withdrawals). Best-effort; tests
    /// may await it for determinism.
    pub balance_refresh: Option<JoinHandle<()>>,
}

impl SubmissionOutcome {
    /// Whether the attempt settled.
    pub fn is_settled(&self) -> bool {
        matches!(self.state, SubmissionState::Settled { .. })
    }

    /// The transaction reference, if settled.
    pub fn tx_ref(&self) -> Option<&TxRef> {
        match &self.state {
            SubmissionState::Settled { tx_ref } => Some(tx_ref),
            _ => None,
        }
    }

    /// The failure kind, if failed.
    pub fn error_kind(&self) -> Option<SubmitErrorKind> {
        match &self.state {
            SubmissionState::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// One submission attempt: session context, component handles, and the
/// forward-only state driver.
///
/// Generic over the gateway and the confidential-layer components so that
/// tests can count calls or inject failures at any step, and a real
/// FHE/ZK backend can slot in behind the same traits. The type defaults
/// wire the mock backends.
pub struct OperationSubmitter<
    G,
    P = SessionKeyProvider,
    E = MockFheEncoder,
    S = MockProofScheme,
> {
    session: SessionContext,
    gateway: Arc<G>,
    key_provider: P,
    encoder: E,
    proofs: S,
    balance_cache: BalanceCache,
    config: PipelineConfig,
    state_tx: watch::Sender<SubmissionState>,
    log: Vec<&'static str>,
}

impl<G> OperationSubmitter<G>
where
    G: LedgerGateway + 'static,
{
    /// A submitter wired with the default mock confidential backends.
    pub fn new(
        session: SessionContext,
        gateway: Arc<G>,
        balance_cache: BalanceCache,
        config: PipelineConfig,
    ) -> Self {
        Self::with_components(
            session,
            gateway,
            SessionKeyProvider,
            MockFheEncoder,
            MockProofScheme,
            balance_cache,
            config,
        )
    }
}

impl<G, P, E, S> OperationSubmitter<G, P, E, S>
where
    G: LedgerGateway + 'static,
    P: KeyMaterialProvider,
    E: ConfidentialEncoder,
    S: ProofScheme,
{
    /// A submitter with explicit confidential-layer components.
    pub fn with_components(
        session: SessionContext,
        gateway: Arc<G>,
        key_provider: P,
        encoder: E,
        proofs: S,
        balance_cache: BalanceCache,
        config: PipelineConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(SubmissionState::Idle);
        Self {
            session,
            gateway,
            key_provider,
            encoder,
            proofs,
            balance_cache,
            config,
            state_tx,
            log: vec![SubmissionState::Idle.name()],
        }
    }

    /// Subscribe to state transitions for this attempt.
    pub fn state(&self) -> watch::Receiver<SubmissionState> {
        self.state_tx.subscribe()
    }

    /// The shared balance read model this submitter refreshes.
    pub fn balance_cache(&self) -> &BalanceCache {
        &self.balance_cache
    }

    fn advance(&mut self, state: SubmissionState) {
        let from = self.state_tx.borrow().name();
        tracing::info!(from, to = state.name(), "submission state transition");
        self.log.push(state.name());
        let _ = self.state_tx.send(state);
    }

    fn fail(mut self, kind: SubmitErrorKind, message: String) -> SubmissionOutcome {
        tracing::warn!(%kind, %message, "submission failed");
        let state = SubmissionState::Failed { kind, message };
        self.advance(state.clone());
        SubmissionOutcome {
            state,
            transition_log: self.log,
            balance_refresh: None,
        }
    }

    /// Run the attempt to a terminal state, consuming the submitter.
    ///
    /// Validation happens before any component is touched: an invalid
    /// operation or a disconnected wallet costs zero key-provider,
    /// encoder, prover, and gateway calls.
    pub async fn submit(mut self, operation: Operation) -> SubmissionOutcome {
        let kind = operation.kind();

        // Fail fast with no encoding work when no wallet is connected.
        let address = match self.session.address.clone() {
            Some(address) => address,
            None => {
                return self.fail(
                    SubmitErrorKind::WalletNotConnected,
                    "no session address; connect a wallet before submitting".to_string(),
                )
            }
        };

        if let Err(e) = operation.validate(self.config.max_order_duration_secs) {
            return self.fail(SubmitErrorKind::InvalidInput, e.to_string());
        }

        // ── ENCRYPTING ───────────────────────────────────────────────
        self.advance(SubmissionState::Encrypting);

        let key_pair = match self.key_provider.obtain_key_pair() {
            Ok(pair) => pair,
            Err(e) => return self.fail(SubmitErrorKind::KeyGeneration, e.to_string()),
        };

        let record = plaintext_record(&operation);
        let payload = match self.encoder.encode(&record, &key_pair.public) {
            Ok(payload) => payload,
            Err(e @ EncodingError::InvalidInput(_)) => {
                return self.fail(SubmitErrorKind::InvalidInput, e.to_string())
            }
            Err(e) => return self.fail(SubmitErrorKind::Encoding, e.to_string()),
        };

        // ── PROVING ──────────────────────────────────────────────────
        self.advance(SubmissionState::Proving);

        let context = public_context(&address, &operation);
        let proof = match self.proofs.prove(&payload, kind, &context) {
            Ok(proof) => proof,
            Err(e) => return self.fail(SubmitErrorKind::ProofGeneration, e.to_string()),
        };

        // Self-check before spending a network round trip: a proof that
        // does not verify against its own payload and kind is never sent.
        if !self.proofs.verify_binding(&proof, &payload, kind) {
            return self.fail(
                SubmitErrorKind::ProofInvalid,
                "freshly generated proof failed self-verification".to_string(),
            );
        }

        // ── SUBMITTING ───────────────────────────────────────────────
        self.advance(SubmissionState::Submitting);

        let submit_timeout = self.config.submit_timeout;
        let dispatch = async {
            match &operation {
                Operation::Deposit { amount } => {
                    self.gateway
                        .submit_deposit(&address, &payload, &proof, *amount)
                        .await
                }
                Operation::Withdraw { .. } => {
                    self.gateway.submit_withdraw(&address, &payload, &proof).await
                }
                Operation::MintToken { .. } => {
                    self.gateway.submit_mint(&address, &payload, &proof).await
                }
                Operation::PlaceTradeOrder {
                    token_id,
                    side,
                    duration,
                    ..
                } => {
                    self.gateway
                        .submit_trade_order(&address, *token_id, &payload, &proof, *side, *duration)
                        .await
                }
            }
        };

        let dispatched = tokio::time::timeout(submit_timeout, dispatch).await;
        let tx_ref = match dispatched {
            Ok(Ok(tx_ref)) => tx_ref,
            Ok(Err(e)) => {
                let kind = match &e {
                    GatewayError::Rejected { .. } => SubmitErrorKind::GatewayRejected,
                    GatewayError::Network { .. } => SubmitErrorKind::Network,
                    GatewayError::Timeout { .. } => SubmitErrorKind::Timeout,
                };
                return self.fail(kind, e.to_string());
            }
            Err(_) => {
                return self.fail(
                    SubmitErrorKind::Timeout,
                    format!(
                        "submit exceeded {}ms; outcome unknown, reconcile via a balance read",
                        submit_timeout.as_millis()
                    ),
                )
            }
        };

        // ── SETTLED ──────────────────────────────────────────────────
        self.advance(SubmissionState::Settled {
            tx_ref: tx_ref.clone(),
        });
        tracing::info!(operation = %kind, tx_ref = %tx_ref, "submission settled");

        // Deposits and withdrawals move the balance; refresh the read
        // model after the configured delay. Best-effort only: a failed
        // refresh never reverts a settled state.
        let balance_refresh = match kind {
            OperationKind::Deposit | OperationKind::Withdraw => {
                Some(self.spawn_balance_refresh(address))
            }
            OperationKind::MintToken | OperationKind::PlaceTradeOrder => None,
        };

        SubmissionOutcome {
            state: SubmissionState::Settled { tx_ref },
            transition_log: self.log,
            balance_refresh,
        }
    }

    fn spawn_balance_refresh(&self, address: SessionAddress) -> JoinHandle<()> {
        let gateway = Arc::clone(&self.gateway);
        let cache = self.balance_cache.clone();
        let delay = self.config.balance_refresh_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match gateway.confidential_balance(&address).await {
                Ok(value) => cache.set(value),
                Err(e) => {
                    tracing::warn!("post-settlement balance refresh failed: {e}");
                }
            }
        })
    }
}

/// The confidential record an operation encrypts: a bare amount, or the
/// structured trade record.
fn plaintext_record(operation: &Operation) -> PlaintextRecord {
    match operation {
        Operation::Deposit { amount }
        | Operation::Withdraw { amount }
        | Operation::MintToken { amount } => PlaintextRecord::Amount { amount: *amount },
        Operation::PlaceTradeOrder {
            amount,
            price,
            token_id,
            ..
        } => PlaintextRecord::Trade {
            amount: *amount,
            price: *price,
            token_id: *token_id,
        },
    }
}

/// Public proof context: the session address always, plus the public
/// routing fields for trade orders.
fn public_context(address: &SessionAddress, operation: &Operation) -> BTreeMap<String, String> {
    let mut context = BTreeMap::from([("address".to_string(), address.to_string())]);
    if let Operation::PlaceTradeOrder {
        token_id,
        side,
        duration,
        ..
    } = operation
    {
        context.insert("token_id".to_string(), token_id.to_string());
        context.insert("side".to_string(), side.to_string());
        context.insert("duration_secs".to_string(), duration.as_secs().to_string());
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_original_refetch_delay() {
        let config = PipelineConfig::default();
        assert_eq!(config.balance_refresh_delay, Duration::from_millis(2000));
        assert_eq!(config.max_order_duration_secs, 86_400);
    }

    #[test]
    fn pipeline_config_from_gateway_config() {
        let gw = GatewayConfig::local_mock(8545, "t").unwrap();
        let config = PipelineConfig::from(&gw);
        assert_eq!(config.submit_timeout, Duration::from_secs(5));
        assert_eq!(config.balance_refresh_delay, Duration::from_millis(50));
    }

    #[test]
    fn outcome_accessors() {
        let settled = SubmissionOutcome {
            state: SubmissionState::Settled {
                tx_ref: TxRef::from_raw("tx-3"),
            },
            transition_log: vec!["IDLE", "ENCRYPTING", "PROVING", "SUBMITTING", "SETTLED"],
            balance_refresh: None,
        };
        assert!(settled.is_settled());
        assert_eq!(settled.tx_ref().unwrap().as_str(), "tx-3");
        assert!(settled.error_kind().is_none());

        let failed = SubmissionOutcome {
            state: SubmissionState::Failed {
                kind: SubmitErrorKind::InvalidInput,
                message: "amount must be positive".to_string(),
            },
            transition_log: vec!["IDLE", "FAILED"],
            balance_refresh: None,
        };
        assert!(!failed.is_settled());
        assert_eq!(failed.error_kind(), Some(SubmitErrorKind::InvalidInput));
    }
}

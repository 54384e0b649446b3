//! # In-Memory Mock Ledger
//!
//! A deterministic in-process [`LedgerGateway`] for tests and demos. It
//! records every submission, mints distinct transaction references,
//! maintains per-address running balances from the public value transfers
//! (deposits only: withdraw amounts travel inside the ciphertext, which
//! the mock never decrypts), and keeps a call log so tests can assert
//! exactly how many gateway calls a pipeline run performed (including
//! zero).
//!
//! Failure scripting: [`InMemoryLedger::reject_next`] declines the next
//! submission with a given reason; [`InMemoryLedger::set_submit_delay`]
//! stalls submissions to exercise timeout paths.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

use auric_core::{Amount, OrderDuration, Side, TokenId};
use auric_fhe::{EncryptedPayload, Proof};

use crate::error::GatewayError;
use crate::gateway::LedgerGateway;
use crate::types::{ConfidentialValue, LedgerEvent, SessionAddress, TxRef};

/// A submission as the mock ledger received it.
#[derive(Debug, Clone)]
pub struct RecordedSubmission {
    /// Which gateway method was called.
    pub method: &'static str,
    /// The submitting address.
    pub address: SessionAddress,
    /// The ciphertext digest of the submitted payload.
    pub ciphertext_digest: String,
    /// The public inputs of the submitted proof.
    pub proof_public_inputs: Vec<String>,
    /// The minted transaction reference.
    pub tx_ref: TxRef,
}

#[derive(Default)]
struct Inner {
    reject_next: Option<String>,
    submit_delay: Option<Duration>,
    balances: HashMap<String, u128>,
    submissions: Vec<RecordedSubmission>,
    events: Vec<LedgerEvent>,
    call_log: Vec<&'static str>,
    price: String,
    total_issued: u128,
}

/// Deterministic in-process ledger. Cheap to construct per test; share via
/// `Arc` across concurrent submitters.
pub struct InMemoryLedger {
    inner: Mutex<Inner>,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedger {
    /// A fresh empty ledger with a fixed price reference.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                price: "0.05".to_string(),
                ..Inner::default()
            }),
        }
    }

    /// Decline the next submission with `reason`. One-shot.
    pub fn reject_next(&self, reason: &str) {
        self.inner.lock().reject_next = Some(reason.to_string());
    }

    /// Stall every submission by `delay` (for timeout tests).
    pub fn set_submit_delay(&self, delay: Duration) {
        self.inner.lock().submit_delay = Some(delay);
    }

    /// Every call made against this ledger, in order, including reads.
    pub fn call_log(&self) -> Vec<&'static str> {
        self.inner.lock().call_log.clone()
    }

    /// Total number of gateway calls (submissions and reads).
    pub fn call_count(&self) -> usize {
        self.inner.lock().call_log.len()
    }

    /// All recorded submissions, in arrival order.
    pub fn submissions(&self) -> Vec<RecordedSubmission> {
        self.inner.lock().submissions.clone()
    }

    /// All emitted settlement events, in order.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.inner.lock().events.clone()
    }

    /// The ledger-side balance for an address, in minor units. Test
    /// oracle only; the gateway contract exposes balances solely as
    /// display-only [`ConfidentialValue`]s. Tracks public deposit values
    /// only, since no other submission carries a public amount.
    pub fn balance_minor_units(&self, address: &SessionAddress) -> u128 {
        self.inner
            .lock()
            .balances
            .get(address.as_str())
            .copied()
            .unwrap_or(0)
    }

    fn scripted_delay(&self) -> Option<Duration> {
        self.inner.lock().submit_delay
    }

    /// Common submission path: honor scripting, record, mint a reference.
    fn accept(
        &self,
        method: &'static str,
        address: &SessionAddress,
        payload: &EncryptedPayload,
        proof: &Proof,
    ) -> Result<TxRef, GatewayError> {
        let mut inner = self.inner.lock();
        inner.call_log.push(method);
        if let Some(reason) = inner.reject_next.take() {
            return Err(GatewayError::Rejected { reason });
        }
        let tx_ref = TxRef::new_random();
        inner.submissions.push(RecordedSubmission {
            method,
            address: address.clone(),
            ciphertext_digest: payload.ciphertext_digest(),
            proof_public_inputs: proof.public_inputs.clone(),
            tx_ref: tx_ref.clone(),
        });
        Ok(tx_ref)
    }

    fn record_read(&self, method: &'static str) {
        self.inner.lock().call_log.push(method);
    }
}

impl LedgerGateway for InMemoryLedger {
    async fn submit_deposit(
        &self,
        address: &SessionAddress,
        payload: &EncryptedPayload,
        proof: &Proof,
        value: Amount,
    ) -> Result<TxRef, GatewayError> {
        if let Some(delay) = self.scripted_delay() {
            tokio::time::sleep(delay).await;
        }
        let tx_ref = self.accept("submit_deposit", address, payload, proof)?;
        let mut inner = self.inner.lock();
        *inner.balances.entry(address.as_str().to_string()).or_default() +=
            value.minor_units();
        inner.events.push(LedgerEvent::GoldDeposited {
            address: address.clone(),
            amount: value,
        });
        Ok(tx_ref)
    }

    async fn submit_withdraw(
        &self,
        address: &SessionAddress,
        payload: &EncryptedPayload,
        proof: &Proof,
    ) -> Result<TxRef, GatewayError> {
        if let Some(delay) = self.scripted_delay() {
            tokio::time::sleep(delay).await;
        }
        let tx_ref = self.accept("submit_withdraw", address, payload, proof)?;
        // The withdrawn amount exists only inside the ciphertext and the
        // mock never decrypts. The event carries a zero placeholder and
        // the public balance oracle is left untouched.
        self.inner.lock().events.push(LedgerEvent::GoldWithdrawn {
            address: address.clone(),
            amount: Amount::ZERO,
        });
        Ok(tx_ref)
    }

    async fn submit_mint(
        &self,
        address: &SessionAddress,
        payload: &EncryptedPayload,
        proof: &Proof,
    ) -> Result<TxRef, GatewayError> {
        if let Some(delay) = self.scripted_delay() {
            tokio::time::sleep(delay).await;
        }
        let tx_ref = self.accept("submit_mint", address, payload, proof)?;
        self.inner.lock().total_issued += 1;
        Ok(tx_ref)
    }

    async fn submit_trade_order(
        &self,
        address: &SessionAddress,
        _token_id: TokenId,
        payload: &EncryptedPayload,
        proof: &Proof,
        _side: Side,
        _duration: OrderDuration,
    ) -> Result<TxRef, GatewayError> {
        if let Some(delay) = self.scripted_delay() {
            tokio::time::sleep(delay).await;
        }
        self.accept("submit_trade_order", address, payload, proof)
    }

    async fn confidential_balance(
        &self,
        address: &SessionAddress,
    ) -> Result<ConfidentialValue, GatewayError> {
        self.record_read("confidential_balance");
        let minor = self.balance_minor_units(address);
        Ok(ConfidentialValue::from_display(
            Amount::from_minor_units(minor).format_units(),
        ))
    }

    async fn current_price(&self) -> Result<ConfidentialValue, GatewayError> {
        self.record_read("current_price");
        Ok(ConfidentialValue::from_display(
            self.inner.lock().price.clone(),
        ))
    }

    async fn total_issued(&self) -> Result<ConfidentialValue, GatewayError> {
        self.record_read("total_issued");
        Ok(ConfidentialValue::from_display(
            self.inner.lock().total_issued.to_string(),
        ))
    }
}

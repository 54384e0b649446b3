//! # The Ledger Gateway Trait
//!
//! Abstracts the remote value-holding service of record. The ledger is the
//! sole arbiter of ordering and final state; implementations must not
//! assume their own call order matches settlement order.
//!
//! Implementations must be `Send + Sync` so a single gateway handle can be
//! shared behind an `Arc` across concurrent submissions. Methods return
//! `impl Future + Send` so callers can await them from spawned tasks; this
//! keeps the trait free of an external async-trait shim while remaining
//! implementable with plain `async fn`.

use std::future::Future;

use auric_core::{Amount, OrderDuration, Side, TokenId};
use auric_fhe::{EncryptedPayload, Proof};

use crate::error::GatewayError;
use crate::types::{ConfidentialValue, SessionAddress, TxRef};

/// Call contract of the remote ledger.
///
/// One method per operation kind, mirroring the fixed wire contract:
/// deposits carry the public value transfer; trade orders carry the public
/// routing fields (token id, side, duration) alongside the ciphertext.
/// Every submission is atomic: (payload, proof, public inputs) travel
/// together and settle or fail as one unit.
pub trait LedgerGateway: Send + Sync {
    /// Deposit `value` native units, authorized by (payload, proof).
    /// Emits `GoldDeposited(user, amount)` on settlement.
    fn submit_deposit(
        &self,
        address: &SessionAddress,
        payload: &EncryptedPayload,
        proof: &Proof,
        value: Amount,
    ) -> impl Future<Output = Result<TxRef, GatewayError>> + Send;

    /// Withdraw, authorized by (payload, proof). No public value transfer.
    /// Emits `GoldWithdrawn(user, amount)` on settlement.
    fn submit_withdraw(
        &self,
        address: &SessionAddress,
        payload: &EncryptedPayload,
        proof: &Proof,
    ) -> impl Future<Output = Result<TxRef, GatewayError>> + Send;

    /// Mint a vault-backed token, authorized by (payload, proof).
    fn submit_mint(
        &self,
        address: &SessionAddress,
        payload: &EncryptedPayload,
        proof: &Proof,
    ) -> impl Future<Output = Result<TxRef, GatewayError>> + Send;

    /// Place a confidential trade order. The size and price live only in
    /// the ciphertext; token id, side, and duration are public routing
    /// fields.
    fn submit_trade_order(
        &self,
        address: &SessionAddress,
        token_id: TokenId,
        payload: &EncryptedPayload,
        proof: &Proof,
        side: Side,
        duration: OrderDuration,
    ) -> impl Future<Output = Result<TxRef, GatewayError>> + Send;

    /// The caller's confidential balance reference. Display-only.
    fn confidential_balance(
        &self,
        address: &SessionAddress,
    ) -> impl Future<Output = Result<ConfidentialValue, GatewayError>> + Send;

    /// The current price reference. Display-only.
    fn current_price(&self)
        -> impl Future<Output = Result<ConfidentialValue, GatewayError>> + Send;

    /// The total-issued reference. Display-only.
    fn total_issued(&self)
        -> impl Future<Output = Result<ConfidentialValue, GatewayError>> + Send;
}

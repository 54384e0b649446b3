//! # Session Context and the Balance Read Model
//!
//! Wallet and gateway state travel as explicit context handed to each
//! submitter at construction. No hidden mutable globals.

use std::sync::Arc;

use parking_lot::RwLock;

use auric_gateway::{ConfidentialValue, SessionAddress};

/// Explicit per-session context passed into each submitter.
///
/// The address is supplied by the wallet-connection collaborator and may
/// be absent; every submission checks it first and fails fast with
/// `WalletNotConnected` before any encoding work occurs.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// The active public account address, if a wallet is connected.
    pub address: Option<SessionAddress>,
}

impl SessionContext {
    /// A session with a connected wallet.
    pub fn connected(address: SessionAddress) -> Self {
        Self {
            address: Some(address),
        }
    }

    /// A session with no wallet connected.
    pub fn disconnected() -> Self {
        Self::default()
    }
}

/// Shared read model for the confidential balance reference.
///
/// Refreshed only from gateway reads, never computed locally from a
/// submitted amount, because the gateway is the source of truth and the
/// read path is eventually consistent with the write path. Submissions
/// schedule a refresh after a short fixed delay post-settlement; a failed
/// refresh leaves the previous value in place and never affects the
/// submission outcome.
#[derive(Debug, Clone, Default)]
pub struct BalanceCache {
    inner: Arc<RwLock<Option<ConfidentialValue>>>,
}

impl BalanceCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last gateway-reported balance, if any refresh has landed.
    pub fn get(&self) -> Option<ConfidentialValue> {
        self.inner.read().clone()
    }

    /// Record a gateway-reported balance.
    pub(crate) fn set(&self, value: ConfidentialValue) {
        *self.inner.write() = Some(value);
    }
}

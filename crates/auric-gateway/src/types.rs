//! Typed values crossing the gateway boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use auric_core::Amount;

/// Errors validating a session address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The address is empty or not 0x-prefixed hex.
    #[error("invalid session address \"{0}\" (expected 0x-prefixed hex)")]
    Invalid(String),
}

/// The active public account address, supplied by the wallet-connection
/// collaborator. Absence of an address fails submissions fast with
/// `WalletNotConnected` before any encoding work occurs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionAddress(String);

impl SessionAddress {
    /// Validate and construct a session address.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Invalid`] unless the input is `0x` followed
    /// by at least one hex digit.
    pub fn new(raw: &str) -> Result<Self, AddressError> {
        let hex_part = raw
            .strip_prefix("0x")
            .ok_or_else(|| AddressError::Invalid(raw.to_string()))?;
        if hex_part.is_empty() || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AddressError::Invalid(raw.to_string()));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// The address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque transaction reference returned by the ledger on acceptance.
///
/// Two independent submissions always yield distinct references; the
/// pipeline never deduplicates by content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxRef(String);

impl TxRef {
    /// Wrap a ledger-issued reference string.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Mint a fresh random reference (mock ledger, tests).
    pub fn new_random() -> Self {
        Self(format!("tx-{}", Uuid::new_v4()))
    }

    /// The reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TxRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A display-only reference to a confidential value (balance, price,
/// total issued).
///
/// Deliberately exposes no numeric accessor: values representing
/// confidential amounts must not be used in arithmetic outside the
/// ledger/encoder boundary. Callers format it for display, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidentialValue(String);

impl ConfidentialValue {
    /// Wrap a gateway-reported value.
    pub fn from_display(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl std::fmt::Display for ConfidentialValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Events the ledger emits on settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Native-unit value entered the vault.
    GoldDeposited {
        /// The depositing account.
        address: SessionAddress,
        /// The publicly transferred amount.
        amount: Amount,
    },
    /// Native-unit value left the vault.
    GoldWithdrawn {
        /// The withdrawing account.
        address: SessionAddress,
        /// The withdrawn amount as reported by the ledger.
        amount: Amount,
    },
    /// A confidential trade settled between two accounts.
    GoldTraded {
        /// The selling account.
        from: SessionAddress,
        /// The buying account.
        to: SessionAddress,
    },
}

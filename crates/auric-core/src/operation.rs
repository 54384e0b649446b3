//! # Operations
//!
//! [`Operation`] is the tagged variant a user submits through the pipeline:
//! deposit, withdraw, mint, or a trade order. It is immutable once
//! constructed; a failed submission is retried by constructing a new one.
//!
//! [`OperationKind`] is the public tag a proof binds to. Its canonical
//! snake_case names appear in proof public inputs and must stay stable.

use serde::{Deserialize, Serialize};

use crate::amount::{Amount, OrderDuration, TokenId};
use crate::error::ValidationError;

/// The direction of a trade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Buy the token against the native unit.
    Buy,
    /// Sell the token for the native unit.
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Tag identifying the kind of operation a proof authorizes.
///
/// Embedded verbatim in proof public inputs; the canonical names are part
/// of the proof binding contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Deposit native-unit value into the custodial vault.
    Deposit,
    /// Withdraw previously deposited value.
    Withdraw,
    /// Mint a vault-backed token.
    MintToken,
    /// Place a confidential trade order.
    PlaceTradeOrder,
}

impl OperationKind {
    /// The canonical snake_case name used in proof public inputs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::MintToken => "mint_token",
            Self::PlaceTradeOrder => "place_trade_order",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-intended confidential action with validated parameters.
///
/// The numeric parameters are confidential end-to-end: they leave this
/// process only as ciphertext. The variants mirror the ledger's call
/// contract; `PlaceTradeOrder` carries the extra public routing fields
/// (token id, side, duration) the ledger needs to book an order without
/// learning its size or price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    /// Deposit `amount` of native-unit value.
    Deposit {
        /// The deposit amount, ledger-native unit.
        amount: Amount,
    },
    /// Withdraw `amount` of native-unit value.
    Withdraw {
        /// The withdrawal amount, ledger-native unit.
        amount: Amount,
    },
    /// Mint a vault-backed token worth `amount`.
    MintToken {
        /// The backing amount, ledger-native unit.
        amount: Amount,
    },
    /// Place a confidential trade order.
    PlaceTradeOrder {
        /// The token being traded.
        token_id: TokenId,
        /// Order size, ledger-native unit.
        amount: Amount,
        /// Limit price per token, ledger-native unit.
        price: Amount,
        /// Buy or sell.
        side: Side,
        /// Order lifetime.
        duration: OrderDuration,
    },
}

impl Operation {
    /// The kind tag for this operation.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Deposit { .. } => OperationKind::Deposit,
            Self::Withdraw { .. } => OperationKind::Withdraw,
            Self::MintToken { .. } => OperationKind::MintToken,
            Self::PlaceTradeOrder { .. } => OperationKind::PlaceTradeOrder,
        }
    }

    /// The confidential amount carried by this operation.
    pub fn amount(&self) -> Amount {
        match self {
            Self::Deposit { amount }
            | Self::Withdraw { amount }
            | Self::MintToken { amount }
            | Self::PlaceTradeOrder { amount, .. } => *amount,
        }
    }

    /// Validate operation-level rules before any pipeline work.
    ///
    /// Checks strict positivity of the amount (and price for trade orders)
    /// and the configured order-duration ceiling. Structural rules (token
    /// id positivity, duration positivity) are already enforced by the
    /// newtype constructors.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered. Callers must not
    /// have touched key material, the encoder, or the network before this
    /// check passes.
    pub fn validate(&self, max_order_duration_secs: u64) -> Result<(), ValidationError> {
        if self.amount().is_zero() {
            return Err(ValidationError::ZeroAmount {
                operation: self.kind().to_string(),
            });
        }
        if let Self::PlaceTradeOrder { price, duration, .. } = self {
            if price.is_zero() {
                return Err(ValidationError::ZeroAmount {
                    operation: "trade order price".to_string(),
                });
            }
            duration.check_max(max_order_duration_secs)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(s: &str) -> Amount {
        Amount::parse(s).unwrap()
    }

    fn trade(amount: &str, price: &str, duration: u64) -> Operation {
        Operation::PlaceTradeOrder {
            token_id: TokenId::new(1).unwrap(),
            amount: amt(amount),
            price: amt(price),
            side: Side::Buy,
            duration: OrderDuration::from_secs(duration).unwrap(),
        }
    }

    #[test]
    fn kind_tags_are_stable() {
        assert_eq!(OperationKind::Deposit.as_str(), "deposit");
        assert_eq!(OperationKind::Withdraw.as_str(), "withdraw");
        assert_eq!(OperationKind::MintToken.as_str(), "mint_token");
        assert_eq!(OperationKind::PlaceTradeOrder.as_str(), "place_trade_order");
    }

    #[test]
    fn deposit_validates_positive_amount() {
        let op = Operation::Deposit { amount: amt("0.1") };
        assert!(op.validate(86400).is_ok());
    }

    #[test]
    fn zero_amount_rejected() {
        let op = Operation::Deposit { amount: Amount::ZERO };
        let err = op.validate(86400).unwrap_err();
        assert!(matches!(err, ValidationError::ZeroAmount { .. }));
    }

    #[test]
    fn zero_price_rejected() {
        let op = trade("5", "0", 3600);
        assert!(matches!(
            op.validate(86400),
            Err(ValidationError::ZeroAmount { .. })
        ));
    }

    #[test]
    fn duration_over_max_rejected() {
        let op = trade("5", "0.05", 172800);
        assert!(matches!(
            op.validate(86400),
            Err(ValidationError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn trade_within_bounds_validates() {
        let op = trade("5", "0.05", 3600);
        assert!(op.validate(86400).is_ok());
        assert_eq!(op.kind(), OperationKind::PlaceTradeOrder);
    }

    #[test]
    fn operation_serde_roundtrip() {
        let op = trade("5", "0.05", 3600);
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.contains("place_trade_order"));
        let back: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(op, back);
    }
}

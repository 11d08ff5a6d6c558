//! Transaction history types
//!
//! Entries are append-only and never mutated once posted. `amount` is signed
//! from the owning account's point of view and `balance` is the account
//! balance immediately after the entry was applied.

use crate::ids::TransactionId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of movement an entry records
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    /// Outgoing leg of a transfer
    TransferOut { counterparty: String },
    /// Incoming leg of a transfer
    TransferIn { counterparty: String },
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("Deposit"),
            TransactionKind::Withdrawal => f.write_str("Withdrawal"),
            TransactionKind::TransferOut { counterparty } => write!(f, "Transfer to {}", counterparty),
            TransactionKind::TransferIn { counterparty } => write!(f, "Transfer from {}", counterparty),
        }
    }
}

/// Single history entry on one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub timestamp: DateTime<Utc>,
    pub kind: TransactionKind,
    /// Positive for inflow, negative for outflow
    pub amount: Decimal,
    /// Balance snapshot after this entry
    pub balance: Decimal,
}

impl Transaction {
    /// Create a new history entry
    pub fn new(
        kind: TransactionKind,
        amount: Decimal,
        balance: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id: TransactionId::new(),
            timestamp,
            kind,
            amount,
            balance,
        }
    }

    /// Human-readable label, e.g. "Transfer to bob"
    pub fn label(&self) -> String {
        self.kind.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(TransactionKind::Deposit.to_string(), "Deposit");
        assert_eq!(TransactionKind::Withdrawal.to_string(), "Withdrawal");
        assert_eq!(
            TransactionKind::TransferOut {
                counterparty: "bob".into()
            }
            .to_string(),
            "Transfer to bob"
        );
        assert_eq!(
            TransactionKind::TransferIn {
                counterparty: "alice".into()
            }
            .to_string(),
            "Transfer from alice"
        );
    }

    #[test]
    fn test_transaction_creation() {
        let tx = Transaction::new(
            TransactionKind::Withdrawal,
            Decimal::from(-200),
            Decimal::from(1300),
            Utc::now(),
        );
        assert_eq!(tx.label(), "Withdrawal");
        assert_eq!(tx.amount, Decimal::from(-200));
        assert_eq!(tx.balance, Decimal::from(1300));
    }

    #[test]
    fn test_kind_serialization_is_tagged() {
        let kind = TransactionKind::TransferIn {
            counterparty: "alice".into(),
        };
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, r#"{"kind":"transfer_in","counterparty":"alice"}"#);
    }
}

//! Error types for the ledger
//!
//! Every failure is a recoverable validation error surfaced to the caller.
//! Nothing here is process-fatal.

use rust_decimal::Decimal;
use thiserror::Error;

/// Ledger error taxonomy
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid {field}: {value:?}")]
    InvalidFormat { field: &'static str, value: String },

    #[error("Invalid PIN{}", attempts_suffix(.attempts_remaining))]
    InvalidPin { attempts_remaining: Option<u32> },

    #[error("Invalid amount {input:?}: must be a positive number")]
    InvalidAmount { input: String },

    #[error("Account already exists: {name}")]
    AlreadyExists { name: String },

    #[error("Account not found: {name}")]
    NotFound { name: String },

    #[error("Account {name} is locked after too many failed attempts; reset the PIN to unlock")]
    AccountLocked { name: String },

    #[error("Credential does not match")]
    WrongCredential,

    #[error("New PIN and confirmation do not match")]
    Mismatch,

    #[error("Insufficient funds: balance {balance}, requested {requested}, minimum balance {min_balance}")]
    InsufficientFunds {
        balance: Decimal,
        requested: Decimal,
        min_balance: Decimal,
    },

    #[error("Cannot transfer to the same account")]
    SelfTransfer,

    #[error("Balance cannot be negative: {value}")]
    NegativeBalance { value: Decimal },

    #[error("Minimum balance for {account_type} cannot be negative: {value}")]
    NegativeValue { account_type: String, value: Decimal },

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Unauthorized: admin credentials rejected")]
    Unauthorized,

    #[error("Arithmetic overflow: balance out of range")]
    Overflow,
}

fn attempts_suffix(attempts_remaining: &Option<u32>) -> String {
    match attempts_remaining {
        Some(n) => format!(". {} attempts remaining.", n),
        None => ": must be exactly 4 digits".to_string(),
    }
}

impl LedgerError {
    /// Shorthand for an `InvalidFormat` over any displayable input
    pub fn invalid_format(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            value: value.into(),
        }
    }

    /// Shorthand for a `NotFound` on an account name
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}

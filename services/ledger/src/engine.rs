//! Ledger engine
//!
//! Balance-changing operations with minimum-balance enforcement. Each
//! successful call appends one history entry per affected account, stamped
//! with that account's post-mutation balance.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use types::account::AccountTypeConfig;
use types::errors::LedgerError;
use types::numeric::Amount;
use types::transaction::{Transaction, TransactionKind};

use crate::store::AccountStore;
use crate::validator;

/// Ledger engine
#[derive(Debug, Clone, Default)]
pub struct LedgerEngine {
    account_types: AccountTypeConfig,
}

impl LedgerEngine {
    /// Create an engine with the given account-type terms
    pub fn new(account_types: AccountTypeConfig) -> Self {
        Self { account_types }
    }

    /// Credit an account. Returns the new balance.
    pub fn deposit(
        &self,
        store: &mut AccountStore,
        account: &str,
        amount: Amount,
    ) -> Result<Decimal, LedgerError> {
        let value = amount.as_decimal();
        let balance = store.update(account, |acct| {
            acct.post(TransactionKind::Deposit, value, Utc::now())
                .map(|tx| tx.balance)
        })??;

        debug!(account = %account, amount = %value, balance = %balance, "Deposit posted");
        Ok(balance)
    }

    /// Debit an account, keeping it at or above its type's minimum balance.
    /// Returns the new balance.
    pub fn withdraw(
        &self,
        store: &mut AccountStore,
        account: &str,
        amount: Amount,
    ) -> Result<Decimal, LedgerError> {
        let value = amount.as_decimal();
        let current = store.get(account)?;
        let min_balance = self.account_types.min_balance(current.account_type);
        validator::check_minimum_balance(current.balance, value, min_balance)?;

        let balance = store.update(account, |acct| {
            acct.post(TransactionKind::Withdrawal, -value, Utc::now())
                .map(|tx| tx.balance)
        })??;

        debug!(account = %account, amount = %value, balance = %balance, "Withdrawal posted");
        Ok(balance)
    }

    /// Move funds between two accounts. Returns the sender's new balance.
    ///
    /// Only the sender's minimum balance is enforced; the recipient only
    /// ever gains funds.
    pub fn transfer(
        &self,
        store: &mut AccountStore,
        sender: &str,
        recipient: &str,
        amount: Amount,
    ) -> Result<Decimal, LedgerError> {
        let value = amount.as_decimal();
        let recipient = recipient.trim();
        if !store.contains(recipient) {
            return Err(LedgerError::not_found(recipient));
        }
        if sender == recipient {
            return Err(LedgerError::SelfTransfer);
        }
        let from = store.get(sender)?;
        let min_balance = self.account_types.min_balance(from.account_type);
        validator::check_minimum_balance(from.balance, value, min_balance)?;

        // Both legs are checked before either account changes
        from.balance
            .checked_sub(value)
            .ok_or(LedgerError::Overflow)?;
        store
            .get(recipient)?
            .balance
            .checked_add(value)
            .ok_or(LedgerError::Overflow)?;

        let now = Utc::now();
        let sender_balance = store.update(sender, |acct| {
            let kind = TransactionKind::TransferOut {
                counterparty: recipient.to_string(),
            };
            acct.post(kind, -value, now).map(|tx| tx.balance)
        })??;
        let recipient_balance = store.update(recipient, |acct| {
            let kind = TransactionKind::TransferIn {
                counterparty: sender.to_string(),
            };
            acct.post(kind, value, now).map(|tx| tx.balance)
        })??;

        debug!(
            sender = %sender,
            recipient = %recipient,
            amount = %value,
            sender_balance = %sender_balance,
            recipient_balance = %recipient_balance,
            "Transfer posted"
        );
        Ok(sender_balance)
    }

    /// Transaction history of an account, oldest first
    pub fn history<'s>(
        &self,
        store: &'s AccountStore,
        account: &str,
    ) -> Result<&'s [Transaction], LedgerError> {
        Ok(&store.get(account)?.transactions)
    }

    /// Current account-type terms
    pub fn account_types(&self) -> &AccountTypeConfig {
        &self.account_types
    }

    /// Mutable account-type terms for administrative updates
    pub fn account_types_mut(&mut self) -> &mut AccountTypeConfig {
        &mut self.account_types
    }
}

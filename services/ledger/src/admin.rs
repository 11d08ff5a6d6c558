//! Administrative override
//!
//! Direct record edits that bypass the auth gate and the minimum-balance
//! rule. An `AdminOverride` is only handed out by [`crate::Bank::admin`]
//! after the configured credentials check out, and borrows the ledger for
//! as long as it lives.

use rust_decimal::Decimal;
use tracing::{info, warn};
use types::account::{AccountSummary, AccountType, AccountTypeConfig};
use types::errors::LedgerError;

use crate::auth::AuthGate;
use crate::engine::LedgerEngine;
use crate::store::AccountStore;
use crate::validator;

/// Administrative handle over the ledger state
#[derive(Debug)]
pub struct AdminOverride<'a> {
    store: &'a mut AccountStore,
    auth: &'a mut AuthGate,
    engine: &'a mut LedgerEngine,
}

impl<'a> AdminOverride<'a> {
    pub(crate) fn new(
        store: &'a mut AccountStore,
        auth: &'a mut AuthGate,
        engine: &'a mut LedgerEngine,
    ) -> Self {
        Self {
            store,
            auth,
            engine,
        }
    }

    /// Every account, ordered by name
    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        self.store.summaries()
    }

    /// Remove an account along with its lockout counter and sessions
    pub fn delete_account(&mut self, name: &str) -> Result<(), LedgerError> {
        let removed = self.store.delete(name)?;
        self.auth.forget_account(name);
        info!(
            account = %name,
            final_balance = %removed.balance,
            "Admin deleted account"
        );
        Ok(())
    }

    /// Overwrite name, balance and type of an account.
    ///
    /// Every input is validated before anything changes. The new balance may
    /// sit below the type's minimum and no history entry is written.
    pub fn edit_account(
        &mut self,
        name: &str,
        new_name: &str,
        new_balance: &str,
        new_account_type: &str,
    ) -> Result<(), LedgerError> {
        let new_name = validator::require("name", new_name.trim())?;
        validator::require("balance", new_balance.trim())?;
        validator::require("account_type", new_account_type.trim())?;

        if !self.store.contains(name) {
            return Err(LedgerError::not_found(name));
        }
        let balance = validator::parse_admin_balance(new_balance)?;
        let account_type: AccountType = new_account_type.parse()?;
        if new_name != name && self.store.contains(new_name) {
            warn!(account = %name, new_name = %new_name, "Admin edit rejected: name taken");
            return Err(LedgerError::AlreadyExists {
                name: new_name.to_string(),
            });
        }

        self.store.rename(name, new_name)?;
        self.auth.rename_account(name, new_name);
        self.store.update(new_name, |account| {
            account.balance = balance;
            account.account_type = account_type;
        })?;

        info!(
            account = %name,
            new_name = %new_name,
            balance = %balance,
            account_type = %account_type,
            "Admin edited account"
        );
        Ok(())
    }

    /// Replace minimum balances for the listed account types.
    ///
    /// All entries are parsed first; if any is malformed or negative none
    /// are applied.
    pub fn update_account_type_minimums(
        &mut self,
        minimums: &[(AccountType, &str)],
    ) -> Result<(), LedgerError> {
        let parsed = minimums
            .iter()
            .map(|(account_type, input)| {
                validator::parse_minimum(*account_type, input).map(|value| (*account_type, value))
            })
            .collect::<Result<Vec<(AccountType, Decimal)>, LedgerError>>()
            .inspect_err(|err| warn!(error = %err, "Admin minimum update rejected"))?;

        let account_types = self.engine.account_types_mut();
        for (account_type, min_balance) in parsed {
            account_types.set_min_balance(account_type, min_balance);
            info!(
                account_type = %account_type,
                min_balance = %min_balance,
                "Admin updated minimum balance"
            );
        }
        Ok(())
    }

    /// Current account-type terms
    pub fn account_types(&self) -> &AccountTypeConfig {
        self.engine.account_types()
    }
}

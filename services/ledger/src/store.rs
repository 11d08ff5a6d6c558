//! In-memory account store
//!
//! Owns every account record, keyed by account name. Names are unique at all
//! times; account numbers are drawn at random and re-drawn on collision.

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use tracing::{info, warn};
use types::account::{Account, AccountSummary, AccountType};
use types::errors::LedgerError;
use types::ids::AccountNumber;
use types::security::SecurityQuestion;

use crate::config::LedgerConfig;

/// Validated fields for a new account
///
/// `pin` and `security_answer` are already in stored (sealed) form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub age: i64,
    pub salary: Decimal,
    pub pin: String,
    pub account_type: AccountType,
    pub security_question: SecurityQuestion,
    pub security_answer: String,
}

/// Account store
#[derive(Debug)]
pub struct AccountStore {
    /// Accounts by name; ordered so listings are stable
    accounts: BTreeMap<String, Account>,
    /// Account numbers handed out so far
    issued_numbers: HashSet<AccountNumber>,
    rng: ChaCha8Rng,
    number_digits: usize,
    number_retries: u32,
}

impl AccountStore {
    /// Create an empty store using the ledger configuration
    pub fn new(config: &LedgerConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            accounts: BTreeMap::new(),
            issued_numbers: HashSet::new(),
            rng,
            number_digits: config.account_number_digits,
            number_retries: config.account_number_retries,
        }
    }

    /// Insert a new account with zero balance and empty history.
    ///
    /// Returns the generated account number.
    pub fn create(&mut self, draft: NewAccount) -> Result<AccountNumber, LedgerError> {
        if self.accounts.contains_key(&draft.name) {
            return Err(LedgerError::AlreadyExists { name: draft.name });
        }

        let account_number = self.draw_account_number();
        let account = Account::new(
            draft.name.clone(),
            draft.age,
            draft.salary,
            draft.pin,
            account_number.clone(),
            draft.account_type,
            draft.security_question,
            draft.security_answer,
            Utc::now(),
        );

        self.issued_numbers.insert(account_number.clone());
        self.accounts.insert(draft.name.clone(), account);

        info!(
            account = %draft.name,
            account_type = %draft.account_type,
            "Account created"
        );
        Ok(account_number)
    }

    /// Look up an account by name
    pub fn get(&self, name: &str) -> Result<&Account, LedgerError> {
        self.accounts
            .get(name)
            .ok_or_else(|| LedgerError::not_found(name))
    }

    /// Check if an account exists
    pub fn contains(&self, name: &str) -> bool {
        self.accounts.contains_key(name)
    }

    /// Remove an account, returning its final record
    pub fn delete(&mut self, name: &str) -> Result<Account, LedgerError> {
        let account = self
            .accounts
            .remove(name)
            .ok_or_else(|| LedgerError::not_found(name))?;
        self.issued_numbers.remove(&account.account_number);
        Ok(account)
    }

    /// Apply an in-place change to one account.
    ///
    /// The closure runs only if the account exists; its result is returned.
    pub fn update<T, F>(&mut self, name: &str, mutator: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut Account) -> T,
    {
        let account = self
            .accounts
            .get_mut(name)
            .ok_or_else(|| LedgerError::not_found(name))?;
        Ok(mutator(account))
    }

    /// Move an account to a new name, keeping names unique
    pub fn rename(&mut self, from: &str, to: &str) -> Result<(), LedgerError> {
        if from == to {
            return self.get(from).map(|_| ());
        }
        if !self.accounts.contains_key(from) {
            return Err(LedgerError::not_found(from));
        }
        if self.accounts.contains_key(to) {
            return Err(LedgerError::AlreadyExists {
                name: to.to_string(),
            });
        }
        if let Some(mut account) = self.accounts.remove(from) {
            account.name = to.to_string();
            self.accounts.insert(to.to_string(), account);
        }
        Ok(())
    }

    /// Listing rows for every account, ordered by name
    pub fn summaries(&self) -> Vec<AccountSummary> {
        self.accounts.values().map(Account::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Draw a fresh account number, retrying on collision.
    ///
    /// Once retries are exhausted the last draw is used even if taken.
    fn draw_account_number(&mut self) -> AccountNumber {
        let mut candidate = AccountNumber::generate(&mut self.rng, self.number_digits);
        for _ in 0..self.number_retries {
            if !self.issued_numbers.contains(&candidate) {
                return candidate;
            }
            candidate = AccountNumber::generate(&mut self.rng, self.number_digits);
        }
        if self.issued_numbers.contains(&candidate) {
            warn!(
                retries = self.number_retries,
                "Account number collision persisted after retries; issuing duplicate"
            );
        }
        candidate
    }
}

//! Account records and account-type terms
//!
//! Accounts are keyed by their user-chosen name. Balance changes that belong
//! in the history go through [`Account::post`], which appends exactly one
//! entry stamped with the post-mutation balance.

use crate::errors::LedgerError;
use crate::ids::AccountNumber;
use crate::security::SecurityQuestion;
use crate::transaction::{Transaction, TransactionKind};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Account type, each bound to a minimum balance and an interest rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccountType {
    #[default]
    Savings,
    Current,
    #[serde(rename = "Fixed Deposit")]
    FixedDeposit,
}

impl AccountType {
    /// All account types in presentation order
    pub const ALL: [AccountType; 3] = [
        AccountType::Savings,
        AccountType::Current,
        AccountType::FixedDeposit,
    ];

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "Savings",
            AccountType::Current => "Current",
            AccountType::FixedDeposit => "Fixed Deposit",
        }
    }

    /// Terms a fresh ledger starts with
    pub fn default_terms(&self) -> AccountTypeTerms {
        match self {
            AccountType::Savings => AccountTypeTerms::new(Decimal::from(1_000), Decimal::new(4, 2)),
            AccountType::Current => AccountTypeTerms::new(Decimal::from(5_000), Decimal::new(2, 2)),
            AccountType::FixedDeposit => {
                AccountTypeTerms::new(Decimal::from(10_000), Decimal::new(8, 2))
            }
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AccountType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| LedgerError::invalid_format("account_type", s))
    }
}

/// Minimum balance and interest rate for one account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTypeTerms {
    pub min_balance: Decimal,
    /// Annual rate as a fraction (0.04 = 4%)
    pub interest_rate: Decimal,
}

impl AccountTypeTerms {
    pub fn new(min_balance: Decimal, interest_rate: Decimal) -> Self {
        Self {
            min_balance,
            interest_rate,
        }
    }
}

/// Process-wide table of account-type terms
///
/// Types missing from a loaded table fall back to their default terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountTypeConfig {
    terms: BTreeMap<AccountType, AccountTypeTerms>,
}

impl AccountTypeConfig {
    /// Terms for an account type
    pub fn terms(&self, account_type: AccountType) -> AccountTypeTerms {
        self.terms
            .get(&account_type)
            .copied()
            .unwrap_or_else(|| account_type.default_terms())
    }

    /// Minimum balance for an account type
    pub fn min_balance(&self, account_type: AccountType) -> Decimal {
        self.terms(account_type).min_balance
    }

    /// Overwrite the minimum balance for an account type
    ///
    /// Callers validate the value; this only stores it.
    pub fn set_min_balance(&mut self, account_type: AccountType, min_balance: Decimal) {
        let mut terms = self.terms(account_type);
        terms.min_balance = min_balance;
        self.terms.insert(account_type, terms);
    }

    /// Iterate every account type with its effective terms
    pub fn iter(&self) -> impl Iterator<Item = (AccountType, AccountTypeTerms)> + '_ {
        AccountType::ALL.into_iter().map(|t| (t, self.terms(t)))
    }
}

impl Default for AccountTypeConfig {
    fn default() -> Self {
        Self {
            terms: AccountType::ALL
                .into_iter()
                .map(|t| (t, t.default_terms()))
                .collect(),
        }
    }
}

/// Account record
///
/// `pin` and `security_answer` hold whatever form the credential verifier
/// stores; they are never compared directly by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub age: i64,
    pub salary: Decimal,
    pub pin: String,
    pub account_number: AccountNumber,
    pub balance: Decimal,
    pub account_type: AccountType,
    pub security_question: SecurityQuestion,
    pub security_answer: String,
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create an account with zero balance and empty history
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        age: i64,
        salary: Decimal,
        pin: impl Into<String>,
        account_number: AccountNumber,
        account_type: AccountType,
        security_question: SecurityQuestion,
        security_answer: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            salary,
            pin: pin.into(),
            account_number,
            balance: Decimal::ZERO,
            account_type,
            security_question,
            security_answer: security_answer.into(),
            transactions: Vec::new(),
            created_at,
        }
    }

    /// Apply a signed balance change and append its history entry.
    ///
    /// The entry's `balance` is the balance after `delta` is applied. On
    /// overflow nothing changes.
    pub fn post(
        &mut self,
        kind: TransactionKind,
        delta: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<&Transaction, LedgerError> {
        let new_balance = self
            .balance
            .checked_add(delta)
            .ok_or(LedgerError::Overflow)?;

        self.balance = new_balance;
        self.transactions
            .push(Transaction::new(kind, delta, new_balance, timestamp));
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// View handed to a freshly logged-in user
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            name: self.name.clone(),
            age: self.age,
            salary: self.salary,
            balance: self.balance,
            account_type: self.account_type,
            account_number: self.account_number.clone(),
        }
    }

    /// Row shown in administrative listings
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            name: self.name.clone(),
            account_number: self.account_number.clone(),
            balance: self.balance,
            account_type: self.account_type,
        }
    }
}

/// Read-only account view for the account owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub name: String,
    pub age: i64,
    pub salary: Decimal,
    pub balance: Decimal,
    pub account_type: AccountType,
    pub account_number: AccountNumber,
}

/// Administrative listing row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub name: String,
    pub account_number: AccountNumber,
    pub balance: Decimal,
    pub account_type: AccountType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_account() -> Account {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        Account::new(
            "alice",
            30,
            Decimal::from(50_000),
            "1234",
            AccountNumber::generate(&mut rng, 10),
            AccountType::Savings,
            SecurityQuestion::FavoriteColor,
            "Blue",
            Utc::now(),
        )
    }

    #[test]
    fn test_account_creation() {
        let account = make_account();
        assert_eq!(account.balance, Decimal::ZERO);
        assert!(account.transactions.is_empty());
        assert_eq!(account.account_type, AccountType::Savings);
    }

    #[test]
    fn test_post_stamps_post_mutation_balance() {
        let mut account = make_account();
        account
            .post(TransactionKind::Deposit, Decimal::from(1500), Utc::now())
            .unwrap();
        let tx = account
            .post(TransactionKind::Withdrawal, Decimal::from(-200), Utc::now())
            .unwrap()
            .clone();

        assert_eq!(account.balance, Decimal::from(1300));
        assert_eq!(account.transactions.len(), 2);
        assert_eq!(tx.balance, Decimal::from(1300));
        assert_eq!(tx.amount, Decimal::from(-200));
        assert_eq!(account.transactions[0].balance, Decimal::from(1500));
    }

    #[test]
    fn test_post_overflow_leaves_account_unchanged() {
        let mut account = make_account();
        account
            .post(TransactionKind::Deposit, Decimal::MAX, Utc::now())
            .unwrap();

        let result = account.post(TransactionKind::Deposit, Decimal::ONE, Utc::now());
        assert_eq!(result.unwrap_err(), LedgerError::Overflow);
        assert_eq!(account.balance, Decimal::MAX);
        assert_eq!(account.transactions.len(), 1);
    }

    #[test]
    fn test_snapshot_and_summary() {
        let account = make_account();
        let snapshot = account.snapshot();
        assert_eq!(snapshot.name, "alice");
        assert_eq!(snapshot.age, 30);
        let summary = account.summary();
        assert_eq!(summary.account_number, account.account_number);
    }

    #[test]
    fn test_account_type_parse() {
        assert_eq!("Savings".parse::<AccountType>().unwrap(), AccountType::Savings);
        assert_eq!(
            "Fixed Deposit".parse::<AccountType>().unwrap(),
            AccountType::FixedDeposit
        );
        assert!("Checking".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_default_terms() {
        let config = AccountTypeConfig::default();
        assert_eq!(config.min_balance(AccountType::Savings), Decimal::from(1_000));
        assert_eq!(config.min_balance(AccountType::Current), Decimal::from(5_000));
        assert_eq!(
            config.min_balance(AccountType::FixedDeposit),
            Decimal::from(10_000)
        );
        assert_eq!(
            config.terms(AccountType::FixedDeposit).interest_rate,
            Decimal::new(8, 2)
        );
    }

    #[test]
    fn test_set_min_balance_keeps_rate() {
        let mut config = AccountTypeConfig::default();
        config.set_min_balance(AccountType::Current, Decimal::from(2_500));
        assert_eq!(config.min_balance(AccountType::Current), Decimal::from(2_500));
        assert_eq!(
            config.terms(AccountType::Current).interest_rate,
            Decimal::new(2, 2)
        );
    }

    #[test]
    fn test_config_serializes_with_display_names() {
        let config = AccountTypeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"Fixed Deposit\""));
        let back: AccountTypeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: AccountTypeConfig =
            serde_json::from_str(r#"{"Savings":{"min_balance":"200","interest_rate":"0.01"}}"#)
                .unwrap();
        assert_eq!(config.min_balance(AccountType::Savings), Decimal::from(200));
        assert_eq!(config.min_balance(AccountType::Current), Decimal::from(5_000));
    }
}

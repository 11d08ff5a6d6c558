//! Bank facade
//!
//! Owns the account store, the auth gate and the ledger engine, and exposes
//! the operations a presentation layer calls with raw user input. Calls that
//! need an authenticated user take the [`Session`] returned by
//! [`Bank::login`].

use rust_decimal::Decimal;
use tracing::{info, warn};
use types::account::{AccountSnapshot, AccountTypeConfig};
use types::errors::LedgerError;
use types::ids::AccountNumber;
use types::numeric::Amount;
use types::security::SecurityQuestion;
use types::transaction::Transaction;

use crate::admin::AdminOverride;
use crate::auth::{AuthGate, Session, SessionView};
use crate::config::{AdminCredentials, LedgerConfig};
use crate::engine::LedgerEngine;
use crate::store::AccountStore;
use crate::validator::AccountApplication;
use crate::verifier::{CredentialVerifier, PlaintextVerifier};

/// Single-process account ledger
#[derive(Debug)]
pub struct Bank {
    store: AccountStore,
    auth: AuthGate,
    engine: LedgerEngine,
    admin_credentials: AdminCredentials,
}

impl Bank {
    /// Create a bank with default configuration
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create a bank with custom configuration
    pub fn with_config(config: LedgerConfig) -> Self {
        Self::with_verifier(config, Box::new(PlaintextVerifier))
    }

    /// Create a bank with a custom credential verifier
    pub fn with_verifier(config: LedgerConfig, verifier: Box<dyn CredentialVerifier>) -> Self {
        let store = AccountStore::new(&config);
        let auth = AuthGate::new(config.max_login_attempts, verifier);
        let engine = LedgerEngine::new(config.account_types);
        info!(
            max_login_attempts = config.max_login_attempts,
            "Ledger initialized"
        );
        Self {
            store,
            auth,
            engine,
            admin_credentials: config.admin,
        }
    }

    // ───────────────────────── Accounts ─────────────────────────

    /// Open a new account. Returns the generated account number.
    pub fn create_account(
        &mut self,
        application: &AccountApplication,
    ) -> Result<AccountNumber, LedgerError> {
        self.auth.create_account(&mut self.store, application)
    }

    /// Authenticate and open a session
    pub fn login(&mut self, name: &str, pin: &str) -> Result<SessionView, LedgerError> {
        self.auth.login(&self.store, name, pin)
    }

    /// Close a session; never fails
    pub fn logout(&mut self, session: &Session) {
        self.auth.logout(session);
    }

    /// Current view of the session's account
    pub fn snapshot(&self, session: &Session) -> Result<AccountSnapshot, LedgerError> {
        let name = self.auth.resolve(session)?;
        Ok(self.store.get(name)?.snapshot())
    }

    // ───────────────────────── Transactions ─────────────────────────

    /// Deposit into the session's account. Returns the new balance.
    pub fn deposit(&mut self, session: &Session, amount: &str) -> Result<Decimal, LedgerError> {
        let name = self.auth.resolve(session)?;
        let amount = Amount::parse(amount)?;
        self.engine.deposit(&mut self.store, name, amount)
    }

    /// Withdraw from the session's account. Returns the new balance.
    pub fn withdraw(&mut self, session: &Session, amount: &str) -> Result<Decimal, LedgerError> {
        let name = self.auth.resolve(session)?;
        let amount = Amount::parse(amount)?;
        self.engine.withdraw(&mut self.store, name, amount)
    }

    /// Transfer from the session's account. Returns the sender's new balance.
    pub fn transfer(
        &mut self,
        session: &Session,
        recipient: &str,
        amount: &str,
    ) -> Result<Decimal, LedgerError> {
        let name = self.auth.resolve(session)?;
        let amount = Amount::parse(amount)?;
        self.engine
            .transfer(&mut self.store, name, recipient, amount)
    }

    /// History of the session's account, oldest first
    pub fn history(&self, session: &Session) -> Result<&[Transaction], LedgerError> {
        let name = self.auth.resolve(session)?;
        self.engine.history(&self.store, name)
    }

    // ───────────────────────── Security ─────────────────────────

    pub fn change_pin(
        &mut self,
        session: &Session,
        current_pin: &str,
        new_pin: &str,
        confirm_pin: &str,
    ) -> Result<(), LedgerError> {
        self.auth
            .change_pin(&mut self.store, session, current_pin, new_pin, confirm_pin)
    }

    pub fn update_security_settings(
        &mut self,
        session: &Session,
        question: &str,
        answer: &str,
    ) -> Result<(), LedgerError> {
        self.auth
            .update_security_settings(&mut self.store, session, question, answer)
    }

    /// Security question to prompt with during PIN recovery
    pub fn security_question(&self, name: &str) -> Result<SecurityQuestion, LedgerError> {
        Ok(self.store.get(name.trim())?.security_question)
    }

    /// Questions offered at account creation
    pub fn security_questions(&self) -> &'static [SecurityQuestion] {
        &SecurityQuestion::ALL
    }

    /// Reset a forgotten PIN without logging in
    pub fn forgot_pin(
        &mut self,
        name: &str,
        security_answer: &str,
        new_pin: &str,
    ) -> Result<(), LedgerError> {
        self.auth
            .forgot_pin(&mut self.store, name, security_answer, new_pin)
    }

    // ───────────────────────── Administration ─────────────────────────

    /// Open an administrative override after checking admin credentials
    pub fn admin(&mut self, username: &str, password: &str) -> Result<AdminOverride<'_>, LedgerError> {
        if username != self.admin_credentials.username
            || password != self.admin_credentials.password
        {
            warn!(username = %username, "Admin access denied");
            return Err(LedgerError::Unauthorized);
        }
        info!(username = %username, "Admin access granted");
        Ok(AdminOverride::new(
            &mut self.store,
            &mut self.auth,
            &mut self.engine,
        ))
    }

    /// Current account-type terms
    pub fn account_types(&self) -> &AccountTypeConfig {
        self.engine.account_types()
    }

    /// Number of accounts
    pub fn account_count(&self) -> usize {
        self.store.len()
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bank() -> Bank {
        Bank::with_config(LedgerConfig {
            rng_seed: Some(99),
            ..LedgerConfig::default()
        })
    }

    fn open(bank: &mut Bank, name: &str) -> AccountNumber {
        bank.create_account(&AccountApplication {
            name: name.into(),
            age: "35".into(),
            salary: "70000".into(),
            pin: "1234".into(),
            account_type: "Savings".into(),
            security_question: SecurityQuestion::MothersMaidenName.prompt().into(),
            security_answer: "Smith".into(),
        })
        .unwrap()
    }

    #[test]
    fn test_full_session_flow() {
        let mut bank = make_bank();
        open(&mut bank, "alice");
        let session = bank.login("alice", "1234").unwrap().session;

        assert_eq!(bank.deposit(&session, "2000").unwrap(), Decimal::from(2000));
        assert_eq!(bank.withdraw(&session, "250.50").unwrap(), Decimal::new(174950, 2));
        assert_eq!(bank.history(&session).unwrap().len(), 2);
        assert_eq!(bank.snapshot(&session).unwrap().balance, Decimal::new(174950, 2));

        bank.logout(&session);
        assert_eq!(bank.deposit(&session, "1"), Err(LedgerError::NotAuthenticated));
    }

    #[test]
    fn test_session_checked_before_amount() {
        let mut bank = make_bank();
        open(&mut bank, "alice");
        let session = bank.login("alice", "1234").unwrap().session;
        bank.logout(&session);
        assert_eq!(bank.withdraw(&session, "abc"), Err(LedgerError::NotAuthenticated));
    }

    #[test]
    fn test_invalid_amounts() {
        let mut bank = make_bank();
        open(&mut bank, "alice");
        let session = bank.login("alice", "1234").unwrap().session;
        for input in ["0", "-10", "ten", ""] {
            assert_eq!(
                bank.deposit(&session, input),
                Err(LedgerError::InvalidAmount {
                    input: input.to_string()
                })
            );
        }
        assert!(bank.history(&session).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_sessions() {
        let mut bank = make_bank();
        open(&mut bank, "alice");
        open(&mut bank, "bob");
        let alice = bank.login("alice", "1234").unwrap().session;
        let bob = bank.login("bob", "1234").unwrap().session;

        bank.deposit(&alice, "1500").unwrap();
        bank.transfer(&alice, "bob", "300").unwrap();
        assert_eq!(bank.snapshot(&bob).unwrap().balance, Decimal::from(300));
    }

    #[test]
    fn test_admin_requires_credentials() {
        let mut bank = make_bank();
        assert!(matches!(
            bank.admin("admin", "wrong"),
            Err(LedgerError::Unauthorized)
        ));
        assert!(bank.admin("admin", "admin123").is_ok());
    }

    #[test]
    fn test_security_question_lookup() {
        let mut bank = make_bank();
        open(&mut bank, "alice");
        assert_eq!(
            bank.security_question("alice").unwrap(),
            SecurityQuestion::MothersMaidenName
        );
        assert_eq!(bank.security_questions().len(), 5);
        assert!(bank.security_question("ghost").is_err());
    }
}

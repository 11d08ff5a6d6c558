//! Authentication gate
//!
//! Login with attempt-counting lockout, logout, PIN change, security
//! settings and security-question recovery.
//!
//! Session states:
//! - Anonymous --login--> Authenticated --logout--> Anonymous
//! - Anonymous --forgot_pin--> Anonymous (recovery never authenticates)
//!
//! Lockout is sticky: once a name reaches the attempt limit every login
//! fails with `AccountLocked`, even with the right PIN, until `forgot_pin`
//! succeeds.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use types::account::AccountSnapshot;
use types::errors::LedgerError;
use types::ids::{AccountNumber, SessionId};
use types::security::{Pin, SecurityQuestion};

use crate::store::AccountStore;
use crate::validator::{self, AccountApplication};
use crate::verifier::CredentialVerifier;

/// Authenticated-identity token threaded through authenticated calls
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub account: String,
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub session: Session,
    pub account: AccountSnapshot,
}

/// Authentication gate
#[derive(Debug)]
pub struct AuthGate {
    /// Live sessions and the account each one belongs to
    sessions: HashMap<SessionId, String>,
    /// Consecutive failed logins per account name
    login_attempts: HashMap<String, u32>,
    max_attempts: u32,
    verifier: Box<dyn CredentialVerifier>,
}

impl AuthGate {
    /// Create a gate locking accounts after `max_attempts` wrong PINs
    pub fn new(max_attempts: u32, verifier: Box<dyn CredentialVerifier>) -> Self {
        Self {
            sessions: HashMap::new(),
            login_attempts: HashMap::new(),
            max_attempts,
            verifier,
        }
    }

    /// Validate a creation request and insert the account.
    ///
    /// Returns the generated account number for display.
    pub fn create_account(
        &self,
        store: &mut AccountStore,
        application: &AccountApplication,
    ) -> Result<AccountNumber, LedgerError> {
        let draft = validator::validate_application(application, self.verifier.as_ref())?;
        store.create(draft)
    }

    /// Authenticate by name and PIN
    pub fn login(
        &mut self,
        store: &AccountStore,
        name: &str,
        pin: &str,
    ) -> Result<SessionView, LedgerError> {
        let name = name.trim();
        let pin = pin.trim();
        let account = store.get(name)?;

        let attempts = self.attempts(name);
        if attempts >= self.max_attempts {
            warn!(account = %name, attempts, "Login refused: account locked");
            return Err(LedgerError::AccountLocked {
                name: name.to_string(),
            });
        }

        if !self.verifier.verify_pin(&account.pin, pin) {
            // Failures only count while the account has no live session
            let attempts = if self.has_session(name) {
                attempts
            } else {
                let counter = self.login_attempts.entry(name.to_string()).or_insert(0);
                *counter += 1;
                *counter
            };
            let remaining = self.max_attempts.saturating_sub(attempts);
            warn!(account = %name, attempts, remaining, "Login failed: wrong PIN");
            return Err(LedgerError::InvalidPin {
                attempts_remaining: Some(remaining),
            });
        }

        self.login_attempts.insert(name.to_string(), 0);
        let session = Session {
            id: SessionId::new(),
            account: name.to_string(),
        };
        self.sessions.insert(session.id, name.to_string());
        info!(account = %name, session = %session.id, "Login succeeded");

        Ok(SessionView {
            session,
            account: account.snapshot(),
        })
    }

    /// End a session; unknown or already-closed sessions are ignored
    pub fn logout(&mut self, session: &Session) {
        if let Some(account) = self.sessions.remove(&session.id) {
            info!(account = %account, session = %session.id, "Logged out");
        }
    }

    /// Account name behind a live session
    pub fn resolve(&self, session: &Session) -> Result<&str, LedgerError> {
        self.sessions
            .get(&session.id)
            .map(String::as_str)
            .ok_or(LedgerError::NotAuthenticated)
    }

    /// Replace the PIN of the session's account.
    ///
    /// Checks, in order: all fields present, current PIN matches,
    /// new PIN well formed, confirmation matches.
    pub fn change_pin(
        &self,
        store: &mut AccountStore,
        session: &Session,
        current_pin: &str,
        new_pin: &str,
        confirm_pin: &str,
    ) -> Result<(), LedgerError> {
        let name = self.resolve(session)?;
        validator::require("current_pin", current_pin)?;
        validator::require("new_pin", new_pin)?;
        validator::require("confirm_pin", confirm_pin)?;

        let stored = &store.get(name)?.pin;
        if !self.verifier.verify_pin(stored, current_pin) {
            return Err(LedgerError::WrongCredential);
        }
        let pin = Pin::parse(new_pin)?;
        if new_pin != confirm_pin {
            return Err(LedgerError::Mismatch);
        }

        let sealed = self.verifier.seal_pin(&pin);
        store.update(name, |account| account.pin = sealed)?;
        info!(account = %name, "PIN changed");
        Ok(())
    }

    /// Overwrite the security question and answer of the session's account
    pub fn update_security_settings(
        &self,
        store: &mut AccountStore,
        session: &Session,
        question: &str,
        answer: &str,
    ) -> Result<(), LedgerError> {
        let name = self.resolve(session)?;
        validator::require("security_question", question)?;
        validator::require("security_answer", answer)?;
        let question: SecurityQuestion = question.parse()?;

        let sealed = self.verifier.seal_answer(answer);
        store.update(name, |account| {
            account.security_question = question;
            account.security_answer = sealed;
        })?;
        info!(account = %name, "Security settings updated");
        Ok(())
    }

    /// Reset a forgotten PIN using the security answer.
    ///
    /// Needs no session. On success the lockout counter is cleared.
    pub fn forgot_pin(
        &mut self,
        store: &mut AccountStore,
        name: &str,
        security_answer: &str,
        new_pin: &str,
    ) -> Result<(), LedgerError> {
        validator::require("name", name)?;
        validator::require("security_answer", security_answer)?;
        validator::require("new_pin", new_pin)?;

        let account = store.get(name)?;
        if !self
            .verifier
            .verify_answer(&account.security_answer, security_answer)
        {
            warn!(account = %name, "PIN reset refused: wrong security answer");
            return Err(LedgerError::WrongCredential);
        }
        let pin = Pin::parse(new_pin)?;

        let sealed = self.verifier.seal_pin(&pin);
        store.update(name, |account| account.pin = sealed)?;
        if let Some(attempts) = self.login_attempts.get_mut(name) {
            *attempts = 0;
        }
        info!(account = %name, "PIN reset via security question");
        Ok(())
    }

    /// Consecutive failed logins recorded for a name
    pub fn attempts(&self, name: &str) -> u32 {
        self.login_attempts.get(name).copied().unwrap_or(0)
    }

    /// Check if any live session belongs to a name
    pub fn has_session(&self, name: &str) -> bool {
        self.sessions.values().any(|account| account == name)
    }

    /// Check if a name is locked out
    pub fn is_locked(&self, name: &str) -> bool {
        self.attempts(name) >= self.max_attempts
    }

    /// Drop every trace of an account: lockout counter and sessions
    pub fn forget_account(&mut self, name: &str) {
        self.login_attempts.remove(name);
        self.sessions.retain(|_, account| account != name);
    }

    /// Re-point lockout counter and sessions after an account rename
    pub fn rename_account(&mut self, from: &str, to: &str) {
        if let Some(attempts) = self.login_attempts.remove(from) {
            self.login_attempts.insert(to.to_string(), attempts);
        }
        for account in self.sessions.values_mut() {
            if account == from {
                *account = to.to_string();
            }
        }
    }
}

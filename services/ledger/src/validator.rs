//! Input validation
//!
//! Every operation validates before it mutates. The checks shared across
//! the auth gate, the ledger engine and the admin override live here.
//!
//! Account creation checks run in this order:
//! 1. All fields present
//! 2. Age is a whole number
//! 3. Salary is a number
//! 4. PIN is exactly four digits
//! 5. Account type and security question are known values

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::account::AccountType;
use types::errors::LedgerError;
use types::numeric::{parse_decimal, parse_integer};
use types::security::{Pin, SecurityQuestion};

use crate::store::NewAccount;
use crate::verifier::CredentialVerifier;

/// Raw account-creation input as collected by a presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountApplication {
    pub name: String,
    pub age: String,
    pub salary: String,
    pub pin: String,
    pub account_type: String,
    pub security_question: String,
    pub security_answer: String,
}

/// Fail with `MissingField` when `value` is empty
pub fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, LedgerError> {
    if value.is_empty() {
        Err(LedgerError::MissingField { field })
    } else {
        Ok(value)
    }
}

/// Validate a creation request and seal its credentials.
///
/// Name uniqueness is checked by the store on insert.
pub fn validate_application(
    application: &AccountApplication,
    verifier: &dyn CredentialVerifier,
) -> Result<NewAccount, LedgerError> {
    let name = require("name", application.name.trim())?;
    let age = require("age", application.age.trim())?;
    let salary = require("salary", application.salary.trim())?;
    let pin = require("pin", application.pin.trim())?;
    let account_type = require("account_type", application.account_type.trim())?;
    let question = require("security_question", application.security_question.trim())?;
    let answer = require("security_answer", application.security_answer.trim())?;

    let age = parse_integer(age).ok_or_else(|| LedgerError::invalid_format("age", age))?;
    let salary =
        parse_decimal(salary).ok_or_else(|| LedgerError::invalid_format("salary", salary))?;
    let pin = Pin::parse(pin)?;
    let account_type: AccountType = account_type.parse()?;
    let security_question: SecurityQuestion = question.parse()?;

    Ok(NewAccount {
        name: name.to_string(),
        age,
        salary,
        pin: verifier.seal_pin(&pin),
        account_type,
        security_question,
        security_answer: verifier.seal_answer(answer),
    })
}

/// Check that debiting `amount` keeps `balance` at or above `min_balance`
pub fn check_minimum_balance(
    balance: Decimal,
    amount: Decimal,
    min_balance: Decimal,
) -> Result<(), LedgerError> {
    match balance.checked_sub(amount) {
        Some(remaining) if remaining >= min_balance => Ok(()),
        _ => Err(LedgerError::InsufficientFunds {
            balance,
            requested: amount,
            min_balance,
        }),
    }
}

/// Parse an administrator-supplied balance; any non-negative number
pub fn parse_admin_balance(input: &str) -> Result<Decimal, LedgerError> {
    let value = parse_decimal(input).ok_or_else(|| LedgerError::invalid_format("balance", input))?;
    if value < Decimal::ZERO {
        return Err(LedgerError::NegativeBalance { value });
    }
    Ok(value)
}

/// Parse an administrator-supplied minimum balance for one account type
pub fn parse_minimum(account_type: AccountType, input: &str) -> Result<Decimal, LedgerError> {
    let value =
        parse_decimal(input).ok_or_else(|| LedgerError::invalid_format("min_balance", input))?;
    if value < Decimal::ZERO {
        return Err(LedgerError::NegativeValue {
            account_type: account_type.to_string(),
            value,
        });
    }
    Ok(value)
}

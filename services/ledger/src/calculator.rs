//! Financial calculators
//!
//! Stateless loan, EMI and interest quotes. Rates are annual percentages
//! (12 = 12%). Results are rounded to cents, midpoint away from zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MONTHS_PER_YEAR: i64 = 12;

/// Calculator input errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("Principal must not be negative, got {0}")]
    NegativePrincipal(Decimal),

    #[error("Interest rate must not be negative, got {0}")]
    NegativeRate(Decimal),

    #[error("Term must be positive, got {0}")]
    NonPositiveTerm(Decimal),

    #[error("Result out of range")]
    Overflow,
}

/// Amortised repayment quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub monthly_payment: Decimal,
    pub total_payment: Decimal,
    pub total_interest: Decimal,
}

/// Simple versus annually compounded interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestQuote {
    pub simple_interest: Decimal,
    pub compound_interest: Decimal,
    pub simple_total: Decimal,
    pub compound_total: Decimal,
}

/// Quote a loan repaid monthly over `years`
pub fn loan_quote(
    principal: Decimal,
    annual_rate_percent: Decimal,
    years: Decimal,
) -> Result<LoanQuote, CalculatorError> {
    check_inputs(principal, annual_rate_percent, years)?;
    let payments = years
        .checked_mul(Decimal::from(MONTHS_PER_YEAR))
        .ok_or(CalculatorError::Overflow)?;
    amortise(principal, annual_rate_percent, payments)
}

/// Quote an equated monthly instalment over `months`
pub fn emi_quote(
    principal: Decimal,
    annual_rate_percent: Decimal,
    months: Decimal,
) -> Result<LoanQuote, CalculatorError> {
    check_inputs(principal, annual_rate_percent, months)?;
    amortise(principal, annual_rate_percent, months)
}

/// Quote simple and annually compounded interest over `years`
pub fn interest_quote(
    principal: Decimal,
    annual_rate_percent: Decimal,
    years: Decimal,
) -> Result<InterestQuote, CalculatorError> {
    check_inputs(principal, annual_rate_percent, years)?;
    let rate = checked(annual_rate_percent.checked_div(Decimal::ONE_HUNDRED))?;

    let simple_interest = checked(
        principal
            .checked_mul(rate)
            .and_then(|v| v.checked_mul(years)),
    )?;
    let growth = power(checked(Decimal::ONE.checked_add(rate))?, years)?;
    let compound_total = checked(principal.checked_mul(growth))?;

    Ok(InterestQuote {
        simple_interest: cents(simple_interest),
        compound_interest: cents(checked(compound_total.checked_sub(principal))?),
        simple_total: cents(checked(principal.checked_add(simple_interest))?),
        compound_total: cents(compound_total),
    })
}

fn check_inputs(principal: Decimal, rate: Decimal, term: Decimal) -> Result<(), CalculatorError> {
    if principal < Decimal::ZERO {
        return Err(CalculatorError::NegativePrincipal(principal));
    }
    if rate < Decimal::ZERO {
        return Err(CalculatorError::NegativeRate(rate));
    }
    if term <= Decimal::ZERO {
        return Err(CalculatorError::NonPositiveTerm(term));
    }
    Ok(())
}

fn amortise(
    principal: Decimal,
    annual_rate_percent: Decimal,
    payments: Decimal,
) -> Result<LoanQuote, CalculatorError> {
    let monthly_rate = checked(
        annual_rate_percent
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|v| v.checked_div(Decimal::from(MONTHS_PER_YEAR))),
    )?;

    let monthly_payment = if monthly_rate.is_zero() {
        checked(principal.checked_div(payments))?
    } else {
        let growth = power(checked(Decimal::ONE.checked_add(monthly_rate))?, payments)?;
        checked(
            principal
                .checked_mul(monthly_rate)
                .and_then(|v| v.checked_mul(growth))
                .and_then(|v| growth.checked_sub(Decimal::ONE).and_then(|d| v.checked_div(d))),
        )?
    };
    let total_payment = cents(checked(monthly_payment.checked_mul(payments))?);

    Ok(LoanQuote {
        monthly_payment: cents(monthly_payment),
        total_payment,
        total_interest: checked(total_payment.checked_sub(principal))?,
    })
}

/// `base` raised to `exp`, exact for whole-number exponents
fn power(base: Decimal, exp: Decimal) -> Result<Decimal, CalculatorError> {
    let result = if exp.fract().is_zero() {
        exp.to_i64().and_then(|n| base.checked_powi(n))
    } else {
        base.checked_powd(exp)
    };
    result.ok_or(CalculatorError::Overflow)
}

fn checked(value: Option<Decimal>) -> Result<Decimal, CalculatorError> {
    value.ok_or(CalculatorError::Overflow)
}

fn cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

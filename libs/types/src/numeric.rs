//! Decimal input parsing and validated amounts
//!
//! Money is held as `rust_decimal::Decimal` for deterministic arithmetic.
//! Raw text from the presentation layer is parsed here so every service
//! applies the same rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::LedgerError;

/// Parse a decimal number, accepting plain and scientific notation.
///
/// Surrounding whitespace is ignored. Returns `None` for anything else.
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Parse a whole number such as an age.
pub fn parse_integer(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok()
}

/// Strictly positive amount for deposits, withdrawals and transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Wrap a decimal, rejecting zero and negatives
    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount {
                input: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Parse raw input into a positive amount
    pub fn parse(input: &str) -> Result<Self, LedgerError> {
        match parse_decimal(input) {
            Some(value) if value > Decimal::ZERO => Ok(Self(value)),
            _ => Err(LedgerError::InvalidAmount {
                input: input.to_string(),
            }),
        }
    }

    /// Get inner decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_plain() {
        assert_eq!(parse_decimal("250.75"), Some(Decimal::from_str_exact("250.75").unwrap()));
        assert_eq!(parse_decimal("  42 "), Some(Decimal::from(42)));
        assert_eq!(parse_decimal("-3"), Some(Decimal::from(-3)));
    }

    #[test]
    fn test_parse_decimal_scientific() {
        assert_eq!(parse_decimal("1e3"), Some(Decimal::from(1000)));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("12abc"), None);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("30"), Some(30));
        assert_eq!(parse_integer(" 30 "), Some(30));
        assert_eq!(parse_integer("30.5"), None);
        assert_eq!(parse_integer("thirty"), None);
    }

    #[test]
    fn test_amount_parse_positive() {
        let amount = Amount::parse("100").unwrap();
        assert_eq!(amount.as_decimal(), Decimal::from(100));
    }

    #[test]
    fn test_amount_rejects_zero_and_negative() {
        assert_eq!(
            Amount::parse("0"),
            Err(LedgerError::InvalidAmount { input: "0".to_string() })
        );
        assert!(Amount::parse("-5").is_err());
        assert!(Amount::new(Decimal::ZERO).is_err());
        assert!(Amount::new(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_amount_rejects_non_numeric() {
        assert_eq!(
            Amount::parse("ten"),
            Err(LedgerError::InvalidAmount { input: "ten".to_string() })
        );
    }
}

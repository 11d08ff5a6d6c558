//! Credential value types
//!
//! A `Pin` can only be constructed from exactly four ASCII digits, so any
//! PIN that reaches an account record already satisfies the format rule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::LedgerError;

/// Number of digits in a PIN
pub const PIN_LENGTH: usize = 4;

/// Four-digit personal identification number
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pin(String);

impl Pin {
    /// Validate raw input as a PIN
    pub fn parse(input: &str) -> Result<Self, LedgerError> {
        if input.len() == PIN_LENGTH && input.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(input.to_string()))
        } else {
            Err(LedgerError::InvalidPin {
                attempts_remaining: None,
            })
        }
    }

    /// Check raw input against the PIN format without keeping it
    pub fn is_well_formed(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the digits.
impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// Fixed list of recovery questions offered at account creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityQuestion {
    #[default]
    MothersMaidenName,
    FirstPet,
    FavoriteBook,
    FirstSchool,
    FavoriteColor,
}

impl SecurityQuestion {
    /// All questions in presentation order
    pub const ALL: [SecurityQuestion; 5] = [
        SecurityQuestion::MothersMaidenName,
        SecurityQuestion::FirstPet,
        SecurityQuestion::FavoriteBook,
        SecurityQuestion::FirstSchool,
        SecurityQuestion::FavoriteColor,
    ];

    /// Question text shown to the user
    pub fn prompt(&self) -> &'static str {
        match self {
            SecurityQuestion::MothersMaidenName => "What is your mother's maiden name?",
            SecurityQuestion::FirstPet => "What is the name of your first pet?",
            SecurityQuestion::FavoriteBook => "What is your favorite book?",
            SecurityQuestion::FirstSchool => "What is the name of the school you first attended?",
            SecurityQuestion::FavoriteColor => "What is your favorite color?",
        }
    }
}

impl fmt::Display for SecurityQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prompt())
    }
}

impl FromStr for SecurityQuestion {
    type Err = LedgerError;

    /// Parse from the prompt text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SecurityQuestion::ALL
            .into_iter()
            .find(|q| q.prompt() == wanted)
            .ok_or_else(|| LedgerError::invalid_format("security_question", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_accepts_four_digits() {
        let pin = Pin::parse("0420").unwrap();
        assert_eq!(pin.as_str(), "0420");
    }

    #[test]
    fn test_pin_rejects_bad_shapes() {
        for bad in ["", "123", "12345", "12a4", " 123", "١٢٣٤"] {
            assert_eq!(
                Pin::parse(bad),
                Err(LedgerError::InvalidPin {
                    attempts_remaining: None
                }),
                "{bad:?} must be rejected"
            );
        }
    }

    #[test]
    fn test_pin_debug_is_redacted() {
        let pin = Pin::parse("1234").unwrap();
        assert_eq!(format!("{:?}", pin), "Pin(****)");
    }

    #[test]
    fn test_security_question_round_trip_through_prompt() {
        for question in SecurityQuestion::ALL {
            let parsed: SecurityQuestion = question.prompt().parse().unwrap();
            assert_eq!(parsed, question);
        }
    }

    #[test]
    fn test_security_question_unknown_text() {
        let err = "What is your shoe size?".parse::<SecurityQuestion>().unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidFormat {
                field: "security_question",
                ..
            }
        ));
    }

    mod fuzz {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fuzz_four_digit_strings_are_pins(pin in "[0-9]{4}") {
                prop_assert!(Pin::is_well_formed(&pin));
            }

            #[test]
            fn fuzz_accepted_pins_are_four_ascii_digits(input in "\\PC{0,6}") {
                if let Ok(pin) = Pin::parse(&input) {
                    prop_assert_eq!(pin.as_str().len(), PIN_LENGTH);
                    prop_assert!(pin.as_str().bytes().all(|b| b.is_ascii_digit()));
                }
            }
        }
    }
}

//! Ledger configuration
//!
//! Every field has a default, so a JSON document only needs the keys it
//! overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::account::AccountTypeConfig;

/// Longest account number that still fits the uniqueness check cheaply
const MAX_ACCOUNT_NUMBER_DIGITS: usize = 18;

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}

/// Administrator credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Ledger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Consecutive wrong PINs before an account locks
    pub max_login_attempts: u32,
    /// Length of generated account numbers
    pub account_number_digits: usize,
    /// Redraws allowed when a generated account number is already taken
    pub account_number_retries: u32,
    /// Credentials required for administrative overrides
    pub admin: AdminCredentials,
    /// Minimum balances and interest rates per account type
    pub account_types: AccountTypeConfig,
    /// Seed for account-number generation; entropy when unset
    pub rng_seed: Option<u64>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: 3,
            account_number_digits: 10,
            account_number_retries: 32,
            admin: AdminCredentials::default(),
            account_types: AccountTypeConfig::default(),
            rng_seed: None,
        }
    }
}

impl LedgerConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: LedgerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_login_attempts == 0 {
            return Err(ConfigError::Invalid {
                reason: "max_login_attempts must be at least 1".to_string(),
            });
        }
        if self.account_number_digits == 0
            || self.account_number_digits > MAX_ACCOUNT_NUMBER_DIGITS
        {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "account_number_digits must be between 1 and {}",
                    MAX_ACCOUNT_NUMBER_DIGITS
                ),
            });
        }
        if self.admin.username.is_empty() || self.admin.password.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "admin credentials must not be empty".to_string(),
            });
        }
        if let Some((account_type, _)) = self
            .account_types
            .iter()
            .find(|(_, terms)| terms.min_balance < rust_decimal::Decimal::ZERO)
        {
            return Err(ConfigError::Invalid {
                reason: format!("minimum balance for {} is negative", account_type),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use types::account::AccountType;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.max_login_attempts, 3);
        assert_eq!(config.account_number_digits, 10);
        assert_eq!(config.admin.username, "admin");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LedgerConfig::from_json(r#"{"max_login_attempts": 5, "rng_seed": 9}"#).unwrap();
        assert_eq!(config.max_login_attempts, 5);
        assert_eq!(config.rng_seed, Some(9));
        assert_eq!(config.account_number_digits, 10);
        assert_eq!(
            config.account_types.min_balance(AccountType::Savings),
            Decimal::from(1_000)
        );
    }

    #[test]
    fn test_json_round_trip() {
        let config = LedgerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(LedgerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let err = LedgerConfig::from_json(r#"{"max_login_attempts": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_bad_digits() {
        assert!(LedgerConfig::from_json(r#"{"account_number_digits": 0}"#).is_err());
        assert!(LedgerConfig::from_json(r#"{"account_number_digits": 40}"#).is_err());
    }

    #[test]
    fn test_rejects_negative_minimum() {
        let json = r#"{"account_types": {"Current": {"min_balance": "-1", "interest_rate": "0.02"}}}"#;
        assert!(matches!(
            LedgerConfig::from_json(json),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            LedgerConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_debug_redacts_admin_password() {
        let config = LedgerConfig::default();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("admin123"));
    }
}

//! Credential sealing and verification
//!
//! The auth gate never compares PINs or security answers itself; it asks a
//! [`CredentialVerifier`]. The stock implementation keeps credentials in
//! plain comparable form. A hashing verifier can be dropped in without
//! touching the auth logic.

use std::fmt;

use types::security::Pin;

/// Seals credentials for storage and checks candidates against them
pub trait CredentialVerifier: fmt::Debug + Send + Sync {
    /// Stored form of a PIN
    fn seal_pin(&self, pin: &Pin) -> String;

    /// Check raw PIN input against a stored PIN
    fn verify_pin(&self, sealed: &str, candidate: &str) -> bool;

    /// Stored form of a security answer
    fn seal_answer(&self, answer: &str) -> String;

    /// Check a raw answer against a stored answer, ignoring case
    fn verify_answer(&self, sealed: &str, candidate: &str) -> bool;
}

/// Keeps credentials as entered and compares them directly
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn seal_pin(&self, pin: &Pin) -> String {
        pin.as_str().to_string()
    }

    fn verify_pin(&self, sealed: &str, candidate: &str) -> bool {
        sealed == candidate
    }

    fn seal_answer(&self, answer: &str) -> String {
        answer.to_string()
    }

    fn verify_answer(&self, sealed: &str, candidate: &str) -> bool {
        sealed.to_lowercase() == candidate.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_round_trip() {
        let verifier = PlaintextVerifier;
        let sealed = verifier.seal_pin(&Pin::parse("1234").unwrap());
        assert!(verifier.verify_pin(&sealed, "1234"));
        assert!(!verifier.verify_pin(&sealed, "4321"));
        assert!(!verifier.verify_pin(&sealed, ""));
    }

    #[test]
    fn test_answer_ignores_case() {
        let verifier = PlaintextVerifier;
        let sealed = verifier.seal_answer("Blue");
        assert!(verifier.verify_answer(&sealed, "blue"));
        assert!(verifier.verify_answer(&sealed, "BLUE"));
        assert!(!verifier.verify_answer(&sealed, "green"));
    }

    #[test]
    fn test_answer_keeps_whitespace_significant() {
        let verifier = PlaintextVerifier;
        let sealed = verifier.seal_answer("Blue");
        assert!(!verifier.verify_answer(&sealed, " blue"));
    }
}

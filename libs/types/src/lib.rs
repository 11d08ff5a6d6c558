//! Types library for the account ledger
//!
//! This library provides the core type definitions shared by the ledger
//! services: account records, transaction history entries, credential
//! value types and the error taxonomy.
//!
//! # Modules
//! - `ids`: Identifiers (AccountNumber, SessionId, TransactionId)
//! - `numeric`: Decimal input parsing and validated amounts
//! - `account`: Account records, account types and their terms
//! - `transaction`: Transaction history entries
//! - `security`: PINs and security questions
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod account;
pub mod transaction;
pub mod security;
pub mod errors;

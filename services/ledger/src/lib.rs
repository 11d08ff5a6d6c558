//! Ledger Service
//!
//! In-memory account ledger with:
//! - account creation and PIN-based login with lockout
//! - deposits, withdrawals and transfers under per-type minimum balances
//! - PIN change and security-question recovery
//! - administrative overrides behind an admin credential
//! - loan, EMI and interest calculators
//!
//! [`bank::Bank`] is the entry point a presentation layer talks to. It
//! threads an explicit [`auth::Session`] through every authenticated call.

pub mod config;
pub mod store;
pub mod verifier;
pub mod validator;
pub mod auth;
pub mod engine;
pub mod admin;
pub mod bank;
pub mod calculator;

pub use bank::Bank;
pub use config::LedgerConfig;

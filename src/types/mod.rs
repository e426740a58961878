//! Types module
//!
//! Contains core data structures used throughout the ledger.
//! This module organizes types into logical submodules:
//! - `account`: Account value type and arithmetic helpers
//! - `transaction`: Transaction tagged union and identifiers
//! - `error`: Error types for the ledger engine

pub mod account;
pub mod error;
pub mod transaction;

pub use account::Account;
pub use error::LedgerError;
pub use transaction::{AccountId, Balance, Transaction};

//! Error types for the Ledger Engine
//!
//! This module defines all error outcomes a transaction can produce. None of
//! them leave partial state behind: a rejected transaction writes nothing.
//!
//! # Error Categories
//!
//! - **Contract violations**: non-positive amounts, self-transfers — rejected
//!   before the serialization gate is even acquired.
//! - **Policy outcomes**: insufficient funds — the transaction is refused and
//!   balances stay exactly as they were.
//! - **Arithmetic errors**: overflow in balance calculations.

use super::transaction::{AccountId, Balance};
use thiserror::Error;

/// Main error type for the ledger engine
///
/// The original design handled insufficient funds as a silent no-op; here it
/// is surfaced explicitly so callers can distinguish "refused" from "not yet
/// applied". The no-write behavior is the same either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Transaction amount is zero or negative
    ///
    /// Amounts are positive by contract. Rather than silently corrupting a
    /// balance with a negative credit, the engine fails fast.
    #[error("Invalid amount {amount} for {operation}: amounts must be positive")]
    InvalidAmount {
        /// The offending amount
        amount: Balance,
        /// Operation that carried it
        operation: &'static str,
    },

    /// Transfer with identical source and destination
    ///
    /// Rejected up front: the transfer critical section reads both endpoints
    /// before writing either, so a self-transfer would clobber its own read.
    #[error("Transfer from account {account} to itself is not permitted")]
    SelfTransfer {
        /// The account named as both endpoints
        account: AccountId,
    },

    /// Insufficient funds for a withdrawal or transfer
    ///
    /// A policy outcome, not a fault: the account state remains unchanged.
    #[error(
        "Insufficient funds in account {account}: balance {balance}, requested {requested}"
    )]
    InsufficientFunds {
        /// Account that could not cover the amount
        account: AccountId,
        /// Balance at the time of the check
        balance: Balance,
        /// Requested amount
        requested: Balance,
    },

    /// Crediting would overflow the balance
    ///
    /// The transaction is rejected with no writes to maintain integrity.
    #[error("Balance overflow in {operation} for account {account}")]
    BalanceOverflow {
        /// Account whose balance would overflow
        account: AccountId,
        /// Operation that would overflow
        operation: &'static str,
    },
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Balance, operation: &'static str) -> Self {
        LedgerError::InvalidAmount { amount, operation }
    }

    /// Create a SelfTransfer error
    pub fn self_transfer(account: AccountId) -> Self {
        LedgerError::SelfTransfer { account }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountId, balance: Balance, requested: Balance) -> Self {
        LedgerError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    /// Create a BalanceOverflow error
    pub fn balance_overflow(account: AccountId, operation: &'static str) -> Self {
        LedgerError::BalanceOverflow { account, operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_include_context() {
        let err = LedgerError::insufficient_funds(7, 50, 120);
        assert_eq!(
            err.to_string(),
            "Insufficient funds in account 7: balance 50, requested 120"
        );

        let err = LedgerError::invalid_amount(-3, "deposit");
        assert_eq!(
            err.to_string(),
            "Invalid amount -3 for deposit: amounts must be positive"
        );
    }
}

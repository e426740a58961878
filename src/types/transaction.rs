//! Transaction-related types for the Ledger Engine
//!
//! This module defines the transaction tagged union and the identifier and
//! balance aliases used throughout the system.

use serde::{Deserialize, Serialize};

/// Account identifier
///
/// An opaque, comparable value; whoever creates an account owns its identity.
/// Supports account IDs from 0 to 4,294,967,295.
pub type AccountId = u32;

/// Account balance in abstract currency units
///
/// Balances are plain integers. All balance mutation goes through checked
/// arithmetic; non-negativity between transactions is a policy enforced by
/// the engine, not by this type.
pub type Balance = i64;

/// A balance-mutating operation accepted by the engine
///
/// A transaction is a closed, immutable value: fully specified by its variant
/// and operands, with no identity or lifecycle beyond being consumed once by
/// [`execute`](crate::core::LedgerEngine::execute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transaction {
    /// Credit `amount` to an account
    ///
    /// Creates the account implicitly (at zero) if it does not exist.
    Deposit {
        /// Amount to credit (must be positive)
        amount: Balance,
        /// Account to credit
        account: AccountId,
    },

    /// Debit `amount` from an account
    ///
    /// Rejected with no state change if the balance cannot cover the amount.
    Withdraw {
        /// Amount to debit (must be positive)
        amount: Balance,
        /// Account to debit
        account: AccountId,
    },

    /// Move `amount` from one account to another
    ///
    /// Applied to both accounts atomically, or to neither: a rejected
    /// transfer (insufficient source funds) leaves both balances untouched.
    Transfer {
        /// Amount to move (must be positive)
        amount: Balance,
        /// Source account
        from: AccountId,
        /// Destination account
        to: AccountId,
    },
}

impl Transaction {
    /// The amount carried by this transaction, regardless of variant
    pub fn amount(&self) -> Balance {
        match *self {
            Transaction::Deposit { amount, .. }
            | Transaction::Withdraw { amount, .. }
            | Transaction::Transfer { amount, .. } => amount,
        }
    }

    /// Human-readable name of the variant, used in errors and log events
    pub fn kind(&self) -> &'static str {
        match self {
            Transaction::Deposit { .. } => "deposit",
            Transaction::Withdraw { .. } => "withdraw",
            Transaction::Transfer { .. } => "transfer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_is_variant_independent() {
        assert_eq!(Transaction::Deposit { amount: 7, account: 1 }.amount(), 7);
        assert_eq!(Transaction::Withdraw { amount: 9, account: 1 }.amount(), 9);
        assert_eq!(
            Transaction::Transfer { amount: 11, from: 1, to: 2 }.amount(),
            11
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Transaction::Deposit { amount: 1, account: 1 }.kind(), "deposit");
        assert_eq!(Transaction::Withdraw { amount: 1, account: 1 }.kind(), "withdraw");
        assert_eq!(
            Transaction::Transfer { amount: 1, from: 1, to: 2 }.kind(),
            "transfer"
        );
    }
}

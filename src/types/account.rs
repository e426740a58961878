//! Account-related types for the Ledger Engine
//!
//! This module defines the Account value type. An account carries no
//! synchronization of its own: it is copied by value out of the store,
//! mutated locally, and written back in full, all inside an engine-held
//! critical section.

use super::transaction::{AccountId, Balance};
use serde::{Deserialize, Serialize};

/// A ledger account: identifier plus current balance
///
/// Plain data with arithmetic helpers. The store hands out copies, so a value
/// held outside a critical section is only ever a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account ID (u32: 0-4,294,967,295)
    pub id: AccountId,

    /// Current balance in abstract currency units
    pub balance: Balance,
}

impl Account {
    /// Create a new account with a zero balance
    ///
    /// This is also what the store returns for an unknown ID: accounts come
    /// into being implicitly on first reference.
    pub fn new(id: AccountId) -> Self {
        Account { id, balance: 0 }
    }

    /// Create an account with an explicit initial balance
    pub fn with_balance(id: AccountId, balance: Balance) -> Self {
        Account { id, balance }
    }

    /// Balance after crediting `amount`, or `None` on overflow
    pub fn checked_credit(&self, amount: Balance) -> Option<Balance> {
        self.balance.checked_add(amount)
    }

    /// Balance after debiting `amount`, or `None` on underflow
    pub fn checked_debit(&self, amount: Balance) -> Option<Balance> {
        self.balance.checked_sub(amount)
    }

    /// Whether the balance covers `amount`
    ///
    /// This is the engine's insufficient-funds check; a raw debit has no
    /// bound check of its own.
    pub fn can_cover(&self, amount: Balance) -> bool {
        self.balance >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_starts_at_zero() {
        let account = Account::new(1);

        assert_eq!(account.id, 1);
        assert_eq!(account.balance, 0);
    }

    #[test]
    fn test_with_balance_sets_initial_balance() {
        let account = Account::with_balance(2, 500);

        assert_eq!(account.id, 2);
        assert_eq!(account.balance, 500);
    }

    #[test]
    fn test_checked_credit_and_debit() {
        let account = Account::with_balance(1, 100);

        assert_eq!(account.checked_credit(50), Some(150));
        assert_eq!(account.checked_debit(50), Some(50));
    }

    #[test]
    fn test_checked_credit_detects_overflow() {
        let account = Account::with_balance(1, Balance::MAX);

        assert_eq!(account.checked_credit(1), None);
    }

    #[test]
    fn test_can_cover_boundary() {
        let account = Account::with_balance(1, 100);

        assert!(account.can_cover(100));
        assert!(!account.can_cover(101));
    }
}

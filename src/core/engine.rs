//! Transaction execution orchestration
//!
//! This module provides the `LedgerEngine`, which accepts transactions,
//! dispatches them to the matching read-modify-write sequence against the
//! account store, and wraps every sequence in the serialization gate.
//!
//! # Why the gate is load-bearing
//!
//! Every mutation is get → compute → put, and both store calls suspend. The
//! store orders nothing across callers, so two unserialized deposits to the
//! same account can each read the same stale balance and overwrite each
//! other's write. The engine therefore holds the gate for the *entire*
//! sequence — releasing and re-acquiring mid-operation (say, between the two
//! halves of a transfer) would reopen exactly that race.
//!
//! # Architecture
//!
//! ```text
//! LedgerEngine
//!     ├── Arc<S: AccountStore>      (latency-bearing balance storage)
//!     └── Arc<SerializationGate>    (fair FIFO mutual exclusion)
//! ```
//!
//! The engine is `Clone` and safe to share across tasks; all engine clones
//! serialize through the same gate.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::store::AccountStore;
use crate::sync::SerializationGate;
use crate::types::{Account, AccountId, Balance, LedgerError, Transaction};

/// Transaction execution engine
///
/// Dispatches each [`Transaction`] to its critical section and serializes all
/// sections — including [`balance_of`](Self::balance_of) reads — through one
/// global gate. Global serialization caps throughput at a single in-flight
/// critical section; that is the deliberate price of making the correctness
/// argument trivial. A per-account gate scheme (acquiring both endpoints of a
/// transfer in ascending ID order) is the documented higher-throughput
/// variant.
#[derive(Debug)]
pub struct LedgerEngine<S> {
    /// Shared account storage, only ever touched while holding the gate
    store: Arc<S>,

    /// Serializes every critical section across all engine clones
    gate: Arc<SerializationGate>,
}

// Derived Clone would require S: Clone; the engine only clones the Arcs.
impl<S> Clone for LedgerEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            gate: Arc::clone(&self.gate),
        }
    }
}

impl<S: AccountStore> LedgerEngine<S> {
    /// Create an engine over the given store with a fresh gate
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            gate: Arc::new(SerializationGate::new()),
        }
    }

    /// Execute a transaction, suspending until it is applied to the store
    ///
    /// Validation (positive amount, distinct transfer endpoints) happens
    /// before the gate is acquired: a transaction that can never apply is
    /// rejected without serializing behind in-flight work.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The mutation is fully applied to the store's view
    /// * `Err(LedgerError::InvalidAmount)` - Zero or negative amount
    /// * `Err(LedgerError::SelfTransfer)` - Transfer with `from == to`
    /// * `Err(LedgerError::InsufficientFunds)` - Withdraw/Transfer refused;
    ///   no balance was changed
    /// * `Err(LedgerError::BalanceOverflow)` - Credit would overflow; no
    ///   balance was changed
    pub async fn execute(&self, transaction: Transaction) -> Result<(), LedgerError> {
        self.validate(&transaction)?;

        self.gate.acquire().await;
        let result = match transaction {
            Transaction::Deposit { amount, account } => self.apply_deposit(account, amount).await,
            Transaction::Withdraw { amount, account } => self.apply_withdraw(account, amount).await,
            Transaction::Transfer { amount, from, to } => {
                self.apply_transfer(from, to, amount).await
            }
        };
        self.gate.release();

        match &result {
            Ok(()) => debug!(kind = transaction.kind(), "transaction applied"),
            Err(error) => debug!(kind = transaction.kind(), %error, "transaction rejected"),
        }
        result
    }

    /// Read an account's current balance
    ///
    /// The read passes through the gate like any mutation: a direct store
    /// read could otherwise observe an account mid-mutation, between an
    /// in-flight transaction's check and its write.
    pub async fn balance_of(&self, id: AccountId) -> Balance {
        self.gate.acquire().await;
        let account = self.store.get(id).await;
        self.gate.release();
        account.balance
    }

    /// Pre-gate contract checks
    fn validate(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        if transaction.amount() <= 0 {
            return Err(LedgerError::invalid_amount(
                transaction.amount(),
                transaction.kind(),
            ));
        }
        if let Transaction::Transfer { from, to, .. } = *transaction {
            // The transfer section reads both endpoints before writing
            // either; with from == to the second write would clobber the
            // first, silently destroying `amount`.
            if from == to {
                return Err(LedgerError::self_transfer(from));
            }
        }
        Ok(())
    }

    /// Critical section: credit `amount` to `account`
    async fn apply_deposit(&self, account: AccountId, amount: Balance) -> Result<(), LedgerError> {
        let current = self.store.get(account).await;
        let credited = current
            .checked_credit(amount)
            .ok_or_else(|| LedgerError::balance_overflow(account, "deposit"))?;
        self.store.put(Account::with_balance(account, credited)).await;
        trace!(account, amount, balance = credited, "deposit applied");
        Ok(())
    }

    /// Critical section: debit `amount` from `account` if it can cover it
    async fn apply_withdraw(&self, account: AccountId, amount: Balance) -> Result<(), LedgerError> {
        let current = self.store.get(account).await;
        if !current.can_cover(amount) {
            return Err(LedgerError::insufficient_funds(
                account,
                current.balance,
                amount,
            ));
        }
        // can_cover plus positive amount make this debit infallible.
        let debited = current.balance - amount;
        self.store.put(Account::with_balance(account, debited)).await;
        trace!(account, amount, balance = debited, "withdrawal applied");
        Ok(())
    }

    /// Critical section: move `amount` from `from` to `to`
    ///
    /// Both accounts' read-modify-write pairs execute inside this one held
    /// section. Both new balances are computed before either write, so a
    /// failed check (funds or overflow) rejects the transfer with zero
    /// writes, and no other task can observe the state between the two puts.
    async fn apply_transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Balance,
    ) -> Result<(), LedgerError> {
        let source = self.store.get(from).await;
        if !source.can_cover(amount) {
            return Err(LedgerError::insufficient_funds(
                from,
                source.balance,
                amount,
            ));
        }
        let destination = self.store.get(to).await;
        let credited = destination
            .checked_credit(amount)
            .ok_or_else(|| LedgerError::balance_overflow(to, "transfer"))?;
        let debited = source.balance - amount;

        self.store.put(Account::with_balance(to, credited)).await;
        self.store.put(Account::with_balance(from, debited)).await;
        trace!(from, to, amount, "transfer applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use crate::types::Balance;

    fn engine() -> LedgerEngine<InMemoryStore> {
        LedgerEngine::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn test_deposit_credits_account() {
        let engine = engine();

        engine
            .execute(Transaction::Deposit { amount: 100, account: 1 })
            .await
            .unwrap();

        assert_eq!(engine.balance_of(1).await, 100);
    }

    #[tokio::test]
    async fn test_deposit_then_withdraw() {
        let engine = engine();

        engine
            .execute(Transaction::Deposit { amount: 200, account: 1 })
            .await
            .unwrap();
        engine
            .execute(Transaction::Withdraw { amount: 50, account: 1 })
            .await
            .unwrap();

        assert_eq!(engine.balance_of(1).await, 150);
    }

    #[tokio::test]
    async fn test_withdraw_from_fresh_account_is_refused() {
        let engine = engine();

        let result = engine
            .execute(Transaction::Withdraw { amount: 100, account: 1 })
            .await;

        assert_eq!(
            result.unwrap_err(),
            LedgerError::insufficient_funds(1, 0, 100)
        );
        assert_eq!(engine.balance_of(1).await, 0);
    }

    #[tokio::test]
    async fn test_withdraw_exact_balance_succeeds() {
        let engine = engine();

        engine
            .execute(Transaction::Deposit { amount: 75, account: 1 })
            .await
            .unwrap();
        engine
            .execute(Transaction::Withdraw { amount: 75, account: 1 })
            .await
            .unwrap();

        assert_eq!(engine.balance_of(1).await, 0);
    }

    #[tokio::test]
    async fn test_transfer_moves_funds() {
        let engine = engine();

        engine
            .execute(Transaction::Deposit { amount: 300, account: 1 })
            .await
            .unwrap();
        engine
            .execute(Transaction::Transfer { amount: 120, from: 1, to: 2 })
            .await
            .unwrap();

        assert_eq!(engine.balance_of(1).await, 180);
        assert_eq!(engine.balance_of(2).await, 120);
    }

    #[tokio::test]
    async fn test_underfunded_transfer_changes_neither_account() {
        let engine = engine();

        engine
            .execute(Transaction::Deposit { amount: 100, account: 1 })
            .await
            .unwrap();
        let result = engine
            .execute(Transaction::Transfer { amount: 170, from: 1, to: 2 })
            .await;

        assert_eq!(
            result.unwrap_err(),
            LedgerError::insufficient_funds(1, 100, 170)
        );
        assert_eq!(engine.balance_of(1).await, 100);
        assert_eq!(engine.balance_of(2).await, 0);
    }

    #[tokio::test]
    async fn test_zero_and_negative_amounts_are_rejected() {
        let engine = engine();

        for transaction in [
            Transaction::Deposit { amount: 0, account: 1 },
            Transaction::Deposit { amount: -5, account: 1 },
            Transaction::Withdraw { amount: 0, account: 1 },
            Transaction::Transfer { amount: -1, from: 1, to: 2 },
        ] {
            let result = engine.execute(transaction).await;
            assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
        }

        assert_eq!(engine.balance_of(1).await, 0);
    }

    #[tokio::test]
    async fn test_self_transfer_is_rejected() {
        let engine = engine();

        engine
            .execute(Transaction::Deposit { amount: 100, account: 1 })
            .await
            .unwrap();
        let result = engine
            .execute(Transaction::Transfer { amount: 40, from: 1, to: 1 })
            .await;

        assert_eq!(result.unwrap_err(), LedgerError::self_transfer(1));
        assert_eq!(engine.balance_of(1).await, 100);
    }

    #[tokio::test]
    async fn test_overflowing_deposit_is_rejected_without_write() {
        let engine = engine();

        engine
            .execute(Transaction::Deposit { amount: Balance::MAX, account: 1 })
            .await
            .unwrap();
        let result = engine
            .execute(Transaction::Deposit { amount: 1, account: 1 })
            .await;

        assert_eq!(
            result.unwrap_err(),
            LedgerError::balance_overflow(1, "deposit")
        );
        assert_eq!(engine.balance_of(1).await, Balance::MAX);
    }

    #[tokio::test]
    async fn test_overflowing_transfer_leaves_both_accounts_unchanged() {
        let engine = engine();

        engine
            .execute(Transaction::Deposit { amount: 10, account: 1 })
            .await
            .unwrap();
        engine
            .execute(Transaction::Deposit { amount: Balance::MAX, account: 2 })
            .await
            .unwrap();
        let result = engine
            .execute(Transaction::Transfer { amount: 10, from: 1, to: 2 })
            .await;

        assert_eq!(
            result.unwrap_err(),
            LedgerError::balance_overflow(2, "transfer")
        );
        assert_eq!(engine.balance_of(1).await, 10);
        assert_eq!(engine.balance_of(2).await, Balance::MAX);
    }

    #[tokio::test]
    async fn test_gate_is_free_after_rejected_transaction() {
        let engine = engine();

        let _ = engine
            .execute(Transaction::Withdraw { amount: 10, account: 1 })
            .await;

        // A refused critical section must still release the gate.
        engine
            .execute(Transaction::Deposit { amount: 10, account: 1 })
            .await
            .unwrap();
        assert_eq!(engine.balance_of(1).await, 10);
    }
}

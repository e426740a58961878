//! In-memory account store with injectable latency
//!
//! This module provides `InMemoryStore`, a DashMap-backed implementation of
//! [`AccountStore`] whose `get`/`put` sleep for a random duration before
//! touching the map. The latency is an injection point for tests: widening it
//! widens the window in which an unserialized read-modify-write race would
//! manifest, making lost updates reproducible instead of rare.
//!
//! # Thread Safety
//!
//! DashMap provides fine-grained locking per map entry, so individual `get`
//! and `put` calls are internally consistent. That is deliberately all it
//! provides: a get-compute-put sequence spanning two calls is *not* atomic
//! here, matching the store contract the engine must compensate for.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use rand::Rng;
use tokio::time::sleep;

use super::traits::AccountStore;
use crate::types::{Account, AccountId, Balance};

/// Artificial latency profile for store operations
///
/// Each store call sleeps for a uniformly random duration in
/// `[0, max]` before executing. `Latency::none()` disables the sleep
/// entirely for tests that only care about logic, not interleaving.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latency {
    max: Duration,
}

impl Latency {
    /// No artificial latency: store calls still suspend, but do not sleep
    pub fn none() -> Self {
        Self {
            max: Duration::ZERO,
        }
    }

    /// Uniform random latency in `[0, max]` per store call
    pub fn up_to(max: Duration) -> Self {
        Self { max }
    }

    /// Sleep for a freshly sampled duration
    async fn induce(&self) {
        if self.max > Duration::ZERO {
            let delay = rand::thread_rng().gen_range(Duration::ZERO..=self.max);
            sleep(delay).await;
        }
    }
}

/// DashMap-backed account store
///
/// Balances are keyed by account ID; an absent key reads as a zero-balance
/// account. Every operation first induces the configured latency, then
/// performs the map access, so the access is complete by the time the call
/// returns — a caller awaiting sequentially always sees its own writes.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Balance per account ID
    balances: DashMap<AccountId, Balance>,

    /// Latency induced before each map access
    latency: Latency,
}

impl InMemoryStore {
    /// Create an empty store with no artificial latency
    pub fn new() -> Self {
        Self::with_latency(Latency::none())
    }

    /// Create an empty store with the given latency profile
    pub fn with_latency(latency: Latency) -> Self {
        Self {
            balances: DashMap::new(),
            latency,
        }
    }

    /// Number of accounts that have ever been written
    ///
    /// Accounts that only ever existed as implicit zero-balance reads are
    /// not counted; `get` does not insert.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Whether no account has been written yet
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn get(&self, id: AccountId) -> Account {
        self.latency.induce().await;
        match self.balances.get(&id) {
            Some(entry) => Account::with_balance(id, *entry),
            None => Account::new(id),
        }
    }

    async fn put(&self, account: Account) {
        self.latency.induce().await;
        self.balances.insert(account.id, account.balance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_unknown_account_reads_as_zero() {
        let store = InMemoryStore::new();

        let account = store.get(42).await;

        assert_eq!(account.id, 42);
        assert_eq!(account.balance, 0);
        // Reads do not materialize accounts.
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_put_then_get_returns_written_balance() {
        let store = InMemoryStore::new();

        store.put(Account::with_balance(1, 250)).await;
        let account = store.get(1).await;

        assert_eq!(account.balance, 250);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_put_overwrites_previous_balance() {
        let store = InMemoryStore::new();

        store.put(Account::with_balance(1, 100)).await;
        store.put(Account::with_balance(1, 30)).await;

        assert_eq!(store.get(1).await.balance, 30);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_caller_sees_own_write_despite_latency() {
        let store = InMemoryStore::with_latency(Latency::up_to(Duration::from_millis(500)));

        store.put(Account::with_balance(9, 77)).await;

        assert_eq!(store.get(9).await.balance, 77);
    }
}

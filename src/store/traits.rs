//! Account store contract consumed by the engine
//!
//! The store is an external collaborator: an unordered, non-transactional
//! key-value mapping from account ID to balance whose calls may suspend for
//! arbitrary (bounded) durations. It makes no ordering promise across
//! concurrent callers — compensating for that is the engine's job, not the
//! store's.

use crate::types::{Account, AccountId};
use async_trait::async_trait;

/// Asynchronous account storage
///
/// Both operations may suspend, simulating (or actually performing) I/O.
/// A single caller awaiting its own calls sequentially observes its own
/// writes: `put(a)` followed by `get(a.id)` returns `a`. No guarantee of any
/// kind is made about interleaving with other callers' operations.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fetch the account for `id`
    ///
    /// Unknown IDs are not an error: the store returns a fresh zero-balance
    /// account, which is how accounts come into existence implicitly.
    async fn get(&self, id: AccountId) -> Account;

    /// Store `account`, overwriting any previous balance for its ID
    async fn put(&self, account: Account);
}

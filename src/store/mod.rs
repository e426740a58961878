//! Account storage module
//!
//! The store is specified as an external collaborator; this module carries
//! its contract and a reference implementation:
//! - `traits` - The `AccountStore` async contract the engine consumes
//! - `memory` - DashMap-backed store with injectable artificial latency

pub mod memory;
pub mod traits;

pub use memory::{InMemoryStore, Latency};
pub use traits::AccountStore;

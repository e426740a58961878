//! Ledger Engine Library
//! # Overview
//!
//! This library provides a minimal concurrent ledger: balance-mutating
//! transactions executed against an asynchronous, latency-bearing account
//! store, with a serialization gate restoring atomicity to read-modify-write
//! sequences that suspend between their read and their write.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Transaction, LedgerError)
//! - [`sync`] - The serialization primitive:
//!   - [`sync::gate`] - Fair asynchronous mutual exclusion with FIFO handoff
//! - [`store`] - Account storage:
//!   - [`store::traits`] - The async `AccountStore` collaborator contract
//!   - [`store::memory`] - In-memory store with injectable latency
//! - [`core`] - Business logic:
//!   - [`core::engine`] - Transaction dispatch and gate-held critical sections
//!
//! # The race this crate closes
//!
//! Every mutation is a store `get`, a local computation, and a store `put`,
//! and both store calls suspend. Without serialization, two concurrent
//! mutations of one account can both read the same stale balance and each
//! overwrite the other's write — a lost update. The engine holds the gate
//! across the whole sequence (both accounts of a transfer included), so
//! serialized sections execute in a strict total order and `balance_of`
//! never observes a half-applied transaction.
//!
//! # Transaction Types
//!
//! - **Deposit**: Credit funds to an account
//! - **Withdraw**: Debit funds from an account (refused if underfunded)
//! - **Transfer**: Move funds between two accounts, atomically or not at all

// Module declarations
pub mod core;
pub mod store;
pub mod sync;
pub mod types;

pub use crate::core::LedgerEngine;
pub use crate::store::{AccountStore, InMemoryStore, Latency};
pub use crate::sync::SerializationGate;
pub use crate::types::{Account, AccountId, Balance, LedgerError, Transaction};

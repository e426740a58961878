//! Core business logic module
//!
//! This module contains the transaction execution core:
//! - `engine` - Dispatch and gate-serialized critical sections

pub mod engine;

pub use engine::LedgerEngine;

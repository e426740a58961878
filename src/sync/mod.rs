//! Synchronization module
//!
//! Home of the serialization primitive that restores atomicity to
//! read-modify-write sequences spanning suspension points:
//! - `gate` - Fair asynchronous mutual exclusion with FIFO handoff

pub mod gate;

pub use gate::SerializationGate;

//! Fair asynchronous mutual exclusion for critical sections
//!
//! This module provides the `SerializationGate`, the primitive the engine
//! wraps around every read-modify-write sequence against the account store.
//! The store's `get`/`put` calls suspend independently, so without the gate
//! two transactions on the same account could both read a stale balance and
//! overwrite each other's write (a lost update). Holding the gate across the
//! whole sequence restores atomicity.
//!
//! # Design
//!
//! Gate state is a plain `std::sync::Mutex` around a held flag and a FIFO
//! queue of parked waiters. The mutex is only ever held for the few
//! instructions of a state transition, never across an `.await`, so it cannot
//! block the runtime. Waiters park on a `tokio::sync::oneshot` channel;
//! `release` hands ownership directly to the queue head by completing its
//! channel.
//!
//! # Fairness
//!
//! Waiters are queued in arrival order and released in that order. During a
//! handoff the gate never transitions through a free state, so a task calling
//! `acquire` at exactly the wrong moment cannot jump ahead of the queue.

use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::oneshot;
use tracing::trace;

/// A fair async mutual-exclusion gate
///
/// At most one task holds the gate at a time; contending tasks suspend in a
/// FIFO queue. The uncontended `acquire` neither allocates nor suspends.
///
/// # Contract
///
/// Every successful `acquire` must be paired with exactly one `release` by
/// the task that acquired (or a task it delegated to). There is no timeout
/// or cancellation path: once a waiter is enqueued it stays enqueued until
/// ownership reaches it.
#[derive(Debug, Default)]
pub struct SerializationGate {
    /// Held flag plus parked waiters, locked only for state transitions
    state: Mutex<GateState>,
}

/// Internal gate state
///
/// Invariant: `held == false` implies `waiters` is empty — a waiter is only
/// ever created while the gate is held.
#[derive(Debug, Default)]
struct GateState {
    held: bool,
    waiters: VecDeque<oneshot::Sender<()>>,
}

impl SerializationGate {
    /// Create a new gate in the free state
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the gate, suspending if it is currently held
    ///
    /// If the gate is free this returns immediately. Otherwise the caller is
    /// enqueued at the tail of the waiter queue and suspends; when this
    /// method returns, the caller is the holder.
    pub async fn acquire(&self) {
        let parked = {
            let mut state = self.lock_state();
            if !state.held {
                state.held = true;
                return;
            }
            let (handoff, parked) = oneshot::channel();
            state.waiters.push_back(handoff);
            trace!(queue_depth = state.waiters.len(), "gate contended, parking");
            parked
        };

        // Resumed by `release`. The sender lives in the gate's own queue and
        // is consumed only by a successful send, so a closed channel here is
        // unreachable; treat it as a (spurious) wakeup into ownership either
        // way, since `release` marked us the holder before sending.
        let _ = parked.await;
    }

    /// Release the gate, handing it to the oldest waiter if any
    ///
    /// If the queue is non-empty, ownership transfers directly to the head
    /// waiter; the gate stays marked held for the entire handoff so no third
    /// party can slip in between. If the queue is empty the gate becomes free.
    pub fn release(&self) {
        let mut state = self.lock_state();
        while let Some(waiter) = state.waiters.pop_front() {
            if waiter.send(()).is_ok() {
                trace!(queue_depth = state.waiters.len(), "gate handed off");
                return;
            }
            // Waiter's task was dropped before resuming; skip to the next.
        }
        state.held = false;
    }

    /// Whether the gate is currently held
    ///
    /// A snapshot only: the answer may be stale by the time the caller acts
    /// on it. Exposed for tests and diagnostics, not for synchronization.
    pub fn is_held(&self) -> bool {
        self.lock_state().held
    }

    /// Number of tasks currently parked waiting for the gate
    pub fn waiting(&self) -> usize {
        self.lock_state().waiters.len()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, GateState> {
        // A poisoned mutex means a panic during a state transition; the state
        // itself is still structurally valid (flag + queue), so continue.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

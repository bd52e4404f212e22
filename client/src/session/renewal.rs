//! # Renewal Gate
//!
//! Coalesces token renewal so that a burst of 401s produces one call to the
//! refresh endpoint.
//!
//! ```text
//!            begin_or_join()                 complete(outcome)
//!   Idle ───────────────────────► Renewing ───────────────────► Idle
//!                                   │  ▲                          │
//!             begin_or_join()       │  │ waiter pushed             │ every waiter
//!             while Renewing ───────┘  │                          │ settled once
//!                                      └──────────────────────────┘
//! ```
//!
//! The first caller gets a [`RenewalLease`], an owned handle that can move
//! into a spawned task, so the renewal outlives whichever caller started it.
//! Every caller, the initiator included, waits on a [`RenewalWaiter`]. The
//! gate returns to `Idle` before any waiter is released, so a released waiter
//! that hits another 401 starts a fresh cycle instead of joining a finished one.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::core::error::ApiError;

/// New access token, or the error that ended the cycle.
pub type RenewalOutcome = Result<String, ApiError>;

enum GateState {
    Idle,
    Renewing {
        waiters: Vec<oneshot::Sender<RenewalOutcome>>,
    },
}

/// Mutual exclusion over "renewal in flight" plus fan-out to waiters.
///
/// One instance per process, shared by `Arc` between the API client and the
/// session bootstrap. The lock is never held across an `.await`.
pub struct RenewalGate {
    state: Mutex<GateState>,
}

/// Result of [`RenewalGate::begin_or_join`].
pub enum Ticket {
    /// No cycle was running; the holder must renew and call [`RenewalLease::complete`].
    Initiator(RenewalLease),
    /// A cycle is running; await its outcome.
    Waiter(RenewalWaiter),
}

impl Default for RenewalGate {
    fn default() -> Self {
        Self::new()
    }
}

impl RenewalGate {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState::Idle),
        }
    }

    /// Whether a renewal cycle is in flight.
    pub fn is_renewing(&self) -> bool {
        matches!(*self.state.lock(), GateState::Renewing { .. })
    }

    /// Number of callers queued on the current cycle.
    pub fn waiting(&self) -> usize {
        match &*self.state.lock() {
            GateState::Idle => 0,
            GateState::Renewing { waiters } => waiters.len(),
        }
    }

    /// Start a renewal cycle, or queue behind the one in flight.
    ///
    /// The check and the transition happen under one lock, so two callers can
    /// never both become initiators.
    pub fn begin_or_join(self: &Arc<Self>) -> Ticket {
        let mut state = self.state.lock();
        if let GateState::Renewing { waiters } = &mut *state {
            let (tx, rx) = oneshot::channel();
            waiters.push(tx);
            return Ticket::Waiter(RenewalWaiter { rx });
        }

        *state = GateState::Renewing { waiters: Vec::new() };
        Ticket::Initiator(RenewalLease {
            gate: Arc::clone(self),
            settled: false,
        })
    }

    fn join_current(&self) -> RenewalWaiter {
        let (tx, rx) = oneshot::channel();
        match &mut *self.state.lock() {
            GateState::Renewing { waiters } => waiters.push(tx),
            // No cycle to join: the dropped sender settles as abandoned
            GateState::Idle => drop(tx),
        }
        RenewalWaiter { rx }
    }

    fn complete(&self, outcome: &RenewalOutcome) -> usize {
        let waiters = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut *state, GateState::Idle) {
                GateState::Renewing { waiters } => waiters,
                GateState::Idle => Vec::new(),
            }
        };

        let released = waiters.len();
        for waiter in waiters {
            // A waiter that gave up dropped its receiver
            let _ = waiter.send(outcome.clone());
        }
        released
    }
}

/// Owned by the task performing a renewal.
///
/// Dropping it without calling [`complete`](RenewalLease::complete), e.g.
/// when the renewal task panics, settles every waiter with
/// [`ApiError::RenewalAbandoned`].
pub struct RenewalLease {
    gate: Arc<RenewalGate>,
    settled: bool,
}

impl RenewalLease {
    /// Queue on this lease's own cycle.
    pub fn subscribe(&self) -> RenewalWaiter {
        self.gate.join_current()
    }

    /// Return the gate to `Idle` and release all waiters with `outcome`.
    ///
    /// Returns how many waiters were released.
    pub fn complete(mut self, outcome: &RenewalOutcome) -> usize {
        self.settled = true;
        self.gate.complete(outcome)
    }
}

impl Drop for RenewalLease {
    fn drop(&mut self) {
        if !self.settled {
            let released = self.gate.complete(&Err(ApiError::RenewalAbandoned));
            tracing::warn!(released, "Token renewal dropped before completion");
        }
    }
}

/// Handle for a caller queued behind an in-flight renewal.
pub struct RenewalWaiter {
    rx: oneshot::Receiver<RenewalOutcome>,
}

impl RenewalWaiter {
    /// Wait for the in-flight cycle to settle.
    pub async fn wait(self) -> RenewalOutcome {
        self.rx.await.unwrap_or(Err(ApiError::RenewalAbandoned))
    }
}

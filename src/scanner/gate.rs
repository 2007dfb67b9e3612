// src/scanner/gate.rs
// =============================================================================
// Admission control for scan calls.
//
// A counting semaphore with N slots. Every scan takes one slot when it starts
// and gives it back when it ends. The slot is owned by a GatePermit, and
// dropping the permit is what gives it back, so early returns (`?`) and
// errors can't leak a slot.
//
// There is no timeout on acquire(): if every slot is held forever, waiting
// callers wait forever.
//
// The gate also counts how many permits are out right now and the highest
// that count has ever been, which makes the limit easy to check in tests.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Semaphore, SemaphorePermit};

use crate::error::{Result, ScanError};

#[derive(Debug)]
pub struct ConcurrencyGate {
    semaphore: Semaphore,
    limit: usize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyGate {
    /// A gate with `limit` slots. A limit of 0 is treated as 1, since a gate
    /// nobody can pass would hang every scan.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Semaphore::new(limit),
            limit,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Waits for a free slot.
    pub async fn acquire(&self) -> Result<GatePermit<'_>> {
        let permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ScanError::GateClosed)?;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        Ok(GatePermit {
            gate: self,
            _permit: permit,
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Permits currently held.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Most permits ever held at the same time.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// One occupied slot; released on drop.
#[derive(Debug)]
pub struct GatePermit<'a> {
    gate: &'a ConcurrencyGate,
    _permit: SemaphorePermit<'a>,
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        // Runs before the semaphore permit field is dropped, so the counter
        // never shows fewer holders than the semaphore does
        self.gate.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a semaphore?
//    - A counter of free slots; acquire() waits until one is free
//    - Dropping the permit puts the slot back
//
// 2. What is the 'a in GatePermit<'a>?
//    - A lifetime: the permit borrows the gate, so it can't outlive it
//
// 3. What does Ordering::SeqCst mean?
//    - The strictest memory ordering for atomics
//    - Simple to reason about, and these counters are not hot
// -----------------------------------------------------------------------------

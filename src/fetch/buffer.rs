// src/fetch/buffer.rs
// =============================================================================
// A pool of reusable byte buffers for reading response bodies.
//
// Every fetch reads a whole page into memory. With dozens of scans running
// at once, allocating a fresh Vec for every page means a lot of allocator
// churn, so finished buffers are parked here and handed out again.
//
// The pool never blocks and has no upper bound: if nothing is parked,
// acquire() simply allocates a new buffer.
// =============================================================================

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared pool of byte buffers. Cloning shares the same pool.
#[derive(Debug, Clone, Default)]
pub struct BufferPool {
    idle: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a parked buffer, or allocates one if the pool is empty.
    pub fn acquire(&self) -> PooledBuffer {
        let buffer = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_default();

        PooledBuffer {
            buffer,
            pool: self.clone(),
        }
    }

    /// Number of buffers waiting to be reused.
    pub fn idle(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    // The only way back into the pool, so every parked buffer is empty
    fn release(&self, mut buffer: Vec<u8>) {
        buffer.clear();
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(buffer);
    }
}

/// A buffer on loan from a [`BufferPool`]; goes back when dropped.
#[derive(Debug)]
pub struct PooledBuffer {
    buffer: Vec<u8>,
    pool: BufferPool,
}

impl Deref for PooledBuffer {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buffer
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        let buffer = std::mem::take(&mut self.buffer);
        self.pool.release(buffer);
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What are Deref and DerefMut?
//    - They let a PooledBuffer be used as if it were the Vec<u8> inside it
//    - body.extend_from_slice(...) works without calling a getter first
//
// 2. Why std::mem::take in drop()?
//    - drop() only gets &mut self, so we can't move the Vec out directly
//    - take() swaps in an empty Vec and hands us the real one
//
// 3. What is PoisonError::into_inner?
//    - A Mutex is "poisoned" if a thread panicked while holding it
//    - A list of spare buffers is still fine to use, so we just carry on
// -----------------------------------------------------------------------------

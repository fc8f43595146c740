//! Reusable output buffers for conversion calls.

use crossbeam_queue::ArrayQueue;
use std::ops::{Deref, DerefMut};
use std::sync::LazyLock;

/// Number of idle buffers kept by the shared pool.
const SHARED_POOL_SLOTS: usize = 64;

/// Buffers that grew past this capacity are dropped instead of pooled.
const MAX_RETAINED_CAPACITY: usize = 1 << 20;

static SHARED: LazyLock<BufferPool> = LazyLock::new(|| BufferPool::new(SHARED_POOL_SLOTS));

/// Bounded lock-free pool of byte buffers.
///
/// Buffers are borrowed through [`PooledBuffer`] guards which return them
/// on drop, so every exit path of a borrow gives the buffer back. A
/// borrowed buffer is always empty.
pub struct BufferPool {
    idle: ArrayQueue<Vec<u8>>,
}

impl BufferPool {
    /// Creates an empty pool holding at most `slots` idle buffers.
    ///
    /// # Panics
    ///
    /// Panics if `slots` is zero.
    pub fn new(slots: usize) -> Self {
        Self {
            idle: ArrayQueue::new(slots),
        }
    }

    /// Returns the process-wide pool.
    pub fn shared() -> &'static BufferPool {
        &SHARED
    }

    /// Borrows a cleared buffer, allocating one if the pool is empty.
    pub fn get(&self) -> PooledBuffer<'_> {
        let mut buf = self.idle.pop().unwrap_or_default();
        buf.clear();
        PooledBuffer { buf, pool: self }
    }

    /// Number of idle buffers currently held.
    pub fn idle(&self) -> usize {
        self.idle.len()
    }

    fn put(&self, buf: Vec<u8>) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        // Full pool: the buffer is simply dropped.
        let _ = self.idle.push(buf);
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("idle", &self.idle.len())
            .field("capacity", &self.idle.capacity())
            .finish()
    }
}

/// Buffer borrowed from a [`BufferPool`], returned when dropped.
pub struct PooledBuffer<'p> {
    buf: Vec<u8>,
    pool: &'p BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.buf));
    }
}

//! Chunked record pool with a per-kind free list.
//!
//! Records are addressed by a `u32` index into a single backing `Vec`.
//! Released records go onto a free list and are handed out again before any
//! new storage is touched; when the free list is empty the pool reserves room
//! for another chunk of records in one go. Reservation is fallible and the
//! failure is reported, never retried.

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors produced by [`Pool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// Reserving another chunk of records failed.
    Exhausted { pool: &'static str },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Exhausted { pool } => write!(f, "{} pool exhausted", pool),
        }
    }
}

impl std::error::Error for PoolError {}

// ─────────────────────────────────────────────────────────────────────────────
// Accounting
// ─────────────────────────────────────────────────────────────────────────────

/// Snapshot of a pool's bookkeeping.
///
/// `issued == live + free` holds at all times; tests use it to audit that no
/// record leaked or was released twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Records ever carved out of reserved storage.
    pub issued: usize,
    /// Records currently acquired.
    pub live: usize,
    /// Records sitting on the free list.
    pub free: usize,
    /// Number of chunk reservations performed.
    pub chunks: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Pool
// ─────────────────────────────────────────────────────────────────────────────

struct Slot<T> {
    value: T,
    live: bool,
}

/// Object pool for one record kind.
pub struct Pool<T> {
    name: &'static str,
    chunk: usize,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    chunks: usize,
}

impl<T> Pool<T> {
    /// Creates an empty pool that grows `chunk` records at a time.
    ///
    /// No storage is reserved until the first [`acquire`](Self::acquire).
    pub fn new(name: &'static str, chunk: usize) -> Self {
        Pool {
            name,
            chunk: chunk.max(1),
            slots: Vec::new(),
            free: Vec::new(),
            chunks: 0,
        }
    }

    /// Stores `value` in a recycled or freshly reserved record.
    pub fn acquire(&mut self, value: T) -> Result<u32, PoolError> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(!slot.live, "{} pool: free list holds a live record", self.name);
            slot.value = value;
            slot.live = true;
            return Ok(index);
        }
        if self.slots.len() == self.slots.capacity() {
            self.reserve_chunk()?;
        }
        let index = self.slots.len();
        if index > u32::MAX as usize {
            return Err(PoolError::Exhausted { pool: self.name });
        }
        self.slots.push(Slot { value, live: true });
        Ok(index as u32)
    }

    /// Returns a record to the free list.
    ///
    /// The value stays in place until the record is handed out again.
    pub fn release(&mut self, index: u32) {
        let slot = &mut self.slots[index as usize];
        debug_assert!(slot.live, "{} pool: record {} released twice", self.name, index);
        slot.live = false;
        // Capacity was reserved alongside the records, so this never allocates.
        self.free.push(index);
    }

    #[inline]
    pub fn get(&self, index: u32) -> &T {
        let slot = &self.slots[index as usize];
        debug_assert!(slot.live, "{} pool: access to released record {}", self.name, index);
        &slot.value
    }

    #[inline]
    pub fn get_mut(&mut self, index: u32) -> &mut T {
        let slot = &mut self.slots[index as usize];
        debug_assert!(slot.live, "{} pool: access to released record {}", self.name, index);
        &mut slot.value
    }

    /// Whether `index` currently designates an acquired record.
    pub fn is_live(&self, index: u32) -> bool {
        self.slots.get(index as usize).map_or(false, |s| s.live)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            issued: self.slots.len(),
            live: self.slots.len() - self.free.len(),
            free: self.free.len(),
            chunks: self.chunks,
        }
    }

    fn reserve_chunk(&mut self) -> Result<(), PoolError> {
        let exhausted = PoolError::Exhausted { pool: self.name };
        self.slots.try_reserve_exact(self.chunk).map_err(|_| exhausted)?;
        // The free list must be able to hold every record without growing.
        let needed = self.slots.capacity().saturating_sub(self.free.len());
        self.free.try_reserve_exact(needed).map_err(|_| exhausted)?;
        self.chunks += 1;
        Ok(())
    }
}

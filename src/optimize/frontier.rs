//! Cost frontiers: every offset history reaching a position at minimal cost.
//!
//! A frontier holds entries for exactly one `(bits, index)` pair. Offering a
//! strictly cheaper cost, or a different position, discards what was there.
//! Entries are grouped in buckets by `(offset1 + offset2 + offset3) %
//! HASH_SIZE`; keys are unique within a frontier. The buckets are allocated
//! the first time an entry arrives and keep their capacity from then on, so
//! a frontier reused across positions stops allocating.
//!
//! Iteration order decides which of several equal-cost parses survives, so it
//! is fixed: buckets in ascending order, and inside a bucket the first entry
//! ever inserted followed by the others from newest to oldest.

use crate::config::HASH_SIZE;
use crate::pool::{Arena, EntryRef, PoolError, StepRef};

#[inline]
fn bucket_of(offset1: usize, offset2: usize, offset3: usize) -> usize {
    (offset1 + offset2 + offset3) % HASH_SIZE
}

#[derive(Default)]
pub struct Frontier {
    bits: Option<i64>,
    index: isize,
    buckets: Vec<Vec<EntryRef>>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cost currently recorded, or `None` if nothing ever reached here.
    #[inline]
    pub fn bits(&self) -> Option<i64> {
        self.bits
    }

    #[inline]
    pub fn index(&self) -> isize {
        self.index
    }

    /// Whether this frontier holds the cost `bits` for position `index`.
    #[inline]
    pub fn holds(&self, bits: i64, index: isize) -> bool {
        self.bits == Some(bits) && self.index == index
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Readies the frontier to receive entries costing `bits` at `index`.
    ///
    /// Returns `false` when the frontier already holds a cheaper cost for the
    /// same position; the caller must then not add anything.
    pub fn prepare(&mut self, arena: &mut Arena, bits: i64, index: isize) -> bool {
        match self.bits {
            None => {
                self.bits = Some(bits);
                self.index = index;
                true
            }
            Some(current) if self.index != index || current > bits => {
                self.bits = Some(bits);
                self.index = index;
                self.erase(arena);
                true
            }
            Some(current) => current == bits,
        }
    }

    /// Records the cost and position without touching the entries.
    pub(crate) fn set_level(&mut self, bits: i64, index: isize) {
        self.bits = Some(bits);
        self.index = index;
    }

    /// Recycles every entry, leaving cost and position untouched.
    pub fn erase(&mut self, arena: &mut Arena) {
        for bucket in &mut self.buckets {
            for entry in bucket.drain(..) {
                arena.free_entry(entry);
            }
        }
    }

    /// Recycles every entry and forgets the recorded cost.
    pub fn clear(&mut self, arena: &mut Arena) {
        self.erase(arena);
        self.bits = None;
        self.index = 0;
    }

    /// Appends a new entry without looking for an existing key.
    pub fn create_entry(
        &mut self,
        arena: &mut Arena,
        offset1: usize,
        offset2: usize,
        offset3: usize,
    ) -> Result<EntryRef, PoolError> {
        let entry = arena.allocate_entry(offset1, offset2, offset3)?;
        if self.buckets.is_empty() {
            self.buckets.resize_with(HASH_SIZE, Vec::new);
        }
        self.buckets[bucket_of(offset1, offset2, offset3)].push(entry);
        Ok(entry)
    }

    /// Returns the entry for this key, creating an empty one if needed.
    pub fn find_entry(
        &mut self,
        arena: &mut Arena,
        offset1: usize,
        offset2: usize,
        offset3: usize,
    ) -> Result<EntryRef, PoolError> {
        if let Some(bucket) = self.buckets.get(bucket_of(offset1, offset2, offset3)) {
            if let Some(&found) = bucket
                .iter()
                .find(|&&e| arena.entry(e).key() == (offset1, offset2, offset3))
            {
                return Ok(found);
            }
        }
        self.create_entry(arena, offset1, offset2, offset3)
    }

    /// Entries in tie-break order.
    pub fn entries(&self) -> impl Iterator<Item = EntryRef> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().take(1).chain(bucket.iter().skip(1).rev()))
            .copied()
    }

    /// Step of the first entry in tie-break order.
    pub fn first_step(&self, arena: &Arena) -> Option<StepRef> {
        self.buckets
            .iter()
            .find_map(|bucket| bucket.first())
            .and_then(|&entry| arena.entry(entry).step)
    }
}

//! Parse-step and offset-state records, and the reference counting that ties
//! them together.
//!
//! Parse steps form singly-linked chains that share suffixes: many steps may
//! name the same predecessor. Every owner of a step (another step, an offset
//! state, or a slot held by the optimizer) counts as one reference. When the
//! last reference goes away the step is reclaimed, and so is every ancestor
//! whose count drops to zero along the way. The walk is a loop, so arbitrarily
//! long chains never touch the call stack.

use crate::config::{ENTRY_CHUNK, STEP_CHUNK};
use crate::pool::slab::{Pool, PoolError, PoolStats};

/// Handle to a [`Step`] owned by an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepRef(u32);

/// Handle to an [`Entry`] owned by an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryRef(u32);

/// One edge of the parse graph.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    /// Cost in bits of the whole prefix ending with this step.
    pub bits: i64,
    /// 0 for a literal run, otherwise the back-reference distance.
    pub offset: usize,
    /// Bytes covered by this step.
    pub length: usize,
    pub(crate) chain: Option<StepRef>,
    pub(crate) references: u32,
}

impl Step {
    #[inline]
    pub fn is_literal(&self) -> bool {
        self.offset == 0
    }

    /// Next step along the chain in its current orientation.
    #[inline]
    pub fn chain(&self) -> Option<StepRef> {
        self.chain
    }
}

/// The three most recent distinct offsets, most recent first, plus the
/// cheapest step known to reach that history.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub offset1: usize,
    pub offset2: usize,
    pub offset3: usize,
    pub(crate) step: Option<StepRef>,
}

impl Entry {
    #[inline]
    pub fn key(&self) -> (usize, usize, usize) {
        (self.offset1, self.offset2, self.offset3)
    }

    #[inline]
    pub fn step(&self) -> Option<StepRef> {
        self.step
    }
}

/// Bookkeeping for both record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArenaStats {
    pub steps: PoolStats,
    pub entries: PoolStats,
}

/// Owner of every step and offset state of one compression job.
///
/// An arena is never shared between jobs; run one per buffer.
pub struct Arena {
    steps: Pool<Step>,
    entries: Pool<Entry>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        Self::with_chunks(STEP_CHUNK, ENTRY_CHUNK)
    }

    /// Arena with custom reservation batch sizes.
    pub fn with_chunks(step_chunk: usize, entry_chunk: usize) -> Self {
        Arena {
            steps: Pool::new("step", step_chunk),
            entries: Pool::new("entry", entry_chunk),
        }
    }

    // ── Steps ───────────────────────────────────────────────────────────────

    /// Creates an unreferenced step extending `chain`.
    ///
    /// `chain` gains one reference. The new step starts with none; it must be
    /// stored through [`assign_step`](Self::assign_step) or
    /// [`assign_entry_step`](Self::assign_entry_step) to stay alive.
    pub fn allocate_step(
        &mut self,
        bits: i64,
        offset: usize,
        length: usize,
        chain: Option<StepRef>,
    ) -> Result<StepRef, PoolError> {
        let index = self.steps.acquire(Step {
            bits,
            offset,
            length,
            chain,
            references: 0,
        })?;
        if let Some(c) = chain {
            self.steps.get_mut(c.0).references += 1;
        }
        Ok(StepRef(index))
    }

    /// Overwrites a reference-counted slot held outside the arena.
    pub fn assign_step(&mut self, slot: &mut Option<StepRef>, step: Option<StepRef>) {
        self.retain(step);
        let old = std::mem::replace(slot, step);
        self.release(old);
    }

    #[inline]
    pub fn step(&self, step: StepRef) -> &Step {
        self.steps.get(step.0)
    }

    pub fn is_live(&self, step: StepRef) -> bool {
        self.steps.is_live(step.0)
    }

    /// Number of owners currently holding `step`.
    pub fn references(&self, step: StepRef) -> u32 {
        self.steps.get(step.0).references
    }

    pub(crate) fn set_chain(&mut self, step: StepRef, chain: Option<StepRef>) {
        self.steps.get_mut(step.0).chain = chain;
    }

    /// Returns a step to the free list regardless of its reference count.
    ///
    /// Only for tearing down a chain whose links no longer carry counts.
    pub(crate) fn discard_step(&mut self, step: StepRef) {
        self.steps.release(step.0);
    }

    fn retain(&mut self, step: Option<StepRef>) {
        if let Some(s) = step {
            self.steps.get_mut(s.0).references += 1;
        }
    }

    fn release(&mut self, step: Option<StepRef>) {
        let mut next = step;
        while let Some(s) = next {
            let record = self.steps.get_mut(s.0);
            debug_assert!(record.references > 0, "step {:?} released while unreferenced", s);
            record.references -= 1;
            if record.references > 0 {
                break;
            }
            next = record.chain.take();
            self.steps.release(s.0);
        }
    }

    // ── Offset states ───────────────────────────────────────────────────────

    /// Creates an offset state with no step attached.
    pub fn allocate_entry(
        &mut self,
        offset1: usize,
        offset2: usize,
        offset3: usize,
    ) -> Result<EntryRef, PoolError> {
        let index = self.entries.acquire(Entry {
            offset1,
            offset2,
            offset3,
            step: None,
        })?;
        Ok(EntryRef(index))
    }

    #[inline]
    pub fn entry(&self, entry: EntryRef) -> &Entry {
        self.entries.get(entry.0)
    }

    /// Replaces the step held by `entry`, adjusting both reference counts.
    pub fn assign_entry_step(&mut self, entry: EntryRef, step: Option<StepRef>) {
        self.retain(step);
        let old = std::mem::replace(&mut self.entries.get_mut(entry.0).step, step);
        self.release(old);
    }

    /// Drops the entry's step reference and recycles the entry.
    pub fn free_entry(&mut self, entry: EntryRef) {
        self.assign_entry_step(entry, None);
        self.entries.release(entry.0);
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            steps: self.steps.stats(),
            entries: self.entries.stats(),
        }
    }
}

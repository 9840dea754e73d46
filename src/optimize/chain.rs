//! The winning parse, as produced by the optimizer.

use crate::pool::{Arena, Step, StepRef};

/// A single parse chain and the arena holding its steps.
///
/// Fresh from the optimizer the chain runs backwards: the head is the last
/// step and following links leads to the synthetic root, which covers no
/// bytes. [`make_forward`](Self::make_forward) relinks it in place so the
/// root comes first. Either way every other record of the job has already
/// been recycled.
pub struct ParseChain {
    arena: Arena,
    head: StepRef,
    bits: i64,
    forward: bool,
}

impl ParseChain {
    /// Takes over the reference held in `head` (the only one on that step).
    pub(crate) fn new(arena: Arena, head: StepRef) -> Self {
        let bits = arena.step(head).bits;
        ParseChain {
            arena,
            head,
            bits,
            forward: false,
        }
    }

    /// Total cost of the parse in bits, end marker excluded.
    pub fn total_bits(&self) -> i64 {
        self.bits
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    /// Number of steps, the root included. A chain always holds its root.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Reverses the chain by relinking each step in place.
    pub fn reverse(&mut self) {
        let mut prev: Option<StepRef> = None;
        let mut current = Some(self.head);
        while let Some(step) = current {
            current = self.arena.step(step).chain;
            self.arena.set_chain(step, prev);
            prev = Some(step);
        }
        if let Some(head) = prev {
            self.head = head;
        }
        self.forward = !self.forward;
    }

    /// Puts the root first.
    pub fn make_forward(&mut self) {
        if !self.forward {
            self.reverse();
        }
    }

    /// Steps in the chain's current orientation, root included.
    pub fn iter(&self) -> Steps<'_> {
        Steps {
            arena: &self.arena,
            next: Some(self.head),
        }
    }

    /// Steps that produce output, first to last.
    pub fn tokens(&mut self) -> impl Iterator<Item = &Step> + '_ {
        self.make_forward();
        self.iter().skip(1)
    }

    /// Recycles every step and hands the arena back for another job.
    pub fn into_arena(mut self) -> Arena {
        let mut current = Some(self.head);
        while let Some(step) = current {
            current = self.arena.step(step).chain;
            self.arena.discard_step(step);
        }
        self.arena
    }
}

/// Iterator over the steps of a [`ParseChain`].
pub struct Steps<'a> {
    arena: &'a Arena,
    next: Option<StepRef>,
}

impl<'a> Iterator for Steps<'a> {
    type Item = &'a Step;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.arena.step(self.next?);
        self.next = step.chain;
        Some(step)
    }
}

//! Dynamic-programming optimal parser.
//!
//! For every position the parser tracks, per candidate offset, the cheapest
//! ways to end with a literal run (`last_literal[offset]`) and with a match at
//! that offset (`last_match[offset]`), plus the cheapest states overall
//! (`optimal[index]`). Every frontier keeps all offset histories that tie at
//! its minimal cost, so the parse found is optimal for the token costs of
//! `cost.rs`, not merely greedy.
//!
//! Offsets are scanned in ascending order; among equal-cost candidates the
//! first one recorded wins.

use crate::config::{INITIAL_OFFSET, PROGRESS_SCALE};
use crate::error::{check_input, Zx5Error};
use crate::optimize::chain::ParseChain;
use crate::optimize::cost::{
    last_offset_cost, literal_cost, new_offset_cost, offset_ceiling, previous_offset_cost,
};
use crate::optimize::frontier::Frontier;
use crate::pool::{Arena, PoolError};

// ─────────────────────────────────────────────────────────────────────────────
// Transitions
// ─────────────────────────────────────────────────────────────────────────────

/// Seeds `dest` with the synthetic root step.
fn add_first_block(
    arena: &mut Arena,
    dest: &mut Frontier,
    bits: i64,
    index: isize,
    offset: usize,
    length: usize,
) -> Result<(), PoolError> {
    dest.prepare(arena, bits, index);
    let entry = dest.find_entry(arena, offset, 0, 0)?;
    let step = arena.allocate_step(bits, offset, length, None)?;
    arena.assign_entry_step(entry, Some(step));
    Ok(())
}

/// Literal run from the end of the last match at this offset up to `index`.
fn add_literal_block(
    arena: &mut Arena,
    dest: &mut Frontier,
    index: usize,
    src: &Frontier,
) -> Result<(), PoolError> {
    let Some(src_bits) = src.bits() else {
        return Ok(());
    };
    let length = (index as isize - src.index()) as usize;
    let bits = src_bits + literal_cost(length);

    dest.prepare(arena, bits, index as isize);
    for e in src.entries() {
        let source = *arena.entry(e);
        let entry = dest.create_entry(arena, source.offset1, source.offset2, source.offset3)?;
        let step = arena.allocate_step(bits, 0, length, source.step)?;
        arena.assign_entry_step(entry, Some(step));
    }
    Ok(())
}

/// Match at the last offset, continuing right after a literal run.
fn add_last_offset_block(
    arena: &mut Arena,
    dest: &mut Frontier,
    index: usize,
    offset: usize,
    src: &Frontier,
) -> Result<(), PoolError> {
    let Some(src_bits) = src.bits() else {
        return Ok(());
    };
    let length = (index as isize - src.index()) as usize;
    let bits = src_bits + last_offset_cost(length);

    dest.prepare(arena, bits, index as isize);
    for e in src.entries() {
        let source = *arena.entry(e);
        let entry = dest.create_entry(arena, source.offset1, source.offset2, source.offset3)?;
        let step = arena.allocate_step(bits, offset, length, source.step)?;
        arena.assign_entry_step(entry, Some(step));
    }
    Ok(())
}

/// Match at the 2nd or 3rd last offset of some state in `src`.
///
/// Returns whether any state of `src` remembered `offset`.
fn add_previous_offset_block(
    arena: &mut Arena,
    dest: &mut Frontier,
    index: usize,
    offset: usize,
    src: &Frontier,
) -> Result<bool, PoolError> {
    let Some(src_bits) = src.bits() else {
        return Ok(false);
    };
    let length = (index as isize - src.index()) as usize;
    let bits = src_bits + previous_offset_cost(length);
    let index = index as isize;

    let worth_trying = match dest.bits() {
        None => true,
        Some(current) => dest.index() != index || current >= bits,
    };
    if !worth_trying {
        return Ok(false);
    }

    let mut found = false;
    for e in src.entries() {
        let source = *arena.entry(e);
        if source.offset2 != offset && source.offset3 != offset {
            continue;
        }
        if !found {
            dest.prepare(arena, bits, index);
            found = true;
        }
        let kept = if source.offset2 != offset {
            source.offset2
        } else {
            source.offset3
        };
        let entry = dest.find_entry(arena, offset, source.offset1, kept)?;
        if arena.entry(entry).step().is_none() {
            let step = arena.allocate_step(bits, offset, length, source.step)?;
            arena.assign_entry_step(entry, Some(step));
        }
    }
    Ok(found)
}

/// Match at an offset none of the states in `src` remembers.
///
/// Returns whether `dest` accepted the cost.
fn add_new_offset_block(
    arena: &mut Arena,
    dest: &mut Frontier,
    index: usize,
    offset: usize,
    src: &Frontier,
) -> Result<bool, PoolError> {
    let Some(src_bits) = src.bits() else {
        return Ok(false);
    };
    let length = (index as isize - src.index()) as usize;
    let bits = src_bits + new_offset_cost(offset, length);

    if !dest.prepare(arena, bits, index as isize) {
        return Ok(false);
    }
    for e in src.entries() {
        let source = *arena.entry(e);
        let entry = dest.find_entry(arena, offset, source.offset1, source.offset2)?;
        if arena.entry(entry).step().is_none() {
            let step = arena.allocate_step(bits, offset, length, source.step)?;
            arena.assign_entry_step(entry, Some(step));
        }
    }
    Ok(true)
}

/// Copies every state of `src` whose history `dest` lacks.
fn merge_blocks(arena: &mut Arena, dest: &mut Frontier, src: &Frontier) -> Result<(), PoolError> {
    let Some(src_bits) = src.bits() else {
        return Ok(());
    };
    dest.set_level(src_bits, src.index());
    for e in src.entries() {
        let source = *arena.entry(e);
        let entry = dest.find_entry(arena, source.offset1, source.offset2, source.offset3)?;
        if arena.entry(entry).step().is_none() {
            arena.assign_entry_step(entry, source.step);
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Optimizer
// ─────────────────────────────────────────────────────────────────────────────

struct Optimizer<'a> {
    input: &'a [u8],
    skip: usize,
    offset_limit: usize,
    arena: Arena,
    last_literal: Vec<Frontier>,
    last_match: Vec<Frontier>,
    optimal: Vec<Frontier>,
}

impl<'a> Optimizer<'a> {
    fn new(arena: Arena, input: &'a [u8], skip: usize, offset_limit: usize) -> Self {
        let max_offset = offset_ceiling(input.len() - 1, offset_limit);
        let frontiers = |n: usize| {
            let mut v = Vec::with_capacity(n);
            v.resize_with(n, Frontier::new);
            v
        };
        Optimizer {
            input,
            skip,
            offset_limit,
            arena,
            last_literal: frontiers(max_offset + 1),
            last_match: frontiers(max_offset + 1),
            optimal: frontiers(input.len()),
        }
    }

    fn run(mut self) -> Result<ParseChain, Zx5Error> {
        let size = self.input.len();

        // The root covers no bytes and costs -1: the stream never spends the
        // indicator bit of its first token.
        add_first_block(
            &mut self.arena,
            &mut self.last_match[INITIAL_OFFSET],
            -1,
            self.skip as isize - 1,
            INITIAL_OFFSET,
            0,
        )?;

        crate::displaylevel!(2, "[");
        let mut dots = 2;
        for index in self.skip..size {
            self.process(index)?;
            if index * PROGRESS_SCALE / size > dots {
                crate::displaylevel!(2, ".");
                dots += 1;
            }
        }
        crate::displaylevel!(2, "]\n");

        let mut head = None;
        let winner = self.optimal[size - 1].first_step(&self.arena);
        self.arena.assign_step(&mut head, winner);
        debug_assert!(head.is_some(), "no parse reaches the last byte");

        let Optimizer {
            mut arena,
            last_literal,
            last_match,
            optimal,
            ..
        } = self;
        for mut frontier in last_literal.into_iter().chain(last_match).chain(optimal) {
            frontier.clear(&mut arena);
        }

        let stats = arena.stats();
        crate::displaylevel!(
            4,
            "optimize: {} steps issued, {} entries issued, {} chunks reserved\n",
            stats.steps.issued,
            stats.entries.issued,
            stats.steps.chunks + stats.entries.chunks
        );

        match head {
            Some(head) => Ok(ParseChain::new(arena, head)),
            None => Err(Zx5Error::NoParse),
        }
    }

    fn process(&mut self, index: usize) -> Result<(), PoolError> {
        let input = self.input;
        let skip = self.skip;
        let mut optimal_bits = i64::MAX;
        let max_offset = offset_ceiling(index, self.offset_limit);

        for offset in 1..=max_offset {
            if index != skip && index >= offset && input[index] == input[index - offset] {
                // copy from last offset
                if self.last_literal[offset].bits().is_some() {
                    add_last_offset_block(
                        &mut self.arena,
                        &mut self.last_match[offset],
                        index,
                        offset,
                        &self.last_literal[offset],
                    )?;
                    optimal_bits = lower(optimal_bits, &self.last_match[offset]);
                }
                // copy from another offset, for every length ending here
                let mut length = 1;
                while length + offset <= index + 1
                    && length <= index - skip
                    && input[index + 1 - length] == input[index + 1 - length - offset]
                {
                    let src = &self.optimal[index - length];
                    let accepted = add_previous_offset_block(
                        &mut self.arena,
                        &mut self.last_match[offset],
                        index,
                        offset,
                        src,
                    )? || (length > 1
                        && add_new_offset_block(
                            &mut self.arena,
                            &mut self.last_match[offset],
                            index,
                            offset,
                            src,
                        )?);
                    if accepted {
                        optimal_bits = lower(optimal_bits, &self.last_match[offset]);
                    }
                    length += 1;
                }
            } else if self.last_match[offset].bits().is_some() {
                // copy literals
                add_literal_block(
                    &mut self.arena,
                    &mut self.last_literal[offset],
                    index,
                    &self.last_match[offset],
                )?;
                optimal_bits = lower(optimal_bits, &self.last_literal[offset]);
            }
        }

        // identify optimal choice so far
        let here = index as isize;
        for offset in 1..=max_offset {
            if self.last_match[offset].holds(optimal_bits, here) {
                merge_blocks(&mut self.arena, &mut self.optimal[index], &self.last_match[offset])?;
            } else if self.last_literal[offset].holds(optimal_bits, here) {
                merge_blocks(&mut self.arena, &mut self.optimal[index], &self.last_literal[offset])?;
            }
        }
        Ok(())
    }
}

#[inline]
fn lower(bits: i64, frontier: &Frontier) -> i64 {
    frontier.bits().map_or(bits, |b| bits.min(b))
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry points
// ─────────────────────────────────────────────────────────────────────────────

/// Finds a minimum-cost parse of `input[skip..]`.
///
/// Matches may reach back into the first `skip` bytes, which are otherwise
/// left out of the stream. `offset_limit` caps the back-reference distance;
/// see [`MAX_OFFSET`](crate::config::MAX_OFFSET) for the largest value the
/// format can carry.
pub fn optimize(input: &[u8], skip: usize, offset_limit: usize) -> Result<ParseChain, Zx5Error> {
    optimize_in(Arena::new(), input, skip, offset_limit)
}

/// Like [`optimize`], drawing records from an existing arena.
///
/// Useful to recycle the storage of a previous job, see
/// [`ParseChain::into_arena`].
pub fn optimize_in(
    arena: Arena,
    input: &[u8],
    skip: usize,
    offset_limit: usize,
) -> Result<ParseChain, Zx5Error> {
    check_input(input.len(), skip)?;
    if offset_limit == 0 {
        return Err(Zx5Error::InvalidWindow);
    }
    Optimizer::new(arena, input, skip, offset_limit).run()
}

// Tests for the optimal parser (`zx5::optimize::optimize`).
//
// Coverage:
//   - Hand-checked parses of tiny inputs
//   - Argument validation
//   - Skipped prefix usable as history but never emitted
//   - Window limit respected
//   - Allocator audit after a run, and arena recycling

use zx5::config::{MAX_OFFSET, MAX_OFFSET_QUICK};
use zx5::optimize::{optimize, optimize_in};
use zx5::optimize::cost::literal_cost;
use zx5::pool::Arena;
use zx5::Zx5Error;

fn tokens(input: &[u8], skip: usize, limit: usize) -> (Vec<(usize, usize)>, i64) {
    let mut chain = optimize(input, skip, limit).unwrap();
    let bits = chain.total_bits();
    (chain.tokens().map(|s| (s.offset, s.length)).collect(), bits)
}

/// Pseudo-random bytes where no byte equals its predecessor.
fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    let mut out: Vec<u8> = Vec::with_capacity(len);
    for _ in 0..len {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let mut b = (state >> 16) as u8;
        if out.last() == Some(&b) {
            b ^= 1;
        }
        out.push(b);
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tiny inputs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn single_byte_is_one_literal() {
    let (t, bits) = tokens(b"A", 0, MAX_OFFSET);
    assert_eq!(t, vec![(0, 1)]);
    assert_eq!(bits, literal_cost(1) - 1);
}

#[test]
fn run_of_identical_bytes_uses_initial_offset() {
    // one literal, then a copy at the initial offset of 1 right after it
    let input = [b'a'; 64];
    let (t, bits) = tokens(&input, 0, MAX_OFFSET);
    assert_eq!(t, vec![(0, 1), (1, 63)]);
    assert_eq!(bits, -1 + 10 + 12);
}

#[test]
fn repeated_word_uses_new_offset() {
    let (t, _) = tokens(b"abcdabcd", 0, MAX_OFFSET);
    assert_eq!(t, vec![(0, 4), (4, 4)]);
}

#[test]
fn incompressible_input_stays_within_literal_bound() {
    let input = noise(300, 7);
    let (_, bits) = tokens(&input, 0, MAX_OFFSET);
    assert!(bits <= literal_cost(input.len()) - 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_input_is_rejected() {
    assert_eq!(optimize(&[], 0, MAX_OFFSET).err(), Some(Zx5Error::EmptyInput));
}

#[test]
fn skip_must_leave_something() {
    assert_eq!(
        optimize(b"abc", 3, MAX_OFFSET).err(),
        Some(Zx5Error::InvalidSkip { skip: 3, size: 3 })
    );
}

#[test]
fn zero_window_is_rejected() {
    assert_eq!(optimize(b"abc", 0, 0).err(), Some(Zx5Error::InvalidWindow));
}

// ─────────────────────────────────────────────────────────────────────────────
// Skip and window
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn skipped_prefix_serves_as_history() {
    let word = b"hello world! ";
    let mut input = word.to_vec();
    input.extend_from_slice(word);

    let (t, _) = tokens(&input, word.len(), MAX_OFFSET);
    assert_eq!(t.iter().map(|t| t.1).sum::<usize>(), word.len());
    // the whole tail is one copy from the prefix, after the mandatory literal
    assert_eq!(t.len(), 2);
    assert_eq!(t[0], (0, 1));
    assert_eq!(t[1], (word.len(), word.len() - 1));
}

#[test]
fn window_limit_is_respected() {
    let block = noise(2300, 99);
    let mut input = block.clone();
    input.extend_from_slice(&block);

    let (quick, quick_bits) = tokens(&input, 0, MAX_OFFSET_QUICK);
    assert!(quick.iter().all(|&(offset, _)| offset <= MAX_OFFSET_QUICK));

    let (full, full_bits) = tokens(&input, 0, MAX_OFFSET);
    assert!(full.iter().any(|&(offset, _)| offset == block.len()));
    assert!(full_bits < quick_bits);
}

// ─────────────────────────────────────────────────────────────────────────────
// Allocator audit
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn only_the_winning_chain_stays_live() {
    let input = b"abracadabra, abracadabra, cadabra abra".repeat(4);
    let chain = optimize(&input, 0, MAX_OFFSET).unwrap();
    let stats = chain.arena().stats();
    assert_eq!(stats.steps.live, chain.len());
    assert_eq!(stats.entries.live, 0);
    assert_eq!(stats.steps.issued, stats.steps.live + stats.steps.free);
    assert_eq!(stats.entries.issued, stats.entries.free);
}

#[test]
fn recycled_arena_does_not_grow() {
    let input = b"tick tock tick tock tick tick tock".repeat(3);
    let first = optimize(&input, 0, MAX_OFFSET).unwrap();
    let first_bits = first.total_bits();
    let arena = first.into_arena();
    let issued = arena.stats();

    let second = optimize_in(arena, &input, 0, MAX_OFFSET).unwrap();
    assert_eq!(second.total_bits(), first_bits);
    let again = second.arena().stats();
    assert_eq!(again.steps.issued, issued.steps.issued);
    assert_eq!(again.entries.issued, issued.entries.issued);
}

#[test]
fn small_chunks_give_same_parse() {
    let input = b"the rain in spain stays mainly in the plain".repeat(2);
    let reference = optimize(&input, 0, MAX_OFFSET).unwrap();
    let small = optimize_in(Arena::with_chunks(1, 1), &input, 0, MAX_OFFSET).unwrap();
    assert_eq!(reference.total_bits(), small.total_bits());
    let a: Vec<_> = reference.iter().map(|s| (s.offset, s.length)).collect();
    let b: Vec<_> = small.iter().map(|s| (s.offset, s.length)).collect();
    assert_eq!(a, b);
}

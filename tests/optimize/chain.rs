// Unit tests for the winning parse (`zx5::optimize::ParseChain`).

use zx5::config::MAX_OFFSET;
use zx5::optimize::optimize;

fn sample() -> Vec<u8> {
    b"she sells sea shells by the sea shore, the shells she sells are sea shells".to_vec()
}

#[test]
fn fresh_chain_runs_backwards_to_root() {
    let input = sample();
    let chain = optimize(&input, 0, MAX_OFFSET).unwrap();
    assert!(!chain.is_forward());

    let steps: Vec<_> = chain.iter().collect();
    let root = steps.last().unwrap();
    assert_eq!(root.bits, -1);
    assert_eq!(root.length, 0);
    assert_eq!(steps[0].bits, chain.total_bits());
}

#[test]
fn make_forward_puts_root_first() {
    let input = sample();
    let mut chain = optimize(&input, 0, MAX_OFFSET).unwrap();
    let backwards: Vec<(usize, usize)> = chain.iter().map(|s| (s.offset, s.length)).collect();

    chain.make_forward();
    assert!(chain.is_forward());
    let mut forwards: Vec<(usize, usize)> = chain.iter().map(|s| (s.offset, s.length)).collect();
    forwards.reverse();
    assert_eq!(forwards, backwards);

    // idempotent
    chain.make_forward();
    assert_eq!(chain.iter().next().unwrap().bits, -1);
}

#[test]
fn reverse_twice_is_identity() {
    let input = sample();
    let mut chain = optimize(&input, 0, MAX_OFFSET).unwrap();
    let before: Vec<i64> = chain.iter().map(|s| s.bits).collect();
    chain.reverse();
    chain.reverse();
    let after: Vec<i64> = chain.iter().map(|s| s.bits).collect();
    assert_eq!(before, after);
    assert!(!chain.is_forward());
}

#[test]
fn tokens_cover_input_in_order() {
    let input = sample();
    let mut chain = optimize(&input, 0, MAX_OFFSET).unwrap();
    let len = chain.len();
    let tokens: Vec<(usize, usize, i64)> =
        chain.tokens().map(|s| (s.offset, s.length, s.bits)).collect();

    assert_eq!(tokens.len(), len - 1);
    assert_eq!(tokens.iter().map(|t| t.1).sum::<usize>(), input.len());
    assert_eq!(tokens[0].0, 0, "first token must be a literal run");
    assert!(tokens.windows(2).all(|w| w[0].2 < w[1].2), "costs must grow");
    assert_eq!(tokens.last().unwrap().2, chain.total_bits());
}

#[test]
fn shortest_chain_counts_its_root() {
    let mut chain = optimize(b"x", 0, MAX_OFFSET).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.tokens().count(), 1);
}

#[test]
fn into_arena_recycles_every_step() {
    let input = sample();
    let chain = optimize(&input, 0, MAX_OFFSET).unwrap();
    let arena = chain.into_arena();
    let stats = arena.stats();
    assert_eq!(stats.steps.live, 0);
    assert_eq!(stats.entries.live, 0);
    assert_eq!(stats.steps.issued, stats.steps.free);
}

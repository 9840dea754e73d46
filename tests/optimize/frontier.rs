// Unit tests for cost frontiers (`zx5::optimize::frontier::Frontier`).
//
// Coverage:
//   - prepare(): first use, ties, cheaper cost, dearer cost, new position
//   - find_entry() deduplicates keys; create_entry() does not
//   - Tie-break iteration order across and within buckets
//   - first_step() and clear()
//   - Reuse after erase and clear

use zx5::optimize::frontier::Frontier;
use zx5::pool::Arena;

fn keys(frontier: &Frontier, arena: &Arena) -> Vec<(usize, usize, usize)> {
    frontier.entries().map(|e| arena.entry(e).key()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// prepare
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fresh_frontier_accepts_anything() {
    let mut arena = Arena::new();
    let mut f = Frontier::new();
    assert!(f.bits().is_none());
    assert!(f.is_empty());
    assert!(f.prepare(&mut arena, 40, 7));
    assert_eq!(f.bits(), Some(40));
    assert_eq!(f.index(), 7);
    assert!(f.holds(40, 7));
}

#[test]
fn tie_keeps_entries() {
    let mut arena = Arena::new();
    let mut f = Frontier::new();
    f.prepare(&mut arena, 40, 7);
    f.find_entry(&mut arena, 3, 1, 0).unwrap();
    assert!(f.prepare(&mut arena, 40, 7));
    assert_eq!(f.len(), 1);
}

#[test]
fn dearer_cost_is_refused() {
    let mut arena = Arena::new();
    let mut f = Frontier::new();
    f.prepare(&mut arena, 40, 7);
    f.find_entry(&mut arena, 3, 1, 0).unwrap();
    assert!(!f.prepare(&mut arena, 41, 7));
    assert_eq!(f.bits(), Some(40));
    assert_eq!(f.len(), 1);
}

#[test]
fn cheaper_cost_erases() {
    let mut arena = Arena::new();
    let mut f = Frontier::new();
    f.prepare(&mut arena, 40, 7);
    f.find_entry(&mut arena, 3, 1, 0).unwrap();
    f.find_entry(&mut arena, 4, 1, 0).unwrap();
    assert!(f.prepare(&mut arena, 39, 7));
    assert!(f.is_empty());
    assert_eq!(arena.stats().entries.live, 0);
}

#[test]
fn new_position_erases_even_when_dearer() {
    let mut arena = Arena::new();
    let mut f = Frontier::new();
    f.prepare(&mut arena, 40, 7);
    f.find_entry(&mut arena, 3, 1, 0).unwrap();
    assert!(f.prepare(&mut arena, 55, 8));
    assert!(f.holds(55, 8));
    assert!(f.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Entries
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn find_entry_reuses_key() {
    let mut arena = Arena::new();
    let mut f = Frontier::new();
    f.prepare(&mut arena, 0, 0);
    let a = f.find_entry(&mut arena, 9, 2, 1).unwrap();
    let b = f.find_entry(&mut arena, 9, 2, 1).unwrap();
    assert_eq!(a, b);
    // same bucket, different key
    let c = f.find_entry(&mut arena, 2, 9, 1).unwrap();
    assert_ne!(a, c);
    assert_eq!(f.len(), 2);
}

#[test]
fn create_entry_does_not_deduplicate() {
    let mut arena = Arena::new();
    let mut f = Frontier::new();
    f.prepare(&mut arena, 0, 0);
    f.create_entry(&mut arena, 9, 2, 1).unwrap();
    f.create_entry(&mut arena, 9, 2, 1).unwrap();
    assert_eq!(f.len(), 2);
}

#[test]
fn iteration_order_is_bucket_then_first_then_newest() {
    let mut arena = Arena::new();
    let mut f = Frontier::new();
    f.prepare(&mut arena, 0, 0);
    // buckets are (o1 + o2 + o3) % 31
    f.find_entry(&mut arena, 1, 0, 0).unwrap(); // bucket 1
    f.find_entry(&mut arena, 2, 0, 0).unwrap(); // bucket 2
    f.find_entry(&mut arena, 32, 0, 0).unwrap(); // bucket 1
    f.find_entry(&mut arena, 63, 0, 0).unwrap(); // bucket 1
    assert_eq!(
        keys(&f, &arena),
        vec![(1, 0, 0), (63, 0, 0), (32, 0, 0), (2, 0, 0)]
    );
}

#[test]
fn first_step_comes_from_first_bucket() {
    let mut arena = Arena::new();
    let mut f = Frontier::new();
    f.prepare(&mut arena, 0, 0);
    let late = f.find_entry(&mut arena, 5, 0, 0).unwrap();
    let early = f.find_entry(&mut arena, 4, 0, 0).unwrap();
    let s5 = arena.allocate_step(0, 5, 2, None).unwrap();
    let s4 = arena.allocate_step(0, 4, 2, None).unwrap();
    arena.assign_entry_step(late, Some(s5));
    arena.assign_entry_step(early, Some(s4));
    assert_eq!(f.first_step(&arena), Some(s4));
}

#[test]
fn clear_forgets_everything() {
    let mut arena = Arena::new();
    let mut f = Frontier::new();
    f.prepare(&mut arena, 12, 3);
    let e = f.find_entry(&mut arena, 1, 0, 0).unwrap();
    let s = arena.allocate_step(12, 0, 3, None).unwrap();
    arena.assign_entry_step(e, Some(s));

    f.clear(&mut arena);
    assert!(f.bits().is_none());
    assert!(f.is_empty());
    assert!(f.first_step(&arena).is_none());
    let stats = arena.stats();
    assert_eq!(stats.entries.live, 0);
    assert_eq!(stats.steps.live, 0);
}

#[test]
fn reused_frontier_keeps_order_and_recycles_entries() {
    let mut arena = Arena::new();
    let mut f = Frontier::new();
    for round in 0..4i64 {
        // each round moves to a new position, erasing the previous one
        assert!(f.prepare(&mut arena, 10 + round, round as isize));
        assert!(f.is_empty());
        f.find_entry(&mut arena, 1, 0, 0).unwrap();
        f.find_entry(&mut arena, 2, 0, 0).unwrap();
        f.find_entry(&mut arena, 32, 0, 0).unwrap();
        f.find_entry(&mut arena, 63, 0, 0).unwrap();
        assert_eq!(f.len(), 4);
        assert_eq!(
            keys(&f, &arena),
            vec![(1, 0, 0), (63, 0, 0), (32, 0, 0), (2, 0, 0)]
        );
    }
    assert_eq!(arena.stats().entries.live, 4);

    f.clear(&mut arena);
    assert!(f.is_empty());
    assert_eq!(f.len(), 0);
    assert!(f.prepare(&mut arena, 3, 0));
    f.find_entry(&mut arena, 30, 0, 0).unwrap(); // bucket 30
    f.find_entry(&mut arena, 31, 0, 0).unwrap(); // bucket 0
    assert_eq!(keys(&f, &arena), vec![(31, 0, 0), (30, 0, 0)]);
    assert_eq!(arena.stats().entries.live, 2);
}

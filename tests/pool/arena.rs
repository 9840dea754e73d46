// Unit tests for reference-counted parse steps (`zx5::pool::Arena`).
//
// Coverage:
//   - New steps start unreferenced and pin their predecessor
//   - Slot assignment retains the new step and releases the old one
//   - Reclamation cascades along a chain until a shared ancestor
//   - Very long chains are reclaimed without recursion
//   - Offset states hold one reference on their step

use zx5::pool::{Arena, StepRef};

fn live_steps(arena: &Arena) -> usize {
    arena.stats().steps.live
}

/// Builds `len` steps on top of `base`, returning the last one (unreferenced).
fn build_chain(arena: &mut Arena, base: Option<StepRef>, len: usize) -> StepRef {
    let mut prev = base;
    for i in 0..len {
        prev = Some(arena.allocate_step(i as i64, 0, 1, prev).unwrap());
    }
    prev.unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Steps
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn allocate_step_pins_predecessor() {
    let mut arena = Arena::new();
    let root = arena.allocate_step(-1, 1, 0, None).unwrap();
    assert_eq!(arena.references(root), 0);

    let next = arena.allocate_step(9, 0, 1, Some(root)).unwrap();
    assert_eq!(arena.references(root), 1);
    assert_eq!(arena.references(next), 0);
    assert_eq!(arena.step(next).chain(), Some(root));
    assert!(arena.step(next).is_literal());
    assert_eq!(arena.step(root).bits, -1);
}

#[test]
fn slot_assignment_cascades_on_release() {
    let mut arena = Arena::new();
    let root = arena.allocate_step(-1, 1, 0, None).unwrap();
    let tip = build_chain(&mut arena, Some(root), 2);

    let mut slot = None;
    arena.assign_step(&mut slot, Some(tip));
    assert_eq!(arena.references(tip), 1);
    assert_eq!(live_steps(&arena), 3);

    arena.assign_step(&mut slot, None);
    assert!(slot.is_none());
    assert_eq!(live_steps(&arena), 0);
    assert!(!arena.is_live(root));

    let stats = arena.stats().steps;
    assert_eq!(stats.free, 3);
    assert_eq!(stats.issued, stats.live + stats.free);
}

#[test]
fn shared_suffix_survives_one_owner() {
    let mut arena = Arena::new();
    let root = arena.allocate_step(-1, 1, 0, None).unwrap();
    let a = arena.allocate_step(9, 0, 1, Some(root)).unwrap();
    let b = arena.allocate_step(17, 0, 2, Some(root)).unwrap();
    assert_eq!(arena.references(root), 2);

    let (mut slot_a, mut slot_b) = (None, None);
    arena.assign_step(&mut slot_a, Some(a));
    arena.assign_step(&mut slot_b, Some(b));

    arena.assign_step(&mut slot_a, None);
    assert!(!arena.is_live(a));
    assert!(arena.is_live(root));
    assert_eq!(arena.references(root), 1);

    arena.assign_step(&mut slot_b, None);
    assert_eq!(live_steps(&arena), 0);
}

#[test]
fn reassigning_same_step_keeps_it_alive() {
    let mut arena = Arena::new();
    let step = arena.allocate_step(0, 0, 1, None).unwrap();
    let mut slot = None;
    arena.assign_step(&mut slot, Some(step));
    arena.assign_step(&mut slot, Some(step));
    assert!(arena.is_live(step));
    assert_eq!(arena.references(step), 1);
}

#[test]
fn long_chain_is_reclaimed_iteratively() {
    let mut arena = Arena::with_chunks(4096, 16);
    let tip = build_chain(&mut arena, None, 300_000);
    let mut slot = None;
    arena.assign_step(&mut slot, Some(tip));
    assert_eq!(live_steps(&arena), 300_000);

    arena.assign_step(&mut slot, None);
    assert_eq!(live_steps(&arena), 0);
    assert_eq!(arena.stats().steps.free, 300_000);
}

#[test]
fn reclaimed_steps_are_recycled() {
    let mut arena = Arena::with_chunks(8, 8);
    let tip = build_chain(&mut arena, None, 8);
    let mut slot = None;
    arena.assign_step(&mut slot, Some(tip));
    arena.assign_step(&mut slot, None);

    let issued = arena.stats().steps.issued;
    let again = build_chain(&mut arena, None, 8);
    arena.assign_step(&mut slot, Some(again));
    assert_eq!(arena.stats().steps.issued, issued);
    assert_eq!(arena.stats().steps.chunks, 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Offset states
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn entry_holds_one_reference() {
    let mut arena = Arena::new();
    let entry = arena.allocate_entry(5, 1, 0).unwrap();
    assert_eq!(arena.entry(entry).key(), (5, 1, 0));
    assert!(arena.entry(entry).step().is_none());

    let step = arena.allocate_step(12, 5, 3, None).unwrap();
    arena.assign_entry_step(entry, Some(step));
    assert_eq!(arena.references(step), 1);
    assert_eq!(arena.entry(entry).step(), Some(step));

    arena.free_entry(entry);
    assert!(!arena.is_live(step));
    let stats = arena.stats();
    assert_eq!(stats.entries.live, 0);
    assert_eq!(stats.entries.free, 1);
    assert_eq!(stats.steps.live, 0);
}

#[test]
fn entry_step_replacement_releases_old_chain() {
    let mut arena = Arena::new();
    let entry = arena.allocate_entry(1, 0, 0).unwrap();
    let first = build_chain(&mut arena, None, 3);
    arena.assign_entry_step(entry, Some(first));
    let second = arena.allocate_step(4, 0, 1, None).unwrap();
    arena.assign_entry_step(entry, Some(second));

    assert_eq!(live_steps(&arena), 1);
    assert!(arena.is_live(second));
}

// Unit tests for the token cost model (`zx5::optimize::cost`).

use zx5::config::{MAX_OFFSET, MAX_OFFSET_QUICK};
use zx5::optimize::cost::{
    elias_gamma_bits, last_offset_cost, literal_cost, new_offset_cost, offset_ceiling,
    previous_offset_cost,
};

#[test]
fn gamma_sizes() {
    let expected = [(1, 1), (2, 3), (3, 3), (4, 5), (7, 5), (8, 7), (255, 15), (256, 17)];
    for (value, bits) in expected {
        assert_eq!(elias_gamma_bits(value), bits, "gamma({})", value);
    }
}

#[test]
fn gamma_is_two_k_minus_one() {
    for k in 1..20u32 {
        let lo = 1usize << (k - 1);
        let hi = (1usize << k) - 1;
        assert_eq!(elias_gamma_bits(lo), 2 * k as i64 - 1);
        assert_eq!(elias_gamma_bits(hi), 2 * k as i64 - 1);
    }
}

#[test]
fn literal_costs() {
    assert_eq!(literal_cost(1), 10);
    assert_eq!(literal_cost(2), 1 + 3 + 16);
    assert_eq!(literal_cost(100), 1 + 13 + 800);
}

#[test]
fn reuse_costs() {
    assert_eq!(last_offset_cost(1), 2);
    assert_eq!(last_offset_cost(63), 12);
    assert_eq!(previous_offset_cost(1), 4);
    assert_eq!(previous_offset_cost(2), 6);
}

#[test]
fn new_offset_costs() {
    // msb code 1, length - 1 == 1
    assert_eq!(new_offset_cost(1, 2), 12);
    assert_eq!(new_offset_cost(256, 2), 12);
    // msb code 2
    assert_eq!(new_offset_cost(257, 2), 14);
    // msb code 255, the largest a real offset can carry
    assert_eq!(new_offset_cost(MAX_OFFSET, 3), 10 + 15 + 3);
}

#[test]
fn new_offset_never_cheaper_than_reuse() {
    for offset in [1, 2, 300, MAX_OFFSET_QUICK, MAX_OFFSET] {
        for length in 2..40 {
            assert!(new_offset_cost(offset, length) > previous_offset_cost(length));
            assert!(previous_offset_cost(length) > last_offset_cost(length));
        }
    }
}

#[test]
fn ceiling_clamps_both_ways() {
    assert_eq!(offset_ceiling(0, MAX_OFFSET), 1);
    assert_eq!(offset_ceiling(5, MAX_OFFSET), 5);
    assert_eq!(offset_ceiling(5000, MAX_OFFSET_QUICK), MAX_OFFSET_QUICK);
    assert_eq!(offset_ceiling(MAX_OFFSET, MAX_OFFSET), MAX_OFFSET);
}

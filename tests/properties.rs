//! Property-based coverage of the comparison engine and the sink contract.

use std::collections::HashMap;

use affirm::{that_map, that_number, that_slice, that_string, MockTest};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A slice always equals itself and the sink stays untouched.
    #[test]
    fn slice_equality_is_reflexive(v in prop::collection::vec(any::<i32>(), 0..20)) {
        let m = MockTest::new();
        that_slice(&m, &v).equal(&v);
        prop_assert_eq!(m.output(), "");
    }

    /// Equality is symmetric: if a == b fails one way it fails the other.
    #[test]
    fn slice_equality_is_symmetric(
        a in prop::collection::vec(any::<i32>(), 0..10),
        b in prop::collection::vec(any::<i32>(), 0..10),
    ) {
        let m1 = MockTest::new();
        let m2 = MockTest::new();
        that_slice(&m1, &a).equal(&b);
        that_slice(&m2, &b).equal(&a);
        prop_assert_eq!(m1.output().is_empty(), m2.output().is_empty());
    }

    /// Any finite value is within any non-negative delta of itself.
    #[test]
    fn delta_of_self_always_passes(v in -1e12f64..1e12f64, delta in 0f64..1e6f64) {
        let m = MockTest::new();
        that_number(&m, v).is_in_delta(v, delta);
        prop_assert_eq!(m.output(), "");
    }

    /// A string is its own prefix and suffix.
    #[test]
    fn string_is_own_prefix_and_suffix(s in ".*") {
        let m = MockTest::new();
        that_string(&m, &s).has_prefix(&s).has_suffix(&s).contains(&s);
        prop_assert_eq!(m.output(), "");
    }

    /// The empty sub-slice is contained in every slice.
    #[test]
    fn empty_subslice_always_matches(v in prop::collection::vec(any::<i32>(), 0..20)) {
        let m = MockTest::new();
        that_slice(&m, &v).contains_slice(&[]);
        prop_assert_eq!(m.output(), "");
    }

    /// Any prefix cut from a slice satisfies has_prefix, any tail has_suffix.
    #[test]
    fn cut_prefix_and_suffix_match(
        v in prop::collection::vec(any::<i32>(), 0..20),
        cut in 0usize..20,
    ) {
        let cut = cut.min(v.len());
        let m = MockTest::new();
        that_slice(&m, &v)
            .has_prefix(&v[..cut])
            .has_suffix(&v[cut..])
            .contains_slice(&v[..cut]);
        prop_assert_eq!(m.output(), "");
    }

    /// Reversing a map's key/value association keeps the value multiset.
    #[test]
    fn same_values_ignores_keys(vals in prop::collection::vec(any::<i32>(), 0..10)) {
        let forward: HashMap<String, i32> = vals
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("k{i}"), *v))
            .collect();
        let backward: HashMap<String, i32> = vals
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("r{}", vals.len() - 1 - i), *v))
            .collect();
        let m = MockTest::new();
        that_map(&m, &forward).has_same_values(&backward);
        prop_assert_eq!(m.output(), "");
    }

    /// A sorted copy passes the non-strict ordering checks.
    #[test]
    fn sorted_copy_is_sorted(mut v in prop::collection::vec(any::<i32>(), 0..20)) {
        v.sort();
        let m = MockTest::new();
        that_slice(&m, &v).is_sorted();
        v.reverse();
        that_slice(&m, &v).is_sorted_descending();
        prop_assert_eq!(m.output(), "");
    }

    /// Passing predicates never touch the sink, failing ones touch it once.
    #[test]
    fn exactly_one_delivery_per_failure(v in any::<i32>(), w in any::<i32>()) {
        let m = MockTest::new();
        that_number(&m, v).equal(w);
        let out = m.output();
        if v == w {
            prop_assert_eq!(out, "");
        } else {
            prop_assert_eq!(out.matches("Assertion failed").count(), 1);
            prop_assert!(out.starts_with("error# "));
        }
    }
}

#[test]
fn nil_and_empty_stay_independent() {
    let m = MockTest::new();
    that_slice(&m, None::<&[i32]>).is_nil().is_empty();
    that_slice(&m, &Vec::<i32>::new()).not_nil().is_empty();
    that_map(&m, None::<&HashMap<String, i32>>).is_nil().is_empty();
    that_map(&m, &HashMap::<String, i32>::new()).not_nil().is_empty();
    assert_eq!(m.output(), "");
}

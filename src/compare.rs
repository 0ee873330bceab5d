//! Equality and ordering engine.
//!
//! Pure predicates shared by the typed wrappers: contiguous subsequence and
//! prefix/suffix matching, monotone-run checks reporting the first violating
//! index, duplicate scans, value-multiset balance, and the numeric kind
//! abstraction behind delta/NaN/infinity checks. Nothing here touches a sink;
//! every function is total over its inputs.
//!
//! Deep equality for composite values is Rust's structural `PartialEq`; the
//! functions below only add what `==` does not give directly. Float equality
//! is exact — delta comparison is the explicit [`Num::in_delta`] path, never
//! an implicit epsilon.

use std::fmt::Display;

/// The numeric kinds the number wrapper accepts: every primitive integer and
/// float. Integer kinds answer `false` to the NaN/infinity checks.
pub trait Num: Copy + PartialOrd + Display {
    const ZERO: Self;

    fn is_nan(self) -> bool {
        false
    }

    /// `sign > 0` checks +Inf, `sign < 0` checks -Inf, `sign == 0` either.
    fn is_inf(self, sign: i32) -> bool {
        let _ = sign;
        false
    }

    /// True iff `|self - expect| <= delta`, bounds inclusive. Total over the
    /// whole domain: signed kinds compare through the unsigned distance so
    /// extreme operands cannot overflow, and a negative delta is false.
    fn in_delta(self, expect: Self, delta: Self) -> bool;
}

macro_rules! impl_num_signed {
    ($($t:ty => $u:ty),*) => {$(
        impl Num for $t {
            const ZERO: Self = 0;

            fn in_delta(self, expect: Self, delta: Self) -> bool {
                delta >= 0 && self.abs_diff(expect) <= delta as $u
            }
        }
    )*};
}

macro_rules! impl_num_unsigned {
    ($($t:ty),*) => {$(
        impl Num for $t {
            const ZERO: Self = 0;

            fn in_delta(self, expect: Self, delta: Self) -> bool {
                self.abs_diff(expect) <= delta
            }
        }
    )*};
}

macro_rules! impl_num_float {
    ($($t:ty),*) => {$(
        impl Num for $t {
            const ZERO: Self = 0.0;

            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }

            fn is_inf(self, sign: i32) -> bool {
                (sign >= 0 && self == <$t>::INFINITY)
                    || (sign <= 0 && self == <$t>::NEG_INFINITY)
            }

            fn in_delta(self, expect: Self, delta: Self) -> bool {
                (self - expect).abs() <= delta
            }
        }
    )*};
}

impl_num_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);
impl_num_unsigned!(u8, u16, u32, u64, u128, usize);
impl_num_float!(f32, f64);

/// True iff `v` is within `delta` of `expect`, bounds inclusive.
pub fn in_delta<T: Num>(v: T, expect: T, delta: T) -> bool {
    v.in_delta(expect, delta)
}

/// True iff `needle` appears contiguously in `haystack` at any offset. The
/// empty needle always matches.
pub fn contains_subsequence<T: PartialEq>(haystack: &[T], needle: &[T]) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}

pub fn has_prefix<T: PartialEq>(v: &[T], prefix: &[T]) -> bool {
    prefix.len() <= v.len() && v[..prefix.len()] == *prefix
}

pub fn has_suffix<T: PartialEq>(v: &[T], suffix: &[T]) -> bool {
    suffix.len() <= v.len() && v[v.len() - suffix.len()..] == *suffix
}

/// Index of the first element that breaks the requested run, or `None` when
/// the run holds. `strict` forbids equal neighbors.
pub fn first_unordered<T: PartialOrd>(v: &[T], ascending: bool, strict: bool) -> Option<usize> {
    for i in 1..v.len() {
        let (prev, cur) = (&v[i - 1], &v[i]);
        let ok = match (ascending, strict) {
            (true, true) => prev < cur,
            (true, false) => prev <= cur,
            (false, true) => prev > cur,
            (false, false) => prev >= cur,
        };
        if !ok {
            return Some(i);
        }
    }
    None
}

/// First element equal (by value) to an earlier one.
pub fn first_duplicate<T: PartialEq>(v: &[T]) -> Option<&T> {
    for i in 1..v.len() {
        if v[..i].contains(&v[i]) {
            return Some(&v[i]);
        }
    }
    None
}

/// First element whose derived key equals an earlier element's key.
pub fn first_duplicate_by<T, K, F>(v: &[T], key_fn: F) -> Option<&T>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut seen: Vec<K> = Vec::with_capacity(v.len());
    for item in v {
        let key = key_fn(item);
        if seen.contains(&key) {
            return Some(item);
        }
        seen.push(key);
    }
    None
}

/// True iff both sides hold the same values with the same multiplicities,
/// ignoring order. Counted both directions so neither extra nor missing
/// occurrences slip through; value equality only, no hashing or ordering
/// required of `V`.
pub fn multiset_eq<V: PartialEq>(got: &[&V], expect: &[&V]) -> bool {
    if got.len() != expect.len() {
        return false;
    }
    let mut counts: Vec<(&V, i64)> = Vec::new();
    for v in got {
        match counts.iter_mut().find(|(seen, _)| *seen == *v) {
            Some((_, n)) => *n += 1,
            None => counts.push((v, 1)),
        }
    }
    for v in expect {
        match counts.iter_mut().find(|(seen, _)| *seen == *v) {
            Some((_, n)) => *n -= 1,
            None => return false,
        }
    }
    counts.iter().all(|(_, n)| *n == 0)
}

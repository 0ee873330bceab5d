//! Assertions on arbitrary values.
//!
//! The generic wrapper covers structural equality plus the membership
//! surface: capability traits [`Has`] and [`Holds`] stand in for runtime
//! method lookup, so `has`/`contains` only compile against types that
//! actually expose the capability. Values render as compact JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use affirm::{that, TestRun};
//!
//! let t = TestRun::new();
//! that(&t, vec![1, 2, 3]).contains(&2);
//! that(&t, true).is_true();
//! ```

use std::any::type_name;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

use regex::Regex;
use serde::Serialize;

use crate::context::TestContext;
use crate::mode::{Aborting, FailureMode, Recording};
use crate::render::render_json;
use crate::report::{self, Failure};

/// Keyed lookup capability: maps have their keys, sets their members.
pub trait Has<Q: ?Sized> {
    fn has(&self, key: &Q) -> bool;
}

/// Element containment capability for sequence-like values.
pub trait Holds<Q: ?Sized> {
    fn holds(&self, item: &Q) -> bool;
}

impl<K: Eq + Hash, V, S: BuildHasher> Has<K> for HashMap<K, V, S> {
    fn has(&self, key: &K) -> bool {
        self.contains_key(key)
    }
}

impl<T: Eq + Hash, S: BuildHasher> Has<T> for HashSet<T, S> {
    fn has(&self, key: &T) -> bool {
        self.contains(key)
    }
}

impl<T: Eq + Hash, S: BuildHasher> Holds<T> for HashSet<T, S> {
    fn holds(&self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T: PartialEq> Holds<T> for [T] {
    fn holds(&self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T: PartialEq> Holds<T> for Vec<T> {
    fn holds(&self, item: &T) -> bool {
        self.as_slice().contains(item)
    }
}

impl Holds<str> for String {
    fn holds(&self, item: &str) -> bool {
        self.contains(item)
    }
}

/// Wraps a value and a reporting sink for fluent assertions.
pub struct Assertion<'t, T, M: FailureMode = Recording> {
    ctx: &'t dyn TestContext,
    v: T,
    msgs: Vec<String>,
    mode: PhantomData<M>,
}

/// Entry point for generic value assertions.
pub fn that<T>(ctx: &dyn TestContext, v: T) -> Assertion<'_, T> {
    Assertion {
        ctx,
        v,
        msgs: Vec::new(),
        mode: PhantomData,
    }
}

impl<'t, T> Assertion<'t, T, Recording> {
    /// Escalates the chain: every failure from here on aborts the test.
    pub fn must(self) -> Assertion<'t, T, Aborting> {
        Assertion {
            ctx: self.ctx,
            v: self.v,
            msgs: self.msgs,
            mode: PhantomData,
        }
    }
}

impl<'t, T, M: FailureMode> Assertion<'t, T, M> {
    /// Attaches an annotation appended to every failure on this chain.
    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msgs.push(msg.into());
        self
    }

    fn fail(&self, failure: Failure) {
        report::deliver::<M>(self.ctx, failure, &self.msgs);
    }
}

impl<'t, T: Serialize + PartialEq, M: FailureMode> Assertion<'t, T, M> {
    pub fn equal(self, expect: &T) -> Self {
        self.ctx.helper();
        if &self.v != expect {
            self.fail(
                Failure::new("expected values to be equal, but they are different")
                    .field("got", render_json(&self.v))
                    .field("expect", render_json(expect)),
            );
        }
        self
    }

    pub fn not_equal(self, expect: &T) -> Self {
        self.ctx.helper();
        if &self.v == expect {
            self.fail(
                Failure::new("expected values to be different, but they are equal")
                    .field("got", render_json(&self.v)),
            );
        }
        self
    }

    /// The type's `Default` stands in for the zero value.
    pub fn is_zero(self) -> Self
    where
        T: Default,
    {
        self.ctx.helper();
        if self.v != T::default() {
            self.fail(Failure::new(format!(
                "got ({}) {} but expect zero value",
                type_name::<T>(),
                render_json(&self.v)
            )));
        }
        self
    }

    pub fn is_not_zero(self) -> Self
    where
        T: Default,
    {
        self.ctx.helper();
        if self.v == T::default() {
            self.fail(Failure::new(format!(
                "got zero value but expect not zero for type {}",
                type_name::<T>()
            )));
        }
        self
    }

    pub fn in_slice(self, slice: &[T]) -> Self {
        self.ctx.helper();
        if !slice.contains(&self.v) {
            self.fail(
                Failure::new("expected value to be in the slice, but it is not")
                    .field("got", render_json(&self.v))
                    .field("slice", render_json(slice)),
            );
        }
        self
    }

    pub fn not_in_slice(self, slice: &[T]) -> Self {
        self.ctx.helper();
        if slice.contains(&self.v) {
            self.fail(
                Failure::new("expected value not to be in the slice, but it is")
                    .field("got", render_json(&self.v))
                    .field("slice", render_json(slice)),
            );
        }
        self
    }
}

impl<'t, T, M: FailureMode> Assertion<'t, T, M> {
    /// The wrapped value must answer the keyed lookup positively.
    pub fn has<Q>(self, key: &Q) -> Self
    where
        Q: ?Sized + Debug,
        T: Has<Q>,
    {
        self.ctx.helper();
        if !self.v.has(key) {
            self.fail(Failure::new(format!(
                "method 'Has' on type {} should return true when using param {key:?}, but it does not",
                type_name::<T>()
            )));
        }
        self
    }

    /// The wrapped value must contain the item.
    pub fn contains<Q>(self, item: &Q) -> Self
    where
        Q: ?Sized + Debug,
        T: Holds<Q>,
    {
        self.ctx.helper();
        if !self.v.holds(item) {
            self.fail(Failure::new(format!(
                "method 'Contains' on type {} should return true when using param {item:?}, but it does not",
                type_name::<T>()
            )));
        }
        self
    }

    /// Membership among the map's keys.
    pub fn in_map_keys<V, S>(self, map: &HashMap<T, V, S>) -> Self
    where
        T: Serialize + Eq + Hash,
        V: Serialize,
        S: BuildHasher,
    {
        self.ctx.helper();
        if !map.contains_key(&self.v) {
            self.fail(
                Failure::new("expected value to be in the map keys, but it is not")
                    .field("got", render_json(&self.v))
                    .field("map", render_json(map)),
            );
        }
        self
    }

    /// Membership among the map's values.
    pub fn in_map_values<K, S>(self, map: &HashMap<K, T, S>) -> Self
    where
        T: Serialize + PartialEq,
        K: Serialize + Eq + Hash,
        S: BuildHasher,
    {
        self.ctx.helper();
        if !map.values().any(|v| v == &self.v) {
            self.fail(
                Failure::new("expected value to be in the map values, but it is not")
                    .field("got", render_json(&self.v))
                    .field("map", render_json(map)),
            );
        }
        self
    }
}

impl<'t, M: FailureMode> Assertion<'t, bool, M> {
    pub fn is_true(self) -> Self {
        self.ctx.helper();
        if !self.v {
            self.fail(Failure::new("expected value to be true, but it is false"));
        }
        self
    }

    pub fn is_false(self) -> Self {
        self.ctx.helper();
        if self.v {
            self.fail(Failure::new("expected value to be false, but it is true"));
        }
        self
    }
}

impl<'t, U: Serialize, M: FailureMode> Assertion<'t, Option<U>, M> {
    pub fn is_nil(self) -> Self {
        self.ctx.helper();
        if self.v.is_some() {
            self.fail(
                Failure::new("expected value to be nil, but it is not")
                    .field("got", render_json(&self.v)),
            );
        }
        self
    }

    pub fn not_nil(self) -> Self {
        self.ctx.helper();
        if self.v.is_none() {
            self.fail(Failure::new("expected value to be non-nil, but it is nil"));
        }
        self
    }
}

/// Asserts that `f` panics and, when `expr` is non-empty, that the panic
/// message matches it. The recovered message is the panic payload when it is
/// a string, otherwise a generic placeholder.
pub fn panics<F: FnOnce()>(ctx: &dyn TestContext, f: F, expr: &str) {
    ctx.helper();
    let recovered = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => {
            report::deliver::<Recording>(ctx, Failure::new("did not panic"), &[]);
            return;
        }
        Err(payload) => {
            if let Some(s) = payload.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "non-string panic".to_string()
            }
        }
    };
    if expr.is_empty() {
        return;
    }
    match Regex::new(expr) {
        Err(_) => {
            report::deliver::<Recording>(ctx, Failure::new("invalid pattern"), &[]);
        }
        Ok(re) => {
            if !re.is_match(&recovered) {
                report::deliver::<Recording>(
                    ctx,
                    Failure::new(format!(
                        "got {recovered:?} which does not match {expr:?}"
                    )),
                    &[],
                );
            }
        }
    }
}

//! Assertions on key/value maps.
//!
//! The wrapped value is `Option<&HashMap<K, V>>` with the same nil/empty
//! split the slice family keeps. Values render as compact JSON with sorted
//! object keys, so the same map always produces the same failure text; when
//! a predicate names an offending key, keys are visited in sorted render
//! order for the same reason.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::Serialize;

use crate::compare;
use crate::context::TestContext;
use crate::mode::{Aborting, FailureMode, Recording};
use crate::render::render_json;
use crate::report::{self, Failure};

/// Anything the map wrapper accepts as its subject.
pub trait IntoMapValue<'v, K, V> {
    fn into_map_value(self) -> Option<&'v HashMap<K, V>>;
}

impl<'v, K, V> IntoMapValue<'v, K, V> for &'v HashMap<K, V> {
    fn into_map_value(self) -> Option<&'v HashMap<K, V>> {
        Some(self)
    }
}

impl<'v, K, V> IntoMapValue<'v, K, V> for Option<&'v HashMap<K, V>> {
    fn into_map_value(self) -> Option<&'v HashMap<K, V>> {
        self
    }
}

impl<'v, K, V> IntoMapValue<'v, K, V> for &'v Option<HashMap<K, V>> {
    fn into_map_value(self) -> Option<&'v HashMap<K, V>> {
        self.as_ref()
    }
}

/// Wraps an optional map and a reporting sink for fluent assertions.
pub struct MapAssertion<'t, 'v, K, V, M: FailureMode = Recording> {
    ctx: &'t dyn TestContext,
    v: Option<&'v HashMap<K, V>>,
    msgs: Vec<String>,
    mode: PhantomData<M>,
}

/// Entry point for map assertions.
pub fn that_map<'t, 'v, K, V, W>(ctx: &'t dyn TestContext, v: W) -> MapAssertion<'t, 'v, K, V>
where
    W: IntoMapValue<'v, K, V>,
{
    MapAssertion {
        ctx,
        v: v.into_map_value(),
        msgs: Vec::new(),
        mode: PhantomData,
    }
}

impl<'t, 'v, K, V> MapAssertion<'t, 'v, K, V, Recording> {
    /// Escalates the chain: every failure from here on aborts the test.
    pub fn must(self) -> MapAssertion<'t, 'v, K, V, Aborting> {
        MapAssertion {
            ctx: self.ctx,
            v: self.v,
            msgs: self.msgs,
            mode: PhantomData,
        }
    }
}

impl<'t, 'v, K, V, M> MapAssertion<'t, 'v, K, V, M>
where
    K: Serialize + Display + Eq + Hash,
    V: Serialize + PartialEq,
    M: FailureMode,
{
    /// Attaches an annotation appended to every failure on this chain.
    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msgs.push(msg.into());
        self
    }

    fn len(&self) -> usize {
        self.v.map_or(0, HashMap::len)
    }

    fn get(&self, key: &K) -> Option<&'v V> {
        self.v.and_then(|m| m.get(key))
    }

    /// Keys in sorted render order, so the reported key is deterministic.
    fn sorted_keys(m: &'v HashMap<K, V>) -> Vec<&'v K> {
        let mut keys: Vec<&K> = m.keys().collect();
        keys.sort_by_key(|k| k.to_string());
        keys
    }

    fn fail(&self, failure: Failure) {
        report::deliver::<M>(self.ctx, failure, &self.msgs);
    }

    fn fail_got(&self, summary: impl Into<String>) {
        self.fail(Failure::new(summary).field("got", render_json(&self.v)));
    }

    fn fail_got_expect(&self, summary: impl Into<String>, expect: &HashMap<K, V>) {
        self.fail(
            Failure::new(summary)
                .field("got", render_json(&self.v))
                .field("expect", render_json(expect)),
        );
    }

    pub fn length(self, length: usize) -> Self {
        self.ctx.helper();
        if self.len() != length {
            self.fail_got(format!(
                "expected map to have length {length}, but it has length {}",
                self.len()
            ));
        }
        self
    }

    /// Key-by-key equality; length mismatch, a missing key, and a value
    /// mismatch produce distinct summaries.
    pub fn equal(self, expect: &HashMap<K, V>) -> Self {
        self.ctx.helper();
        if self.len() != expect.len() {
            self.fail_got_expect(
                "expected maps to be equal, but their lengths are different",
                expect,
            );
            return self;
        }
        if let Some(m) = self.v {
            for k in Self::sorted_keys(m) {
                match expect.get(k) {
                    None => {
                        self.fail_got_expect(
                            format!("expected maps to be equal, but key '{k}' is missing"),
                            expect,
                        );
                        return self;
                    }
                    Some(ev) if ev != &m[k] => {
                        self.fail_got_expect(
                            format!(
                                "expected maps to be equal, but values for key '{k}' are different"
                            ),
                            expect,
                        );
                        return self;
                    }
                    Some(_) => {}
                }
            }
        }
        self
    }

    pub fn not_equal(self, expect: &HashMap<K, V>) -> Self {
        self.ctx.helper();
        let equal = self.len() == expect.len()
            && self
                .v
                .map_or(expect.is_empty(), |m| {
                    m.iter().all(|(k, v)| expect.get(k) == Some(v))
                });
        if equal {
            self.fail_got("expected maps to be different, but they are equal");
        }
        self
    }

    pub fn is_nil(self) -> Self {
        self.ctx.helper();
        if self.v.is_some() {
            self.fail_got("expected map to be nil, but it is not");
        }
        self
    }

    pub fn not_nil(self) -> Self {
        self.ctx.helper();
        if self.v.is_none() {
            self.fail_got("expected map not to be nil, but it is");
        }
        self
    }

    /// The nil map is empty.
    pub fn is_empty(self) -> Self {
        self.ctx.helper();
        if self.len() != 0 {
            self.fail_got("expected map to be empty, but it is not");
        }
        self
    }

    pub fn not_empty(self) -> Self {
        self.ctx.helper();
        if self.len() == 0 {
            self.fail_got("expected map to be non-empty, but it is empty");
        }
        self
    }

    pub fn contains_key(self, key: &K) -> Self {
        self.ctx.helper();
        if self.get(key).is_none() {
            self.fail_got(format!(
                "expected map to contain key '{key}', but it is missing"
            ));
        }
        self
    }

    pub fn not_contains_key(self, key: &K) -> Self {
        self.ctx.helper();
        if self.get(key).is_some() {
            self.fail_got(format!(
                "expected map not to contain key '{key}', but it is found"
            ));
        }
        self
    }

    pub fn contains_value(self, value: &V) -> Self {
        self.ctx.helper();
        let found = self.v.is_some_and(|m| m.values().any(|v| v == value));
        if !found {
            self.fail_got(format!(
                "expected map to contain value {}, but it is missing",
                render_json(value)
            ));
        }
        self
    }

    pub fn not_contains_value(self, value: &V) -> Self {
        self.ctx.helper();
        let found = self.v.is_some_and(|m| m.values().any(|v| v == value));
        if found {
            self.fail_got(format!(
                "expected map not to contain value {}, but it is found",
                render_json(value)
            ));
        }
        self
    }

    /// The key must exist and hold exactly this value.
    pub fn contains_key_value(self, key: &K, value: &V) -> Self {
        self.ctx.helper();
        match self.get(key) {
            None => {
                self.fail_got(format!(
                    "expected map to contain key '{key}', but it is missing"
                ));
            }
            Some(actual) if actual != value => {
                self.fail_got(format!(
                    "expected value {} for key '{key}', but got {} instead",
                    render_json(value),
                    render_json(actual)
                ));
            }
            Some(_) => {}
        }
        self
    }

    /// Reports the first missing key.
    pub fn contains_keys(self, keys: &[K]) -> Self {
        self.ctx.helper();
        if let Some(k) = keys.iter().find(|k| self.get(k).is_none()) {
            self.fail_got(format!(
                "expected map to contain key '{k}', but it is missing"
            ));
        }
        self
    }

    pub fn not_contains_keys(self, keys: &[K]) -> Self {
        self.ctx.helper();
        if let Some(k) = keys.iter().find(|k| self.get(k).is_some()) {
            self.fail_got(format!(
                "expected map not to contain key '{k}', but it is found"
            ));
        }
        self
    }

    pub fn contains_values(self, values: &[V]) -> Self {
        self.ctx.helper();
        let missing = values
            .iter()
            .find(|want| !self.v.is_some_and(|m| m.values().any(|v| v == *want)));
        if let Some(want) = missing {
            self.fail_got(format!(
                "expected map to contain value {}, but it is missing",
                render_json(want)
            ));
        }
        self
    }

    pub fn not_contains_values(self, values: &[V]) -> Self {
        self.ctx.helper();
        let found = values
            .iter()
            .find(|want| self.v.is_some_and(|m| m.values().any(|v| v == *want)));
        if let Some(want) = found {
            self.fail_got(format!(
                "expected map not to contain value {}, but it is found",
                render_json(want)
            ));
        }
        self
    }

    /// Every entry of this map must appear in `expect` with the same value.
    pub fn is_subset_of(self, expect: &HashMap<K, V>) -> Self {
        self.ctx.helper();
        if let Some(m) = self.v {
            for k in Self::sorted_keys(m) {
                match expect.get(k) {
                    None => {
                        self.fail_got_expect(
                            format!("expected map to be a subset, but unexpected key '{k}' is found"),
                            expect,
                        );
                        return self;
                    }
                    Some(ev) if ev != &m[k] => {
                        self.fail_got_expect(
                            format!(
                                "expected map to be a subset, but values for key '{k}' are different "
                            ),
                            expect,
                        );
                        return self;
                    }
                    Some(_) => {}
                }
            }
        }
        self
    }

    /// Every entry of `expect` must appear in this map with the same value.
    pub fn is_superset_of(self, expect: &HashMap<K, V>) -> Self {
        self.ctx.helper();
        let mut keys: Vec<&K> = expect.keys().collect();
        keys.sort_by_key(|k| k.to_string());
        for k in keys {
            match self.get(k) {
                None => {
                    self.fail_got_expect(
                        format!("expected map to be a superset, but key '{k}' is missing"),
                        expect,
                    );
                    return self;
                }
                Some(v) if v != &expect[k] => {
                    self.fail_got_expect(
                        format!(
                            "expected map to be a superset, but values for key '{k}' are different"
                        ),
                        expect,
                    );
                    return self;
                }
                Some(_) => {}
            }
        }
        self
    }

    /// Same key set, values irrelevant.
    pub fn has_same_keys(self, expect: &HashMap<K, V>) -> Self {
        self.ctx.helper();
        if self.len() != expect.len() {
            self.fail_got_expect(
                "expected maps to have the same keys, but their lengths are different",
                expect,
            );
            return self;
        }
        if let Some(m) = self.v {
            if let Some(k) = Self::sorted_keys(m)
                .into_iter()
                .find(|k| !expect.contains_key(k))
            {
                self.fail_got_expect(
                    format!("expected maps to have the same keys, but key '{k}' is missing"),
                    expect,
                );
            }
        }
        self
    }

    /// Same multiset of values; which keys hold them is irrelevant.
    pub fn has_same_values(self, expect: &HashMap<K, V>) -> Self {
        self.ctx.helper();
        if self.len() != expect.len() {
            self.fail_got_expect(
                "expected maps to have the same values, but their lengths are different",
                expect,
            );
            return self;
        }
        let got: Vec<&V> = self.v.map_or_else(Vec::new, |m| m.values().collect());
        let want: Vec<&V> = expect.values().collect();
        if !compare::multiset_eq(&got, &want) {
            self.fail_got_expect(
                "expected maps to have the same values, but values are different",
                expect,
            );
        }
        self
    }
}

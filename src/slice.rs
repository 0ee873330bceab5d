//! Assertions on sequences.
//!
//! The wrapped value is `Option<&[T]>` so the nil slice and the empty slice
//! stay distinct: `None` is nil, `Some(&[])` is empty, nil is empty but empty
//! is not nil. [`IntoSliceValue`] lets call sites hand over a `&[T]`,
//! `&Vec<T>`, an array reference, or an `Option` of either without spelling
//! the conversion.
//!
//! Values render as compact JSON by default (`actual: [1,2,3]`, nil is
//! `null`); [`render_as`](SliceAssertion::render_as) switches a chain to the
//! structural form.

use std::fmt::Display;
use std::marker::PhantomData;

use serde::Serialize;

use crate::compare;
use crate::context::TestContext;
use crate::mode::{Aborting, FailureMode, Recording};
use crate::render::{render_items_pretty, render_json, OutputMode};
use crate::report::{self, Failure};

/// The slice family aligns its labels to `expected`.
const LABEL_WIDTH: usize = 8;

/// Anything the slice wrapper accepts as its subject.
pub trait IntoSliceValue<'v, T> {
    fn into_slice_value(self) -> Option<&'v [T]>;
}

impl<'v, T> IntoSliceValue<'v, T> for &'v [T] {
    fn into_slice_value(self) -> Option<&'v [T]> {
        Some(self)
    }
}

impl<'v, T> IntoSliceValue<'v, T> for &'v Vec<T> {
    fn into_slice_value(self) -> Option<&'v [T]> {
        Some(self.as_slice())
    }
}

impl<'v, T, const N: usize> IntoSliceValue<'v, T> for &'v [T; N] {
    fn into_slice_value(self) -> Option<&'v [T]> {
        Some(self.as_slice())
    }
}

impl<'v, T> IntoSliceValue<'v, T> for Option<&'v [T]> {
    fn into_slice_value(self) -> Option<&'v [T]> {
        self
    }
}

impl<'v, T> IntoSliceValue<'v, T> for &'v Option<Vec<T>> {
    fn into_slice_value(self) -> Option<&'v [T]> {
        self.as_deref()
    }
}

/// Wraps an optional sequence and a reporting sink for fluent assertions.
pub struct SliceAssertion<'t, 'v, T, M: FailureMode = Recording> {
    ctx: &'t dyn TestContext,
    v: Option<&'v [T]>,
    out: OutputMode,
    msgs: Vec<String>,
    mode: PhantomData<M>,
}

/// Entry point for slice assertions.
pub fn that_slice<'t, 'v, T, V>(ctx: &'t dyn TestContext, v: V) -> SliceAssertion<'t, 'v, T>
where
    V: IntoSliceValue<'v, T>,
{
    SliceAssertion {
        ctx,
        v: v.into_slice_value(),
        out: OutputMode::Json,
        msgs: Vec::new(),
        mode: PhantomData,
    }
}

impl<'t, 'v, T> SliceAssertion<'t, 'v, T, Recording> {
    /// Escalates the chain: every failure from here on aborts the test.
    pub fn must(self) -> SliceAssertion<'t, 'v, T, Aborting> {
        SliceAssertion {
            ctx: self.ctx,
            v: self.v,
            out: self.out,
            msgs: self.msgs,
            mode: PhantomData,
        }
    }
}

impl<'t, 'v, T, M> SliceAssertion<'t, 'v, T, M>
where
    T: Serialize + Display + PartialEq,
    M: FailureMode,
{
    /// Attaches an annotation appended to every failure on this chain.
    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msgs.push(msg.into());
        self
    }

    /// Switches how values render inside failure blocks for this chain.
    pub fn render_as(mut self, mode: OutputMode) -> Self {
        self.out = mode;
        self
    }

    fn items(&self) -> &'v [T] {
        self.v.unwrap_or(&[])
    }

    fn show_subject(&self) -> String {
        match self.out {
            OutputMode::Json => render_json(&self.v),
            OutputMode::Pretty => render_items_pretty(self.v),
        }
    }

    fn show_operand(&self, items: &[T]) -> String {
        match self.out {
            OutputMode::Json => render_json(items),
            OutputMode::Pretty => render_items_pretty(Some(items)),
        }
    }

    fn show_elem(&self, elem: &T) -> String {
        match self.out {
            OutputMode::Json => render_json(elem),
            OutputMode::Pretty => elem.to_string(),
        }
    }

    fn fail(&self, failure: Failure) {
        report::deliver::<M>(self.ctx, failure.min_label_width(LABEL_WIDTH), &self.msgs);
    }

    fn fail_actual(&self, summary: impl Into<String>) {
        self.fail(Failure::new(summary).field("actual", self.show_subject()));
    }

    pub fn length(self, length: usize) -> Self {
        self.ctx.helper();
        if self.items().len() != length {
            self.fail_actual(format!(
                "expected slice to have length {length}, but it has length {}",
                self.items().len()
            ));
        }
        self
    }

    /// Element-wise equality; length mismatch and the first differing index
    /// produce distinct summaries.
    pub fn equal(self, expect: &[T]) -> Self {
        self.ctx.helper();
        let items = self.items();
        if items.len() != expect.len() {
            self.fail(
                Failure::new("expected slices to be equal, but their lengths are different")
                    .field("actual", self.show_subject())
                    .field("expected", self.show_operand(expect)),
            );
        } else if let Some(i) = items.iter().zip(expect).position(|(a, b)| a != b) {
            self.fail(
                Failure::new(format!(
                    "expected slices to be equal, but values at index {i} are different"
                ))
                .field("actual", self.show_subject())
                .field("expected", self.show_operand(expect)),
            );
        }
        self
    }

    pub fn not_equal(self, expect: &[T]) -> Self {
        self.ctx.helper();
        if self.items() == expect {
            self.fail_actual("expected slices to be different, but they are equal");
        }
        self
    }

    pub fn is_nil(self) -> Self {
        self.ctx.helper();
        if self.v.is_some() {
            self.fail_actual("expected slice to be nil, but it is not");
        }
        self
    }

    pub fn not_nil(self) -> Self {
        self.ctx.helper();
        if self.v.is_none() {
            self.fail_actual("expected slice not to be nil, but it is");
        }
        self
    }

    /// The nil slice is empty.
    pub fn is_empty(self) -> Self {
        self.ctx.helper();
        if !self.items().is_empty() {
            self.fail_actual("expected slice to be empty, but it is not");
        }
        self
    }

    pub fn not_empty(self) -> Self {
        self.ctx.helper();
        if self.items().is_empty() {
            self.fail_actual("expected slice not to be empty, but it is");
        }
        self
    }

    pub fn contains(self, expect: &T) -> Self {
        self.ctx.helper();
        if !self.items().contains(expect) {
            self.fail_actual(format!(
                "expected slice to contain element {}, but it is missing",
                self.show_elem(expect)
            ));
        }
        self
    }

    pub fn not_contains(self, expect: &T) -> Self {
        self.ctx.helper();
        if self.items().contains(expect) {
            self.fail_actual(format!(
                "expected slice not to contain element {}, but it is found",
                self.show_elem(expect)
            ));
        }
        self
    }

    /// Contiguous subsequence; the empty sub-slice always matches.
    pub fn contains_slice(self, sub: &[T]) -> Self {
        self.ctx.helper();
        if !compare::contains_subsequence(self.items(), sub) {
            self.fail(
                Failure::new("expected slice to contain sub-slice, but it is not")
                    .field("actual", self.show_subject())
                    .field("sub", self.show_operand(sub)),
            );
        }
        self
    }

    pub fn not_contains_slice(self, sub: &[T]) -> Self {
        self.ctx.helper();
        if compare::contains_subsequence(self.items(), sub) {
            self.fail(
                Failure::new("expected slice not to contain sub-slice, but it is")
                    .field("actual", self.show_subject())
                    .field("sub", self.show_operand(sub)),
            );
        }
        self
    }

    pub fn has_prefix(self, prefix: &[T]) -> Self {
        self.ctx.helper();
        if !compare::has_prefix(self.items(), prefix) {
            self.fail(
                Failure::new("expected slice to start with prefix, but it is not")
                    .field("actual", self.show_subject())
                    .field("prefix", self.show_operand(prefix)),
            );
        }
        self
    }

    pub fn has_suffix(self, suffix: &[T]) -> Self {
        self.ctx.helper();
        if !compare::has_suffix(self.items(), suffix) {
            self.fail(
                Failure::new("expected slice to end with suffix, but it is not")
                    .field("actual", self.show_subject())
                    .field("suffix", self.show_operand(suffix)),
            );
        }
        self
    }

    /// Membership of every listed element, order irrelevant. Reports the
    /// first missing element.
    pub fn contains_all(self, expect: &[T]) -> Self {
        self.ctx.helper();
        if let Some(missing) = expect.iter().find(|e| !self.items().contains(e)) {
            self.fail_actual(format!(
                "expected slice to contain element {}, but it is missing",
                self.show_elem(missing)
            ));
        }
        self
    }

    pub fn contains_none(self, expect: &[T]) -> Self {
        self.ctx.helper();
        if let Some(found) = expect.iter().find(|e| self.items().contains(e)) {
            self.fail_actual(format!(
                "expected slice not to contain element {}, but it is found",
                self.show_elem(found)
            ));
        }
        self
    }

    /// First duplicate value ends the scan.
    pub fn all_unique(self) -> Self {
        self.ctx.helper();
        if let Some(dup) = compare::first_duplicate(self.items()) {
            self.fail_actual(format!(
                "expected all elements in the slice to be unique, but duplicate element {} is found",
                self.show_elem(dup)
            ));
        }
        self
    }

    /// Uniqueness under a derived key rather than the element itself.
    pub fn is_unique_by<K, F>(self, key_fn: F) -> Self
    where
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        self.ctx.helper();
        if let Some(dup) = compare::first_duplicate_by(self.items(), key_fn) {
            self.fail_actual(format!(
                "expected all elements in the slice to be unique by key, but duplicate element {} is found",
                self.show_elem(dup)
            ));
        }
        self
    }

    pub fn all_matches<F: Fn(&T) -> bool>(self, f: F) -> Self {
        self.ctx.helper();
        if let Some(bad) = self.items().iter().find(|e| !f(e)) {
            self.fail_actual(format!(
                "expected all elements in the slice to satisfy the condition, but element {} does not",
                self.show_elem(bad)
            ));
        }
        self
    }

    pub fn any_matches<F: Fn(&T) -> bool>(self, f: F) -> Self {
        self.ctx.helper();
        if !self.items().iter().any(|e| f(e)) {
            self.fail_actual(
                "expected at least one element in the slice to satisfy the condition, but none do",
            );
        }
        self
    }

    pub fn none_matches<F: Fn(&T) -> bool>(self, f: F) -> Self {
        self.ctx.helper();
        if let Some(bad) = self.items().iter().find(|e| f(e)) {
            self.fail_actual(format!(
                "expected no element in the slice to satisfy the condition, but element {} does",
                self.show_elem(bad)
            ));
        }
        self
    }
}

impl<'t, 'v, T, M> SliceAssertion<'t, 'v, T, M>
where
    T: Serialize + Display + PartialEq + PartialOrd,
    M: FailureMode,
{
    /// Strictly ascending; equal neighbors violate.
    pub fn is_increasing(self) -> Self {
        self.ctx.helper();
        if let Some(i) = compare::first_unordered(self.items(), true, true) {
            self.fail_actual(format!(
                "expected slice to be strictly increasing, but it is not at index {i}"
            ));
        }
        self
    }

    /// Strictly descending; equal neighbors violate.
    pub fn is_decreasing(self) -> Self {
        self.ctx.helper();
        if let Some(i) = compare::first_unordered(self.items(), false, true) {
            self.fail_actual(format!(
                "expected slice to be strictly decreasing, but it is not at index {i}"
            ));
        }
        self
    }

    /// Non-strict ascending order.
    pub fn is_sorted(self) -> Self {
        self.ctx.helper();
        if let Some(i) = compare::first_unordered(self.items(), true, false) {
            self.fail_actual(format!(
                "expected slice to be sorted in ascending order, but it is not at index {i}"
            ));
        }
        self
    }

    /// Non-strict descending order.
    pub fn is_sorted_descending(self) -> Self {
        self.ctx.helper();
        if let Some(i) = compare::first_unordered(self.items(), false, false) {
            self.fail_actual(format!(
                "expected slice to be sorted in descending order, but it is not at index {i}"
            ));
        }
        self
    }
}

//! Assertions on numeric values.
//!
//! One wrapper covers every primitive integer and float kind through the
//! [`Num`] trait. Comparison templates interpolate the wrapped value first
//! and the comparison target second; existing suites pin that order, so it is
//! part of the message contract.
//!
//! # Example
//!
//! ```rust,ignore
//! use affirm::{that_number, TestRun};
//!
//! let t = TestRun::new();
//! that_number(&t, 5).is_between(1, 10).is_positive();
//! that_number(&t, 5.2).is_in_delta(5.0, 0.3);
//! ```

use std::marker::PhantomData;

use crate::compare::{self, Num};
use crate::context::TestContext;
use crate::mode::{Aborting, FailureMode, Recording};
use crate::render::render_num;
use crate::report::{self, Failure};

/// Wraps a number and a reporting sink for fluent assertions.
pub struct NumberAssertion<'t, T: Num, M: FailureMode = Recording> {
    ctx: &'t dyn TestContext,
    v: T,
    msgs: Vec<String>,
    mode: PhantomData<M>,
}

/// Entry point for number assertions.
pub fn that_number<T: Num>(ctx: &dyn TestContext, v: T) -> NumberAssertion<'_, T> {
    NumberAssertion {
        ctx,
        v,
        msgs: Vec::new(),
        mode: PhantomData,
    }
}

impl<'t, T: Num> NumberAssertion<'t, T, Recording> {
    /// Escalates the chain: every failure from here on aborts the test.
    pub fn must(self) -> NumberAssertion<'t, T, Aborting> {
        NumberAssertion {
            ctx: self.ctx,
            v: self.v,
            msgs: self.msgs,
            mode: PhantomData,
        }
    }
}

impl<'t, T: Num, M: FailureMode> NumberAssertion<'t, T, M> {
    /// Attaches an annotation appended to every failure on this chain.
    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msgs.push(msg.into());
        self
    }

    fn fail(&self, summary: String) {
        report::deliver::<M>(self.ctx, Failure::new(summary), &self.msgs);
    }

    pub fn equal(self, expect: T) -> Self {
        self.ctx.helper();
        if self.v != expect {
            self.fail(format!(
                "expected number to be equal to {}, but got {}",
                render_num(self.v),
                render_num(expect)
            ));
        }
        self
    }

    pub fn not_equal(self, expect: T) -> Self {
        self.ctx.helper();
        if self.v == expect {
            self.fail(format!(
                "expected number not to be equal to {}, but it is",
                render_num(self.v)
            ));
        }
        self
    }

    pub fn greater_than(self, expect: T) -> Self {
        self.ctx.helper();
        if self.v <= expect {
            self.fail(format!(
                "expected number to be greater than {}, but got {}",
                render_num(self.v),
                render_num(expect)
            ));
        }
        self
    }

    pub fn greater_or_equal(self, expect: T) -> Self {
        self.ctx.helper();
        if self.v < expect {
            self.fail(format!(
                "expected number to be greater than or equal to {}, but got {}",
                render_num(self.v),
                render_num(expect)
            ));
        }
        self
    }

    pub fn less_than(self, expect: T) -> Self {
        self.ctx.helper();
        if self.v >= expect {
            self.fail(format!(
                "expected number to be less than {}, but got {}",
                render_num(self.v),
                render_num(expect)
            ));
        }
        self
    }

    pub fn less_or_equal(self, expect: T) -> Self {
        self.ctx.helper();
        if self.v > expect {
            self.fail(format!(
                "expected number to be less than or equal to {}, but got {}",
                render_num(self.v),
                render_num(expect)
            ));
        }
        self
    }

    pub fn is_zero(self) -> Self {
        self.ctx.helper();
        if self.v != T::ZERO {
            self.fail(format!(
                "expected number to be zero, but got {}",
                render_num(self.v)
            ));
        }
        self
    }

    pub fn is_not_zero(self) -> Self {
        self.ctx.helper();
        if self.v == T::ZERO {
            self.fail("expected number not to be zero, but got 0".to_string());
        }
        self
    }

    /// Strict: zero is not positive.
    pub fn is_positive(self) -> Self {
        self.ctx.helper();
        if self.v <= T::ZERO {
            self.fail(format!(
                "expected number to be positive, but got {}",
                render_num(self.v)
            ));
        }
        self
    }

    /// Strict: zero is not negative.
    pub fn is_negative(self) -> Self {
        self.ctx.helper();
        if self.v >= T::ZERO {
            self.fail(format!(
                "expected number to be negative, but got {}",
                render_num(self.v)
            ));
        }
        self
    }

    pub fn is_non_negative(self) -> Self {
        self.ctx.helper();
        if self.v < T::ZERO {
            self.fail(format!(
                "expected number to be non-negative, but got {}",
                render_num(self.v)
            ));
        }
        self
    }

    pub fn is_non_positive(self) -> Self {
        self.ctx.helper();
        if self.v > T::ZERO {
            self.fail(format!(
                "expected number to be non-positive, but got {}",
                render_num(self.v)
            ));
        }
        self
    }

    /// Both bounds inclusive.
    pub fn is_between(self, lower: T, upper: T) -> Self {
        self.ctx.helper();
        if self.v < lower || self.v > upper {
            self.fail(format!(
                "expected number to be between {} and {}, but got {}",
                render_num(lower),
                render_num(upper),
                render_num(self.v)
            ));
        }
        self
    }

    pub fn is_not_between(self, lower: T, upper: T) -> Self {
        self.ctx.helper();
        if self.v >= lower && self.v <= upper {
            self.fail(format!(
                "expected number not to be between {} and {}, but got {}",
                render_num(lower),
                render_num(upper),
                render_num(self.v)
            ));
        }
        self
    }

    /// Passes iff `|v - expect| <= delta`.
    pub fn is_in_delta(self, expect: T, delta: T) -> Self {
        self.ctx.helper();
        if !compare::in_delta(self.v, expect, delta) {
            self.fail(format!(
                "expected number to be within \u{00b1}{} of {}, but got {}",
                render_num(delta),
                render_num(expect),
                render_num(self.v)
            ));
        }
        self
    }

    /// Always fails for integer kinds.
    pub fn is_nan(self) -> Self {
        self.ctx.helper();
        if !self.v.is_nan() {
            self.fail(format!(
                "expected number to be NaN, but got {}",
                render_num(self.v)
            ));
        }
        self
    }

    /// `sign > 0` expects +Inf, `sign < 0` expects -Inf, `sign == 0` either.
    pub fn is_inf(self, sign: i32) -> Self {
        self.ctx.helper();
        if !self.v.is_inf(sign) {
            let wanted = match sign.cmp(&0) {
                std::cmp::Ordering::Greater => "+Inf",
                std::cmp::Ordering::Less => "-Inf",
                std::cmp::Ordering::Equal => "Inf",
            };
            self.fail(format!(
                "expected number to be {wanted}, but got {}",
                render_num(self.v)
            ));
        }
        self
    }

    /// Finite means neither NaN nor an infinity of either sign.
    pub fn is_finite(self) -> Self {
        self.ctx.helper();
        if self.v.is_nan() || self.v.is_inf(0) {
            self.fail(format!(
                "expected number to be finite, but got {}",
                render_num(self.v)
            ));
        }
        self
    }
}

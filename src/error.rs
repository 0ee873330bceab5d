//! Assertions on error values.
//!
//! The subject is `Option<&dyn Error>`: `None` plays the role of the absent
//! error, and [`that_result`] projects a `Result`'s error side directly.
//! Equality between errors is message equality (their `Display` output);
//! pattern matching treats a bad pattern as an assertion failure, not a
//! fault.

use std::error::Error;
use std::marker::PhantomData;

use regex::Regex;

use crate::context::TestContext;
use crate::mode::{Aborting, FailureMode, Recording};
use crate::report::{self, Failure};

/// Wraps an optional error and a reporting sink for fluent assertions.
pub struct ErrorAssertion<'t, 'v, M: FailureMode = Recording> {
    ctx: &'t dyn TestContext,
    v: Option<&'v (dyn Error + 'static)>,
    msgs: Vec<String>,
    mode: PhantomData<M>,
}

/// Entry point for error assertions.
pub fn that_error<'t, 'v>(
    ctx: &'t dyn TestContext,
    v: Option<&'v (dyn Error + 'static)>,
) -> ErrorAssertion<'t, 'v> {
    ErrorAssertion {
        ctx,
        v,
        msgs: Vec::new(),
        mode: PhantomData,
    }
}

/// Wraps the error side of a `Result`; an `Ok` wraps the absent error.
pub fn that_result<'t, 'v, T, E>(
    ctx: &'t dyn TestContext,
    v: &'v Result<T, E>,
) -> ErrorAssertion<'t, 'v>
where
    E: Error + 'static,
{
    that_error(ctx, v.as_ref().err().map(|e| e as &(dyn Error + 'static)))
}

impl<'t, 'v> ErrorAssertion<'t, 'v, Recording> {
    /// Escalates the chain: every failure from here on aborts the test.
    pub fn must(self) -> ErrorAssertion<'t, 'v, Aborting> {
        ErrorAssertion {
            ctx: self.ctx,
            v: self.v,
            msgs: self.msgs,
            mode: PhantomData,
        }
    }
}

impl<'t, 'v, M: FailureMode> ErrorAssertion<'t, 'v, M> {
    /// Attaches an annotation appended to every failure on this chain.
    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msgs.push(msg.into());
        self
    }

    fn fail(&self, failure: Failure) {
        report::deliver::<M>(self.ctx, failure, &self.msgs);
    }

    pub fn is_nil(self) -> Self {
        self.ctx.helper();
        if let Some(err) = self.v {
            self.fail(
                Failure::new("expected error to be nil, but it is not").field("got", err.to_string()),
            );
        }
        self
    }

    pub fn not_nil(self) -> Self {
        self.ctx.helper();
        if self.v.is_none() {
            self.fail(Failure::new("expected error to be non-nil, but it is nil"));
        }
        self
    }

    /// Message equality against the target. The trailing space in the
    /// summary is part of the pinned message format.
    pub fn is(self, target: &dyn Error) -> Self {
        self.ctx.helper();
        let same = self.v.is_some_and(|err| err.to_string() == target.to_string());
        if !same {
            self.fail(
                Failure::new("expected error to be equal to target, but they are different ")
                    .field("got", self.v.map_or("nil".to_string(), |e| e.to_string()))
                    .field("expect", target.to_string()),
            );
        }
        self
    }

    pub fn not_is(self, target: &dyn Error) -> Self {
        self.ctx.helper();
        let same = self.v.is_some_and(|err| err.to_string() == target.to_string());
        if same {
            self.fail(
                Failure::new("expected error not to be equal to target, but they are equal ")
                    .field("got", self.v.map_or("nil".to_string(), |e| e.to_string()))
                    .field("expect", target.to_string()),
            );
        }
        self
    }

    pub fn contains_message(self, substr: &str) -> Self {
        self.ctx.helper();
        match self.v {
            None => {
                self.fail(Failure::new("expected non-nil error, but got nil"));
            }
            Some(err) => {
                let text = err.to_string();
                if !text.contains(substr) {
                    self.fail(
                        Failure::new(format!(
                            "expected error message to contain {substr:?}, but it does not"
                        ))
                        .field("got", format!("{text:?}")),
                    );
                }
            }
        }
        self
    }

    pub fn matches(self, expr: &str) -> Self {
        self.ctx.helper();
        match self.v {
            None => {
                self.fail(Failure::new("expected non-nil error, but got nil"));
            }
            Some(err) => match Regex::new(expr) {
                Err(_) => {
                    self.fail(Failure::new("invalid pattern"));
                }
                Ok(re) => {
                    let text = err.to_string();
                    if !re.is_match(&text) {
                        self.fail(Failure::new(format!(
                            "got {text:?} which does not match {expr:?}"
                        )));
                    }
                }
            },
        }
        self
    }
}

//! Assertions on string values.
//!
//! Besides the usual equality/containment checks this family carries
//! classification predicates (`is_alpha`, `is_numeric`, ...), format
//! validators backed by lazily-compiled regexes (`is_email`, `is_url`, ...),
//! regex matching where a bad pattern is itself an assertion failure, and
//! JSON structural equality where a parse failure on either side is reported
//! as a distinct failure naming that side.

use std::marker::PhantomData;
use std::net::IpAddr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::context::TestContext;
use crate::mode::{Aborting, FailureMode, Recording};
use crate::report::{self, Failure};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://[^\s]+$").unwrap());
static HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]+$").unwrap());
static BASE64_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$").unwrap()
});

/// Which side of a JSON-equality comparison failed to parse.
#[derive(Debug, Error)]
enum JsonSideError {
    #[error("got")]
    Got(#[source] serde_json::Error),
    #[error("expect")]
    Expect(#[source] serde_json::Error),
}

fn parse_both(got: &str, expect: &str) -> Result<(Value, Value), JsonSideError> {
    let got = serde_json::from_str(got).map_err(JsonSideError::Got)?;
    let expect = serde_json::from_str(expect).map_err(JsonSideError::Expect)?;
    Ok((got, expect))
}

/// Wraps a string slice and a reporting sink for fluent assertions.
pub struct StrAssertion<'t, 'v, M: FailureMode = Recording> {
    ctx: &'t dyn TestContext,
    v: &'v str,
    msgs: Vec<String>,
    mode: PhantomData<M>,
}

/// Entry point for string assertions.
pub fn that_string<'t, 'v>(ctx: &'t dyn TestContext, v: &'v str) -> StrAssertion<'t, 'v> {
    StrAssertion {
        ctx,
        v,
        msgs: Vec::new(),
        mode: PhantomData,
    }
}

impl<'t, 'v> StrAssertion<'t, 'v, Recording> {
    /// Escalates the chain: every failure from here on aborts the test.
    pub fn must(self) -> StrAssertion<'t, 'v, Aborting> {
        StrAssertion {
            ctx: self.ctx,
            v: self.v,
            msgs: self.msgs,
            mode: PhantomData,
        }
    }
}

impl<'t, 'v, M: FailureMode> StrAssertion<'t, 'v, M> {
    /// Attaches an annotation appended to every failure on this chain.
    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msgs.push(msg.into());
        self
    }

    fn fail(&self, failure: Failure) {
        report::deliver::<M>(self.ctx, failure, &self.msgs);
    }

    fn fail_got(&self, summary: impl Into<String>) {
        self.fail(Failure::new(summary).field("got", format!("{:?}", self.v)));
    }

    /// Length in bytes, matching the host's native string length.
    pub fn length(self, length: usize) -> Self {
        self.ctx.helper();
        if self.v.len() != length {
            self.fail_got(format!(
                "expected string to have length {length}, but it has length {}",
                self.v.len()
            ));
        }
        self
    }

    pub fn equal(self, expect: &str) -> Self {
        self.ctx.helper();
        if self.v != expect {
            self.fail(
                Failure::new("expected strings to be equal, but they are not")
                    .field("got", format!("{:?}", self.v))
                    .field("expect", format!("{expect:?}")),
            );
        }
        self
    }

    pub fn not_equal(self, expect: &str) -> Self {
        self.ctx.helper();
        if self.v == expect {
            self.fail(
                Failure::new("expected strings to be different, but they are equal")
                    .field("got", format!("{:?}", self.v))
                    .field("expect", format!("{expect:?}")),
            );
        }
        self
    }

    /// Case-insensitive equality.
    pub fn equal_fold(self, expect: &str) -> Self {
        self.ctx.helper();
        if self.v.to_lowercase() != expect.to_lowercase() {
            self.fail(
                Failure::new("expected strings to be equal (case-insensitive), but they are not")
                    .field("got", format!("{:?}", self.v))
                    .field("expect", format!("{expect:?}")),
            );
        }
        self
    }

    /// Structural equality of the JSON documents on both sides. Either side
    /// failing to parse is its own failure mode naming that side; the deep
    /// comparison only runs once both parse.
    pub fn json_equal(self, expect: &str) -> Self {
        self.ctx.helper();
        match parse_both(self.v, expect) {
            Err(JsonSideError::Got(err)) => {
                self.fail(
                    Failure::new(
                        "expected strings to be JSON-equal, but failed to unmarshal got value",
                    )
                    .field("got", format!("{:?}", self.v))
                    .field("error", format!("{:?}", err.to_string())),
                );
            }
            Err(JsonSideError::Expect(err)) => {
                self.fail(
                    Failure::new(
                        "expected strings to be JSON-equal, but failed to unmarshal expect value",
                    )
                    .field("expect", format!("{expect:?}"))
                    .field("error", format!("{:?}", err.to_string())),
                );
            }
            Ok((got, want)) => {
                if got != want {
                    self.fail(
                        Failure::new("expected strings to be JSON-equal, but they are not")
                            .field("got", format!("{:?}", self.v))
                            .field("expect", format!("{expect:?}")),
                    );
                }
            }
        }
        self
    }

    /// A pattern that fails to compile is reported as an assertion failure
    /// carrying the regex engine's error text, never a fault.
    pub fn matches(self, expr: &str) -> Self {
        self.ctx.helper();
        match Regex::new(expr) {
            Err(err) => {
                self.fail(
                    Failure::new("expected string to match the pattern, but it does not")
                        .field("got", format!("{:?}", self.v))
                        .field("pattern", format!("{expr:?}"))
                        .field("error", format!("{:?}", err.to_string())),
                );
            }
            Ok(re) => {
                if !re.is_match(self.v) {
                    self.fail(
                        Failure::new("expected string to match the pattern, but it does not")
                            .field("got", format!("{:?}", self.v))
                            .field("pattern", format!("{expr:?}")),
                    );
                }
            }
        }
        self
    }

    pub fn has_prefix(self, prefix: &str) -> Self {
        self.ctx.helper();
        if !self.v.starts_with(prefix) {
            self.fail(
                Failure::new("expected string to start with the specified prefix, but it does not")
                    .field("got", format!("{:?}", self.v))
                    .field("prefix", format!("{prefix:?}")),
            );
        }
        self
    }

    pub fn has_suffix(self, suffix: &str) -> Self {
        self.ctx.helper();
        if !self.v.ends_with(suffix) {
            self.fail(
                Failure::new("expected string to end with the specified suffix, but it does not")
                    .field("got", format!("{:?}", self.v))
                    .field("suffix", format!("{suffix:?}")),
            );
        }
        self
    }

    pub fn contains(self, substr: &str) -> Self {
        self.ctx.helper();
        if !self.v.contains(substr) {
            self.fail(
                Failure::new(
                    "expected string to contain the specified substring, but it does not",
                )
                .field("got", format!("{:?}", self.v))
                .field("substr", format!("{substr:?}")),
            );
        }
        self
    }

    pub fn is_empty(self) -> Self {
        self.ctx.helper();
        if !self.v.is_empty() {
            self.fail_got("expected string to be empty, but it is not");
        }
        self
    }

    pub fn not_empty(self) -> Self {
        self.ctx.helper();
        if self.v.is_empty() {
            self.fail_got("expected string to be non-empty, but it is empty");
        }
        self
    }

    /// Blank means empty or whitespace only.
    pub fn blank(self) -> Self {
        self.ctx.helper();
        if !self.v.trim().is_empty() {
            self.fail_got("expected string to contain only whitespace, but it does not");
        }
        self
    }

    pub fn not_blank(self) -> Self {
        self.ctx.helper();
        if self.v.trim().is_empty() {
            self.fail_got("expected string to be non-blank, but it is blank");
        }
        self
    }

    pub fn is_lower_case(self) -> Self {
        self.ctx.helper();
        if self.v != self.v.to_lowercase() {
            self.fail_got("expected string to be all lowercase, but it is not");
        }
        self
    }

    pub fn is_upper_case(self) -> Self {
        self.ctx.helper();
        if self.v != self.v.to_uppercase() {
            self.fail_got("expected string to be all uppercase, but it is not");
        }
        self
    }

    pub fn is_numeric(self) -> Self {
        self.ctx.helper();
        if self.v.is_empty() || !self.v.chars().all(|c| c.is_ascii_digit()) {
            self.fail_got("expected string to contain only digits, but it does not");
        }
        self
    }

    pub fn is_alpha(self) -> Self {
        self.ctx.helper();
        if self.v.is_empty() || !self.v.chars().all(|c| c.is_ascii_alphabetic()) {
            self.fail_got("expected string to contain only letters, but it does not");
        }
        self
    }

    pub fn is_alpha_numeric(self) -> Self {
        self.ctx.helper();
        if self.v.is_empty() || !self.v.chars().all(|c| c.is_ascii_alphanumeric()) {
            self.fail_got("expected string to contain only letters and digits, but it does not");
        }
        self
    }

    pub fn is_email(self) -> Self {
        self.ctx.helper();
        if !EMAIL_RE.is_match(self.v) {
            self.fail_got("expected string to be a valid email, but it is not");
        }
        self
    }

    pub fn is_url(self) -> Self {
        self.ctx.helper();
        if !URL_RE.is_match(self.v) {
            self.fail_got("expected string to be a valid URL, but it is not");
        }
        self
    }

    /// Accepts both IPv4 and IPv6 textual forms.
    pub fn is_ip(self) -> Self {
        self.ctx.helper();
        if self.v.parse::<IpAddr>().is_err() {
            self.fail_got("expected string to be a valid IP, but it is not");
        }
        self
    }

    pub fn is_hex(self) -> Self {
        self.ctx.helper();
        if !HEX_RE.is_match(self.v) {
            self.fail_got("expected string to be a valid hexadecimal, but it is not");
        }
        self
    }

    pub fn is_base64(self) -> Self {
        self.ctx.helper();
        if self.v.is_empty() || !BASE64_RE.is_match(self.v) {
            self.fail_got("expected string to be a valid Base64, but it is not");
        }
        self
    }
}

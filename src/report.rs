//! Failure message construction.
//!
//! Every failing predicate builds one [`Failure`]: a fixed one-line summary
//! plus zero or more labeled fields (`got`, `expect`, `pattern`, ...). The
//! rendered block right-aligns every label to the widest label in the block,
//! appends the caller's annotations as a final `message:` field, and is
//! delivered to the sink exactly once.

use std::fmt;

use crate::context::TestContext;
use crate::mode::FailureMode;

/// Default label column; fits `message`/`pattern`, the widest labels the
/// scalar and map families produce.
const DEFAULT_LABEL_WIDTH: usize = 7;

/// A single assertion failure: summary line plus labeled fields.
///
/// Implements `std::error::Error`, so non-panicking consumers can carry one
/// around like any other error value.
#[derive(Debug, Clone)]
pub struct Failure {
    summary: String,
    fields: Vec<(String, String)>,
    label_width: usize,
}

impl Failure {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            fields: Vec::new(),
            label_width: DEFAULT_LABEL_WIDTH,
        }
    }

    /// Appends a labeled field. Fields render in insertion order.
    pub fn field(mut self, label: &str, value: impl Into<String>) -> Self {
        self.fields.push((label.to_string(), value.into()));
        self
    }

    /// Widens the label column. Families whose widest label exceeds the
    /// default (the slice family aligns to `expected`) set this once so every
    /// block they emit lines up the same way.
    pub(crate) fn min_label_width(mut self, width: usize) -> Self {
        self.label_width = self.label_width.max(width);
        self
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .fields
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0)
            .max(self.label_width);
        write!(f, "{}", self.summary)?;
        for (label, value) in &self.fields {
            write!(f, "\n{label:>width$}: {value}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Failure {}

/// Renders the failure, attaches annotations, and hands the message to the
/// sink through the chain's current mode.
pub(crate) fn deliver<M: FailureMode>(ctx: &dyn TestContext, failure: Failure, msgs: &[String]) {
    ctx.helper();
    let failure = if msgs.is_empty() {
        failure
    } else {
        let joined = msgs
            .iter()
            .map(|m| format!("{m:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        failure.field("message", joined)
    };
    M::report(ctx, &format!("Assertion failed: {failure}"));
}

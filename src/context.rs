//! Reporting sinks for assertion failures.
//!
//! Every assertion wrapper borrows a [`TestContext`] and delivers failure
//! messages to it. The trait is the minimum surface the library needs from a
//! host test harness: a call-site attribution hook, a non-fatal "record and
//! continue" channel, and a fatal "abort now" channel.

use std::cell::RefCell;

/// The reporting destination for assertion failures.
///
/// Implementations decide what "record" and "abort" mean for their harness.
/// The library guarantees exactly one call per failing predicate and none for
/// passing ones.
pub trait TestContext {
    /// Marks the current frame as a helper so the host can attribute the
    /// failure to the caller's call site. A no-op implementation is legal.
    fn helper(&self) {}

    /// Records a non-fatal failure. Must not unwind; the assertion chain
    /// continues and the surrounding test is marked failed later.
    fn error(&self, msg: &str);

    /// Reports a fatal failure. Real sinks are expected to panic (or
    /// otherwise never return); buffering sinks used to inspect messages may
    /// record the message and return.
    fn fatal(&self, msg: &str);
}

/// A `TestContext` for Rust's native test harness.
///
/// Non-fatal failures accumulate silently; when the `TestRun` goes out of
/// scope it panics with everything that was recorded, so a test can keep
/// executing past the first mismatch and still fail at the end. Fatal
/// failures panic immediately.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::{that_number, TestRun};
///
/// #[test]
/// fn bounds() {
///     let t = TestRun::new();
///     that_number(&t, 5).is_between(1, 10);
///     that_number(&t, 7).is_positive();
/// } // panics here if anything above failed
/// ```
#[derive(Debug, Default)]
pub struct TestRun {
    failures: RefCell<Vec<String>>,
}

impl TestRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-fatal failures recorded so far.
    pub fn failure_count(&self) -> usize {
        self.failures.borrow().len()
    }
}

impl TestContext for TestRun {
    fn error(&self, msg: &str) {
        self.failures.borrow_mut().push(msg.to_string());
    }

    fn fatal(&self, msg: &str) {
        panic!("{msg}");
    }
}

impl Drop for TestRun {
    fn drop(&mut self) {
        // A double panic would abort the process.
        if std::thread::panicking() {
            return;
        }
        let failures = self.failures.get_mut();
        if !failures.is_empty() {
            panic!("{}", failures.join("\n\n"));
        }
    }
}

/// A buffering sink that records every delivery verbatim.
///
/// Non-fatal messages are prefixed with `error# ` and fatal ones with
/// `fatal# `, so tests can assert on both the text and the channel a failure
/// took. Used throughout this crate's own test suite.
#[derive(Debug, Default)]
pub struct MockTest {
    buf: RefCell<String>,
}

impl MockTest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded since the last reset, newline-joined.
    pub fn output(&self) -> String {
        self.buf.borrow().clone()
    }

    pub fn reset(&self) {
        self.buf.borrow_mut().clear();
    }

    fn push(&self, prefix: &str, msg: &str) {
        let mut buf = self.buf.borrow_mut();
        if !buf.is_empty() {
            buf.push('\n');
        }
        buf.push_str(prefix);
        buf.push_str(msg);
    }
}

impl TestContext for MockTest {
    fn error(&self, msg: &str) {
        self.push("error# ", msg);
    }

    fn fatal(&self, msg: &str) {
        self.push("fatal# ", msg);
    }
}

//! # affirm
//!
//! A fluent assertion library with typed wrappers per value shape.
//!
//! Each entry point wraps a value together with a reporting sink and returns
//! a chainable assertion object; every predicate reports through the sink and
//! returns the chain, so one test line can stack several checks. It can be
//! used with Rust's native `#[test]` framework through [`TestRun`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use affirm::{that, that_number, that_slice, that_string, TestRun};
//!
//! #[test]
//! fn test_order_totals() {
//!     let t = TestRun::new();
//!
//!     that_number(&t, 42).is_positive().is_between(1, 100);
//!     that_string(&t, "order-42").has_prefix("order-").not_blank();
//!     that_slice(&t, &[1, 2, 3]).contains(&2).is_increasing();
//!     that(&t, true).is_true();
//! } // the TestRun panics here if anything above failed
//! ```
//!
//! ## Escalating to fatal
//!
//! By default failures are recorded and the test keeps running. `must()`
//! switches a chain so the next failure aborts the test; the switch is a
//! type change and cannot be undone on the same chain.
//!
//! ```rust,ignore
//! use affirm::{that_slice, TestRun};
//!
//! #[test]
//! fn test_preconditions() {
//!     let t = TestRun::new();
//!     that_slice(&t, &rows).must().not_empty();   // aborts if empty
//!     that_slice(&t, &rows).is_sorted();          // recorded if wrong
//! }
//! ```
//!
//! ## Annotations
//!
//! `.msg(...)` attaches context rendered as a trailing `message:` field on
//! every failure from that chain.
//!
//! ```rust,ignore
//! that_number(&t, n).msg(format!("shard {i}")).is_non_negative();
//! ```

pub mod compare;
pub mod context;
pub mod error;
pub mod map;
pub mod mode;
pub mod number;
pub mod render;
pub mod report;
pub mod slice;
pub mod string;
pub mod value;

pub use compare::Num;
pub use context::{MockTest, TestContext, TestRun};
pub use error::{that_error, that_result, ErrorAssertion};
pub use map::{that_map, IntoMapValue, MapAssertion};
pub use mode::{Aborting, FailureMode, Recording};
pub use number::{that_number, NumberAssertion};
pub use render::OutputMode;
pub use report::Failure;
pub use slice::{that_slice, IntoSliceValue, SliceAssertion};
pub use string::{that_string, StrAssertion};
pub use value::{panics, that, Assertion, Has, Holds};

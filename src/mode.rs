//! Failure escalation typestate.
//!
//! Every wrapper starts in [`Recording`] mode, where failures go through
//! [`TestContext::error`] and the chain continues. Calling `must()` on a
//! wrapper consumes it and returns the same wrapper typed with [`Aborting`],
//! after which every failure goes through [`TestContext::fatal`]. Because the
//! switch is a type change rather than a flag, a chain cannot de-escalate:
//! there is no method that produces a `Recording` wrapper from an `Aborting`
//! one.

use crate::context::TestContext;

mod sealed {
    pub trait Sealed {}
}

/// Routes a rendered failure message to the matching sink channel.
///
/// Sealed; the only implementations are [`Recording`] and [`Aborting`].
pub trait FailureMode: sealed::Sealed {
    fn report(ctx: &dyn TestContext, msg: &str);
}

/// Failures are recorded and the chain continues.
pub enum Recording {}

/// Failures abort the current test immediately.
pub enum Aborting {}

impl sealed::Sealed for Recording {}
impl sealed::Sealed for Aborting {}

impl FailureMode for Recording {
    fn report(ctx: &dyn TestContext, msg: &str) {
        ctx.error(msg);
    }
}

impl FailureMode for Aborting {
    fn report(ctx: &dyn TestContext, msg: &str) {
        ctx.fatal(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::MockTest;

    #[test]
    fn recording_uses_error_channel() {
        let m = MockTest::new();
        Recording::report(&m, "oops");
        assert_eq!(m.output(), "error# oops");
    }

    #[test]
    fn aborting_uses_fatal_channel() {
        let m = MockTest::new();
        Aborting::report(&m, "oops");
        assert_eq!(m.output(), "fatal# oops");
    }
}

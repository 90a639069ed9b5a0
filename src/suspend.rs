//! The suspension primitive: a yield capability handed to producer routines,
//! plus the single-use resumption handle that drives them.
//!
//! A routine is an `async` block; awaiting [`Co::yield_value`] is the only
//! sanctioned suspension point. The compiled future is the reified
//! continuation, and polling it with a noop waker is resumption.

use std::{
    cell::Cell,
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll, Waker},
};

use tracing::trace;

use crate::error::{BoxError, GeneratorError};

/// The single in-flight value cell shared between a [`Co`] and its session.
///
/// At most one value is ever in flight: the routine publishes into an `Empty`
/// slot and suspends, the session takes the value back out before resuming.
pub(crate) enum Slot<T> {
    Empty,
    Value(T),
    /// A protocol violation observed inside the routine, reported to the
    /// session on its next look at the slot.
    Poisoned(&'static str),
}

/// The restricted suspend capability passed to a producer routine.
///
/// `Co` cannot be constructed or cloned outside this crate; the only way to
/// hold one is to be the routine it was created for, and its only operation
/// is [`yield_value`](Co::yield_value). Suspending through anything else
/// (awaiting a foreign future) is rejected by the session with
/// [`GeneratorError::InvalidState`].
pub struct Co<T> {
    slot: Rc<Cell<Slot<T>>>,
}

impl<T> Co<T> {
    /// Hand `value` to the consumer and suspend until it has been observed.
    ///
    /// The returned future is `Pending` exactly once; it resolves when the
    /// session resumes the routine past this yield site.
    pub fn yield_value(&mut self, value: T) -> YieldFuture<'_, T> {
        YieldFuture {
            slot: &self.slot,
            value: Some(value),
        }
    }
}

/// Future returned by [`Co::yield_value`].
#[must_use = "yielding does nothing until awaited"]
pub struct YieldFuture<'co, T> {
    slot: &'co Cell<Slot<T>>,
    value: Option<T>,
}

// No self-references; the pin is never relied upon.
impl<T> Unpin for YieldFuture<'_, T> {}

impl<T> Future for YieldFuture<'_, T> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match this.value.take() {
            // First poll: publish the value and transfer control out.
            Some(value) => {
                match this.slot.replace(Slot::Value(value)) {
                    Slot::Empty => trace!("producer suspended with a value"),
                    Slot::Value(_) | Slot::Poisoned(_) => {
                        this.slot
                            .set(Slot::Poisoned("yield while a value is already pending"));
                    }
                }
                Poll::Pending
            }
            // Resumed past the yield site.
            None => Poll::Ready(()),
        }
    }
}

/// A single-use resumption handle over a suspended producer routine.
///
/// [`resume`](RawSession::resume) takes the handle by value, so a consumed or
/// superseded handle cannot be resumed again; the replacement handle comes
/// back in [`Resumed::Yielded`].
pub(crate) struct RawSession<'a, T> {
    routine: Pin<Box<dyn Future<Output = Result<(), BoxError>> + 'a>>,
    slot: Rc<Cell<Slot<T>>>,
}

/// Outcome of resuming a routine: it either suspended with a value or ran to
/// completion. Failures travel through `Err(GeneratorError)` instead.
pub(crate) enum Resumed<'a, T> {
    Yielded(RawSession<'a, T>, T),
    Complete,
}

impl<'a, T> RawSession<'a, T> {
    /// Set up the routine's future without running any of its code; the first
    /// [`resume`](RawSession::resume) starts it.
    pub(crate) fn create<F, Fut>(block: &F, parameter: T) -> Self
    where
        F: Fn(Co<T>, T) -> Fut,
        Fut: Future<Output = Result<(), BoxError>> + 'a,
    {
        let slot = Rc::new(Cell::new(Slot::Empty));
        let co = Co {
            slot: Rc::clone(&slot),
        };
        RawSession {
            routine: Box::pin(block(co, parameter)),
            slot,
        }
    }

    /// Run the routine from its current suspension point until it either
    /// yields, completes, or fails.
    pub(crate) fn resume(mut self) -> Result<Resumed<'a, T>, GeneratorError> {
        trace!("resuming producer");
        let mut cx = Context::from_waker(Waker::noop());
        match self.routine.as_mut().poll(&mut cx) {
            Poll::Pending => match self.slot.replace(Slot::Empty) {
                Slot::Value(value) => Ok(Resumed::Yielded(self, value)),
                Slot::Empty => Err(GeneratorError::InvalidState(
                    "producer suspended outside the yield channel",
                )),
                Slot::Poisoned(msg) => Err(GeneratorError::InvalidState(msg)),
            },
            Poll::Ready(Ok(())) => {
                trace!("producer completed");
                Ok(Resumed::Complete)
            }
            Poll::Ready(Err(err)) => Err(GeneratorError::Producer(err)),
        }
    }
}

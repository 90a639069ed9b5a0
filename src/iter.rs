//! One stateful traversal of a generator's sequence.

use std::mem;

use crate::{
    error::GeneratorError,
    suspend::{RawSession, Resumed},
};

/// Session status. Each variant that can still make progress owns the
/// resumption handle, so advancing consumes the handle by move and stale
/// handles cannot exist.
enum State<'a, T> {
    /// Suspended before the next value; resuming runs producer code.
    NotReady(RawSession<'a, T>),
    /// A produced value awaiting delivery, plus the handle that continues
    /// past the yield that produced it.
    Ready(RawSession<'a, T>, T),
    /// The producer returned or failed. Absorbing.
    Done,
}

/// A live iteration session over a [`Generator`](crate::Generator).
///
/// Single-shot and stateful: it is consumed by traversal. Obtain a fresh one
/// from [`Generator::iter`](crate::Generator::iter) to restart the producer.
///
/// Besides the [`Iterator`] impl, the session exposes the pull protocol
/// directly as [`has_next`](GeneratorIter::has_next) /
/// [`next_value`](GeneratorIter::next_value), which distinguish exhaustion
/// from producer failure.
pub struct GeneratorIter<'a, T> {
    state: State<'a, T>,
}

impl<'a, T> GeneratorIter<'a, T> {
    pub(crate) fn new(session: RawSession<'a, T>) -> Self {
        GeneratorIter {
            state: State::NotReady(session),
        }
    }

    /// Resume the producer if it has not yet handed over a value.
    ///
    /// The state is moved out before the resumption runs, so a failing (or
    /// panicking) producer leaves the session `Done` rather than resumable.
    fn advance(&mut self) -> Result<(), GeneratorError> {
        match mem::replace(&mut self.state, State::Done) {
            State::NotReady(session) => match session.resume()? {
                Resumed::Yielded(session, value) => {
                    self.state = State::Ready(session, value);
                    Ok(())
                }
                Resumed::Complete => Ok(()),
            },
            ready_or_done => {
                self.state = ready_or_done;
                Ok(())
            }
        }
    }

    /// Whether another value is available, resuming the producer to find out
    /// if necessary. Idempotent once a value is pending or the producer is
    /// done.
    ///
    /// # Errors
    ///
    /// Propagates [`GeneratorError::Producer`] or
    /// [`GeneratorError::InvalidState`] from the resumption this call
    /// triggered.
    pub fn has_next(&mut self) -> Result<bool, GeneratorError> {
        self.advance()?;
        Ok(matches!(self.state, State::Ready(..)))
    }

    /// Take the next value, resuming the producer first if necessary.
    ///
    /// Self-driving: callers are never required to call
    /// [`has_next`](GeneratorIter::has_next) beforehand.
    ///
    /// # Errors
    ///
    /// [`GeneratorError::Exhausted`] once the producer has completed, in
    /// addition to the errors `has_next` can raise.
    pub fn next_value(&mut self) -> Result<T, GeneratorError> {
        if !self.has_next()? {
            return Err(GeneratorError::Exhausted);
        }
        match mem::replace(&mut self.state, State::Done) {
            State::Ready(session, value) => {
                self.state = State::NotReady(session);
                Ok(value)
            }
            // has_next returned true, so a value must be pending.
            _ => Err(GeneratorError::InvalidState("ready value vanished")),
        }
    }
}

/// Pull iteration over the session. Exhaustion is `None`; a producer failure
/// is delivered once as `Some(Err(_))`, after which the iterator is fused.
impl<T> Iterator for GeneratorIter<'_, T> {
    type Item = Result<T, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_value() {
            Ok(value) => Some(Ok(value)),
            Err(GeneratorError::Exhausted) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl<T> std::iter::FusedIterator for GeneratorIter<'_, T> {}

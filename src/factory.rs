//! The user-facing generator type and its higher-order constructor.

use std::future::Future;

use crate::{
    error::{BoxError, GeneratorError},
    iter::GeneratorIter,
    suspend::{Co, RawSession},
};

/// A replayable sequence, bound to one producer routine and one starting
/// parameter.
///
/// The generator itself holds no traversal state: every call to
/// [`iter`](Generator::iter) clones the parameter and restarts the routine
/// from the beginning in a fresh [`GeneratorIter`] session. Instances built
/// from the same routine share nothing mutable.
pub struct Generator<T, F> {
    block: F,
    parameter: T,
}

impl<T, F> Generator<T, F> {
    /// Bind `block` to `parameter` without running any of it.
    pub fn new(block: F, parameter: T) -> Self {
        Generator { block, parameter }
    }

    /// Start a fresh iteration session.
    ///
    /// No producer code runs until the session is first driven.
    pub fn iter<'a, Fut>(&self) -> GeneratorIter<'a, T>
    where
        T: Clone,
        F: Fn(Co<T>, T) -> Fut,
        Fut: Future<Output = Result<(), BoxError>> + 'a,
    {
        GeneratorIter::new(RawSession::create(&self.block, self.parameter.clone()))
    }
}

impl<'a, T, F, Fut> IntoIterator for &'a Generator<T, F>
where
    T: Clone,
    F: Fn(Co<T>, T) -> Fut,
    Fut: Future<Output = Result<(), BoxError>> + 'a,
{
    type Item = Result<T, GeneratorError>;
    type IntoIter = GeneratorIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lift a producer routine into a family of generators, one per starting
/// parameter.
///
/// The routine receives the suspend capability and the parameter, and yields
/// by awaiting [`Co::yield_value`]:
///
/// ```
/// use genpull::generator;
///
/// let nums = generator(|mut co, start: i32| async move {
///     for i in 0..=5 {
///         co.yield_value(start + i).await;
///     }
///     Ok(())
/// });
///
/// let seq = nums(10);
/// let v: Result<Vec<_>, _> = seq.iter().collect();
/// assert_eq!(v.unwrap(), vec![10, 11, 12, 13, 14, 15]);
/// ```
pub fn generator<T, F, Fut>(block: F) -> impl Fn(T) -> Generator<T, F>
where
    F: Fn(Co<T>, T) -> Fut + Clone,
    Fut: Future<Output = Result<(), BoxError>>,
{
    move |parameter| Generator::new(block.clone(), parameter)
}

use std::error::Error;

/// Boxed failure returned by a producer routine.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Errors surfaced while driving a generator session.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The producer has completed; there is no value left.
    ///
    /// This is the expected end-of-sequence condition: recoverable, raised
    /// deterministically on every call after completion, and mapped to `None`
    /// by the [`Iterator`] impl.
    #[error("no value left")]
    Exhausted,

    /// The suspension protocol was broken: the producer yielded while a value
    /// was already pending, or suspended through something other than the
    /// yield capability. Fatal to the session.
    #[error("invalid generator state: {0}")]
    InvalidState(&'static str),

    /// The producer routine itself failed. Delivered once, by whichever call
    /// triggered the resumption; the session is exhausted afterwards.
    #[error("producer failed: {0}")]
    Producer(#[source] BoxError),
}

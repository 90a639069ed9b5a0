//! Pull-driven generators on stable Rust.
//!
//! A generator is a lazy, possibly unbounded sequence whose production is
//! written as ordinary sequential code. The producer routine suspends every
//! time it hands over a value and resumes exactly where it left off when the
//! consumer asks for the next one. Suspension is built on `async`/`await`:
//! the routine is an `async` block, awaiting [`Co::yield_value`] is the one
//! sanctioned suspension point, and the session resumes it by polling with a
//! noop waker. No executor, no threads; producer and consumer strictly
//! alternate on the calling thread.
//!
//! # Example
//!
//! ```
//! use genpull::generator;
//!
//! let nums = generator(|mut co, start: i32| async move {
//!     for i in 0..=5 {
//!         co.yield_value(start + i).await;
//!     }
//!     Ok(())
//! });
//!
//! let seq = nums(10);
//! for v in &seq {
//!     println!("{}", v?);
//! }
//! # Ok::<(), genpull::GeneratorError>(())
//! ```
//!
//! A [`Generator`] is replayable: each [`iter`](Generator::iter) call
//! restarts the routine from the beginning with the same parameter. The
//! [`GeneratorIter`] session it returns is single-shot, and can also be
//! driven by hand through the pull protocol:
//!
//! ```
//! use genpull::generator;
//!
//! let countdown = generator(|mut co, from: u32| async move {
//!     for i in (1..=from).rev() {
//!         co.yield_value(i).await;
//!     }
//!     Ok(())
//! });
//!
//! let seq = countdown(2);
//! let mut it = seq.iter();
//! assert!(it.has_next().unwrap());
//! assert_eq!(it.next_value().unwrap(), 2);
//! assert_eq!(it.next_value().unwrap(), 1);
//! assert!(!it.has_next().unwrap());
//! ```
//!
//! # Failure
//!
//! A routine reports failure by returning `Err`; the error surfaces once,
//! from whichever [`has_next`](GeneratorIter::has_next) /
//! [`next_value`](GeneratorIter::next_value) call resumed it, and the
//! session is exhausted afterwards. See [`GeneratorError`].

mod error;
mod factory;
mod iter;
mod suspend;

pub use error::{BoxError, GeneratorError};
pub use factory::{generator, Generator};
pub use iter::GeneratorIter;
pub use suspend::{Co, YieldFuture};

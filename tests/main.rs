use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use genpull::{generator, Co, Generator, GeneratorError};

#[test]
fn yields_in_order_then_exhausts() {
    let nums = generator(|mut co, start: i32| async move {
        for i in 0..=5 {
            co.yield_value(start + i).await;
        }
        Ok(())
    });

    let seq = nums(10);
    let mut it = seq.iter();
    let mut got = vec![];
    while it.has_next().unwrap() {
        got.push(it.next_value().unwrap());
    }
    assert_eq!(got, vec![10, 11, 12, 13, 14, 15]);

    // hasNext stays false forever after.
    assert!(!it.has_next().unwrap());
    assert!(!it.has_next().unwrap());
}

#[test]
fn next_without_has_next_is_equivalent() {
    let make = |p| {
        Generator::new(
            |mut co: Co<u32>, start: u32| async move {
                for i in 0..3 {
                    co.yield_value(start * 10 + i).await;
                }
                Ok(())
            },
            p,
        )
    };

    // Driven by next_value alone.
    let blind = make(7);
    let mut it = blind.iter();
    let mut a = vec![];
    while let Ok(v) = it.next_value() {
        a.push(v);
    }

    // Driven by interleaved has_next/next_value.
    let checked = make(7);
    let mut it = checked.iter();
    let mut b = vec![];
    while it.has_next().unwrap() {
        b.push(it.next_value().unwrap());
    }

    assert_eq!(a, b);
    assert_eq!(a, vec![70, 71, 72]);
}

#[test]
fn exhaustion_is_deterministic() {
    let empty = generator(|_co, _start: u8| async move { Ok(()) });
    let seq = empty(0);
    let mut it = seq.iter();

    // Empty sequence: false on the very first call.
    assert!(!it.has_next().unwrap());

    for _ in 0..3 {
        assert!(matches!(it.next_value(), Err(GeneratorError::Exhausted)));
    }
    assert!(it.next().is_none());
}

#[test]
fn instances_are_independent() {
    let nums = generator(|mut co, start: i64| async move {
        for i in 0..4 {
            co.yield_value(start + i).await;
        }
        Ok(())
    });

    let low = nums(0);
    let high = nums(100);
    let mut a = low.iter();
    let mut b = high.iter();

    // Interleave the two sessions; neither must disturb the other.
    let mut got = vec![];
    for _ in 0..4 {
        got.push(a.next_value().unwrap());
        got.push(b.next_value().unwrap());
    }
    assert_eq!(got, vec![0, 100, 1, 101, 2, 102, 3, 103]);
    assert!(!a.has_next().unwrap());
    assert!(!b.has_next().unwrap());
}

#[test]
fn generator_is_replayable() {
    let nums = generator(|mut co, start: u8| async move {
        co.yield_value(start).await;
        co.yield_value(start + 1).await;
        Ok(())
    });
    let seq = nums(5);

    let first: Result<Vec<_>, _> = seq.iter().collect();
    let second: Result<Vec<_>, _> = seq.iter().collect();
    assert_eq!(first.unwrap(), vec![5, 6]);
    assert_eq!(second.unwrap(), vec![5, 6]);
}

#[test]
fn for_loop_over_generator() {
    let nums = generator(|mut co, start: i32| async move {
        for i in 0..=5 {
            co.yield_value(start + i).await;
        }
        Ok(())
    });
    let seq = nums(10);

    let mut sum = 0;
    for v in &seq {
        sum += v.unwrap();
    }
    assert_eq!(sum, 10 + 11 + 12 + 13 + 14 + 15);
}

#[test]
fn infinite_producer_is_lazy() {
    let fib = generator(|mut co, start: usize| async move {
        let mut a = start;
        let mut b = 1;
        loop {
            co.yield_value(a).await;
            let tmp = a;
            a = b;
            b += tmp;
        }
    });

    let seq = fib(0);
    let v: Result<Vec<_>, _> = seq.iter().take(10).collect();
    assert_eq!(v.unwrap(), vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
}

#[test]
fn producer_failure_surfaces_once() {
    let boom = generator(|mut co, _: i32| async move {
        co.yield_value(1).await;
        co.yield_value(2).await;
        Err("boom".into())
    });
    let seq = boom(0);
    let mut it = seq.iter();

    assert_eq!(it.next_value().unwrap(), 1);
    assert_eq!(it.next_value().unwrap(), 2);

    let err = it.next_value().unwrap_err();
    assert!(matches!(err, GeneratorError::Producer(_)));
    assert_eq!(err.to_string(), "producer failed: boom");

    // The failure is not replayed: the session is exhausted from here on.
    assert!(matches!(it.next_value(), Err(GeneratorError::Exhausted)));
    assert!(!it.has_next().unwrap());
}

#[test]
fn failure_through_has_next() {
    let boom = generator(|_co, _: i32| async move { Err("boom".into()) });
    let seq = boom(0);
    let mut it = seq.iter();

    assert!(matches!(it.has_next(), Err(GeneratorError::Producer(_))));
    assert!(!it.has_next().unwrap());
}

#[test]
fn failed_iterator_fuses() {
    let boom = generator(|mut co, _: i32| async move {
        co.yield_value(1).await;
        Err("boom".into())
    });
    let seq = boom(0);
    let mut it = seq.iter();

    assert!(matches!(it.next(), Some(Ok(1))));
    assert!(matches!(it.next(), Some(Err(GeneratorError::Producer(_)))));
    assert!(it.next().is_none());
    assert!(it.next().is_none());
}

/// A future that suspends through a channel other than the yield capability.
struct Stall;

impl Future for Stall {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        Poll::Pending
    }
}

#[test]
fn foreign_suspension_is_rejected() {
    let sneaky = generator(|mut co, _: i32| async move {
        co.yield_value(1).await;
        Stall.await;
        Ok(())
    });
    let seq = sneaky(0);
    let mut it = seq.iter();

    assert_eq!(it.next_value().unwrap(), 1);
    assert!(matches!(
        it.next_value(),
        Err(GeneratorError::InvalidState(_))
    ));
    // Fatal: the session is done, not retried.
    assert!(matches!(it.next_value(), Err(GeneratorError::Exhausted)));
}

#[test]
fn borrowed_input_producers() {
    let data = [1usize, 2, 3];
    let doubled = Generator::new(
        |mut co: Co<usize>, scale: usize| async move {
            for &n in data.iter() {
                co.yield_value(n * scale).await;
            }
            Ok(())
        },
        2,
    );

    let v: Result<Vec<_>, _> = doubled.iter().collect();
    assert_eq!(v.unwrap(), vec![2, 4, 6]);
}

#[test]
fn runs_under_a_subscriber() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let nums = generator(|mut co, start: i32| async move {
        co.yield_value(start).await;
        Ok(())
    });
    let v: Result<Vec<_>, _> = nums(1).iter().collect();
    assert_eq!(v.unwrap(), vec![1]);
}

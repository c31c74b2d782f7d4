#![allow(dead_code)]

use std::hint::black_box;

/// Unwraps the result of opening counters, or returns from the test if the
/// host does not let us count (no PMU, `perf_event_paranoid`, seccomp...).
macro_rules! open_or_skip {
    ($expr:expr) => {
        match $expr {
            Ok(it) => it,
            Err(perf_counter_group::Error::CounterOpenFailure { counter, source }) => {
                eprintln!("skipped: failed to open `{}`: {}", counter, source);
                return;
            }
            Err(e) => panic!("{}", e),
        }
    };
}
pub(crate) use open_or_skip;

pub fn burn() -> u64 {
    let mut acc = 1u64;
    for i in 1..=200_000u64 {
        acc = black_box(acc.wrapping_mul(i) ^ (i >> 3));
    }
    acc
}

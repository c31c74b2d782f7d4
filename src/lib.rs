//! Groups of `perf_event_open` counters read as one atomic unit.
//!
//! ## Example
//!
//! Count cycles and retired instructions of the (inefficient) fibonacci
//! calculation, both measured over the very same span of execution.
//!
//! ```rust,no_run
//! use perf_counter_group::count::Measurement;
//! use perf_counter_group::event::Counter;
//! use perf_counter_group::stats::OnlineStats;
//!
//! fn fib(n: usize) -> usize {
//!     match n {
//!         0 => 0,
//!         1 => 1,
//!         n => fib(n - 1) + fib(n - 2),
//!     }
//! }
//!
//! let m = Measurement::begin([Counter::Cycles, Counter::Instructions]).unwrap();
//! let mut ipc = OnlineStats::new();
//!
//! for _ in 0..10 {
//!     m.reset(); // Start from zero, the group keeps counting.
//!     std::hint::black_box(fib(20));
//!     let values = m.read_all().unwrap(); // Both counters, in request order.
//!     ipc.push(values[1] as f64 / values[0] as f64);
//! }
//!
//! m.stop(); // Disable and close all counters.
//! println!("IPC: {:.2} ± {:.2}", ipc.mean(), ipc.std());
//! ```
//!
//! ## Platform support
//!
//! Counting requires Linux (or Android). On every other target each attempt to
//! open a group fails with [`Error::UnsupportedPlatform`].
//!
//! Whether a counter can be opened also depends on the CPU and on
//! `/proc/sys/kernel/perf_event_paranoid`, the default options only count user
//! space of the calling process, which unprivileged processes are allowed to do
//! up to level 2.

pub mod config;
pub mod count;
mod error;
pub mod event;
mod ffi;
pub mod registry;
pub mod stats;

pub use error::{Error, Result};
pub use ffi::SUPPORTED;

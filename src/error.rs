use std::io;

use thiserror::Error;

use crate::event::Counter;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The integer code does not name a [`Counter`].
    #[error("unsupported counter kind: {0}")]
    UnsupportedCounterKind(i32),

    /// More distinct counters were requested than a group may hold.
    #[error("maximum number of counters exceeded ({requested} > {max})")]
    TooManyCounters { requested: usize, max: usize },

    /// The kernel refused to open a counter.
    ///
    /// Typical causes are `perf_event_paranoid` restrictions, descriptor limits
    /// and events the CPU does not implement.
    #[error("failed to open counter `{counter}`: {source}")]
    CounterOpenFailure {
        counter: Counter,
        #[source]
        source: io::Error,
    },

    #[error("failed to read counters: {0}")]
    ReadFailure(#[source] io::Error),

    /// Enabling or disabling an open group failed.
    #[error("failed to control counter group: {0}")]
    ControlFailure(#[source] io::Error),

    #[error("counter group {0} does not exist")]
    UnknownGroup(i32),

    /// `perf_event_open` is not available on this target.
    #[error("unsupported platform")]
    UnsupportedPlatform,
}

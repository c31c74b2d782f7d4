//! The catalog of countable events.

use std::fmt;

use crate::error::Error;
use crate::ffi::bindings as b;

#[cfg(test)]
mod test;

/// Supported hardware and software counters.
///
/// Not all counters may be available on the current hardware, and some
/// combinations of counters may fail to open together on some CPUs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum Counter {
    /// Total cycles.
    Cycles = 0,
    /// Retired instructions.
    Instructions = 1,
    /// A clock count specific to the running task, in nanoseconds.
    TaskClock = 2,
    /// The high-resolution per-CPU timer, in nanoseconds.
    CpuClock = 3,
    /// Context switches.
    ContextSwitches = 4,
    /// Retired branch instructions.
    BranchInstructions = 5,
    /// Mispredicted branch instructions.
    BranchMisses = 6,
    /// Cache accesses, usually of the last level cache.
    ///
    /// The exact meaning may vary depending on the CPU.
    CacheReferences = 7,
    /// Cache misses, usually of the last level cache.
    CacheMisses = 8,
}

impl Counter {
    /// Every counter of the catalog, in code order.
    pub const ALL: [Counter; 9] = [
        Counter::Cycles,
        Counter::Instructions,
        Counter::TaskClock,
        Counter::CpuClock,
        Counter::ContextSwitches,
        Counter::BranchInstructions,
        Counter::BranchMisses,
        Counter::CacheReferences,
        Counter::CacheMisses,
    ];

    /// Stable integer code of this counter.
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Counter::Cycles => "Cycles",
            Counter::Instructions => "Instructions",
            Counter::TaskClock => "Task Clock (ns)",
            Counter::CpuClock => "CPU Clock (ns)",
            Counter::ContextSwitches => "Context switches",
            Counter::BranchInstructions => "Branch instructions",
            Counter::BranchMisses => "Branch misses",
            Counter::CacheReferences => "Cache references",
            Counter::CacheMisses => "Cache misses",
        }
    }

    pub(crate) fn event_config(self) -> EventConfig {
        macro_rules! hw {
            ($config:ident) => {
                EventConfig {
                    ty: b::PERF_TYPE_HARDWARE,
                    config: b::$config,
                }
            };
        }
        macro_rules! sw {
            ($config:ident) => {
                EventConfig {
                    ty: b::PERF_TYPE_SOFTWARE,
                    config: b::$config,
                }
            };
        }

        match self {
            Counter::Cycles => hw!(PERF_COUNT_HW_CPU_CYCLES),
            Counter::Instructions => hw!(PERF_COUNT_HW_INSTRUCTIONS),
            Counter::TaskClock => sw!(PERF_COUNT_SW_TASK_CLOCK),
            Counter::CpuClock => sw!(PERF_COUNT_SW_CPU_CLOCK),
            Counter::ContextSwitches => sw!(PERF_COUNT_SW_CONTEXT_SWITCHES),
            Counter::BranchInstructions => hw!(PERF_COUNT_HW_BRANCH_INSTRUCTIONS),
            Counter::BranchMisses => hw!(PERF_COUNT_HW_BRANCH_MISSES),
            Counter::CacheReferences => hw!(PERF_COUNT_HW_CACHE_REFERENCES),
            Counter::CacheMisses => hw!(PERF_COUNT_HW_CACHE_MISSES),
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for Counter {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Counter::ALL
            .get(usize::try_from(code).map_err(|_| Error::UnsupportedCounterKind(code))?)
            .copied()
            .ok_or(Error::UnsupportedCounterKind(code))
    }
}

/// The `(type, config)` pair the kernel identifies an event by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EventConfig {
    pub ty: u32,
    pub config: u64,
}
